use serde::{
    Deserialize,
    Serialize
};

/// 單一取樣點 (x, y)。
///
/// 迭代時一律產生新的副本，不會指向表格內部的儲存空間。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}
