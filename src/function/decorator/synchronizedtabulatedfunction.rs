use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError
};

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    Insertable,
    Removable,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 執行緒安全的表列函數。
///
/// 每個操作都在同一把 mutex 內完成，離開時（包含錯誤路徑）自動釋放。
/// 固有方法皆以 `&self` 取用，可直接透過 `Arc` 在多條執行緒間共享；
/// `TabulatedFunction` 的實作只是轉呼叫這些固有方法。
///
/// # 迭代
/// `iter()` 在持鎖期間複製全部的點，之後的走訪不再持鎖，
/// 因此取得迭代器後對表格的修改不會影響它。
///
/// # 複合操作
/// `run_exclusive` 在整段 closure 期間持鎖，讓「讀取 → 計算 → 寫回」對其他使用者而言是不可分割的。
pub struct SynchronizedTabulatedFunction<T> {
    inner: Mutex<T>
}

impl<T> SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction {
    pub fn new(inner: T) -> SynchronizedTabulatedFunction<T> {
        SynchronizedTabulatedFunction { inner: Mutex::new(inner) }
    }

    /// 持有 lock 的 closure 若 panic，mutex 會被標記為 poisoned；
    /// 表格本身仍滿足排序不變量（每個操作都是先檢查再寫入），故直接取回內容繼續使用。
    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn run_exclusive<R, F>(&self, op: F) -> R
        where F: FnOnce(&mut T) -> R {
        let mut guard = self.lock();
        op(&mut guard)
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().x(index)
    }

    pub fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().y(index)
    }

    pub fn set_y(&self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.lock().set_y(index, value)
    }

    pub fn index_of_x(&self, x: f64) -> Option<usize> {
        self.lock().index_of_x(x)
    }

    pub fn index_of_y(&self, y: f64) -> Option<usize> {
        self.lock().index_of_y(y)
    }

    pub fn left_bound(&self) -> Result<f64, TabulatedFunctionError> {
        self.lock().left_bound()
    }

    pub fn right_bound(&self) -> Result<f64, TabulatedFunctionError> {
        self.lock().right_bound()
    }

    pub fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        self.lock().floor_index_of_x(x)
    }

    pub fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().apply(x)
    }

    /// 持鎖期間建立的快照。
    pub fn iter(&self) -> std::vec::IntoIter<Point> {
        self.points().into_iter()
    }

    pub fn points(&self) -> Vec<Point> {
        self.lock().points()
    }
}

impl<T> SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction + Insertable {
    pub fn insert(&self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        self.lock().insert(x, y)
    }
}

impl<T> SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction + Removable {
    pub fn remove(&self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.lock().remove(index)
    }
}

impl<T> TabulatedFunction for SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction {
    fn count(&self) -> usize                                        { Self::count(self) }
    fn x(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { Self::x(self, i) }
    fn y(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { Self::y(self, i) }
    fn index_of_x(&self, x: f64) -> Option<usize>                   { Self::index_of_x(self, x) }
    fn index_of_y(&self, y: f64) -> Option<usize>                   { Self::index_of_y(self, y) }
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>          { Box::new(Self::iter(self)) }
    fn left_bound(&self) -> Result<f64, TabulatedFunctionError>     { Self::left_bound(self) }
    fn right_bound(&self) -> Result<f64, TabulatedFunctionError>    { Self::right_bound(self) }
    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError>  { Self::apply(self, x) }
    fn points(&self) -> Vec<Point>                                  { Self::points(self) }

    fn set_y(&mut self, i: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        Self::set_y(self, i, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        Self::floor_index_of_x(self, x)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().extrapolate_right(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().interpolate_at(x, floor_index)
    }
}

impl<T> Insertable for SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction + Insertable {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        Self::insert(self, x, y)
    }
}

impl<T> Removable for SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction + Removable {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        Self::remove(self, index)
    }
}

impl<T> MathFunction for SynchronizedTabulatedFunction<T> where
    T: TabulatedFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        Self::apply(self, x)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;

    fn shared() -> Arc<SynchronizedTabulatedFunction<ArrayTabulatedFunction>> {
        let base = ArrayTabulatedFunction::from_slices(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
        Arc::new(SynchronizedTabulatedFunction::new(base))
    }

    #[test]
    fn snapshot_iterator_ignores_later_mutation() {
        let f = shared();
        let snapshot = f.iter();
        f.set_y(0, -1.0).unwrap();
        f.insert(2.5, 25.0).unwrap();
        let ys: Vec<f64> = snapshot.map(|pt| pt.y()).collect();
        assert_eq!(ys, vec![10.0, 20.0, 30.0]);
        assert_eq!(f.count(), 4);
        assert_eq!(f.y(0), Ok(-1.0));
    }

    #[test]
    fn errors_release_the_lock() {
        let f = shared();
        assert!(f.x(10).is_err());
        assert!(f.set_y(10, 0.0).is_err());
        assert_eq!(f.x(0), Ok(1.0));
    }

    #[test]
    fn run_exclusive_makes_read_modify_write_atomic() {
        let f = shared();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let f = Arc::clone(&f);
                thread::spawn(move || {
                    for _ in 0..100 {
                        f.run_exclusive(|table| {
                            let y = table.y(0)?;
                            table.set_y(0, y + 1.0)
                        }).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(f.y(0), Ok(810.0));
    }

    #[test]
    fn trait_view_locks_as_well() {
        fn bump<T: TabulatedFunction>(table: &mut T) {
            let y = table.y(1).unwrap();
            table.set_y(1, y * 2.0).unwrap();
        }
        let mut f = SynchronizedTabulatedFunction::new(
            ArrayTabulatedFunction::from_slices(&[0.0, 1.0], &[1.0, 2.0]).unwrap()
        );
        bump(&mut f);
        assert_eq!(f.into_inner().y(1), Ok(4.0));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let f = shared();
        let g = Arc::clone(&f);
        let _ = thread::spawn(move || {
            g.run_exclusive(|table| {
                if table.count() > 0 {
                    panic!("boom");
                }
            });
        }).join();
        assert_eq!(f.apply(2.0), Ok(20.0));
    }
}
