use tracing::trace;

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    approx_eq,
    interpolate,
    sample_function,
    validate_samples,
    Insertable,
    Removable,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

// ─────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────
//
// 環狀雙向鏈結串列，但節點存放在 arena（Vec<Node>）中，
// prev / next 是 arena 內的索引而非指標。
// 被移除的節點槽位記錄在 free_slots，下次插入時重用。

#[derive(Debug, Clone)]
struct Node {
    x: f64,
    y: f64,
    prev: usize,
    next: usize
}

/// 以環狀雙向鏈結串列儲存的表列函數。
///
/// `head` 指向 x 最小的節點，`head` 的 prev 即為 x 最大的節點。
/// 以索引存取時會從較近的一端出發，最多走 count / 2 步。
#[derive(Debug, Clone)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    free_slots: Vec<usize>,
    head: usize,
    count: usize
}

impl LinkedListTabulatedFunction {
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        Self::from_slices(&x_values, &y_values)
    }

    pub fn from_slices(x_values: &[f64], y_values: &[f64]) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        validate_samples(x_values, y_values)?;
        Ok(Self::build(x_values, y_values))
    }

    pub fn from_function<F>(source: &F,
                            x_from: f64,
                            x_to: f64,
                            count: usize) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        let (x_values, y_values) = sample_function(source, x_from, x_to, count)?;
        Ok(Self::build(&x_values, &y_values))
    }

    /// 呼叫前必須已通過 `validate_samples`。
    fn build(x_values: &[f64], y_values: &[f64]) -> LinkedListTabulatedFunction {
        let count = x_values.len();
        let nodes = x_values
            .iter()
            .zip(y_values.iter())
            .enumerate()
            .map(|(i, (&x, &y))| Node {
                x,
                y,
                prev: (i + count - 1) % count,
                next: (i + 1) % count
            })
            .collect();
        LinkedListTabulatedFunction { nodes, free_slots: Vec::new(), head: 0, count }
    }

    fn check_index(&self, index: usize) -> Result<(), TabulatedFunctionError> {
        if index >= self.count {
            Err(TabulatedFunctionError::IndexOutOfRange { index, count: self.count })
        } else {
            Ok(())
        }
    }

    /// 第 `index` 個節點在 arena 中的位置。
    fn slot_of(&self, index: usize) -> usize {
        if index <= self.count / 2 {
            let mut slot = self.head;
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
            slot
        } else {
            let mut slot = self.nodes[self.head].prev;
            for _ in 0..(self.count - 1 - index) {
                slot = self.nodes[slot].prev;
            }
            slot
        }
    }

    fn node(&self, index: usize) -> Result<&Node, TabulatedFunctionError> {
        self.check_index(index)?;
        Ok(&self.nodes[self.slot_of(index)])
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.free_slots.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            },
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// 在 `before` 之前接上新節點，回傳新節點的槽位。
    fn link_before(&mut self, before: usize, x: f64, y: f64) -> usize {
        let prev = self.nodes[before].prev;
        let slot = self.allocate(Node { x, y, prev, next: before });
        self.nodes[prev].next = slot;
        self.nodes[before].prev = slot;
        self.count += 1;
        slot
    }

    fn slots(&self) -> NodeSlots<'_> {
        NodeSlots { list: self, slot: self.head, remaining: self.count }
    }
}

struct NodeSlots<'a> {
    list: &'a LinkedListTabulatedFunction,
    slot: usize,
    remaining: usize
}

impl<'a> Iterator for NodeSlots<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.slot];
        self.slot = node.next;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.node(index)?.x)
    }

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.node(index)?.y)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.check_index(index)?;
        let slot = self.slot_of(index);
        self.nodes[slot].y = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.slots().position(|node| approx_eq(node.x, x))
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.slots().position(|node| approx_eq(node.y, y))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.slots().map(|node| Point::new(node.x, node.y)))
    }

    fn left_bound(&self) -> Result<f64, TabulatedFunctionError> {
        Ok(self.nodes[self.head].x)
    }

    fn right_bound(&self) -> Result<f64, TabulatedFunctionError> {
        Ok(self.nodes[self.nodes[self.head].prev].x)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        let greater = self.slots().position(|node| node.x > x);
        Ok(match greater {
            Some(0) => 0,
            Some(index) => index - 1,
            None => self.count - 1
        })
    }

    /// 單次走訪找出區間兩端，避免對 x(i)、x(i+1) 各自從頭走一次。
    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        self.check_index(floor_index)?;
        if self.count == 1 {
            return Ok(self.nodes[self.head].y);
        }
        let left = &self.nodes[self.slot_of(floor_index.min(self.count - 2))];
        let right = &self.nodes[left.next];
        Ok(interpolate(x, left.x, right.x, left.y, right.y))
    }
}

impl Insertable for LinkedListTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        if x.is_nan() {
            return Err(TabulatedFunctionError::UnsortedInput { index: self.count });
        }
        if let Some(index) = self.index_of_x(x) {
            let slot = self.slot_of(index);
            self.nodes[slot].y = y;
            return Ok(());
        }

        let position = self.slots().position(|node| node.x > x);
        match position {
            Some(0) => {
                // 新的最小值：接在 head 之前並成為新的 head
                let head = self.head;
                self.head = self.link_before(head, x, y);
            },
            Some(index) => {
                let before = self.slot_of(index);
                self.link_before(before, x, y);
            },
            None => {
                // 新的最大值：環狀串列中 head 之前就是尾端
                let head = self.head;
                self.link_before(head, x, y);
            }
        }
        trace!(x, y, count = self.count, "inserted point into linked list table");
        Ok(())
    }
}

impl Removable for LinkedListTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.check_index(index)?;
        if self.count == 1 {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        let slot = self.slot_of(index);
        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if slot == self.head {
            self.head = next;
        }
        self.free_slots.push(slot);
        self.count -= 1;
        trace!(index, count = self.count, "removed point from linked list table");
        Ok(())
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.apply(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::from_slices(&[1.0, 2.0, 3.0, 4.0, 5.0],
                                                 &[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap()
    }

    fn xs(f: &LinkedListTabulatedFunction) -> Vec<f64> {
        f.iter().map(|pt| pt.x()).collect()
    }

    #[test]
    fn index_access_from_both_ends() {
        let f = table();
        for i in 0..5 {
            assert_eq!(f.x(i), Ok((i + 1) as f64));
            assert_eq!(f.y(i), Ok(10.0 * (i + 1) as f64));
        }
        assert_eq!(f.x(5), Err(TabulatedFunctionError::IndexOutOfRange { index: 5, count: 5 }));
    }

    #[test]
    fn bounds_follow_head_and_tail() {
        let mut f = table();
        assert_eq!(f.left_bound(), Ok(1.0));
        assert_eq!(f.right_bound(), Ok(5.0));
        f.insert(0.5, 5.0).unwrap();
        f.insert(6.0, 60.0).unwrap();
        assert_eq!(f.left_bound(), Ok(0.5));
        assert_eq!(f.right_bound(), Ok(6.0));
    }

    #[test]
    fn insert_relinks_in_sorted_position() {
        let mut f = LinkedListTabulatedFunction::from_slices(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
        f.insert(1.5, 99.0).unwrap();
        assert_eq!(f.count(), 4);
        assert_eq!(xs(&f), vec![1.0, 1.5, 2.0, 3.0]);
        assert_eq!(f.y(1), Ok(99.0));
        f.insert(3.0, 33.0).unwrap();
        assert_eq!(f.count(), 4);
        assert_eq!(f.y(3), Ok(33.0));
    }

    #[test]
    fn remove_relinks_and_moves_head() {
        let mut f = table();
        f.remove(0).unwrap();
        assert_eq!(f.left_bound(), Ok(2.0));
        f.remove(3).unwrap();
        assert_eq!(f.right_bound(), Ok(4.0));
        f.remove(1).unwrap();
        assert_eq!(xs(&f), vec![2.0, 4.0]);
        assert_eq!(f.remove(2), Err(TabulatedFunctionError::IndexOutOfRange { index: 2, count: 2 }));
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut f = table();
        f.remove(2).unwrap();
        f.insert(2.5, 25.0).unwrap();
        assert_eq!(f.nodes.len(), 5);
        assert_eq!(xs(&f), vec![1.0, 2.0, 2.5, 4.0, 5.0]);
        for i in 0..f.count() - 1 {
            assert!(f.x(i).unwrap() < f.x(i + 1).unwrap());
        }
    }

    #[test]
    fn last_point_cannot_be_removed() {
        let mut f = LinkedListTabulatedFunction::from_slices(&[1.0], &[1.0]).unwrap();
        assert_eq!(f.remove(0), Err(TabulatedFunctionError::EmptyTable));
    }

    #[test]
    fn apply_matches_contract() {
        let f = table();
        assert_eq!(f.apply(3.0), Ok(30.0));
        assert!((f.apply(3.25).unwrap() - 32.5).abs() < 1e-10);
        assert!((f.apply(0.0).unwrap() - 0.0).abs() < 1e-10);
        assert!((f.apply(7.0).unwrap() - 70.0).abs() < 1e-10);
        assert_eq!(f.floor_index_of_x(5.0), Ok(4));
        assert_eq!(f.floor_index_of_x(-1.0), Ok(0));
    }

    #[test]
    fn set_y_reaches_back_half() {
        let mut f = table();
        f.set_y(4, -1.0).unwrap();
        f.set_y(3, -2.0).unwrap();
        assert_eq!(f.index_of_y(-1.0), Some(4));
        assert_eq!(f.index_of_y(-2.0), Some(3));
        assert_eq!(f.index_of_x(4.0), Some(3));
    }

    #[test]
    fn sampling_with_bad_bounds_is_rejected() {
        assert!(matches!(LinkedListTabulatedFunction::from_function(&|x: f64| x, f64::NAN, 1.0, 3),
                         Err(TabulatedFunctionError::NonFiniteBound { .. })));
        let next = f64::from_bits(1.0_f64.to_bits() + 1);
        assert!(matches!(LinkedListTabulatedFunction::from_function(&|x: f64| x, 1.0, next, 3),
                         Err(TabulatedFunctionError::UnsortedInput { index: 1 })));
        let f = LinkedListTabulatedFunction::from_function(&|x: f64| x, 0.0, 1.0, 3).unwrap();
        assert_eq!(xs(&f), vec![0.0, 0.5, 1.0]);
    }
}
