use std::thread;

use crossbeam_channel::{
    bounded,
    Receiver,
    Sender
};
use tracing::{
    debug,
    trace
};

use crate::function::decorator::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 一次交替讀寫的結果。
///
/// 其中一方提前離開（被中斷）時，`written` 與 `observed` 只包含已完成的步驟，
/// 這是合法的結果而非錯誤。
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeReport {
    pub written: usize,
    pub observed: Vec<Point>,
    pub error: Option<TabulatedFunctionError>
}

impl ExchangeReport {
    pub fn is_complete(&self, count: usize) -> bool {
        self.error.is_none() && self.written == count && self.observed.len() == count
    }
}

// ─────────────────────────────────────────────
// 交替協定
// ─────────────────────────────────────────────
//
// writer：寫入 y(i) → 把 i 交給 reader → 等 reader 回覆 → 下一個 i
// reader：收到 i → 讀取 (x(i), y(i)) → 回覆 writer → 等下一個 i
//
// 兩條容量為 1 的 channel 各負責一個方向，輪到誰由 channel 決定。
// 最後一步雙方都不再等待。
// 任一方離開時它的 channel 端點會被 drop，另一方的 send/recv 立刻失敗並結束迴圈，
// 不會永久卡住。

/// writer 把整張表的 y 設為 `value`，reader 逐一讀回，兩者嚴格交替。
pub fn exchange<T>(table: &SynchronizedTabulatedFunction<T>, value: f64) -> ExchangeReport
    where T: TabulatedFunction + Send {
    run(table, value, None)
}

/// 與 `exchange` 相同，但 reader 讀完 `reads` 步後即被中斷。
pub fn exchange_interrupted<T>(table: &SynchronizedTabulatedFunction<T>,
                               value: f64,
                               reads: usize) -> ExchangeReport
    where T: TabulatedFunction + Send {
    run(table, value, Some(reads))
}

fn run<T>(table: &SynchronizedTabulatedFunction<T>,
          value: f64,
          reader_limit: Option<usize>) -> ExchangeReport
    where T: TabulatedFunction + Send {
    let count = table.count();
    let (index_tx, index_rx) = bounded::<usize>(1);
    let (ack_tx, ack_rx) = bounded::<()>(1);

    let (writer, reader) = thread::scope(|scope| {
        let writer = scope.spawn(move || write_steps(table, value, count, index_tx, ack_rx));
        let reader = scope.spawn(move || read_steps(table, count, reader_limit, index_rx, ack_tx));
        (join_step(writer.join()), join_step(reader.join()))
    });

    let (written, write_error) = writer;
    let (observed, read_error) = reader;
    debug!(count, written, read = observed.len(), "read/write exchange finished");
    ExchangeReport { written, observed, error: write_error.or(read_error) }
}

fn join_step<R>(joined: thread::Result<(R, Option<TabulatedFunctionError>)>) -> (R, Option<TabulatedFunctionError>)
    where R: Default {
    joined.unwrap_or_else(|_| (R::default(), Some(TabulatedFunctionError::WorkerPool("exchange thread panicked".to_owned()))))
}

fn write_steps<T>(table: &SynchronizedTabulatedFunction<T>,
                  value: f64,
                  count: usize,
                  index_tx: Sender<usize>,
                  ack_rx: Receiver<()>) -> (usize, Option<TabulatedFunctionError>)
    where T: TabulatedFunction {
    let mut written = 0;
    for index in 0..count {
        if let Err(error) = table.set_y(index, value) {
            return (written, Some(error));
        }
        written += 1;
        trace!(index, value, "writer step");
        if index_tx.send(index).is_err() {
            break;
        }
        if index + 1 < count && ack_rx.recv().is_err() {
            break;
        }
    }
    (written, None)
}

fn read_steps<T>(table: &SynchronizedTabulatedFunction<T>,
                 count: usize,
                 limit: Option<usize>,
                 index_rx: Receiver<usize>,
                 ack_tx: Sender<()>) -> (Vec<Point>, Option<TabulatedFunctionError>)
    where T: TabulatedFunction {
    let mut observed = Vec::with_capacity(count);
    while limit.is_none_or(|limit| observed.len() < limit) {
        let Ok(index) = index_rx.recv() else {
            break;
        };
        let point = match (table.x(index), table.y(index)) {
            (Ok(x), Ok(y)) => Point::new(x, y),
            (Err(error), _) | (_, Err(error)) => return (observed, Some(error))
        };
        trace!(index, x = point.x(), y = point.y(), "reader step");
        observed.push(point);
        if index + 1 == count || ack_tx.send(()).is_err() {
            break;
        }
    }
    (observed, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;

    fn table(count: usize) -> SynchronizedTabulatedFunction<LinkedListTabulatedFunction> {
        let base = LinkedListTabulatedFunction::from_function(&|x: f64| x, 0.0, (count - 1) as f64, count).unwrap();
        SynchronizedTabulatedFunction::new(base)
    }

    #[test]
    fn every_write_is_observed_in_order() {
        let shared = table(50);
        let report = exchange(&shared, 7.0);
        assert!(report.is_complete(50));
        for (index, point) in report.observed.iter().enumerate() {
            assert_eq!(point.x(), index as f64);
            assert_eq!(point.y(), 7.0);
        }
    }

    #[test]
    fn interrupted_reader_stops_the_writer() {
        let shared = table(20);
        let report = exchange_interrupted(&shared, -1.0, 5);
        assert_eq!(report.observed.len(), 5);
        assert!(report.written >= 5 && report.written <= 6);
        assert!(report.error.is_none());
        assert!(!report.is_complete(20));
        assert_eq!(shared.y(19), Ok(19.0));
    }

    #[test]
    fn single_point_table_needs_no_acknowledgement() {
        let shared = table(2);
        shared.remove(1).unwrap();
        let report = exchange(&shared, 3.0);
        assert!(report.is_complete(1));
    }
}
