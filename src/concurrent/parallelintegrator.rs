use rayon::{
    ThreadPool,
    ThreadPoolBuilder
};
use tracing::{
    debug,
    trace
};

use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 1000;

/// 複合 Simpson 法，n 為奇數時先進位成偶數。
///
///   ∫ f ≈ h/3 · [f(a) + 4·Σf(奇數點) + 2·Σf(偶數內點) + f(b)]
pub fn simpson<F>(function: &F, a: f64, b: f64, subdivisions: usize) -> Result<f64, TabulatedFunctionError>
    where F: MathFunction + ?Sized {
    let n = round_up_to_even(subdivisions.max(1));
    let h = (b - a) / n as f64;
    let mut sum = function.value(a)? + function.value(b)?;
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * function.value(a + h * i as f64)?;
    }
    Ok(sum * h / 3.0)
}

fn round_up_to_even(n: usize) -> usize {
    n + n % 2
}

// ─────────────────────────────────────────────
// ParallelIntegrator
// ─────────────────────────────────────────────
//
// 分治：子區間數低於門檻時直接做 Simpson，否則從中點切成兩半，
// 各自帶 n/2 個子區間，以 rayon::join 讓一半在其他 worker 上執行、
// 另一半在目前的執行緒上執行，最後相加。
//
// 兄弟任務之間沒有共享的可變狀態，不需要任何鎖。
// 切分方式只取決於 n 與門檻，與 worker 數量無關，
// 因此無論執行緒多寡，加總順序都相同，結果逐位元一致。

pub struct ParallelIntegrator {
    sequential_threshold: usize,
    pool: Option<ThreadPool>
}

impl ParallelIntegrator {
    /// 使用 rayon 的全域 pool。
    pub fn new(sequential_threshold: usize) -> ParallelIntegrator {
        ParallelIntegrator { sequential_threshold, pool: None }
    }

    /// 使用專屬、固定大小的 pool。
    pub fn with_worker_threads(sequential_threshold: usize,
                               worker_threads: usize) -> Result<ParallelIntegrator, TabulatedFunctionError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|index| format!("integrator-{}", index))
            .build()
            .map_err(|error| TabulatedFunctionError::WorkerPool(error.to_string()))?;
        Ok(ParallelIntegrator { sequential_threshold, pool: Some(pool) })
    }

    pub fn sequential_threshold(&self) -> usize {
        self.sequential_threshold
    }

    pub fn integrate<F>(&self,
                        function: &F,
                        a: f64,
                        b: f64,
                        subdivisions: i64) -> Result<f64, TabulatedFunctionError>
        where F: MathFunction + Sync + ?Sized {
        if !(a < b) {
            return Err(TabulatedFunctionError::InvalidRange { from: a, to: b });
        }
        if subdivisions <= 0 {
            return Err(TabulatedFunctionError::InvalidSubdivisions { subdivisions });
        }
        let n = round_up_to_even(subdivisions as usize);
        debug!(a, b, subdivisions = n, threshold = self.sequential_threshold, "parallel integration");

        match &self.pool {
            Some(pool) => pool.install(|| self.split(function, a, b, n)),
            None => self.split(function, a, b, n)
        }
    }

    fn split<F>(&self, function: &F, a: f64, b: f64, n: usize) -> Result<f64, TabulatedFunctionError>
        where F: MathFunction + Sync + ?Sized {
        // 門檻設得過小時，n < 4 仍須停止切分
        if n < self.sequential_threshold || n < 4 {
            return simpson(function, a, b, n);
        }
        let mid = a + (b - a) / 2.0;
        let half = n / 2;
        trace!(a, mid, b, half, "fork");
        let (left, right) = rayon::join(
            || self.split(function, a, mid, half),
            || self.split(function, mid, b, half)
        );
        Ok(left? + right?)
    }
}

impl Default for ParallelIntegrator {
    fn default() -> Self {
        ParallelIntegrator::new(DEFAULT_SEQUENTIAL_THRESHOLD)
    }
}
