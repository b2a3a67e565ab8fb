use std::env;
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::thread;

use tracing::info;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt
};

use tabfunc::concurrent::multiplyingtask::MultiplyingTask;
use tabfunc::concurrent::readwriteexchange::exchange;
use tabfunc::configuration::Configuration;
use tabfunc::function::decorator::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabfunc::function::tabulatedfunction::TabulatedFunction;
use tabfunc::io::pointsequence::write_json;
use tabfunc::operator::newtonrootfinder::NewtonRootFinder;
use tabfunc::operator::tabulateddifferentialoperator::TabulatedDifferentialOperator;

const SAMPLE_COUNT: usize = 101;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabfunc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match env::args().nth(1) {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::new()
    };
    let backend = config.backend();
    info!(?backend, "configuration loaded");

    let sine = backend.create_from_function(&|x: f64| x.sin(), 0.0, std::f64::consts::PI, SAMPLE_COUNT)?;
    println!("sin(pi/4) ~ {:.6}", sine.apply(std::f64::consts::FRAC_PI_4)?);

    let derivative = TabulatedDifferentialOperator::new(backend).derive(&sine)?;
    println!("d/dx sin at 0 ~ {:.6}", derivative.apply(0.0)?);

    let shared = Arc::new(SynchronizedTabulatedFunction::new(sine));
    let integral = config.integrator()?.integrate(&*shared, 0.0, std::f64::consts::PI, 10_000)?;
    println!("integral of sin over [0, pi] ~ {:.6}", integral);

    let root = NewtonRootFinder::default().find_root(&|x: f64| x.cos(), 1.0)?;
    println!("cos root near 1 ~ {:.10}", root);
    let slope = config.stepping_operator()?.derivative_at(&|x: f64| x * x, 3.0)?;
    println!("d/dx x^2 at 3 ~ {:.6}", slope);

    let report = exchange(&shared, 0.5);
    println!("exchange wrote {} and observed {} of {} points",
             report.written, report.observed.len(), shared.count());

    let handles: Vec<_> = [2.0, 3.0]
        .into_iter()
        .map(|factor| {
            let task = MultiplyingTask::new(Arc::clone(&shared), factor);
            thread::spawn(move || task.run())
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| "multiplying task panicked")??;
    }
    println!("after multiplying tasks y(0) = {}", shared.y(0)?);

    info!(count = shared.count(), "writing table");
    write_json(&*shared, io::stdout().lock())?;
    println!();
    Ok(())
}
