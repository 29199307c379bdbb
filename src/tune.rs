//! Micro-benchmarks deciding whether parallelism pays off
//!
//! Parallel execution buys one child's worth of mutate + score work per
//! worker slot, and pays one channel round-trip plus scheduling per child.
//! [benchmark] times both sides on the first initial-population member;
//! [tune] turns the ratio into a worker count, scaling logarithmically so a
//! barely-profitable workload does not fan out onto every core.
use crate::allele::Allele;
use crate::code::ScoredCode;
use crate::errors::Error;
use crate::optimize::OptimizationParams;
use std::sync::mpsc;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_THREADS: usize = 4;

/// Rounds for the in-process cost loops.
const WORK_ROUNDS: u32 = 100;
/// Rounds for the channel round-trip loop; each round spawns a thread.
const COPY_ROUNDS: u32 = 10;

/// Average per-operation costs measured by [benchmark].
///
/// `copy` is deliberately not a memcpy: it is the time to hand one scored
/// code to another thread over a 1-slot channel and get it back, including
/// spawn and synchronization. That is the tax every child pays under
/// parallel execution, which makes it the right denominator for [tune].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BenchmarkCosts {
    pub copy: Duration,
    pub mutate: Duration,
    pub measure_fitness: Duration,
    pub iteration_hook: Duration,
}

/// Time the four primitive costs of one optimization step. Requires the same
/// parameters [optimize](crate::optimize::optimize) does; the hook cost is
/// zero when no hook is set.
pub fn benchmark<T: Allele>(params: &mut OptimizationParams<T>) -> Result<BenchmarkCosts, Error> {
    let measure_fitness =
        params.measure_fitness.clone().ok_or(Error::MissingParameter("measure_fitness"))?;
    let mutate = params.mutate.clone().ok_or(Error::MissingParameter("mutate"))?;
    params.validate()?;
    let subject = match params.initial_population.first() {
        Some(code) => code.clone(),
        None => {
            return Err(Error::BadParameter("initial_population must not be empty".to_string()))
        }
    };

    let mut scratch = subject.clone();
    let started = Instant::now();
    for _ in 0..WORK_ROUNDS {
        (mutate)(&mut scratch);
    }
    let cost_mutate = started.elapsed() / WORK_ROUNDS;

    let started = Instant::now();
    for _ in 0..WORK_ROUNDS {
        let _ = (measure_fitness)(&scratch);
    }
    let cost_measure_fitness = started.elapsed() / WORK_ROUNDS;

    let scored = ScoredCode::new(subject, 0.0);
    let started = Instant::now();
    for _ in 0..COPY_ROUNDS {
        let (outbound_sender, outbound_receiver) = mpsc::sync_channel::<ScoredCode<T>>(1);
        let (return_sender, return_receiver) = mpsc::sync_channel::<ScoredCode<T>>(1);
        std::thread::scope(|scope| {
            scope.spawn(move || {
                if let Ok(received) = outbound_receiver.recv() {
                    let _ = return_sender.send(received);
                }
            });
            let _ = outbound_sender.send(scored.clone());
            let _ = return_receiver.recv();
        });
    }
    let cost_copy = started.elapsed() / COPY_ROUNDS;

    let cost_iteration_hook = match params.iteration_hook.as_mut() {
        Some(hook) => {
            let stand_in: Vec<ScoredCode<T>> = vec![scored; params.population_size];
            let started = Instant::now();
            for round in 0..WORK_ROUNDS {
                hook(round as usize, &stand_in);
            }
            started.elapsed() / WORK_ROUNDS
        }
        None => Duration::ZERO,
    };

    let costs = BenchmarkCosts {
        copy: cost_copy,
        mutate: cost_mutate,
        measure_fitness: cost_measure_fitness,
        iteration_hook: cost_iteration_hook,
    };
    log::debug!("benchmark costs: {:?}", costs);
    Ok(costs)
}

/// Pick a worker count for [optimize](crate::optimize::optimize):
/// `floor(log2(work / copy))` clamped to `[1, max_threads]`, where `work` is
/// the per-child mutate + score (+ hook) cost and `copy` the parallelism
/// tax measured by [benchmark]. One means: stay sequential.
pub fn tune<T: Allele>(
    params: &mut OptimizationParams<T>,
    max_threads: Option<usize>,
) -> Result<usize, Error> {
    let max_threads = max_threads.unwrap_or(DEFAULT_MAX_THREADS).max(1);
    let costs = benchmark(params)?;
    let work = costs.mutate + costs.measure_fitness + costs.iteration_hook;
    let ratio = work.as_secs_f64() / costs.copy.as_secs_f64();
    // NaN and the infinities saturate in the cast, so the clamp covers them.
    let workers = ratio.log2().floor() as i64;
    Ok(workers.clamp(1, max_threads as i64) as usize)
}
