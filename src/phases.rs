//! Two-phase coordinator plus the demo and benchmark runners.
//!
//! Each phase launches exactly two worker threads and joins both before
//! anything else happens; the joins are the only barrier between phase one
//! (compute and store) and phase two (load and report).

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::log_dev;
use crate::matrix::Matrix;
use crate::report;
use crate::result_cell::ResultCell;
use crate::types::{Element, Phase, RunError};

// Demo defaults matching the classic classroom setup.
const DEFAULT_SIDE: usize = 4;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_LO: Element = 1;
const DEFAULT_HI: Element = 9;
// Benchmark defaults: large enough to measure, quick enough for a laptop.
const BENCH_SIDE: usize = 256;
const BENCH_ITERATIONS: usize = 100;

const WORKER_LABELS: [&str; 2] = ["Worker 1", "Worker 2"];

/// Best-effort CPU user/system time snapshot (seconds) on Unix platforms.
#[cfg(unix)]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    use libc::{RUSAGE_SELF, getrusage, rusage};
    let mut usage: rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { getrusage(RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let user = usage.ru_utime.tv_sec as f64 + (usage.ru_utime.tv_usec as f64 / 1_000_000.0);
    let sys = usage.ru_stime.tv_sec as f64 + (usage.ru_stime.tv_usec as f64 / 1_000_000.0);
    Some((user, sys))
}

/// Stub on non-Unix platforms.
#[cfg(not(unix))]
fn cpu_times_seconds() -> Option<(f64, f64)> {
    None
}

/// Phase one: each worker computes the diagonal sum of its own matrix and
/// stores it into its own cell. Returns once both workers have finished.
fn compute_phase(jobs: [(String, Matrix, Arc<ResultCell>); 2]) -> Result<(), RunError> {
    let mut handles = Vec::with_capacity(jobs.len());
    for (index, (label, matrix, cell)) in jobs.into_iter().enumerate() {
        let worker_label = label.clone();
        let handle = thread::Builder::new()
            .name(format!("compute-{}", index + 1))
            .spawn(move || -> Result<(), RunError> {
                let sum = matrix.diagonal_sum()?;
                cell.store(sum);
                log_dev!("[PHASE1] {worker_label} stored sum={sum}");
                Ok(())
            })
            .map_err(|_| RunError::ConcurrencyFault {
                worker: label.clone(),
                phase: Phase::Compute,
            })?;
        handles.push((label, handle));
    }

    // Joining both handles is the phase barrier: phase two never starts
    // before every compute worker has returned.
    for (label, handle) in handles {
        match handle.join() {
            Ok(result) => result?,
            Err(_) => {
                return Err(RunError::ConcurrencyFault {
                    worker: label,
                    phase: Phase::Compute,
                });
            }
        }
    }
    Ok(())
}

/// Phase two: each worker loads its own cell and, when `emit` is set,
/// prints the labeled sum line. Loaded values are returned in job order.
fn report_phase(
    jobs: [(String, Arc<ResultCell>); 2],
    emit: bool,
) -> Result<[Option<Element>; 2], RunError> {
    let mut handles = Vec::with_capacity(jobs.len());
    for (index, (label, cell)) in jobs.into_iter().enumerate() {
        let worker_label = label.clone();
        let handle = thread::Builder::new()
            .name(format!("report-{}", index + 1))
            .spawn(move || {
                let value = cell.load();
                log_dev!("[PHASE2] {worker_label} loaded {value:?}");
                if emit {
                    println!("{}", report::format_sum_line(&worker_label, value));
                }
                value
            })
            .map_err(|_| RunError::ConcurrencyFault {
                worker: label.clone(),
                phase: Phase::Report,
            })?;
        handles.push((label, handle));
    }

    let mut values = [None, None];
    for (slot, (label, handle)) in values.iter_mut().zip(handles) {
        match handle.join() {
            Ok(value) => *slot = value,
            Err(_) => {
                return Err(RunError::ConcurrencyFault {
                    worker: label,
                    phase: Phase::Report,
                });
            }
        }
    }
    Ok(values)
}

/// Run the demo: generate and print two matrices, then the two phases.
pub fn run_demo(
    side: Option<usize>,
    seed: Option<u64>,
    lo: Option<Element>,
    hi: Option<Element>,
) -> Result<(), RunError> {
    let side = side.unwrap_or(DEFAULT_SIDE);
    let seed = seed.unwrap_or(DEFAULT_SEED);
    let lo = lo.unwrap_or(DEFAULT_LO);
    let hi = hi.unwrap_or(DEFAULT_HI);
    log_dev!("[DEMO] start side={side} seed={seed} range={lo}..={hi}");

    // Both matrices draw from one seeded stream, in generation order.
    let mut rng = StdRng::seed_from_u64(seed);
    let first = Matrix::generate(side, lo, hi, &mut rng)?;
    let second = Matrix::generate(side, lo, hi, &mut rng)?;

    println!("{}", report::rule("Generated matrices"));
    print!(
        "{}",
        report::format_matrix("Matrix 1", &first, report::DEFAULT_COLUMNS_PER_BLOCK)
    );
    print!(
        "{}",
        report::format_matrix("Matrix 2", &second, report::DEFAULT_COLUMNS_PER_BLOCK)
    );

    let cells = [Arc::new(ResultCell::new()), Arc::new(ResultCell::new())];
    compute_phase([
        (WORKER_LABELS[0].to_string(), first, Arc::clone(&cells[0])),
        (WORKER_LABELS[1].to_string(), second, Arc::clone(&cells[1])),
    ])?;

    println!("{}", report::rule("Results"));
    report_phase(
        [
            (
                format!("{} (matrix 1)", WORKER_LABELS[0]),
                Arc::clone(&cells[0]),
            ),
            (
                format!("{} (matrix 2)", WORKER_LABELS[1]),
                Arc::clone(&cells[1]),
            ),
        ],
        true,
    )?;
    log_dev!("[DEMO] finished");
    Ok(())
}

/// Run both phases repeatedly with reporting suppressed and print a CSV
/// summary of wall-clock and CPU cost.
pub fn run_benchmark(side: Option<usize>, iterations: Option<usize>) -> Result<(), RunError> {
    let side = side.unwrap_or(BENCH_SIDE);
    let iterations = iterations.unwrap_or(BENCH_ITERATIONS);
    if side == 0 {
        return Err(RunError::invalid("bench n must be > 0"));
    }
    if iterations == 0 {
        return Err(RunError::invalid("bench iterations must be > 0"));
    }
    log_dev!("[BENCH] start side={side} iterations={iterations}");

    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let mut checksum: Element = 0;
    let cpu_start = cpu_times_seconds();
    let start = Instant::now();
    for _ in 0..iterations {
        let first = Matrix::generate(side, DEFAULT_LO, DEFAULT_HI, &mut rng)?;
        let second = Matrix::generate(side, DEFAULT_LO, DEFAULT_HI, &mut rng)?;
        let cells = [Arc::new(ResultCell::new()), Arc::new(ResultCell::new())];
        compute_phase([
            (WORKER_LABELS[0].to_string(), first, Arc::clone(&cells[0])),
            (WORKER_LABELS[1].to_string(), second, Arc::clone(&cells[1])),
        ])?;
        let values = report_phase(
            [
                (WORKER_LABELS[0].to_string(), Arc::clone(&cells[0])),
                (WORKER_LABELS[1].to_string(), Arc::clone(&cells[1])),
            ],
            false,
        )?;
        for value in values {
            checksum = checksum.wrapping_add(value.unwrap_or(0));
        }
    }

    let elapsed_ms = start.elapsed().as_millis() as f64;
    let throughput = if elapsed_ms > 0.0 {
        iterations as f64 / (elapsed_ms / 1000.0)
    } else {
        0.0
    };
    let avg_run_us = elapsed_ms * 1000.0 / iterations as f64;
    let (cpu_user_s, cpu_sys_s) = match (cpu_start, cpu_times_seconds()) {
        (Some((user_start, sys_start)), Some((user_end, sys_end))) => {
            (Some(user_end - user_start), Some(sys_end - sys_start))
        }
        _ => (None, None),
    };
    let cpu_user = cpu_user_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());
    let cpu_sys = cpu_sys_s
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "NA".to_string());

    println!("n,iterations,elapsed_ms,throughput_runs_per_s,avg_run_us,cpu_user_s,cpu_sys_s,checksum");
    println!(
        "{side},{iterations},{elapsed_ms:.2},{throughput:.2},{avg_run_us:.2},{cpu_user},{cpu_sys},{checksum}"
    );
    Ok(())
}
