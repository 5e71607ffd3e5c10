//! Latency benchmark producing `latencies_*.csv` input for `latency-charts`.
//!
//! Two modes over the same simulated workload (fetch, then process):
//! * low latency: each task is fetched and processed inline, one at a time;
//! * high throughput: a producer fetches tasks into a channel drained by a
//!   pool of worker threads.
//!
//! A task's latency runs from the end of its fetch to the end of its
//! processing, so queueing time in the pool counts against it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::unbounded;

#[derive(Parser, Debug)]
#[command(name = "generate-latencies")]
#[command(about = "Run the low-latency / high-throughput benchmark and write latencies_*.csv", long_about = None)]
struct Args {
    /// Number of tasks per mode.
    #[arg(long, default_value_t = 10)]
    tasks: usize,

    /// Simulated fetch time per task.
    #[arg(long, default_value_t = 30)]
    fetch_ms: u64,

    /// Simulated processing time per task.
    #[arg(long, default_value_t = 70)]
    process_ms: u64,

    /// Worker threads for high-throughput mode (default: available cores).
    #[arg(long)]
    workers: Option<usize>,

    /// Folder the CSV files are written to.
    #[arg(short = 'o', long, default_value = ".")]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    fetch: Duration,
    process: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    id: usize,
    fetched_at: Instant,
}

fn fetch_task(id: usize, timing: Timing) -> Task {
    thread::sleep(timing.fetch);
    Task {
        id,
        fetched_at: Instant::now(),
    }
}

/// Process `task` and return its latency in whole milliseconds.
fn process_task(task: Task, timing: Timing) -> u64 {
    thread::sleep(timing.process);
    let latency = task.fetched_at.elapsed().as_millis() as u64;
    println!("Task {} latency: {} ms", task.id, latency);
    latency
}

fn low_latency_mode(tasks: usize, timing: Timing) -> Vec<u64> {
    println!("\n=== LOW LATENCY MODE ===");
    let start = Instant::now();

    let latencies = (0..tasks)
        .map(|id| process_task(fetch_task(id, timing), timing))
        .collect();

    println!(
        "Total time (Low Latency): {} ms",
        start.elapsed().as_millis()
    );
    latencies
}

/// Store one task's latency in the shared table.
fn record_latency(table: &Mutex<Vec<u64>>, id: usize, latency: u64) -> Result<()> {
    let mut slots = table
        .lock()
        .map_err(|_| anyhow!("latency table poisoned"))?;
    slots[id] = latency;
    Ok(())
}

fn high_throughput_mode(tasks: usize, timing: Timing, workers: usize) -> Result<Vec<u64>> {
    println!("\n=== HIGH THROUGHPUT MODE ===");
    let latencies = Arc::new(Mutex::new(vec![0u64; tasks]));
    let (tx, rx) = unbounded::<Task>();

    let start = Instant::now();

    let handles: Vec<_> = (0..workers.max(1))
        .map(|_| {
            let rx = rx.clone();
            let latencies = Arc::clone(&latencies);
            thread::spawn(move || -> Result<()> {
                // Ends once the producer drops its sender and the queue is drained.
                for task in rx.iter() {
                    let latency = process_task(task, timing);
                    record_latency(&latencies, task.id, latency)?;
                }
                Ok(())
            })
        })
        .collect();
    drop(rx);

    for id in 0..tasks {
        tx.send(fetch_task(id, timing))
            .context("all workers exited early")?;
    }
    drop(tx);

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("worker thread panicked"))??;
    }

    println!(
        "Total time (High Throughput): {} ms",
        start.elapsed().as_millis()
    );

    let slots = latencies
        .lock()
        .map_err(|_| anyhow!("latency table poisoned"))?;
    Ok(slots.clone())
}

/// Write `task_id,latency_ms` rows, no header.
fn write_latencies(path: &Path, latencies: &[u64]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (id, latency) in latencies.iter().enumerate() {
        writer.write_record([id.to_string(), latency.to_string()])?;
    }
    writer.flush()?;

    log::info!("Wrote {} latencies to {}", latencies.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let timing = Timing {
        fetch: Duration::from_millis(args.fetch_ms),
        process: Duration::from_millis(args.process_ms),
    };
    let workers = args
        .workers
        .or_else(|| thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1);
    log::debug!("{} tasks, {:?}, {} workers", args.tasks, timing, workers);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let low = low_latency_mode(args.tasks, timing);
    write_latencies(&args.out.join("latencies_low_latency.csv"), &low)?;

    let high = high_throughput_mode(args.tasks, timing, workers)?;
    write_latencies(&args.out.join("latencies_high_throughput.csv"), &high)?;

    Ok(())
}
