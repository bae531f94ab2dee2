//! Corpus Benchmarking Tool
//!
//! Measures normalizer throughput over a raw text dump with one record per
//! line, the shape crowdsourced pidgin datasets usually arrive in.
//!
//! ## What It Benchmarks
//!
//! 1. **Records**: Every line normalized on its own into a reused buffer
//! 2. **Blob**: The whole file normalized as a single string
//! 3. **Stages**: Each pipeline stage timed in isolation over the whole file
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/corpus_bench /path/to/corpus.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Records ===
//! --------------------------------
//! Mode        : Records
//! Elapsed     : 0.412 s
//! Throughput  : 0.118 GiB/s
//! Records     : 1_204_332
//! Records/sec : 2_923_135
//! --------------------------------
//! ```
//!
//! Build with `--release`; debug builds are an order of magnitude slower.

use std::env;
use std::fs;
use std::io;
use std::time::{Duration, Instant};

use memchr::memchr_iter;
use pidgin_core::{Stage, TextNormalizer};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <path>");
        std::process::exit(1);
    }

    println!("Loading file...");
    let bytes = fs::read(&args[1])?;
    let input = std::str::from_utf8(&bytes)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let normalizer = TextNormalizer::default();
    let records = split_records(input);

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Records:   {}\n", fmt_count(records.len() as u64));

    bench_records(&normalizer, input.len(), &records);
    bench_blob(&normalizer, input);
    bench_stages(&normalizer, input);

    Ok(())
}

fn split_records(input: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0usize;

    for end in memchr_iter(b'\n', input.as_bytes()) {
        records.push(input[start..end].trim_end_matches('\r'));
        start = end + 1;
    }
    if start < input.len() {
        records.push(&input[start..]);
    }

    records
}

fn bench_records(normalizer: &TextNormalizer, total_bytes: usize, records: &[&str]) {
    let mut out = String::with_capacity(256);

    println!("=== Records ===");

    warmup(|| {
        for record in records {
            normalizer.normalize_into(record, &mut out);
            std::hint::black_box(&out);
        }
    });

    let elapsed = measure(|| {
        for record in records {
            normalizer.normalize_into(record, &mut out);
            std::hint::black_box(&out);
        }
    });

    print_perf("Records", total_bytes, elapsed, records.len() as u64);
}

fn bench_blob(normalizer: &TextNormalizer, input: &str) {
    let mut out = String::with_capacity(input.len());

    println!("=== Blob ===");

    warmup(|| {
        normalizer.normalize_into(input, &mut out);
    });

    let elapsed = measure(|| {
        normalizer.normalize_into(input, &mut out);
        std::hint::black_box(&out);
    });

    print_perf("Blob", input.len(), elapsed, 0);
}

fn bench_stages(normalizer: &TextNormalizer, input: &str) {
    println!("=== Stages ===");

    let mut current = input.to_owned();
    for stage in Stage::ALL {
        let stage_input = current;

        warmup(|| {
            std::hint::black_box(normalizer.run_stage(stage, &stage_input));
        });

        let elapsed = measure(|| {
            std::hint::black_box(normalizer.run_stage(stage, &stage_input));
        });

        print_perf(stage.name(), stage_input.len(), elapsed, 0);
        current = normalizer.run_stage(stage, &stage_input);
    }
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, records: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if records > 0 {
        println!("Records     : {}", fmt_count(records));
        println!("Records/sec : {}", fmt_count((records as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
