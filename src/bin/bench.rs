//! Benchmark CLI — an external collaborator, not part of the core.
//! It times `phoenixmap::map::Map` and `std::collections::HashMap` as a
//! baseline against four fixed read/insert/delete/update mixes and
//! prints a fixed-width report.
//!
//! Argument parsing is hand-rolled rather than pulled in from a crate:
//! this binary only ever has one optional positional argument, so a
//! dependency would be overkill for what `std::env::args()` already
//! gives us directly.
//!
//! ```text
//! phoenixmap-bench [N]
//!   N    operations per mix (default 1_000_000); underscores allowed
//!   -h   print this help
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use phoenixmap::map::Map;

const DEFAULT_OPS: u64 = 1_000_000;

/// A read/insert/delete/update workload mix, as percentages out of 100.
struct Mix {
    label: &'static str,
    reads: u32,
    inserts: u32,
    deletes: u32,
    updates: u32,
}

const MIXES: &[Mix] = &[
    Mix { label: "RH", reads: 98, inserts: 1, deletes: 1, updates: 0 },
    Mix { label: "EX", reads: 10, inserts: 40, deletes: 40, updates: 10 },
    Mix { label: "EXH", reads: 1, inserts: 98, deletes: 98, updates: 1 },
    Mix { label: "RG", reads: 5, inserts: 80, deletes: 5, updates: 10 },
];

/// A tiny splitmix64 generator. Deterministic per process and seeded
/// fixed — this binary has no dev-dependency access to `rand`, only a
/// normal binary's `[dependencies]`.
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_bounded(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            0
        } else {
            self.next_u64() % bound
        }
    }
}

/// The uniform surface the CLI drives both map implementations through.
trait BenchMap {
    fn new() -> Self;
    fn put(&mut self, key: u64, value: u64);
    fn get(&self, key: &u64) -> bool;
    fn update(&mut self, key: u64, value: u64) -> bool;
    fn remove(&mut self, key: &u64) -> bool;
}

impl BenchMap for Map<u64, u64> {
    fn new() -> Self {
        Map::new()
    }

    fn put(&mut self, key: u64, value: u64) {
        self.put(key, value).expect("capacity exhausted during benchmark");
    }

    fn get(&self, key: &u64) -> bool {
        self.get(key).is_some()
    }

    fn update(&mut self, key: u64, value: u64) -> bool {
        self.update(key, value)
    }

    fn remove(&mut self, key: &u64) -> bool {
        self.remove(key)
    }
}

impl BenchMap for HashMap<u64, u64> {
    fn new() -> Self {
        HashMap::new()
    }

    fn put(&mut self, key: u64, value: u64) {
        self.insert(key, value);
    }

    fn get(&self, key: &u64) -> bool {
        HashMap::get(self, key).is_some()
    }

    fn update(&mut self, key: u64, value: u64) -> bool {
        match self.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: &u64) -> bool {
        HashMap::remove(self, key).is_some()
    }
}

/// Runs `ops` operations of `mix` against a fresh `M`, returning
/// (wall-clock elapsed, throughput in millions of ops/sec).
fn run_mix<M: BenchMap>(mix: &Mix, ops: u64) -> (Duration, f64) {
    let key_space = (ops / 4).max(1);
    let mut rng = SplitMix64::new(0xC0FFEE ^ ops);
    let mut map = M::new();

    // Pre-populate half the key space so reads/deletes/updates have a
    // realistic hit rate instead of missing on every lookup.
    for _ in 0..key_space / 2 {
        let key = rng.next_bounded(key_space);
        map.put(key, key);
    }

    let start = Instant::now();
    for _ in 0..ops {
        let key = rng.next_bounded(key_space);
        let roll = rng.next_bounded(100) as u32;
        if roll < mix.reads {
            map.get(&key);
        } else if roll < mix.reads + mix.inserts {
            map.put(key, key);
        } else if roll < mix.reads + mix.inserts + mix.deletes {
            map.remove(&key);
        } else {
            map.update(key, key.wrapping_add(1));
        }
    }
    let elapsed = start.elapsed();
    let mops = ops as f64 / elapsed.as_secs_f64() / 1_000_000.0;
    (elapsed, mops)
}

fn print_help() {
    println!("phoenixmap-bench [N]");
    println!();
    println!("  N    operations per mix (default {DEFAULT_OPS}); underscores allowed");
    println!("  -h   print this help");
}

/// Parses the optional positional `N`. Rejects `-h`/`--help` by exiting
/// after printing help, and rejects more than one positional argument.
fn parse_ops() -> u64 {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("phoenixmap-bench: expected at most one argument, got {}", args.len() - 1);
        std::process::exit(2);
    }
    match args.get(1).map(String::as_str) {
        None => DEFAULT_OPS,
        Some("-h") | Some("--help") => {
            print_help();
            std::process::exit(0);
        }
        Some(raw) => {
            let cleaned: String = raw.chars().filter(|&c| c != '_').collect();
            cleaned.parse::<u64>().unwrap_or_else(|_| {
                eprintln!("phoenixmap-bench: not a valid operation count: {raw:?}");
                std::process::exit(2);
            })
        }
    }
}

fn main() {
    let ops = parse_ops();

    println!(
        "{:<14}{:<6}{:>14}{:>14}",
        "impl", "mix", "Mops/s", "seconds"
    );
    println!("{}", "-".repeat(48));

    let mut aggregate: Vec<(&str, f64, f64)> = Vec::new();

    for (impl_name, runner) in [
        ("phoenixmap", run_mix::<Map<u64, u64>> as fn(&Mix, u64) -> (Duration, f64)),
        ("std::HashMap", run_mix::<HashMap<u64, u64>>),
    ] {
        let mut total_secs = 0.0;
        let mut total_mops = 0.0;
        for mix in MIXES {
            let (elapsed, mops) = runner(mix, ops);
            println!(
                "{:<14}{:<6}{:>14.3}{:>14.3}",
                impl_name,
                mix.label,
                mops,
                elapsed.as_secs_f64()
            );
            total_secs += elapsed.as_secs_f64();
            total_mops += mops;
        }
        aggregate.push((impl_name, total_mops / MIXES.len() as f64, total_secs));
    }

    println!("{}", "-".repeat(48));
    for (impl_name, avg_mops, total_secs) in aggregate {
        println!(
            "{:<14}{:<6}{:>14.3}{:>14.3}",
            impl_name, "ALL", avg_mops, total_secs
        );
    }
}
