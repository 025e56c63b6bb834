//! The benchmark harness. Drives a [`TreeIndex`] of each configured
//! variant through a bulk-insert phase and a batch-of-searches phase,
//! wall-clocks both with [`Instant`], and aggregates the per-trial
//! elapsed times into average microseconds per operation.
//!
//! Everything that shapes a run - the `n` sweep, trial count, searches
//! per trial, variants, insertion order, and the RNG seed - sits in
//! [`Config`]; nothing is ambient, so two runs with the same config see
//! the same keys. The harness only produces the numeric [`Report`]
//! (plus its plain-text table); chart rendering is someone else's job.
//!
//! # Examples
//!
//! ```
//! use docindex::bench::{self, Config};
//!
//! let config = Config {
//!     n_values: vec![100],
//!     trials: 2,
//!     searches: 50,
//!     ..Config::default()
//! };
//! let report = bench::run(&config);
//!
//! assert_eq!(report.measurements.len(), 3);
//! println!("{}", report);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::document::Document;
use crate::index::{TreeIndex, Variant};

/// The order the generated keys are fed to `insert`. Sorted and reversed
/// input are the degenerate cases for the unbalanced engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOrder {
    /// Distinct keys sampled uniformly from `1..=10n`.
    Random,
    /// `1..=n` ascending.
    Sorted,
    /// `n..=1` descending.
    Reversed,
}

/// Configuration for one benchmark run. All knobs are explicit; the
/// defaults match the historical sweep this harness replaced.
#[derive(Clone, Debug)]
pub struct Config {
    /// The tree sizes to sweep.
    pub n_values: Vec<usize>,
    /// How many trials to run per `(variant, n)` pair.
    pub trials: usize,
    /// How many searches to time per trial.
    pub searches: usize,
    /// Which engines to measure.
    pub variants: Vec<Variant>,
    /// The order keys are inserted in.
    pub order: InsertOrder,
    /// Base RNG seed; trial `t` is seeded with `seed + t` so every
    /// variant sees identical keys and reruns reproduce exactly.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_values: vec![1_000, 10_000, 25_000, 50_000],
            trials: 5,
            searches: 1_000,
            variants: Variant::ALL.to_vec(),
            order: InsertOrder::Random,
            seed: 1_000,
        }
    }
}

/// The two timed phases of a single trial.
#[derive(Clone, Copy, Debug)]
pub struct Trial {
    /// Elapsed wall-clock time for the whole bulk-insert phase.
    pub insert: Duration,
    /// Elapsed wall-clock time for the whole search phase.
    pub search: Duration,
}

/// All trials for one `(variant, n)` pair.
#[derive(Clone, Debug)]
pub struct Measurement {
    /// The engine measured.
    pub variant: Variant,
    /// The number of documents inserted per trial.
    pub n: usize,
    /// The number of searches timed per trial.
    pub searches: usize,
    /// Per-trial phase timings.
    pub trials: Vec<Trial>,
}

impl Measurement {
    /// Average microseconds per insert, across all trials.
    pub fn insert_micros_per_op(&self) -> f64 {
        self.micros_per_op(self.n, |t| t.insert)
    }

    /// Average microseconds per search, across all trials.
    pub fn search_micros_per_op(&self) -> f64 {
        self.micros_per_op(self.searches, |t| t.search)
    }

    fn micros_per_op(&self, ops: usize, phase: impl Fn(&Trial) -> Duration) -> f64 {
        if self.trials.is_empty() || ops == 0 {
            return 0.0;
        }
        let per_trial = self
            .trials
            .iter()
            .map(|t| phase(t).as_secs_f64() * 1e6 / ops as f64);
        per_trial.sum::<f64>() / self.trials.len() as f64
    }
}

/// The numeric result of a benchmark run, one [`Measurement`] per
/// `(variant, n)` pair. External reporting renders this as a chart; its
/// `Display` impl prints the tabular summary.
#[derive(Clone, Debug)]
pub struct Report {
    /// Measurements in sweep order: grouped by `n`, then by variant.
    pub measurements: Vec<Measurement>,
}

impl Report {
    /// The measurement for a given `(variant, n)` pair, if it was part
    /// of the configured sweep.
    pub fn get(&self, variant: Variant, n: usize) -> Option<&Measurement> {
        self.measurements
            .iter()
            .find(|m| m.variant == variant && m.n == n)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>9} {:>15} {:>15}",
            "variant", "n", "insert (us/op)", "search (us/op)"
        )?;
        for m in &self.measurements {
            writeln!(
                f,
                "{:<8} {:>9} {:>15.3} {:>15.3}",
                m.variant.to_string(),
                m.n,
                m.insert_micros_per_op(),
                m.search_micros_per_op()
            )?;
        }
        Ok(())
    }
}

/// Runs the full sweep described by `config` and collects the timings.
/// Every trial builds a fresh, empty index, bulk-inserts `n` documents
/// with distinct keys, then times the configured number of searches for
/// keys drawn from the inserted set.
pub fn run(config: &Config) -> Report {
    let mut measurements = Vec::with_capacity(config.n_values.len() * config.variants.len());
    for &n in &config.n_values {
        for &variant in &config.variants {
            let trials = (0..config.trials)
                .map(|trial| {
                    // Reseeding per trial keeps every variant and rerun
                    // on identical data.
                    let mut rng = StdRng::seed_from_u64(config.seed + trial as u64);
                    run_trial(variant, n, config.searches, config.order, &mut rng)
                })
                .collect();
            measurements.push(Measurement {
                variant,
                n,
                searches: config.searches,
                trials,
            });
        }
    }
    Report { measurements }
}

fn run_trial(
    variant: Variant,
    n: usize,
    searches: usize,
    order: InsertOrder,
    rng: &mut StdRng,
) -> Trial {
    let keys = generate_keys(n, order, rng);
    // Materialize the documents up front so the timed loop measures the
    // tree, not the allocator.
    let docs: Vec<Document> = keys
        .iter()
        .map(|&key| Document::new(key, format!("A{}", key), "pdf"))
        .collect();

    let mut index = TreeIndex::new(variant);
    let start = Instant::now();
    for doc in docs {
        index.insert(doc.id, doc);
    }
    let insert = start.elapsed();
    debug_assert_eq!(index.len(), n);

    let search_keys: Vec<u64> = if keys.is_empty() {
        Vec::new()
    } else {
        (0..searches)
            .map(|_| keys[rng.gen_range(0..keys.len())])
            .collect()
    };

    let mut hits = 0;
    let start = Instant::now();
    for key in &search_keys {
        if index.search(key).is_some() {
            hits += 1;
        }
    }
    let search = start.elapsed();
    debug_assert_eq!(hits, search_keys.len());

    Trial { insert, search }
}

/// `n` distinct keys in the requested order.
fn generate_keys(n: usize, order: InsertOrder, rng: &mut StdRng) -> Vec<u64> {
    match order {
        InsertOrder::Random => rand::seq::index::sample(rng, 10 * n.max(1), n)
            .into_iter()
            .map(|i| i as u64 + 1)
            .collect(),
        InsertOrder::Sorted => (1..=n as u64).collect(),
        InsertOrder::Reversed => (1..=n as u64).rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(order: InsertOrder) -> Config {
        Config {
            n_values: vec![64, 256],
            trials: 2,
            searches: 100,
            variants: Variant::ALL.to_vec(),
            order,
            seed: 42,
        }
    }

    #[test]
    fn sweep_covers_every_variant_and_n() {
        let config = small_config(InsertOrder::Random);
        let report = run(&config);

        assert_eq!(report.measurements.len(), 6);
        for &n in &config.n_values {
            for variant in Variant::ALL {
                let m = report.get(variant, n).unwrap();
                assert_eq!(m.trials.len(), config.trials);
                assert!(m.insert_micros_per_op().is_finite());
                assert!(m.insert_micros_per_op() > 0.0);
                assert!(m.search_micros_per_op().is_finite());
                assert!(m.search_micros_per_op() > 0.0);
            }
        }
    }

    #[test]
    fn sorted_and_reversed_orders_complete() {
        // The degenerate orders exercise the unbalanced engine's worst
        // case; keep n small so the quadratic baseline stays quick.
        for order in [InsertOrder::Sorted, InsertOrder::Reversed] {
            let config = Config {
                n_values: vec![128],
                ..small_config(order)
            };
            let report = run(&config);
            assert_eq!(report.measurements.len(), 3);
        }
    }

    #[test]
    fn generated_keys_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        for order in [InsertOrder::Random, InsertOrder::Sorted, InsertOrder::Reversed] {
            let mut keys = generate_keys(500, order, &mut rng);
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), 500);
        }
    }

    #[test]
    fn reruns_with_one_seed_see_identical_keys() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_keys(100, InsertOrder::Random, &mut a),
            generate_keys(100, InsertOrder::Random, &mut b)
        );
    }

    #[test]
    fn report_renders_a_table() {
        let config = Config {
            n_values: vec![32],
            trials: 1,
            searches: 10,
            ..Config::default()
        };
        let rendered = run(&config).to_string();

        assert!(rendered.contains("variant"));
        for variant in Variant::ALL {
            assert!(rendered.contains(&variant.to_string()));
        }
    }
}
