use crate::core::entropy::{fresh_seed, seeded};
use crate::core::errors::ConfigError;
use crate::core::utils;
use crate::protocols::bb84::{self, RunParameters};
use crate::protocols::estimator::{RunResult, Verdict};
use log::info;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const DEFAULT_RUNS: usize = 10;

/// Repeats independent BB84 runs and averages their statistics.
///
/// Run `i` draws from its own generator seeded with `seed + i`, so a batch
/// gives the same results whether it runs sequentially or, with the
/// `parallel` feature, across rayon workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    runs: usize,
    /// Base seed (None = generate random)
    seed: Option<u64>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            seed: None,
        }
    }
}

impl Sampler {
    /// Creates a `Sampler` performing `runs` trials.
    pub fn new(runs: usize) -> Result<Self, ConfigError> {
        if runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        Ok(Self { runs, seed: None })
    }

    /// Fixes the base seed for reproducible batches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Get or generate seed
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(fresh_seed)
    }

    /// Runs the batch with the given parameters.
    ///
    /// # Returns
    ///
    /// A `BatchSummary` holding every run result, in run order, and the
    /// accumulated fidelity and QBER.
    pub fn run(&self, params: &RunParameters) -> BatchSummary {
        let seed = self.resolve_seed();
        info!(
            "Running {} BB84 trials of {} qubits (seed {seed})",
            self.runs,
            params.num_qubits()
        );

        let results = self.run_all(params, seed);
        let summary = BatchSummary::from_results(seed, results);

        if let (Some(fidelity), Some(qber)) = (summary.average_fidelity(), summary.average_qber()) {
            info!("Average fidelity {fidelity:.1}%, average QBER {qber:.1}%");
        }
        summary
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self, params: &RunParameters, seed: u64) -> Vec<RunResult> {
        (0..self.runs)
            .map(|i| bb84::run_simulation(params, &mut seeded(run_seed(seed, i))))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_all(&self, params: &RunParameters, seed: u64) -> Vec<RunResult> {
        (0..self.runs)
            .into_par_iter()
            .map(|i| bb84::run_simulation(params, &mut seeded(run_seed(seed, i))))
            .collect()
    }
}

/// Seed of the `index`-th run in a batch.
pub fn run_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Aggregated statistics of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Base seed used for the batch
    pub seed_used: u64,
    /// Individual results, in run order.
    pub results: Vec<RunResult>,
    pub secure_runs: usize,
    pub aborted_runs: usize,
    pub insufficient_runs: usize,
    /// Sum of fidelity over runs with a defined QBER.
    pub total_fidelity: f64,
    /// Sum of QBER over runs with a defined QBER.
    pub total_qber: f64,
}

impl BatchSummary {
    fn from_results(seed_used: u64, results: Vec<RunResult>) -> Self {
        let mut summary = Self {
            seed_used,
            results: Vec::with_capacity(results.len()),
            secure_runs: 0,
            aborted_runs: 0,
            insufficient_runs: 0,
            total_fidelity: 0.0,
            total_qber: 0.0,
        };

        for result in results {
            match result.verdict {
                Verdict::Secure => summary.secure_runs += 1,
                Verdict::Aborted => summary.aborted_runs += 1,
                Verdict::InsufficientData => summary.insufficient_runs += 1,
            }
            if let (Some(fidelity), Some(qber)) = (result.fidelity_percent, result.qber_percent) {
                summary.total_fidelity += fidelity;
                summary.total_qber += qber;
            }
            summary.results.push(result);
        }

        summary
    }

    pub fn total_runs(&self) -> usize {
        self.results.len()
    }

    /// Runs whose QBER could be measured.
    pub fn measured_runs(&self) -> usize {
        self.secure_runs + self.aborted_runs
    }

    /// Mean fidelity over measured runs, `None` if there were none.
    pub fn average_fidelity(&self) -> Option<f64> {
        self.average(self.total_fidelity)
    }

    /// Mean QBER over measured runs, `None` if there were none.
    pub fn average_qber(&self) -> Option<f64> {
        self.average(self.total_qber)
    }

    fn average(&self, total: f64) -> Option<f64> {
        let measured = self.measured_runs();
        if measured == 0 {
            None
        } else {
            Some(total / measured as f64)
        }
    }

    /// Print a summary of the batch results
    pub fn print_summary(&self, params: &RunParameters) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║              BB84 Simulation Results                   ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Seed: {}", self.seed_used);
        println!("  Qubits per run: {}", params.num_qubits());
        println!(
            "  Channel noise: {:.0}%, Eve attack probability: {:.0}%",
            params.channel_noise() * 100.0,
            params.eavesdrop() * 100.0
        );
        println!("  Security threshold: {}%\n", params.threshold_percent());

        let total = self.total_runs();
        for (i, r) in self.results.iter().enumerate() {
            println!("--- Run {}/{} ---", i + 1, total);
            let sifted_share =
                utils::percentage(r.sifted_length, params.num_qubits()).unwrap_or(0.0);
            println!(
                "  Sifted key length: {} bits (~{sifted_share:.0}%)",
                r.sifted_length
            );
            match (r.fidelity_percent, r.qber_percent) {
                (Some(fidelity), Some(qber)) => {
                    println!("  Key Fidelity: {fidelity:.1}%");
                    println!("  QBER (error): {qber:.1}%");
                }
                _ => println!("  QBER undefined: no bases matched"),
            }
            match r.verdict {
                Verdict::Secure => {
                    let preview = r.key_preview_string().unwrap_or_default();
                    println!("  Key secure! Final key (first {}): {preview}...", preview.len());
                }
                Verdict::Aborted => println!("  EVE DETECTED! QBER too high - key discarded"),
                Verdict::InsufficientData => println!("  Not enough data to judge the channel"),
            }
        }

        println!("\nBatch Statistics:");
        println!(
            "  Runs: {} (secure={}, aborted={}, insufficient={})",
            total, self.secure_runs, self.aborted_runs, self.insufficient_runs
        );
        match (self.average_fidelity(), self.average_qber()) {
            (Some(fidelity), Some(qber)) => {
                println!("  Average Fidelity: {fidelity:.1}%");
                println!("  Average QBER: {qber:.1}%");
            }
            _ => println!("  No run produced a sifted key"),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_batch() {
        assert_eq!(Sampler::new(0), Err(ConfigError::NoRuns));
    }

    #[test]
    fn default_batch_is_ten_runs() {
        let sampler = Sampler::default();
        assert_eq!(sampler.runs(), 10);
        assert_eq!(sampler.seed(), None);
    }

    #[test]
    fn fixed_seed_is_used() {
        let summary = Sampler::new(3)
            .unwrap()
            .with_seed(1234)
            .run(&RunParameters::default());
        assert_eq!(summary.seed_used, 1234);
        assert_eq!(summary.total_runs(), 3);
    }

    #[test]
    fn results_follow_per_run_seeds() {
        let params = RunParameters::with_defaults(300, 0.1, 0.05).unwrap();
        let summary = Sampler::new(6).unwrap().with_seed(500).run(&params);

        for (i, result) in summary.results.iter().enumerate() {
            let expected = bb84::run_simulation(&params, &mut seeded(run_seed(500, i)));
            assert_eq!(result, &expected);
        }
    }

    #[test]
    fn averages_cover_measured_runs() {
        let params = RunParameters::default();
        let summary = Sampler::new(10).unwrap().with_seed(9).run(&params);

        assert_eq!(summary.measured_runs(), 10);
        let fidelity = summary.average_fidelity().unwrap();
        let qber = summary.average_qber().unwrap();
        assert!((fidelity + qber - 100.0).abs() < 1e-9);

        let mean_qber: f64 =
            summary.results.iter().filter_map(|r| r.qber_percent).sum::<f64>() / 10.0;
        assert!((mean_qber - qber).abs() < 1e-9);
        assert_eq!(
            summary.secure_runs + summary.aborted_runs + summary.insufficient_runs,
            10
        );
    }

    #[test]
    fn insufficient_runs_are_left_out_of_averages() {
        let results = vec![
            RunResult {
                sifted_length: 0,
                errors: 0,
                fidelity_percent: None,
                qber_percent: None,
                secure_key_fraction: None,
                verdict: Verdict::InsufficientData,
                key_preview: None,
            },
            RunResult {
                sifted_length: 4,
                errors: 1,
                fidelity_percent: Some(75.0),
                qber_percent: Some(25.0),
                secure_key_fraction: Some(0.0),
                verdict: Verdict::Aborted,
                key_preview: None,
            },
        ];

        let summary = BatchSummary::from_results(0, results);
        assert_eq!(summary.insufficient_runs, 1);
        assert_eq!(summary.average_fidelity(), Some(75.0));
        assert_eq!(summary.average_qber(), Some(25.0));
    }

    #[test]
    fn all_insufficient_has_no_average() {
        let summary = BatchSummary::from_results(0, Vec::new());
        assert_eq!(summary.average_qber(), None);
        assert_eq!(summary.average_fidelity(), None);
    }
}
