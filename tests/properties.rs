//! Statistical behaviour of the BB84 simulation over many seeded runs.

use bb84_sim::entropy::seeded;
use bb84_sim::{
    EffectOrder, RunParameters, Sampler, SimulationConfig, Verdict, run_detailed, run_simulation,
};
use std::path::Path;

fn average_qber(params: &RunParameters, runs: usize, seed: u64) -> f64 {
    Sampler::new(runs)
        .unwrap()
        .with_seed(seed)
        .run(params)
        .average_qber()
        .unwrap()
}

#[test]
fn sifted_length_is_about_half() {
    let params = RunParameters::default();
    let runs = 200;
    let total: usize = (0..runs)
        .map(|seed| run_simulation(&params, &mut seeded(seed)).sifted_length)
        .sum();
    let mean = total as f64 / runs as f64;
    assert!((475.0..=525.0).contains(&mean), "mean sifted length {mean}");
}

#[test]
fn keys_stay_aligned_and_previews_bounded() {
    let params = RunParameters::default();
    for seed in 0..50 {
        let run = run_detailed(&params, &mut seeded(seed));
        assert_eq!(run.sifted.alice_key().len(), run.sifted.bob_key().len());
        match &run.result.key_preview {
            Some(preview) => {
                assert_eq!(run.result.verdict, Verdict::Secure);
                assert_eq!(preview.len(), run.sifted.len().min(20));
                assert_eq!(preview[..], run.sifted.alice_key()[..preview.len()]);
            }
            None => assert_ne!(run.result.verdict, Verdict::Secure),
        }
    }
}

#[test]
fn reference_scenario_is_consistent() {
    let params = RunParameters::new(1000, 0.10, 0.05, 11.0).unwrap();
    let result = run_simulation(&params, &mut seeded(1984));

    let qber = result.qber_percent.unwrap();
    assert!((0.0..=100.0).contains(&qber));
    assert!((400..=600).contains(&result.sifted_length));
    assert_eq!(result.verdict == Verdict::Aborted, qber > 11.0);
    assert!((result.fidelity_percent.unwrap() + qber - 100.0).abs() < 1e-9);
}

#[test]
fn noiseless_channel_always_keeps_key() {
    let params = RunParameters::with_defaults(1000, 0.0, 0.0).unwrap();
    let summary = Sampler::new(20).unwrap().with_seed(3).run(&params);
    assert_eq!(summary.secure_runs, 20);
    assert_eq!(summary.average_fidelity(), Some(100.0));
}

#[test]
fn qber_grows_with_channel_noise() {
    let levels = [0.0, 0.05, 0.10, 0.20];
    let qbers: Vec<f64> = levels
        .iter()
        .map(|&noise| {
            let params = RunParameters::with_defaults(1000, noise, 0.05).unwrap();
            average_qber(&params, 100, 10)
        })
        .collect();

    for pair in qbers.windows(2) {
        assert!(pair[0] < pair[1], "QBER not increasing: {qbers:?}");
    }
    // 10% noise alone contributes ~10%, Eve on 5% of qubits adds ~1%
    assert!((9.5..=12.5).contains(&qbers[2]), "{qbers:?}");
}

#[test]
fn qber_grows_with_eavesdropping() {
    let levels = [0.0, 0.25, 0.5, 1.0];
    let qbers: Vec<f64> = levels
        .iter()
        .map(|&eve| {
            let params = RunParameters::with_defaults(1000, 0.10, eve).unwrap();
            average_qber(&params, 100, 20)
        })
        .collect();

    for pair in qbers.windows(2) {
        assert!(pair[0] < pair[1], "QBER not increasing: {qbers:?}");
    }
}

#[test]
fn full_interception_is_clearly_visible() {
    let reference = RunParameters::with_defaults(100, 0.10, 0.05).unwrap();
    let eve_everywhere = RunParameters::with_defaults(100, 0.0, 1.0).unwrap();

    let baseline = average_qber(&reference, 200, 30);
    let attacked = average_qber(&eve_everywhere, 200, 30);

    // Intercept-resend on every qubit disturbs a quarter of the sifted key
    assert!((21.0..=29.0).contains(&attacked), "attacked QBER {attacked}");
    assert!(attacked > baseline + 8.0, "{attacked} vs {baseline}");
}

#[test]
fn effect_order_does_not_change_reference_error_rate() {
    let early = RunParameters::default();
    let late = early.with_effect_order(EffectOrder::EavesdropThenNoise);

    let early_qber = average_qber(&early, 100, 40);
    let late_qber = average_qber(&late, 100, 40);
    assert!((early_qber - late_qber).abs() < 1.0, "{early_qber} vs {late_qber}");
}

#[test]
fn bundled_scenarios_load_and_run() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    let config = SimulationConfig::load(dir.join("eve_everywhere.yaml")).unwrap();
    let summary = config
        .sampler()
        .unwrap()
        .run(&config.run_parameters().unwrap());
    assert_eq!(summary.seed_used, 84);
    assert_eq!(summary.total_runs(), 200);
    assert!(summary.aborted_runs >= 180, "aborted {}", summary.aborted_runs);

    for name in ["reference.yaml", "quiet_channel.yaml", "late_noise.yaml"] {
        let config = SimulationConfig::load(dir.join(name)).unwrap();
        assert!(config.validate().is_ok(), "{name}");
    }
}
