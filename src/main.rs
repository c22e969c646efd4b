// BB84 batch driver - runs a batch of simulations and prints the averages
//
// Usage:
//   cargo run --bin bb84-sim
//   cargo run --bin bb84-sim scenarios/eve_everywhere.yaml
//   cargo run --bin bb84-sim -- --seed 42 --runs 100 --verbose

use bb84_sim::SimulationConfig;
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    runs: Option<usize>,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                parsed.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid seed: {value}"))?,
                );
            }
            "--runs" => {
                let value = iter.next().ok_or("--runs needs a value")?;
                parsed.runs = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid run count: {value}"))?,
                );
            }
            "--verbose" | "-v" => parsed.verbose = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
            path => {
                if parsed.config_path.is_some() {
                    return Err(format!("Unexpected argument: {path}"));
                }
                parsed.config_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn usage(program: &str) {
    eprintln!("Usage: {program} [config.yaml] [--seed N] [--runs N] [--verbose]");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bb84-sim");

    let args = match parse_args(&args[1.min(args.len())..]) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            usage(program);
            process::exit(1);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = SimpleLogger::new().with_level(level).init();

    let mut config = match &args.config_path {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }

    let (params, sampler) = match (config.run_parameters(), config.sampler()) {
        (Ok(params), Ok(sampler)) => (params, sampler),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    info!("BB84 SIMULATOR - {} RUNS", sampler.runs());
    let summary = sampler.run(&params);
    summary.print_summary(&params);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_path() {
        let args =
            parse_args(&strings(&["run.yaml", "--seed", "42", "--runs", "5", "-v"])).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("run.yaml")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.runs, Some(5));
        assert!(args.verbose);
    }

    #[test]
    fn no_arguments_means_defaults() {
        let args = parse_args(&[]).unwrap();
        assert!(args.config_path.is_none());
        assert!(args.seed.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(&strings(&["--seed"])).is_err());
        assert!(parse_args(&strings(&["--runs", "many"])).is_err());
        assert!(parse_args(&strings(&["--bogus"])).is_err());
        assert!(parse_args(&strings(&["a.yaml", "b.yaml"])).is_err());
    }
}
