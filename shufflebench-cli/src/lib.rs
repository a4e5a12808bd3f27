#![warn(missing_docs)]
//! ShuffleBench CLI Library
//!
//! This module provides the CLI infrastructure for benchmark binaries.
//! Build a [`Registry`] in your `main` and hand it to `shufflebench::run()`
//! (or `shufflebench_cli::run()`) to get the full command-line experience:
//! listing, seeded runs, and text/CSV/JSON reports.
//!
//! # Example
//!
//! ```ignore
//! use shufflebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.set_current_suite("vectors");
//!     registry
//!         .register_benchmark("push", |state: &mut State| {
//!             let mut v = Vec::new();
//!             for _ in state {
//!                 v.push(1u32);
//!             }
//!         })
//!         .baseline(true);
//!     shufflebench_cli::run(registry)
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    ExecutionConfig, Executor, aggregate_benchmark, build_report, build_report_meta,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shufflebench_core::{Registry, Runner};
use shufflebench_report::{
    OutputFormat, Report, generate_concise_report, generate_csv_report,
    generate_detailed_report, generate_json_report,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ShuffleBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "shufflebench")]
#[command(author, version, about = "ShuffleBench - randomized micro-benchmarks for Rust")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run options
    #[command(flatten)]
    pub run: RunArgs,
}

/// Options shared by every binary that runs a registry
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Iteration counts for benchmarks without their own, e.g. `8,64,512`
    #[arg(long, value_delimiter = ',')]
    pub iters: Option<Vec<usize>>,

    /// Samples per iteration count for benchmarks without their own
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Scheduling seed; reuse the one printed by a previous run to replay it
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: human, text, concise, csv, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dry run - list benchmarks without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all registered benchmarks
    List,
    /// Run benchmarks (default)
    Run,
}

/// Run the ShuffleBench CLI over `registry` with the process arguments.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if the registry is misconfigured
/// or the report cannot be written.
pub fn run(registry: Registry) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, registry)
}

/// Run the ShuffleBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, registry: Registry) -> anyhow::Result<()> {
    init_logging(cli.run.verbose);
    run_with_runner(cli, Runner::new(), registry)
}

/// Run the ShuffleBench CLI starting from a caller-prepared runner.
///
/// Defaults already set on `runner` act as built-ins: shufflebench.toml and
/// CLI flags still override them. Logging is left to the caller, see
/// [`init_logging`].
pub fn run_with_runner(
    cli: Cli,
    mut runner: Runner,
    mut registry: Registry,
) -> anyhow::Result<()> {
    // Discover shufflebench.toml configuration (CLI flags override)
    let config = BenchConfig::discover().unwrap_or_default();
    configure_runner(&cli.run, &config, &mut runner);

    match cli.command {
        Some(Commands::List) => list_benchmarks(&registry, &runner),
        Some(Commands::Run) => run_benchmarks(&cli.run, &config, runner, &mut registry),
        None => {
            // Default: run benchmarks
            if cli.run.dry_run {
                list_benchmarks(&registry, &runner)
            } else {
                run_benchmarks(&cli.run, &config, runner, &mut registry)
            }
        }
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over the built-in filter. Only the first subscriber
/// installed in a process takes effect.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "shufflebench=debug,shufflebench_core=debug,shufflebench_cli=debug"
    } else {
        "shufflebench=info,shufflebench_core=info,shufflebench_cli=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Apply run defaults by layering: built-in → shufflebench.toml → CLI.
pub fn configure_runner(args: &RunArgs, config: &BenchConfig, runner: &mut Runner) {
    if let Some(iterations) = args.iters.as_ref().or(config.runner.iterations.as_ref()) {
        runner.set_default_iterations(iterations.iter().copied());
    }
    if let Some(samples) = args.samples.or(config.runner.samples) {
        runner.set_default_samples(samples);
    }
}

/// Resolve the output format, CLI flag first
pub fn resolve_format(args: &RunArgs, config: &BenchConfig) -> anyhow::Result<OutputFormat> {
    args.format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)
}

/// Render a finished report in the requested format
pub fn render_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Text => generate_detailed_report(report),
        OutputFormat::Concise => generate_concise_report(report),
        OutputFormat::Human => {
            let mut output = generate_detailed_report(report);
            output.push('\n');
            output.push_str(&generate_concise_report(report));
            output
        }
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Json => generate_json_report(report)?,
    };
    Ok(output)
}

fn list_benchmarks(registry: &Registry, runner: &Runner) -> anyhow::Result<()> {
    print!("{}", format_plan(registry, runner));
    Ok(())
}

/// Tree view of every non-empty suite with the settings each benchmark will use
fn format_plan(registry: &Registry, runner: &Runner) -> String {
    let mut output = String::from("ShuffleBench Plan:\n");
    let mut total = 0;

    for suite in registry.suites().iter().filter(|s| !s.is_empty()) {
        output.push_str(&format!("├── suite: {}\n", suite.display_name()));
        let baseline = suite.baseline_index();
        for (index, bench) in suite.benchmarks().iter().enumerate() {
            let iterations = if bench.configured_iterations().is_empty() {
                runner.default_iterations()
            } else {
                bench.configured_iterations()
            };
            let iterations: Vec<String> = iterations.iter().map(|i| i.to_string()).collect();
            let samples = bench
                .configured_samples()
                .unwrap_or(runner.default_samples());

            output.push_str(&format!(
                "│   ├── {}{} (iterations: {}; samples: {})\n",
                bench.name(),
                if baseline == Some(index) { " *" } else { "" },
                iterations.join(", "),
                samples
            ));
            total += 1;
        }
    }

    output.push_str(&format!("{} benchmarks found.\n", total));
    output
}

fn run_benchmarks(
    args: &RunArgs,
    config: &BenchConfig,
    runner: Runner,
    registry: &mut Registry,
) -> anyhow::Result<()> {
    let format = resolve_format(args, config)?;

    if registry.is_empty() {
        println!("No benchmarks found.");
        return Ok(());
    }

    let exec_config = ExecutionConfig {
        show_progress: config.runner.progress && !args.no_progress,
    };
    let executor = Executor::new(runner, exec_config);
    let seed = args.seed.or(config.runner.seed);

    let report = executor
        .run_all(registry, seed)
        .context("benchmark configuration rejected")?;
    tracing::info!(
        seed = report.meta.seed,
        "finished; rerun with --seed {} to replay this schedule",
        report.meta.seed
    );

    let output = render_report(&report, format)?;

    // Write output
    match args.output.as_ref().or(config.output.path.as_ref()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, output)
                .with_context(|| format!("writing report to {}", path.display()))?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shufflebench_core::{FakeClock, State};
    use std::sync::Arc;

    fn counting(clock: &Arc<FakeClock>, ns: u64) -> impl FnMut(&mut State) + use<> {
        let clock = clock.clone();
        move |state: &mut State| {
            for _ in state {
                clock.advance(ns);
            }
        }
    }

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from([
            "bench", "--iters", "8,64", "-n", "3", "--seed", "99", "--format", "csv",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.iters, Some(vec![8, 64]));
        assert_eq!(cli.run.samples, Some(3));
        assert_eq!(cli.run.seed, Some(99));
        assert_eq!(cli.run.format.as_deref(), Some("csv"));
    }

    #[test]
    fn test_parse_subcommand_and_cargo_flag() {
        let cli = Cli::try_parse_from(["bench", "--bench", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
        assert!(cli.run.bench);
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = BenchConfig::default();
        config.runner.iterations = Some(vec![10, 20]);
        config.runner.samples = Some(5);

        let args = RunArgs {
            samples: Some(2),
            ..Default::default()
        };
        let mut runner = Runner::new();
        configure_runner(&args, &config, &mut runner);

        assert_eq!(runner.default_iterations(), [10, 20]);
        assert_eq!(runner.default_samples(), 2);
    }

    #[test]
    fn test_builtin_defaults_without_overrides() {
        let mut runner = Runner::new();
        configure_runner(&RunArgs::default(), &BenchConfig::default(), &mut runner);
        assert_eq!(runner.default_iterations(), [8, 64, 512, 4096, 8196]);
        assert_eq!(runner.default_samples(), 1);
    }

    #[test]
    fn test_resolve_format() {
        let mut config = BenchConfig::default();
        assert_eq!(
            resolve_format(&RunArgs::default(), &config).unwrap(),
            OutputFormat::Human
        );

        config.output.format = "json".to_string();
        assert_eq!(
            resolve_format(&RunArgs::default(), &config).unwrap(),
            OutputFormat::Json
        );

        let args = RunArgs {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(resolve_format(&args, &config).is_err());
    }

    #[test]
    fn test_format_plan() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry.set_current_suite("empty");
        registry.set_current_suite("math");
        registry
            .register_benchmark("A", counting(&clock, 1))
            .iterations([8, 64])
            .samples(2)
            .baseline(true);
        registry.register_benchmark("B", counting(&clock, 1));

        let mut runner = Runner::new();
        runner.set_default_iterations([100]);
        let plan = format_plan(&registry, &runner);

        assert_eq!(
            plan,
            "ShuffleBench Plan:\n\
             ├── suite: \"math\"\n\
             │   ├── A * (iterations: 8, 64; samples: 2)\n\
             │   ├── B (iterations: 100; samples: 1)\n\
             2 benchmarks found.\n"
        );
    }

    #[test]
    fn test_format_plan_marks_implicit_baseline() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry.register_benchmark("x", counting(&clock, 1)).iterations([4]);
        registry.register_benchmark("y", counting(&clock, 1)).iterations([4]);

        let plan = format_plan(&registry, &Runner::new());
        assert!(plan.contains("│   ├── x * (iterations: 4; samples: 1)\n"));
        assert!(plan.contains("│   ├── y (iterations: 4; samples: 1)\n"));
    }

    #[test]
    fn test_human_output_contains_both_views() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry
            .register_benchmark("only", counting(&clock, 10))
            .iterations([4])
            .baseline(true);

        let report = Executor::new(Runner::with_clock(clock), ExecutionConfig::default())
            .run_all(&mut registry, Some(3))
            .unwrap();
        let output = render_report(&report, OutputFormat::Human).unwrap();

        assert!(output.contains("|   Dim   |"));
        assert!(output.contains("| Baseline |"));
    }

    #[test]
    fn test_run_writes_report_file() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry.set_current_suite("io");
        registry
            .register_benchmark("write", counting(&clock, 50))
            .iterations([2]);

        let path = std::env::temp_dir()
            .join(format!("shufflebench-cli-{}", std::process::id()))
            .join("report.csv");
        let args = RunArgs {
            format: Some("csv".to_string()),
            output: Some(path.clone()),
            seed: Some(5),
            no_progress: true,
            ..Default::default()
        };

        run_benchmarks(
            &args,
            &BenchConfig::default(),
            Runner::with_clock(clock),
            &mut registry,
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("suite,benchmark,baseline,dimension"));
        assert!(written.contains("io,write,true,2,1,100,50,"));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_run_with_runner_leaves_logging_to_caller() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry.register_benchmark("listed", counting(&clock, 1));

        let cli = Cli {
            command: Some(Commands::List),
            run: RunArgs::default(),
        };
        run_with_runner(cli, Runner::with_clock(clock), registry).unwrap();

        // cmdbench installs its own subscriber before calibrating
        assert!(!tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_misconfigured_registry_is_an_error() {
        let clock = Arc::new(FakeClock::new());
        let mut registry = Registry::new();
        registry
            .register_benchmark("dup", counting(&clock, 1))
            .iterations([8, 8]);

        let args = RunArgs {
            no_progress: true,
            ..Default::default()
        };
        let err = run_benchmarks(
            &args,
            &BenchConfig::default(),
            Runner::with_clock(clock),
            &mut registry,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("dup"));
    }
}
