//! cmdbench - compare shell commands with the randomized scheduler
//!
//! Each positional argument becomes one benchmark that runs the command
//! through the system shell once per iteration. The cost of spawning an
//! empty shell is measured up front and subtracted from every run, so the
//! report reflects the commands themselves.
//!
//! ```text
//! cmdbench "sort big.txt" "sort -S 1G big.txt" --samples 5 --format concise
//! ```

use clap::Parser;
use shufflebench_cli::{Cli, RunArgs, init_logging, run_with_runner};
use shufflebench_core::{Clock, Registry, Runner, State, SystemClock};
use std::process::{Command, ExitStatus, Stdio};

/// cmdbench arguments
#[derive(Parser, Debug)]
#[command(name = "cmdbench")]
#[command(author, version, about = "Benchmark shell commands against each other")]
struct CmdCli {
    /// Commands to benchmark; the first one is the baseline
    #[arg(required = true)]
    commands: Vec<String>,

    /// Empty shell spawns used to estimate process start-up cost
    #[arg(long, default_value = "50")]
    calibration_runs: usize,

    #[command(flatten)]
    run: RunArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = CmdCli::parse();
    init_logging(cli.run.verbose);

    let spawn_ns = if cli.run.dry_run {
        0
    } else {
        let ns = calc_spawn_time(cli.calibration_runs)?;
        tracing::info!(spawn_ns = ns, "measured empty shell spawn");
        ns
    };

    let mut registry = Registry::new();
    for cmd in &cli.commands {
        registry.register_benchmark(cmd.clone(), command_proc(cmd.clone(), spawn_ns));
    }

    let mut runner = Runner::new();
    runner.set_default_iterations([1]);

    run_with_runner(
        Cli {
            command: None,
            run: cli.run,
        },
        runner,
        registry,
    )
}

fn shell(cmd: &str) -> Command {
    #[cfg(windows)]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", cmd]);
        command
    }
    #[cfg(not(windows))]
    {
        let mut command = Command::new("sh");
        command.args(["-c", cmd]);
        command
    }
}

fn exec(cmd: &str) -> std::io::Result<ExitStatus> {
    shell(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
}

/// Minimum wall time of `runs` empty shell invocations, in nanoseconds
fn calc_spawn_time(runs: usize) -> anyhow::Result<u64> {
    let clock = SystemClock::new();
    let mut min_sample = None;

    for _ in 0..runs {
        let start = clock.now();
        exec("").map_err(|e| anyhow::anyhow!("cannot spawn the system shell: {}", e))?;
        let ns = clock.now().duration_since(start);
        min_sample = Some(min_sample.map_or(ns, |min: u64| min.min(ns)));
    }

    Ok(min_sample.unwrap_or(0))
}

fn command_proc(cmd: String, spawn_ns: u64) -> impl FnMut(&mut State) + 'static {
    let spawn_ns = i64::try_from(spawn_ns).unwrap_or(i64::MAX);

    move |state: &mut State| {
        for _ in &mut *state {
            match exec(&cmd) {
                Ok(status) if !status.success() => {
                    tracing::warn!(command = %cmd, %status, "command failed");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(command = %cmd, "cannot run command: {}", e),
            }
        }

        let iterations = i64::try_from(state.iterations()).unwrap_or(i64::MAX);
        state.add_custom_duration(spawn_ns.saturating_mul(iterations).saturating_neg());
    }
}
