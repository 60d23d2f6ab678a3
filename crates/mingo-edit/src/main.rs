//! `mingo-edit` - command-line front end for the Mingo editor core.
//!
//! ```bash
//! mingo-edit fmt --write examples/fib.mg
//! mingo-edit check --fix main.mg
//! RUST_LOG=mingo_editor_oracle=trace mingo-edit check main.mg
//! ```

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use mingo_editor_core::{MARKER_OWNER, MarkerSet, format_with};
use mingo_editor_oracle::{
    EditingSession, EditorConfig, ProcessDiagnosticsOracle, ProcessExecutionOracle,
    SchedulerEvent, SystemClock, ThreadedDispatcher, Workspace,
};
use std::fs;
use std::path::Path;
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = EditorConfig::load(&cli.config)?;
    debug!(config = %cli.config.display(), root = %cli.root.display(), "configuration loaded");

    match cli.command {
        Command::Fmt { file, write } => {
            let source = fs::read_to_string(&file)?;
            let formatted = format_with(&source, &config.format.options());
            if write {
                if formatted != source {
                    fs::write(&file, &formatted)?;
                    info!(file = %file.display(), "reformatted");
                }
            } else {
                println!("{formatted}");
            }
        }
        Command::Check {
            file,
            fix,
            timeout_ms,
        } => {
            let status = check(&cli.root, &config, &file, fix, Duration::from_millis(timeout_ms))?;
            if status != 0 {
                process::exit(status);
            }
        }
        Command::Run { file } => {
            let source = fs::read_to_string(&file)?;
            let runner = ProcessExecutionOracle::new(config.oracle.runner_path(&cli.root));
            let result = runner.run(&source);
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
            if !result.success() {
                process::exit(if result.exit_code > 0 { result.exit_code } else { 1 });
            }
        }
        Command::Tree { json } => {
            let tree = Workspace::from_config(&cli.root, &config.workspace).tree()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                print!("{}", tree.render());
            }
        }
        Command::Examples { name } => {
            let workspace = Workspace::from_config(&cli.root, &config.workspace);
            match name {
                Some(name) => print!("{}", workspace.load_example(&name)?),
                None => {
                    for example in workspace.list_examples()? {
                        println!("{example}");
                    }
                }
            }
        }
        Command::Complete { file, prefix } => {
            let source = fs::read_to_string(&file)?;
            for item in mingo_editor_lang::completions(&source)
                .iter()
                .filter(|item| item.matches(&prefix))
            {
                match &item.detail {
                    Some(detail) => println!("{}\t{:?}\t{detail}", item.label, item.kind),
                    None => println!("{}\t{:?}", item.label, item.kind),
                }
            }
        }
    }

    Ok(())
}

/// Wait for diagnostics of the file's text, print them and optionally apply quick fixes.
///
/// Returns the process exit status: `1` when diagnostics remain, the oracle output was unusable
/// or the wait timed out, `0` otherwise.
fn check(
    root: &Path,
    config: &EditorConfig,
    file: &Path,
    fix: bool,
    timeout: Duration,
) -> Result<i32, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let oracle_path = config.oracle.diagnostics_path(root);
    let dispatcher = ThreadedDispatcher::spawn(ProcessDiagnosticsOracle::new(&oracle_path))?;
    let mut session = EditingSession::new(&source, dispatcher, SystemClock, config);

    let deadline = Instant::now() + config.diagnostics.debounce() + timeout;
    let outcome = loop {
        let generation = session.buffer().generation();
        let settled = session.poll()?.into_iter().find(|event| {
            matches!(event, SchedulerEvent::Published(g) | SchedulerEvent::Unavailable(g) if *g == generation)
        });
        if let Some(event) = settled {
            break Some(event);
        }
        if Instant::now() >= deadline {
            break None;
        }
        thread::sleep(POLL_INTERVAL);
    };

    match outcome {
        Some(SchedulerEvent::Published(_)) => {}
        Some(_) => {
            warn!(path = %oracle_path.display(), "diagnostics oracle not found");
            eprintln!("diagnostics oracle not found at {}", oracle_path.display());
            return Ok(0);
        }
        None => {
            eprintln!("timed out waiting for diagnostics");
            return Ok(1);
        }
    }

    let markers = session.markers();
    report(file, markers);
    let status = exit_status(markers);
    if markers.is_empty() {
        return Ok(status);
    }

    if fix {
        let applied = session.apply_all_quick_fixes();
        if applied > 0 {
            fs::write(file, session.buffer().text())?;
            println!("applied {applied} fix(es) to {}", file.display());
        }
    } else {
        for quick_fix in session.quick_fixes() {
            println!(
                "  fix at {}:{}: {}",
                quick_fix.edit.start.line, quick_fix.edit.start.column, quick_fix.title
            );
        }
    }
    Ok(status)
}

/// `1` when diagnostics were reported or the oracle output was unusable.
fn exit_status(markers: &MarkerSet) -> i32 {
    if markers.is_empty() && markers.error.is_none() {
        0
    } else {
        1
    }
}

fn report(file: &Path, markers: &MarkerSet) {
    if let Some(error) = &markers.error {
        eprintln!("{}: oracle output unusable: {error}", file.display());
    }
    for marker in &markers.markers {
        println!(
            "{}:{}:{}: {MARKER_OWNER}: {}",
            file.display(),
            marker.start_line,
            marker.start_column,
            marker.message
        );
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingo_editor_core::{DiagnosticRecord, Generation};

    #[test]
    fn test_exit_status() {
        let generation = Generation::new(1);
        assert_eq!(exit_status(&MarkerSet::from_records(generation, &[])), 0);
        assert_eq!(
            exit_status(&MarkerSet::from_records(
                generation,
                &[DiagnosticRecord::new(1, 1, "missing semicolon")]
            )),
            1
        );
        assert_eq!(
            exit_status(&MarkerSet::failed(generation, "malformed oracle output")),
            1
        );
    }
}
