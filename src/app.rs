//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the curve pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CurveArgs, DecayArgs, PlotArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ks2` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ks2` and `ks2 -q 0.9` to behave like `ks2 tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Curve(args) => handle_curve(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
        Command::Decay(args) => handle_decay(args),
    }
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_curve(&config)?;

    println!("{}", crate::report::format_run_summary(&run));

    if args.plot && !args.no_plot {
        let plot = crate::plot::render_ascii_plot(&run.response, args.width, args.height);
        println!("{plot}");
    } else {
        println!("{}", crate::report::format_sample_preview(&run, 10));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_samples_csv(path, &run)?;
    }
    if let Some(path) = &args.export_curve {
        crate::io::curve::write_curve_json(path, &run)?;
    }

    Ok(())
}

fn handle_tui(args: CurveArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_decay(args: DecayArgs) -> Result<(), AppError> {
    crate::decay::run(args)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn run_config_from_args(args: &CurveArgs) -> RunConfig {
    RunConfig {
        record: crate::domain::InputRecord {
            initial_balance: args.balance,
            quality: args.quality,
            timing: args.timing,
            logistics: args.logistics,
            quantity: args.quantity,
        },
        model: args.model,
    }
}

/// Rewrite argv so `ks2` defaults to `ks2 tui`.
///
/// Rules:
/// - `ks2`                     -> `ks2 tui`
/// - `ks2 -q 0.9 ...`          -> `ks2 tui -q 0.9 ...`
/// - `ks2 --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "curve" | "plot" | "tui" | "decay");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["ks2"])), args(&["ks2", "tui"]));
    }

    #[test]
    fn leading_flag_goes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["ks2", "-q", "0.9"])),
            args(&["ks2", "tui", "-q", "0.9"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(
            rewrite_args(args(&["ks2", "curve", "-q", "0.9"])),
            args(&["ks2", "curve", "-q", "0.9"])
        );
        assert_eq!(rewrite_args(args(&["ks2", "--help"])), args(&["ks2", "--help"]));
    }
}
