//! Explore command implementation.
//!
//! The explore command:
//! 1. Reads and aggregates samples
//! 2. Finalizes them into a ranked call graph
//! 3. Runs the interactive navigator until `q` or end of input

use super::models::ExploreArgs;
use super::utils::build_index;
use crate::aggregator::{summarize, CallGraphIndex};
use crate::navigator::{Navigator, NavigatorState, Transition};
use crate::output::render_screen;
use crate::utils::config::COMMAND_PROMPT;
use anyhow::Result;
use log::info;
use std::io::{BufRead, Write};
use std::time::Instant;

/// Execute the explore command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid settings or unreadable config
/// * Missing input, or a source that yields no samples
/// * I/O errors on the terminal streams
pub fn execute_explore(
    args: &ExploreArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<NavigatorState> {
    let start_time = Instant::now();
    let settings = args.input.resolve(None)?;

    let (index, report) = build_index(&settings)?;
    info!(
        "Aggregated {} of {} samples in {:.2}s",
        report.accumulated,
        report.read,
        start_time.elapsed().as_secs_f64()
    );
    info!("Call graph: {}", summarize(&index).summary());

    run_session(&index, input, out)
}

/// Drive a navigator with line commands until quit or end of input
///
/// **Public** - separated from `execute_explore` so sessions can be scripted
///
/// Returns the state the session ended in.
pub fn run_session(
    index: &CallGraphIndex,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<NavigatorState> {
    let mut navigator = Navigator::new(index);
    let mut line = String::new();

    loop {
        let screen = navigator.render();
        write!(out, "{}", render_screen(&screen))?;
        write!(out, "{}", COMMAND_PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        if navigator.handle_line(&line) == Transition::Quit {
            break;
        }
    }

    Ok(navigator.state().clone())
}
