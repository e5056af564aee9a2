//! Terminal rendering of progress and results.

use std::time::Duration;

use colored::Colorize;

use costar_core::{ConnectionPath, ProgressEvent};
use costar_search::{NotFoundReason, SearchOutcome};

/// `[ 42.0%] message` on stderr, so stdout stays clean for `--json`.
pub fn progress_line(event: &ProgressEvent) {
    eprintln!("[{:5.1}%] {}", event.percent, event.message);
}

pub fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Found { path } if path.is_self_connection() => {
            println!("\n{}", "Both names refer to the same actor.".green());
        }
        SearchOutcome::Found { path } => print_path(path),
        SearchOutcome::NotFound { reason } => {
            let detail = match reason {
                NotFoundReason::Exhausted { depth } => {
                    format!("every reachable actor was searched ({depth} levels)")
                }
                NotFoundReason::DepthLimitReached { max_depth } => {
                    format!("no chain within {max_depth} hops")
                }
            };
            println!("\n{} {detail}", "No connection found:".yellow().bold());
        }
        SearchOutcome::Failed { error } => {
            println!("\n{} {error}", "Search failed:".red().bold());
        }
    }
}

fn print_path(path: &ConnectionPath) {
    let rule = "=".repeat(50);
    println!(
        "\n{}",
        format!("Connection found! ({} hops)", path.len()).green().bold()
    );
    println!("{rule}");
    println!("{path}");
    println!("{rule}");
}

pub fn print_elapsed(elapsed: Duration) {
    println!("\nTotal time: {:.1}s", elapsed.as_secs_f64());
}
