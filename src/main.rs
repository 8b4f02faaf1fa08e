//! vaptrs - a best-effort VAPT sweep around the usual recon and web
//! scanning binaries (whois, dig, sublist3r, nmap, nikto, wapiti,
//! gobuster, curl, sqlmap, whatweb, wpscan).
//!
//! All scanning capability lives in the wrapped tools; this binary only
//! sequences them, captures their raw output into a timestamped run
//! directory, and archives the result. Missing tools and failing tools
//! never abort a run. No timeout is enforced on any invocation, so a
//! hung scanner blocks the whole sweep.

use std::io::{self, BufRead};
use std::process::ExitCode;

use colored::Colorize;

mod logging;

mod archive;
mod banner;
mod cmd_handlers;
mod consent;
mod context;
mod error;
mod file_util;
mod inventory;
mod progress;
mod report;
mod steps;
#[cfg(test)]
mod tests;

use context::RunContext;
use error::SweepResult;
use inventory::ToolInventory;

fn main() -> ExitCode {
    banner::print_banner();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    match run(&mut input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            err!(format!("{e}"));
            ExitCode::FAILURE
        }
    }
}

/// the whole pipeline: consent, inventory, snapshot, steps, summary,
/// archive. only the consent gate and run-directory creation can fail;
/// everything after that is best-effort
fn run(input: &mut impl BufRead) -> SweepResult<()> {
    let target = consent::read_target(input)?;
    consent::confirm(input)?;

    let ctx = RunContext::create(&target)?;
    info!(format!("run directory: {}", ctx.dir.display()));

    let inventory = ToolInventory::probe();
    for (tool, present) in inventory.iter() {
        if !present {
            warn!(format!("{tool} not found on PATH, related steps will be skipped"));
        }
    }

    report::env_snapshot(&ctx);
    report::write_run_readme(&ctx)?;

    let records = steps::run_pipeline(&ctx, &inventory);
    report::write_summary(&ctx, &inventory, &records)?;

    match archive::archive_run(&ctx.dir) {
        Some(path) => info!(format!("results archived to {}", path.display())),
        None => warn!("could not archive the run directory, raw files are still on disk"),
    }

    info!(format!(
        "sweep finished, review the artifacts in {} manually",
        ctx.dir.display()
    ));
    Ok(())
}
