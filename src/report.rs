use std::fs::File;
use std::io::Write;

use crate::cmd_handlers as cmd;
use crate::context::RunContext;
use crate::error::SweepResult;
use crate::file_util;
use crate::inventory::ToolInventory;
use crate::steps::StepRecord;

/// informational host snapshot, captured before any scanning. failures
/// degrade to note files
pub fn env_snapshot(ctx: &RunContext) {
    let probes: [(&str, &[&str], &str); 2] = [
        ("uname", &["-a"], "env_uname.txt"),
        ("lsb_release", &["-a"], "env_lsb.txt"),
    ];
    for (bin, args, artifact) in probes {
        let path = ctx.artifact(artifact);
        if cmd::run_to_file(bin, args, &path).is_err() {
            let _ = file_util::write_note(&path, &format!("{bin} unavailable on this host"));
        }
    }
}

/// README.txt dropped into the run directory so the archive explains
/// itself
pub fn write_run_readme(ctx: &RunContext) -> SweepResult<()> {
    let mut file = File::create(ctx.artifact("README.txt"))?;
    writeln!(file, "VAPT sweep against {}", ctx.target)?;
    writeln!(file, "started: {}", ctx.stamp)?;
    writeln!(file)?;
    writeln!(
        file,
        "Every file here is the raw, uninterpreted output of one external tool."
    )?;
    writeln!(
        file,
        "Steps whose tool was missing contain a placeholder note instead."
    )?;
    writeln!(
        file,
        "No timeout was enforced on any tool, and non-zero exits did not stop the sweep."
    )?;
    Ok(())
}

/// aggregate SUMMARY.txt: target, timestamp, tool inventory, per-step
/// outcome log and the fixed advisories
pub fn write_summary(
    ctx: &RunContext,
    inventory: &ToolInventory,
    records: &[StepRecord],
) -> SweepResult<()> {
    let mut file = File::create(ctx.artifact("SUMMARY.txt"))?;
    writeln!(file, "== VAPT sweep summary ==")?;
    writeln!(file, "target: {}", ctx.target)?;
    writeln!(file, "started: {}", ctx.stamp)?;
    writeln!(file)?;

    writeln!(file, "-- tool inventory --")?;
    for (tool, present) in inventory.iter() {
        let state = if present { "available" } else { "MISSING" };
        writeln!(file, "{tool}: {state}")?;
    }
    writeln!(file)?;

    writeln!(file, "-- step log --")?;
    for record in records {
        writeln!(file, "{}: {}", record.name, record.outcome)?;
    }
    writeln!(file)?;

    writeln!(file, "-- notes --")?;
    writeln!(
        file,
        "All output is best-effort. Review every artifact manually, a clean file can mean"
    )?;
    writeln!(
        file,
        "\"nothing found\" or \"tool failed\", the step log above tells them apart."
    )?;
    writeln!(
        file,
        "sqlmap ran in low-risk mode (--level=1 --risk=1 --crawl=1). Deeper injection testing"
    )?;
    writeln!(
        file,
        "needs explicit authorization and a manual rerun."
    )?;
    Ok(())
}
