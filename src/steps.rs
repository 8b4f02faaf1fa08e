use std::env;
use std::io;
use std::path::Path;

use colored::Colorize;

use crate::cmd_handlers as cmd;
use crate::context::RunContext;
use crate::file_util;
use crate::inventory::ToolInventory;
use crate::progress;

/// tri-state result of one step. the pipeline never aborts on any of
/// these, they only end up in the summary log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// every invocation exited zero
    Ran,
    /// at least one invocation exited non-zero (or died to a signal,
    /// recorded as -1)
    RanNonZero(i32),
    /// required tool missing or a content gate said no, a note file
    /// was written instead
    Skipped,
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepOutcome::Ran => write!(f, "ok"),
            StepOutcome::RanNonZero(code) => write!(f, "ran, exit code {code}"),
            StepOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

pub struct StepRecord {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

type StepFn = fn(&RunContext, &ToolInventory) -> io::Result<StepOutcome>;

pub struct Step {
    pub name: &'static str,
    pub run: StepFn,
}

/// the fixed sweep order. identity of a step is its position here
pub const STEPS: &[Step] = &[
    Step { name: "whois lookup", run: step_whois },
    Step { name: "dns records (dig)", run: step_dig },
    Step { name: "subdomain enumeration (sublist3r)", run: step_sublist3r },
    Step { name: "full tcp port scan (nmap)", run: step_nmap_full },
    Step { name: "nse vulnerability scripts (nmap)", run: step_nmap_scripts },
    Step { name: "web server scan (nikto)", run: step_nikto },
    Step { name: "web app scan (wapiti)", run: step_wapiti },
    Step { name: "directory brute force (gobuster)", run: step_gobuster },
    Step { name: "http headers and tls ciphers", run: step_headers_ssl },
    Step { name: "sql injection probe (sqlmap, low risk)", run: step_sqlmap },
    Step { name: "cms fingerprint (whatweb)", run: step_whatweb },
    Step { name: "wordpress scan (wpscan)", run: step_wpscan },
    Step { name: "zap follow-up instructions", run: step_zap_note },
];

/// run every step in order, drawing the bar at 0% and after each one.
/// an io error inside a step is logged and recorded, never fatal
pub fn run_pipeline(ctx: &RunContext, inventory: &ToolInventory) -> Vec<StepRecord> {
    let total = STEPS.len();
    progress::draw(0, total, "starting sweep");
    let mut records = Vec::with_capacity(total);
    for (done, step) in STEPS.iter().enumerate() {
        let outcome = match (step.run)(ctx, inventory) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(format!("{}: {e}", step.name));
                StepOutcome::RanNonZero(-1)
            }
        };
        records.push(StepRecord {
            name: step.name,
            outcome,
        });
        progress::draw(done + 1, total, step.name);
    }
    records
}

/// fold one exit code into the running outcome so a single bad
/// invocation marks the whole step
fn fold(outcome: StepOutcome, status: Option<i32>) -> StepOutcome {
    if let StepOutcome::RanNonZero(_) = outcome {
        return outcome;
    }
    match status {
        Some(0) => outcome,
        Some(code) => StepOutcome::RanNonZero(code),
        None => StepOutcome::RanNonZero(-1),
    }
}

fn skip_notes(ctx: &RunContext, artifacts: &[&str], reason: &str) -> io::Result<StepOutcome> {
    for artifact in artifacts {
        file_util::write_note(&ctx.artifact(artifact), reason)?;
    }
    Ok(StepOutcome::Skipped)
}

fn url(scheme: &str, target: &str) -> String {
    format!("{scheme}://{target}")
}

/// one invocation per scheme, writing to the paired artifact files
fn run_scheme_pair(
    ctx: &RunContext,
    bin: &str,
    artifacts: [&str; 2],
    args_for: impl Fn(&str) -> Vec<String>,
) -> io::Result<StepOutcome> {
    let mut outcome = StepOutcome::Ran;
    for (scheme, artifact) in ["http", "https"].into_iter().zip(artifacts) {
        let target_url = url(scheme, &ctx.sanitized);
        let args = args_for(&target_url);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let status = cmd::run_to_file(bin, &argv, &ctx.artifact(artifact))?;
        outcome = fold(outcome, status);
    }
    Ok(outcome)
}

fn step_whois(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("whois") {
        return skip_notes(ctx, &["whois.txt"], "whois not found on PATH, step skipped");
    }
    let status = cmd::run_to_file("whois", &[&ctx.sanitized], &ctx.artifact("whois.txt"))?;
    Ok(fold(StepOutcome::Ran, status))
}

fn step_dig(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("dig") {
        return skip_notes(
            ctx,
            &["dig_any.txt", "dig_ns.txt"],
            "dig not found on PATH, step skipped",
        );
    }
    let mut outcome = StepOutcome::Ran;
    let status = cmd::run_to_file(
        "dig",
        &["ANY", &ctx.sanitized, "+noall", "+answer"],
        &ctx.artifact("dig_any.txt"),
    )?;
    outcome = fold(outcome, status);
    let status = cmd::run_to_file(
        "dig",
        &["NS", &ctx.sanitized, "+short"],
        &ctx.artifact("dig_ns.txt"),
    )?;
    Ok(fold(outcome, status))
}

fn step_sublist3r(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("sublist3r") {
        return skip_notes(
            ctx,
            &["subdomains.txt", "sublist3r_stdout.txt"],
            "sublist3r not found on PATH, step skipped",
        );
    }
    let list = ctx.artifact("subdomains.txt");
    let list_path = list.to_string_lossy().into_owned();
    let status = cmd::run_to_file(
        "sublist3r",
        &["-d", &ctx.sanitized, "-o", &list_path],
        &ctx.artifact("sublist3r_stdout.txt"),
    )?;
    if !file_util::file_exists(&list) {
        file_util::write_note(&list, "sublist3r produced no subdomain list")?;
    }
    Ok(fold(StepOutcome::Ran, status))
}

fn step_nmap_full(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("nmap") {
        return skip_notes(
            ctx,
            &["nmap_full_stdout.txt"],
            "nmap not found on PATH, step skipped",
        );
    }
    let basename = ctx.artifact("nmap_full");
    let basename = basename.to_string_lossy();
    let status = cmd::run_to_file(
        "nmap",
        &["-p-", "-sV", "-T4", "-oA", &basename, &ctx.sanitized],
        &ctx.artifact("nmap_full_stdout.txt"),
    )?;
    Ok(fold(StepOutcome::Ran, status))
}

fn step_nmap_scripts(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("nmap") {
        return skip_notes(
            ctx,
            &["nmap_scripts_stdout.txt"],
            "nmap not found on PATH, step skipped",
        );
    }
    let basename = ctx.artifact("nmap_scripts");
    let basename = basename.to_string_lossy();
    let status = cmd::run_to_file(
        "nmap",
        &["--script", "vuln", "-sV", "-oA", &basename, &ctx.sanitized],
        &ctx.artifact("nmap_scripts_stdout.txt"),
    )?;
    Ok(fold(StepOutcome::Ran, status))
}

fn step_nikto(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("nikto") {
        return skip_notes(
            ctx,
            &["nikto_http.txt", "nikto_https.txt"],
            "nikto not found on PATH, step skipped",
        );
    }
    run_scheme_pair(
        ctx,
        "nikto",
        ["nikto_http.txt", "nikto_https.txt"],
        |target_url| vec!["-h".into(), target_url.to_string()],
    )
}

fn step_wapiti(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("wapiti") {
        return skip_notes(
            ctx,
            &["wapiti_http.txt", "wapiti_https.txt"],
            "wapiti not found on PATH, step skipped",
        );
    }
    run_scheme_pair(
        ctx,
        "wapiti",
        ["wapiti_http.txt", "wapiti_https.txt"],
        |target_url| vec!["-u".into(), format!("{target_url}/")],
    )
}

/// default dirb wordlist shipped by most distributions
pub const GOBUSTER_WORDLIST: &str = "/usr/share/wordlists/dirb/common.txt";

fn step_gobuster(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("gobuster") {
        return skip_notes(
            ctx,
            &["gobuster_note.txt"],
            "gobuster not found on PATH, step skipped",
        );
    }
    if !file_util::file_exists(GOBUSTER_WORDLIST) {
        return skip_notes(
            ctx,
            &["gobuster_note.txt"],
            &format!("wordlist {GOBUSTER_WORDLIST} not found, gobuster skipped"),
        );
    }
    run_scheme_pair(
        ctx,
        "gobuster",
        ["gobuster_http.txt", "gobuster_https.txt"],
        |target_url| {
            vec![
                "dir".into(),
                "-u".into(),
                target_url.to_string(),
                "-w".into(),
                GOBUSTER_WORDLIST.into(),
                "-q".into(),
            ]
        },
    )
}

fn step_headers_ssl(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    let mut outcome = StepOutcome::Ran;
    let mut ran_any = false;

    if inventory.has("curl") {
        ran_any = true;
        let pair = run_scheme_pair(
            ctx,
            "curl",
            ["headers_http.txt", "headers_https.txt"],
            |target_url| {
                vec![
                    "-sI".into(),
                    "-m".into(),
                    "20".into(),
                    target_url.to_string(),
                ]
            },
        )?;
        if let StepOutcome::RanNonZero(code) = pair {
            outcome = StepOutcome::RanNonZero(code);
        }
    } else {
        skip_notes(
            ctx,
            &["headers_http.txt", "headers_https.txt"],
            "curl not found on PATH, header grab skipped",
        )?;
    }

    if inventory.has("nmap") {
        ran_any = true;
        let status = cmd::run_to_file(
            "nmap",
            &[
                "--script",
                "ssl-enum-ciphers",
                "-p",
                "443",
                &ctx.sanitized,
            ],
            &ctx.artifact("nmap_ssl_enum.txt"),
        )?;
        outcome = fold(outcome, status);
    } else {
        skip_notes(
            ctx,
            &["nmap_ssl_enum.txt"],
            "nmap not found on PATH, tls cipher enumeration skipped",
        )?;
    }

    if ran_any {
        Ok(outcome)
    } else {
        Ok(StepOutcome::Skipped)
    }
}

fn step_sqlmap(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("sqlmap") {
        return skip_notes(
            ctx,
            &["sqlmap_note.txt"],
            "sqlmap not found on PATH, step skipped",
        );
    }
    // low-risk mode: shallow crawl, least aggressive payloads
    let target_url = format!("{}/", url("http", &ctx.sanitized));
    let status = cmd::run_to_file(
        "sqlmap",
        &[
            "-u",
            &target_url,
            "--batch",
            "--crawl=1",
            "--level=1",
            "--risk=1",
        ],
        &ctx.artifact("sqlmap_dummy.txt"),
    )?;
    Ok(fold(StepOutcome::Ran, status))
}

fn step_whatweb(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    if !inventory.has("whatweb") {
        return skip_notes(
            ctx,
            &["whatweb_http.txt", "whatweb_https.txt"],
            "whatweb not found on PATH, step skipped",
        );
    }
    run_scheme_pair(
        ctx,
        "whatweb",
        ["whatweb_http.txt", "whatweb_https.txt"],
        |target_url| vec!["-a".into(), "1".into(), target_url.to_string()],
    )
}

/// case-insensitive marker search over both cms-fingerprint artifacts
pub fn wordpress_detected(dir: &Path) -> bool {
    ["whatweb_http.txt", "whatweb_https.txt"]
        .iter()
        .filter_map(|name| file_util::read_lowercase(&dir.join(name)))
        .any(|text| text.contains("wordpress"))
}

/// what the wordpress step would do, separated from doing it so the
/// gate is testable without a wpscan binary
#[derive(Debug, PartialEq, Eq)]
pub enum WpscanPlan {
    MissingTool,
    NotDetected,
    Scan,
}

pub fn plan_wpscan(inventory: &ToolInventory, dir: &Path) -> WpscanPlan {
    if !inventory.has("wpscan") {
        WpscanPlan::MissingTool
    } else if !wordpress_detected(dir) {
        WpscanPlan::NotDetected
    } else {
        WpscanPlan::Scan
    }
}

/// wpscan argument list. the API token comes from the environment, it
/// is never a source literal
pub fn wpscan_args(target: &str, api_token: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "--url".to_string(),
        url("http", target),
        "--enumerate".to_string(),
        "vp,vt,u".to_string(),
        "--random-user-agent".to_string(),
    ];
    if let Some(token) = api_token {
        args.push("--api-token".to_string());
        args.push(token.to_string());
    }
    args
}

fn step_wpscan(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    match plan_wpscan(inventory, &ctx.dir) {
        WpscanPlan::MissingTool => skip_notes(
            ctx,
            &["wpscan_note.txt"],
            "wpscan not found on PATH, step skipped",
        ),
        WpscanPlan::NotDetected => skip_notes(
            ctx,
            &["wpscan_note.txt"],
            "WordPress not detected by whatweb, wpscan skipped",
        ),
        WpscanPlan::Scan => {
            let token = env::var("WPSCAN_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty());
            if token.is_none() {
                info!("WPSCAN_API_TOKEN not set, running wpscan without vulnerability data");
            }
            let args = wpscan_args(&ctx.sanitized, token.as_deref());
            let argv: Vec<&str> = args.iter().map(String::as_str).collect();
            let status = cmd::run_to_file("wpscan", &argv, &ctx.artifact("wpscan.txt"))?;
            Ok(fold(StepOutcome::Ran, status))
        }
    }
}

fn step_zap_note(ctx: &RunContext, inventory: &ToolInventory) -> io::Result<StepOutcome> {
    let zap_found = inventory.has("zaproxy") || inventory.has("owasp-zap");
    let availability = if zap_found {
        "a ZAP binary was found on this host"
    } else {
        "no ZAP binary was found on this host"
    };
    file_util::write_note(
        &ctx.artifact("zap_instructions.txt"),
        &format!(
            "OWASP ZAP is interactive and is not driven by this sweep ({availability}).\n\
             Suggested manual follow-up:\n\
             1. start ZAP and set it as the browser proxy\n\
             2. browse http://{target}/ and https://{target}/ through it\n\
             3. run an active scan on the discovered site tree\n\
             4. export the ZAP report next to these artifacts",
            target = ctx.sanitized
        ),
    )?;
    Ok(StepOutcome::Ran)
}
