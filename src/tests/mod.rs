/*
 * Everything here runs without any of the wrapped scanners installed:
 * step execution is only exercised through an all-absent inventory.
 */
use crate::{archive, consent, report, steps};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{sanitize_target, RunContext};
    use crate::error::SweepError;
    use crate::inventory::{ToolInventory, TOOLS};
    use crate::progress::{render, BAR_WIDTH};
    use crate::steps::{
        plan_wpscan, run_pipeline, wordpress_detected, wpscan_args, StepOutcome, WpscanPlan, STEPS,
    };
    use chrono::TimeZone;
    use std::env;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn temp_run_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("vaptrs_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// context pointing at a throwaway directory instead of the cwd
    fn offline_ctx(tag: &str) -> RunContext {
        let started = chrono::Local
            .with_ymd_and_hms(2026, 8, 28, 12, 0, 0)
            .unwrap();
        let mut ctx = RunContext::new("example.com", started);
        ctx.dir = temp_run_dir(tag);
        ctx
    }

    fn empty_inventory() -> ToolInventory {
        ToolInventory::probe_with(|_| false)
    }

    #[test]
    fn sanitize_strips_scheme_and_slashes() {
        assert_eq!(sanitize_target("https://example.com"), "example.com");
        assert_eq!(sanitize_target("http://example.com"), "example.com");
        assert_eq!(
            sanitize_target("https://example.com/app/v1"),
            "example.com_app_v1"
        );
        assert_eq!(sanitize_target("  example.com  "), "example.com");
        assert_eq!(sanitize_target("example.com"), "example.com");
    }

    #[test]
    fn run_dir_name_is_target_plus_stamp() {
        let started = chrono::Local
            .with_ymd_and_hms(2026, 8, 28, 12, 0, 0)
            .unwrap();
        let ctx = RunContext::new("https://example.com/shop", started);
        assert_eq!(
            ctx.dir.to_string_lossy(),
            "VAPT_example.com_shop_20260828_120000"
        );
    }

    #[test]
    fn empty_target_is_fatal() {
        let mut input = Cursor::new(b"\n".to_vec());
        assert!(matches!(
            consent::read_target(&mut input),
            Err(SweepError::EmptyTarget)
        ));

        let mut input = Cursor::new(b"   \n".to_vec());
        assert!(matches!(
            consent::read_target(&mut input),
            Err(SweepError::EmptyTarget)
        ));
    }

    #[test]
    fn target_is_trimmed() {
        let mut input = Cursor::new(b"  example.com \n".to_vec());
        assert_eq!(consent::read_target(&mut input).unwrap(), "example.com");
    }

    #[test]
    fn confirmation_accepts_yes_case_insensitively() {
        for answer in ["yes\n", "YES\n", "Yes\n", "  yes  \n"] {
            let mut input = Cursor::new(answer.as_bytes().to_vec());
            assert!(consent::confirm(&mut input).is_ok(), "rejected {answer:?}");
        }
    }

    #[test]
    fn confirmation_rejects_everything_else() {
        for answer in ["no\n", "y\n", "yess\n", "\n", "maybe\n"] {
            let mut input = Cursor::new(answer.as_bytes().to_vec());
            assert!(
                matches!(
                    consent::confirm(&mut input),
                    Err(SweepError::ConsentDeclined)
                ),
                "accepted {answer:?}"
            );
        }
    }

    #[test]
    fn bar_is_empty_at_zero_and_full_at_total() {
        let total = STEPS.len();
        let start = render(0, total, BAR_WIDTH);
        assert!(start.contains(&"-".repeat(BAR_WIDTH)));
        assert!(start.ends_with("  0%"));

        let end = render(total, total, BAR_WIDTH);
        assert!(end.contains(&"#".repeat(BAR_WIDTH)));
        assert!(end.ends_with("100%"));
    }

    #[test]
    fn bar_fill_is_monotonic() {
        let total = STEPS.len();
        let mut last_filled = 0;
        for completed in 0..=total {
            let bar = render(completed, total, BAR_WIDTH);
            let filled = bar.chars().filter(|c| *c == '#').count();
            assert!(filled >= last_filled);
            last_filled = filled;
        }
        assert_eq!(last_filled, BAR_WIDTH);
    }

    #[test]
    fn inventory_records_absence_without_failing() {
        let inventory = empty_inventory();
        assert_eq!(inventory.iter().count(), TOOLS.len());
        for tool in TOOLS {
            assert!(!inventory.has(tool));
        }
        assert!(!inventory.has("not-a-tool"));
    }

    #[test]
    fn wordpress_marker_is_case_insensitive() {
        let dir = temp_run_dir("wp_marker");
        fs::write(dir.join("whatweb_http.txt"), "MetaGenerator[WordPress 6.4]").unwrap();
        assert!(wordpress_detected(&dir));

        let dir = temp_run_dir("wp_marker_upper");
        fs::write(dir.join("whatweb_https.txt"), "WORDPRESS").unwrap();
        assert!(wordpress_detected(&dir));

        let dir = temp_run_dir("wp_marker_none");
        fs::write(dir.join("whatweb_http.txt"), "Apache[2.4] Drupal[9]").unwrap();
        fs::write(dir.join("whatweb_https.txt"), "nginx").unwrap();
        assert!(!wordpress_detected(&dir));
    }

    #[test]
    fn wpscan_gate_decides_correctly() {
        let dir = temp_run_dir("wp_gate");
        fs::write(dir.join("whatweb_http.txt"), "wordpress").unwrap();

        let without_tool = empty_inventory();
        assert_eq!(plan_wpscan(&without_tool, &dir), WpscanPlan::MissingTool);

        let with_tool = ToolInventory::probe_with(|tool| tool == "wpscan");
        assert_eq!(plan_wpscan(&with_tool, &dir), WpscanPlan::Scan);

        let dir = temp_run_dir("wp_gate_neg");
        fs::write(dir.join("whatweb_http.txt"), "nginx").unwrap();
        assert_eq!(plan_wpscan(&with_tool, &dir), WpscanPlan::NotDetected);
    }

    #[test]
    fn wpscan_token_comes_from_caller_not_source() {
        let with_token = wpscan_args("example.com", Some("tok123"));
        let joined = with_token.join(" ");
        assert!(joined.contains("--api-token tok123"));
        assert!(joined.contains("--url http://example.com"));

        let without_token = wpscan_args("example.com", None);
        assert!(!without_token.iter().any(|arg| arg == "--api-token"));
    }

    #[test]
    fn all_tools_absent_still_reaches_the_end() {
        let ctx = offline_ctx("e2e");
        let inventory = empty_inventory();

        let records = run_pipeline(&ctx, &inventory);
        assert_eq!(records.len(), STEPS.len());
        for record in &records {
            assert!(
                !matches!(record.outcome, StepOutcome::RanNonZero(_)),
                "{} reported a subprocess that never ran",
                record.name
            );
        }
        // the zap pointer is the only step that produces output without
        // an external tool
        let skipped = records
            .iter()
            .filter(|r| r.outcome == StepOutcome::Skipped)
            .count();
        assert_eq!(skipped, STEPS.len() - 1);

        for artifact in [
            "whois.txt",
            "dig_any.txt",
            "dig_ns.txt",
            "subdomains.txt",
            "sublist3r_stdout.txt",
            "nmap_full_stdout.txt",
            "nmap_scripts_stdout.txt",
            "nikto_http.txt",
            "nikto_https.txt",
            "wapiti_http.txt",
            "wapiti_https.txt",
            "gobuster_note.txt",
            "headers_http.txt",
            "headers_https.txt",
            "nmap_ssl_enum.txt",
            "sqlmap_note.txt",
            "whatweb_http.txt",
            "whatweb_https.txt",
            "wpscan_note.txt",
            "zap_instructions.txt",
        ] {
            assert!(
                ctx.artifact(artifact).exists(),
                "missing artifact {artifact}"
            );
        }
    }

    #[test]
    fn summary_lists_every_missing_tool() {
        let ctx = offline_ctx("summary");
        let inventory = empty_inventory();
        let records = run_pipeline(&ctx, &inventory);
        report::write_summary(&ctx, &inventory, &records).unwrap();

        let summary = fs::read_to_string(ctx.artifact("SUMMARY.txt")).unwrap();
        assert!(summary.contains("target: example.com"));
        assert!(summary.contains("started: 20260828_120000"));
        for tool in TOOLS {
            assert!(
                summary.contains(&format!("{tool}: MISSING")),
                "{tool} not reported missing"
            );
        }
        for record in &records {
            assert!(summary.contains(record.name));
        }
    }

    #[test]
    fn readme_describes_the_run() {
        let ctx = offline_ctx("readme");
        report::write_run_readme(&ctx).unwrap();
        let readme = fs::read_to_string(ctx.artifact("README.txt")).unwrap();
        assert!(readme.contains("example.com"));
        assert!(readme.contains("No timeout"));
    }

    #[test]
    fn run_directory_is_archived() {
        let ctx = offline_ctx("archive");
        fs::write(ctx.artifact("whois.txt"), "placeholder").unwrap();
        fs::write(ctx.artifact("SUMMARY.txt"), "summary").unwrap();

        let archive_path = archive::archive_run(&ctx.dir).expect("no archive produced");
        assert!(archive_path.exists());
        assert!(fs::metadata(&archive_path).unwrap().len() > 0);
    }

    #[test]
    fn archive_name_keeps_the_dotted_run_dir_name() {
        // the sanitized target keeps its dots, so the archive suffix
        // must append to the directory name, not replace an "extension"
        let parent = temp_run_dir("archive_dotted");
        let dir = parent.join("VAPT_example.com_20260828_120000");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("whois.txt"), "placeholder").unwrap();

        let archive_path = archive::archive_run(&dir).expect("no archive produced");
        assert_eq!(
            archive_path.file_name().unwrap().to_string_lossy(),
            "VAPT_example.com_20260828_120000.zip"
        );
        assert!(archive_path.exists());
    }

    #[test]
    fn fallback_archive_name_keeps_the_dotted_run_dir_name() {
        let dir = PathBuf::from("VAPT_example.com_20260828_120000");
        let tar_path = archive::sibling_with_suffix(&dir, ".tar.gz").unwrap();
        assert_eq!(
            tar_path.to_string_lossy(),
            "VAPT_example.com_20260828_120000.tar.gz"
        );
    }

    #[test]
    fn note_files_name_the_missing_tool() {
        let ctx = offline_ctx("notes");
        let inventory = empty_inventory();
        run_pipeline(&ctx, &inventory);

        let note = fs::read_to_string(ctx.artifact("whois.txt")).unwrap();
        assert!(note.contains("whois not found"));
        let note = fs::read_to_string(ctx.artifact("gobuster_note.txt")).unwrap();
        assert!(note.contains("gobuster not found"));
        let note = fs::read_to_string(ctx.artifact("wpscan_note.txt")).unwrap();
        assert!(note.contains("wpscan not found"));
    }

    #[test]
    fn step_table_matches_contract() {
        // one content gate, otherwise strictly linear
        assert_eq!(steps::STEPS.len(), 13);
        let names: Vec<_> = steps::STEPS.iter().map(|s| s.name).collect();
        assert!(names.first().unwrap().contains("whois"));
        assert!(names.last().unwrap().contains("zap"));
    }
}
