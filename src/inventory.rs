use std::collections::BTreeMap;

use which::which;

/// every external binary the sweep may call. probed once at startup;
/// absence is a recorded fact, never an error
pub const TOOLS: &[&str] = &[
    "whois",
    "dig",
    "sublist3r",
    "nmap",
    "nikto",
    "wapiti",
    "gobuster",
    "curl",
    "sqlmap",
    "whatweb",
    "wpscan",
    "zaproxy",
    "owasp-zap",
    "zip",
    "tar",
];

/// tool name -> PATH resolvability, read-only after probing
pub struct ToolInventory {
    present: BTreeMap<&'static str, bool>,
}

impl ToolInventory {
    pub fn probe() -> Self {
        Self::probe_with(|tool| which(tool).is_ok())
    }

    /// resolver injected so tests can fake an empty or full PATH
    pub fn probe_with(resolver: impl Fn(&str) -> bool) -> Self {
        let present = TOOLS.iter().map(|&tool| (tool, resolver(tool))).collect();
        Self { present }
    }

    pub fn has(&self, tool: &str) -> bool {
        self.present.get(tool).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.present.iter().map(|(tool, present)| (*tool, *present))
    }
}
