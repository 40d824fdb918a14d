//! Turning Ansible failure output into an actionable report.
//!
//! Classification is an ordered table of [`Rule`]s evaluated first-match-wins.
//! Adding a new signature means adding a row, not a branch.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Closed set of failure categories for a non-zero Ansible exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A Python module or optional library needed by a filter is not installed.
    MissingRuntimeDependency,
    /// Non-zero exit with no recognised signature.
    GenericExecutionFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::MissingRuntimeDependency => "missing runtime dependency",
            FailureKind::GenericExecutionFailure => "ansible execution failed",
        })
    }
}

/// How a matching rule names the missing package.
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    /// Take capture group 1 of the pattern.
    Capture,
    /// The signature always means this package.
    Fixed(&'static str),
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub kind: FailureKind,
    pub extract: Extract,
}

/// Rows checked in order against the captured output.
pub const BUILTIN_RULES: &[Rule] = &[
    Rule {
        name: "missing-module",
        pattern: r#"no module named ['"]?([A-Za-z0-9_.\-]+)['"]?"#,
        kind: FailureKind::MissingRuntimeDependency,
        extract: Extract::Capture,
    },
    Rule {
        name: "missing-passlib",
        pattern: r"passlib must be installed",
        kind: FailureKind::MissingRuntimeDependency,
        extract: Extract::Fixed("passlib"),
    },
];

/// Optional packages that Jinja2 filters and lookups shipped with Ansible commonly need.
pub const COMMON_PACKAGES: &[(&str, &str)] = &[
    ("jmespath", "json_query filter"),
    ("netaddr", "ipaddr, ipv4 and ipv6 filters"),
    ("passlib", "password_hash filter"),
    ("dnspython", "dig lookup"),
];

/// Result of matching the output against the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: FailureKind,
    pub package: Option<String>,
    /// Name of the rule that matched, if any.
    pub rule: Option<&'static str>,
}

impl Classification {
    pub fn generic() -> Self {
        Self {
            kind: FailureKind::GenericExecutionFailure,
            package: None,
            rule: None,
        }
    }

    /// Distribution to install for the missing module: its top-level package.
    pub fn install_target(&self) -> Option<&str> {
        let package = self.package.as_deref()?;
        package.split('.').next().filter(|top| !top.is_empty())
    }
}

struct CompiledRule {
    rule: Rule,
    re: Regex,
}

/// Compiled rule table.
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    /// Compile `rules` in order. Patterns are matched case-insensitively.
    pub fn new(rules: &[Rule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let re = RegexBuilder::new(rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| {
                        format!("Invalid regex pattern for rule {}: {}", rule.name, rule.pattern)
                    })?;
                Ok(CompiledRule { rule: *rule, re })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_RULES)
    }

    /// Classify captured output; the first matching rule wins.
    pub fn classify(&self, output: &str) -> Classification {
        for CompiledRule { rule, re } in &self.rules {
            let Some(caps) = re.captures(output) else {
                continue;
            };
            let package = match rule.extract {
                Extract::Capture => caps.get(1).map(|m| m.as_str().to_string()),
                Extract::Fixed(name) => Some(name.to_string()),
            };
            tracing::debug!(rule = rule.name, package = ?package, "failure classified");
            return Classification {
                kind: rule.kind,
                package,
                rule: Some(rule.name),
            };
        }
        tracing::debug!("no failure rule matched");
        Classification::generic()
    }
}

/// Human-readable summary of one failed run.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub classification: Classification,
    /// Where the full output was saved; `None` when it could not be written.
    pub trace_path: Option<PathBuf>,
}

const BANNER: &str = "==================== JEX ERROR REPORT ====================";
const RULE_LINE: &str = "==========================================================";

impl DiagnosticReport {
    pub fn render(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "Category:      {}", self.classification.kind)?;
        if let Some(package) = &self.classification.package {
            writeln!(out, "Missing:       {}", package)?;
        }
        if let Some(target) = self.classification.install_target() {
            writeln!(out, "Fix:           pip install {}", target)?;
        }
        match &self.trace_path {
            Some(path) => {
                writeln!(out, "Full trace:    {}", path.display())?;
                writeln!(out, "View it with:  less {}", path.display())?;
            }
            None => writeln!(out, "Full trace:    could not be saved, shown below")?,
        }
        writeln!(out)?;
        writeln!(out, "Commonly required packages for Jinja2 filters:")?;
        for (package, used_by) in COMMON_PACKAGES {
            writeln!(out, "  {:<11} {}", package, used_by)?;
        }
        writeln!(out, "{}", RULE_LINE)?;
        Ok(())
    }
}
