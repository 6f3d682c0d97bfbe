//! Output formatter implementations.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ResolveError;
use crate::path::Resolution;
use crate::scan::ScanReport;
use crate::{Error, Result};

use super::{OutputFormatter, ResolveOutcome};

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Validation {
        field: "json_output".to_string(),
        message: format!("failed to serialize to JSON: {e}"),
    })
}

fn to_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Validation {
        field: "json_output".to_string(),
        message: format!("failed to serialize to JSON: {e}"),
    })
}

fn successes(outcomes: &[ResolveOutcome]) -> impl Iterator<Item = &Resolution> {
    outcomes.iter().filter_map(|outcome| match outcome {
        ResolveOutcome::Resolved(resolution) => Some(resolution),
        ResolveOutcome::Failed { .. } => None,
    })
}

/// Human-readable formatter.
pub struct HumanFormatter {
    show_chain: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    #[must_use]
    pub fn new(show_chain: bool) -> Self {
        Self { show_chain }
    }

    fn format_one(&self, resolution: &Resolution) -> String {
        let original = resolution.original().display();
        if !resolution.is_link() {
            return format!("{original}: not a symlink ({})", resolution.kind());
        }

        let suffix = if resolution.is_dangling() {
            " (missing)"
        } else {
            ""
        };

        if !self.show_chain {
            return format!(
                "{original} -> {}{suffix}",
                resolution.resolved().display()
            );
        }

        let mut lines = vec![format!("{original} ({} hop(s))", resolution.hops())];
        for link in resolution.chain() {
            lines.push(format!("  {}", link.display()));
        }
        lines.push(format!(
            "  => {} [{}]{suffix}",
            resolution.resolved().display(),
            resolution.kind()
        ));
        lines.join("\n")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_resolutions(&self, outcomes: &[ResolveOutcome]) -> Result<String> {
        let lines: Vec<String> = successes(outcomes).map(|r| self.format_one(r)).collect();
        Ok(lines.join("\n"))
    }

    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let mut lines: Vec<String> = report
            .entries
            .iter()
            .map(|entry| format!("{}: {}", entry.link.display(), entry.status))
            .collect();

        lines.push(format!(
            "{} link(s) under {}: {} resolved, {} dangling, {} cyclic, {} unreadable",
            report.entries.len(),
            report.root.display(),
            report.resolved_count(),
            report.dangling_count(),
            report.cycle_count(),
            report.unreadable_count()
        ));
        if report.skipped > 0 {
            lines.push(format!("{} entr(ies) could not be read", report.skipped));
        }

        Ok(lines.join("\n"))
    }
}

/// Bare-path formatter for scripts.
pub struct PlainFormatter {
    show_chain: bool,
}

impl PlainFormatter {
    /// Create a new plain formatter.
    #[must_use]
    pub fn new(show_chain: bool) -> Self {
        Self { show_chain }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_resolutions(&self, outcomes: &[ResolveOutcome]) -> Result<String> {
        let mut lines = Vec::new();
        for resolution in successes(outcomes) {
            if self.show_chain {
                lines.extend(resolution.chain().iter().map(|p| p.display().to_string()));
            }
            lines.push(resolution.resolved().display().to_string());
        }
        Ok(lines.join("\n"))
    }

    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let lines: Vec<String> = report
            .entries
            .iter()
            .map(|entry| format!("{}\t{}", entry.link.display(), entry.status))
            .collect();
        Ok(lines.join("\n"))
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl JsonFormatter {
    fn outcome_value(outcome: &ResolveOutcome) -> Result<Value> {
        match outcome {
            ResolveOutcome::Resolved(resolution) => {
                let mut value = to_json(resolution)?;
                value["hops"] = json!(resolution.hops());
                value["status"] = json!(if resolution.is_dangling() {
                    "dangling"
                } else {
                    "resolved"
                });
                Ok(value)
            }
            ResolveOutcome::Failed { input, error } => {
                let mut value = json!({
                    "original": input.display().to_string(),
                    "path": error.path().display().to_string(),
                    "error": error.to_string(),
                });
                match error {
                    ResolveError::Cycle { hops, .. } => {
                        value["status"] = json!("cycle");
                        value["hops"] = json!(hops);
                    }
                    ResolveError::Io { .. } => {
                        value["status"] = json!("io");
                    }
                }
                Ok(value)
            }
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_resolutions(&self, outcomes: &[ResolveOutcome]) -> Result<String> {
        let values = outcomes
            .iter()
            .map(Self::outcome_value)
            .collect::<Result<Vec<_>>>()?;
        to_pretty(&Value::Array(values))
    }

    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let mut value = to_json(report)?;
        value["summary"] = json!({
            "total": report.entries.len(),
            "resolved": report.resolved_count(),
            "dangling": report.dangling_count(),
            "cycle": report.cycle_count(),
            "unreadable": report.unreadable_count(),
        });
        to_pretty(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{EntryKind, LinkResolver, MemoryFileSystem};
    use crate::scan::{LinkStatus, ScanEntry};
    use std::path::{Path, PathBuf};

    fn resolver() -> LinkResolver<MemoryFileSystem> {
        let fs = MemoryFileSystem::new()
            .with_file("/srv/target")
            .with_symlink("/srv/link", "mid")
            .with_symlink("/srv/mid", "target")
            .with_symlink("/srv/dangling", "gone")
            .with_symlink("/srv/loop", "loop");
        LinkResolver::with_filesystem(fs)
    }

    fn outcome(path: &str) -> ResolveOutcome {
        let path = Path::new(path);
        ResolveOutcome::new(path, resolver().resolve(path))
    }

    fn sample_report() -> ScanReport {
        ScanReport {
            root: PathBuf::from("/srv"),
            entries: vec![
                ScanEntry {
                    link: PathBuf::from("/srv/link"),
                    hops: 2,
                    status: LinkStatus::Resolved(PathBuf::from("/srv/target")),
                },
                ScanEntry {
                    link: PathBuf::from("/srv/loop"),
                    hops: 1,
                    status: LinkStatus::Cycle,
                },
            ],
            skipped: 0,
        }
    }

    #[test]
    fn test_human_single_line() {
        let out = HumanFormatter::new(false)
            .format_resolutions(&[outcome("/srv/link")])
            .unwrap();
        assert_eq!(out, "/srv/link -> /srv/target");
    }

    #[test]
    fn test_human_marks_dangling_and_plain_paths() {
        let out = HumanFormatter::new(false)
            .format_resolutions(&[outcome("/srv/dangling"), outcome("/srv/target")])
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "/srv/dangling -> /srv/gone (missing)");
        assert!(lines[1].contains("not a symlink"));
    }

    #[test]
    fn test_human_chain() {
        let out = HumanFormatter::new(true)
            .format_resolutions(&[outcome("/srv/link")])
            .unwrap();
        assert!(out.starts_with("/srv/link (2 hop(s))"));
        assert!(out.contains("  /srv/mid"));
        assert!(out.ends_with("=> /srv/target [file]"));
    }

    #[test]
    fn test_human_skips_failures() {
        let out = HumanFormatter::new(false)
            .format_resolutions(&[outcome("/srv/loop")])
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_plain_output() {
        let out = PlainFormatter::new(false)
            .format_resolutions(&[outcome("/srv/link"), outcome("/srv/loop")])
            .unwrap();
        assert_eq!(out, "/srv/target");

        let out = PlainFormatter::new(true)
            .format_resolutions(&[outcome("/srv/link")])
            .unwrap();
        assert_eq!(out, "/srv/link\n/srv/mid\n/srv/target");
    }

    #[test]
    fn test_json_resolutions() {
        let out = JsonFormatter
            .format_resolutions(&[outcome("/srv/link"), outcome("/srv/loop")])
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0]["status"], "resolved");
        assert_eq!(items[0]["resolved"], "/srv/target");
        assert_eq!(items[0]["kind"], "file");
        assert_eq!(items[0]["hops"], 2);

        assert_eq!(items[1]["status"], "cycle");
        assert_eq!(items[1]["original"], "/srv/loop");
        assert_eq!(items[1]["hops"], 1);
    }

    #[test]
    fn test_json_io_failure() {
        let fs = MemoryFileSystem::new()
            .with_error("/locked", std::io::ErrorKind::PermissionDenied);
        let path = Path::new("/locked");
        let outcome = ResolveOutcome::new(path, LinkResolver::with_filesystem(fs).resolve(path));
        let out = JsonFormatter.format_resolutions(&[outcome]).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["status"], "io");
        assert_eq!(parsed[0]["path"], "/locked");
    }

    #[test]
    fn test_scan_formats() {
        let report = sample_report();

        let human = HumanFormatter::new(false).format_scan(&report).unwrap();
        assert!(human.contains("/srv/loop: cycle"));
        assert!(human.ends_with("2 link(s) under /srv: 1 resolved, 0 dangling, 1 cyclic, 0 unreadable"));

        let plain = PlainFormatter::new(false).format_scan(&report).unwrap();
        assert_eq!(plain, "/srv/link\t/srv/target\n/srv/loop\tcycle");

        let json: Value = serde_json::from_str(&JsonFormatter.format_scan(&report).unwrap()).unwrap();
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["entries"][1]["status"], "cycle");
        assert_eq!(json["entries"][0]["detail"], "/srv/target");
    }

    #[test]
    fn test_outcome_input() {
        assert_eq!(outcome("/srv/loop").input(), Path::new("/srv/loop"));
        assert_eq!(outcome("/srv/link").input(), Path::new("/srv/link"));
        assert!(matches!(
            outcome("/srv/target"),
            ResolveOutcome::Resolved(ref r) if r.kind() == EntryKind::File
        ));
    }
}
