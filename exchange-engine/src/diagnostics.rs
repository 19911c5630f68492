//! YAML run reports written by `--report`.

use std::fs;
use std::path::Path;

use serde::Serialize;

use exchange_core::ledger::Ledger;
use exchange_core::Cycle;

use crate::error::RuntimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Schedule,
    Check,
}

/// One run, as written to the report file.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    pub config: String,
    pub final_cycle: Cycle,
    /// Halt reason for `schedule`, `accepted`/`rejected` for `check`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub launches: usize,
    pub schedule_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stocks: Option<Ledger>,
    pub elapsed_ms: u64,
}

/// Writes `summary` to `path` as YAML, replacing any existing file.
pub fn record_run_report(path: &Path, summary: &RunSummary) -> Result<(), RuntimeError> {
    fs::write(path, serde_yaml::to_string(summary)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_written_as_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        let summary = RunSummary {
            mode: RunMode::Check,
            config: "simple.txt".into(),
            final_cycle: 12,
            outcome: "rejected".into(),
            error: Some("at 12:delivery stock insufficient (need 1 of product, have 0)".into()),
            launches: 3,
            schedule_digest: "ab12".into(),
            stocks: None,
            elapsed_ms: 0,
        };

        record_run_report(&path, &summary).unwrap();

        let yaml = fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("mode: check"));
        assert!(yaml.contains("final_cycle: 12"));
        assert!(yaml.contains("outcome: rejected"));
        assert!(!yaml.contains("stocks"));
    }
}
