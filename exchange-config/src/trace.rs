//! Trace (schedule log) files: one `cycle:process_name` line per launch.
//!
//! Names are resolved against the catalog while loading, so the verifier only
//! ever sees launches of known processes in non-decreasing cycle order.

use std::fs;
use std::path::Path;

use exchange_core::catalog::Catalog;
use exchange_core::schedule::{Schedule, ScheduleEntry};

use crate::economy::content_lines;
use crate::ConfigError;

pub fn load_trace<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<Schedule, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    parse_trace(&source, catalog)
}

pub fn parse_trace(source: &str, catalog: &Catalog) -> Result<Schedule, ConfigError> {
    let mut entries = Vec::new();
    for (line_no, line) in content_lines(source) {
        let malformed = || ConfigError::TraceSyntax {
            line: line_no,
            content: line.to_owned(),
        };
        let (cycle, name) = line.split_once(':').ok_or_else(malformed)?;
        let cycle = cycle.trim().parse().map_err(|_| malformed())?;
        let process = catalog.resolve(name.trim())?;
        entries.push(ScheduleEntry::new(cycle, process));
    }
    Ok(Schedule::from_entries(entries)?)
}

/// Renders a schedule in trace file form, newline terminated.
pub fn render_trace(schedule: &Schedule, catalog: &Catalog) -> String {
    let mut out = String::new();
    for line in schedule.lines(catalog) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::parse_economy;
    use exchange_core::ModelError;

    fn catalog() -> Catalog {
        parse_economy("wood:3\nplank:(wood:2):(plank:1):1\nsaw:(plank:1):():2\noptimize:(plank)")
            .unwrap()
            .catalog
    }

    #[test]
    fn parses_entries_in_file_order() {
        let catalog = catalog();
        let trace = parse_trace("# header\n0:plank\n\n0:plank\n1:saw\n", &catalog).unwrap();
        assert_eq!(render_trace(&trace, &catalog), "0:plank\n0:plank\n1:saw\n");
    }

    #[test]
    fn unknown_process_is_rejected_before_simulation() {
        let err = parse_trace("0:plank\n3:hammer\n", &catalog()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Model(ModelError::UnknownProcess(ref name)) if name == "hammer"
        ));
        assert_eq!(err.to_string(), "process 'hammer' not found in config");
    }

    #[test]
    fn bad_cycle_is_a_syntax_error() {
        assert!(matches!(
            parse_trace("zero:plank\n", &catalog()).unwrap_err(),
            ConfigError::TraceSyntax { line: 1, .. }
        ));
        assert!(matches!(
            parse_trace("-1:plank\n", &catalog()).unwrap_err(),
            ConfigError::TraceSyntax { .. }
        ));
        assert!(matches!(
            parse_trace("plank\n", &catalog()).unwrap_err(),
            ConfigError::TraceSyntax { .. }
        ));
    }

    #[test]
    fn decreasing_cycles_are_rejected() {
        assert!(matches!(
            parse_trace("5:plank\n4:saw\n", &catalog()).unwrap_err(),
            ConfigError::Model(ModelError::TraceOutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn trace_round_trips_through_a_file() {
        let catalog = catalog();
        let trace = parse_trace("0:plank\n1:saw\n", &catalog).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, render_trace(&trace, &catalog)).unwrap();
        assert_eq!(load_trace(&path, &catalog).unwrap(), trace);
    }
}
