//! Economy file parser.
//!
//! Line oriented. Blank lines and lines starting with `#` are skipped; every
//! other line is one of
//!
//! ```text
//! wood:10                                  stock
//! plank:(wood:2):(plank:1):1               process (needs, results, duration)
//! optimize:(time;plank)                    optimize directive
//! ```
//!
//! A repeated stock line overwrites the earlier quantity and a repeated
//! optimize line replaces the earlier directive.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use exchange_core::catalog::Catalog;
use exchange_core::economy::Economy;
use exchange_core::ledger::Ledger;
use exchange_core::optimize::OptimizeDirective;
use exchange_core::process::Process;

use crate::ConfigError;

lazy_static! {
    static ref STOCK_LINE: Regex = Regex::new(r"^([A-Za-z0-9_]+):([0-9]+)$").expect("stock pattern");
    static ref PROCESS_LINE: Regex =
        Regex::new(r"^([A-Za-z0-9_]+):\(([^)]*)\):\(([^)]*)\):([0-9]+)$").expect("process pattern");
    static ref OPTIMIZE_LINE: Regex =
        Regex::new(r"^optimize:\(([^)]+)\)$").expect("optimize pattern");
}

/// Lines that carry content: trimmed, non-empty, not a `#` comment. Yields
/// 1-based line numbers alongside.
pub(crate) fn content_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Reads and parses an economy file.
pub fn load_economy<P: AsRef<Path>>(path: P) -> Result<Economy, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    parse_economy(&source)
}

/// Parses economy file contents and validates the result.
pub fn parse_economy(source: &str) -> Result<Economy, ConfigError> {
    let mut stocks = Ledger::new();
    let mut processes = Vec::new();
    let mut optimize: Vec<String> = Vec::new();

    for (line_no, line) in content_lines(source) {
        if let Some(caps) = STOCK_LINE.captures(line) {
            stocks.set(&caps[1], parse_quantity(&caps[2], line_no, line)?);
        } else if let Some(caps) = PROCESS_LINE.captures(line) {
            let name = &caps[1];
            processes.push(Process::new(
                name,
                parse_resource_list(&caps[2], name, "needs")?,
                parse_resource_list(&caps[3], name, "results")?,
                parse_quantity(&caps[4], line_no, line)?,
            ));
        } else if let Some(caps) = OPTIMIZE_LINE.captures(line) {
            optimize = caps[1].split(';').map(|t| t.trim().to_owned()).collect();
        } else {
            return Err(ConfigError::Syntax {
                line: line_no,
                content: line.to_owned(),
            });
        }
    }

    let catalog = Catalog::new(processes)?;
    let optimize = OptimizeDirective::from_tokens(optimize.iter().map(String::as_str))?;
    Ok(Economy::new(stocks, catalog, optimize))
}

/// Digits already matched by a pattern; only overflow can fail here.
fn parse_quantity(digits: &str, line: usize, content: &str) -> Result<u64, ConfigError> {
    digits.parse().map_err(|_| ConfigError::Syntax {
        line,
        content: content.to_owned(),
    })
}

/// Parses `name:qty;name:qty`. An empty list is an empty ledger.
fn parse_resource_list(
    list: &str,
    process: &str,
    which: &'static str,
) -> Result<Ledger, ConfigError> {
    let mut ledger = Ledger::new();
    if list.trim().is_empty() {
        return Ok(ledger);
    }
    for part in list.split(';') {
        let malformed = || ConfigError::ResourceList {
            process: process.to_owned(),
            list: which,
            part: part.to_owned(),
        };
        let caps = STOCK_LINE.captures(part.trim()).ok_or_else(malformed)?;
        ledger.set(&caps[1], caps[2].parse().map_err(|_| malformed())?);
    }
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_core::optimize::OptimizeTarget;
    use exchange_core::ModelError;

    const SIMPLE: &str = "\
# a tiny economy
euro:10

equipment_purchase:(euro:8):(equipment:1):10
product_creation:(equipment:1):(product:1):30
delivery:(product:1):(client_content:1):20
optimize:(time;client_content)
";

    #[test]
    fn parses_stocks_processes_and_directive() {
        let economy = parse_economy(SIMPLE).unwrap();
        assert_eq!(economy.stocks.get("euro"), 10);
        assert_eq!(economy.catalog.len(), 3);

        let id = economy.catalog.resolve("product_creation").unwrap();
        let process = economy.catalog.get(id);
        assert_eq!(process.needs.get("equipment"), 1);
        assert_eq!(process.results.get("product"), 1);
        assert_eq!(process.duration, 30);

        assert_eq!(
            economy.optimize.targets(),
            [
                OptimizeTarget::Time,
                OptimizeTarget::Resource("client_content".into())
            ]
        );
    }

    #[test]
    fn processes_keep_declaration_order() {
        let economy = parse_economy(SIMPLE).unwrap();
        let names: Vec<_> = economy.catalog.iter().map(|(_, p)| p.name.clone()).collect();
        assert_eq!(
            names,
            ["equipment_purchase", "product_creation", "delivery"]
        );
    }

    #[test]
    fn empty_lists_and_zero_duration_are_accepted() {
        let economy = parse_economy("gift:():(euro:1):0\noptimize:(euro)\n").unwrap();
        let process = economy.catalog.get(economy.catalog.resolve("gift").unwrap());
        assert!(process.needs.is_empty());
        assert_eq!(process.duration, 0);
    }

    #[test]
    fn repeated_stock_line_overwrites() {
        let economy = parse_economy("a:1\na:5\np:(a:1):():1\noptimize:(time)").unwrap();
        assert_eq!(economy.stocks.get("a"), 5);
    }

    #[test]
    fn unknown_line_reports_line_number() {
        let err = parse_economy("a:1\nthis is not valid\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Syntax { line: 2, ref content } if content == "this is not valid"
        ));
        assert_eq!(err.to_string(), "Error while parsing `this is not valid` (line 2)");
    }

    #[test]
    fn names_are_ascii_word_tokens() {
        assert!(matches!(
            parse_economy("café:3\n").unwrap_err(),
            ConfigError::Syntax { line: 1, .. }
        ));
        assert!(matches!(
            parse_economy("brew:(café:1):(tea:1):2\noptimize:(tea)").unwrap_err(),
            ConfigError::ResourceList { .. }
        ));
        assert!(parse_economy("brew_2:(Beans_1:1):(tea:1):2\noptimize:(tea)").is_ok());
    }

    #[test]
    fn negative_quantities_do_not_parse() {
        assert!(matches!(
            parse_economy("a:-1\n").unwrap_err(),
            ConfigError::Syntax { line: 1, .. }
        ));
        assert!(matches!(
            parse_economy("p:(a:1):(b:1):-3\n").unwrap_err(),
            ConfigError::Syntax { .. }
        ));
    }

    #[test]
    fn malformed_resource_list_names_the_process() {
        let err = parse_economy("p:(a:1;oops):(b:1):3\noptimize:(b)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error parsing needs for process p: invalid resource format: oops"
        );
    }

    #[test]
    fn missing_sections_are_model_errors() {
        assert!(matches!(
            parse_economy("a:1\noptimize:(a)").unwrap_err(),
            ConfigError::Model(ModelError::EmptyCatalog)
        ));
        assert!(matches!(
            parse_economy("p:(a:1):(b:1):3").unwrap_err(),
            ConfigError::Model(ModelError::EmptyOptimize)
        ));
    }

    #[test]
    fn process_lines_render_back_to_source() {
        let line = "equipment_purchase:(euro:8):(equipment:1):10";
        let economy = parse_economy(&format!("{line}\noptimize:(time)")).unwrap();
        let (_, process) = economy.catalog.iter().next().unwrap();
        assert_eq!(process.to_string(), line);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_economy("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
