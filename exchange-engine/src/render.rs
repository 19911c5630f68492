//! Console output for `run` and `check`.

use std::fmt::Write;

use exchange_core::catalog::Catalog;
use exchange_core::ledger::Ledger;
use exchange_core::Cycle;
use exchange_simulator::{HaltReason, Infeasibility, ScheduleOutcome};

/// Schedule, halt line and final stocks.
pub fn render_schedule(outcome: &ScheduleOutcome, catalog: &Catalog) -> String {
    let mut out = String::from("Main Processes:\n");
    for line in outcome.schedule.lines(catalog) {
        let _ = writeln!(out, " {line}");
    }
    let _ = writeln!(out, "{}", halt_line(outcome.halt, outcome.final_cycle));
    out.push_str("Stock:\n");
    out.push_str(&render_stocks(&outcome.stocks));
    out
}

pub fn halt_line(halt: HaltReason, cycle: Cycle) -> String {
    match halt {
        HaltReason::Settled => format!("No more process doable at cycle {cycle}"),
        HaltReason::DeadlineReached => format!("Waiting time elapsed at cycle {cycle}"),
        HaltReason::CycleLimitReached => format!("Cycle limit reached at cycle {cycle}"),
        HaltReason::Cancelled => format!("Interrupted at cycle {cycle}"),
    }
}

/// One ` name => qty` line per resource, sorted by name.
pub fn render_stocks(stocks: &Ledger) -> String {
    let mut out = String::new();
    for (name, qty) in stocks.iter() {
        let _ = writeln!(out, " {name} => {qty}");
    }
    out
}

pub fn render_accepted(final_cycle: Cycle) -> String {
    format!("Trace completed, no error detected.\nFinal cycle: {final_cycle}\n")
}

pub fn render_rejected(error: &Infeasibility) -> String {
    format!("Error detected\n{error}\nExiting...\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_core::process::Process;
    use exchange_core::schedule::{Schedule, ScheduleEntry};

    #[test]
    fn schedule_output_layout() {
        let catalog = Catalog::new(vec![Process::new(
            "plank",
            [("wood", 2)].into_iter().collect(),
            [("plank", 1)].into_iter().collect(),
            1,
        )])
        .unwrap();
        let id = catalog.resolve("plank").unwrap();
        let outcome = ScheduleOutcome {
            schedule: Schedule::from_entries(vec![ScheduleEntry::new(0, id), ScheduleEntry::new(0, id)])
                .unwrap(),
            stocks: [("wood", 0), ("plank", 2)].into_iter().collect(),
            final_cycle: 1,
            halt: HaltReason::Settled,
        };
        assert_eq!(
            render_schedule(&outcome, &catalog),
            "Main Processes:\n 0:plank\n 0:plank\nNo more process doable at cycle 1\nStock:\n plank => 2\n wood => 0\n"
        );
    }

    #[test]
    fn aborts_name_their_reason() {
        assert_eq!(
            halt_line(HaltReason::DeadlineReached, 40),
            "Waiting time elapsed at cycle 40"
        );
        assert_eq!(halt_line(HaltReason::Cancelled, 3), "Interrupted at cycle 3");
    }

    #[test]
    fn check_verdicts() {
        assert_eq!(
            render_accepted(8),
            "Trace completed, no error detected.\nFinal cycle: 8\n"
        );
        let error = Infeasibility {
            cycle: 0,
            process: "plank".into(),
            resource: "wood".into(),
            needed: 2,
            available: 1,
        };
        assert_eq!(
            render_rejected(&error),
            "Error detected\nat 0:plank stock insufficient (need 2 of wood, have 1)\nExiting...\n"
        );
    }
}
