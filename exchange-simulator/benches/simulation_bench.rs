#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use exchange_core::catalog::Catalog;
use exchange_core::economy::Economy;
use exchange_core::optimize::OptimizeDirective;
use exchange_core::process::Process;
use exchange_simulator::{Simulator, StopCondition};

/// A long chain of slow processes: few launches, events thousands of cycles apart.
fn sparse_economy(stages: usize) -> Economy {
    let processes = (0..stages)
        .map(|i| {
            Process::new(
                format!("stage_{i}"),
                [(format!("good_{i}"), 1)].into_iter().collect(),
                [(format!("good_{}", i + 1), 2)].into_iter().collect(),
                10_000,
            )
        })
        .collect();
    Economy::new(
        [("good_0", 1)].into_iter().collect(),
        Catalog::new(processes).expect("non-empty catalog"),
        OptimizeDirective::from_tokens(["time"]).expect("non-empty directive"),
    )
}

/// Benchmark a full greedy schedule followed by its verification.
fn benchmark_schedule_and_verify(c: &mut Criterion) {
    let economy = sparse_economy(12);

    c.bench_function("greedy_schedule_sparse", |b| {
        b.iter(|| {
            let simulator = Simulator::new(&economy);
            black_box(simulator.schedule(&StopCondition::never()))
        })
    });

    let schedule = Simulator::new(&economy)
        .schedule(&StopCondition::never())
        .expect("schedule runs")
        .schedule;
    c.bench_function("replay_verify_sparse", |b| {
        b.iter(|| black_box(Simulator::new(&economy).verify(&schedule)))
    });
}

criterion_group!(benches, benchmark_schedule_and_verify);
criterion_main!(benches);
