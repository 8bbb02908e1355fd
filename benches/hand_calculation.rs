use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hand_odds::engine::{calculate_probabilities, enumerate_hands};
use hand_odds::scenario::Scenario;

fn benchmark_single_type(c: &mut Criterion) {
    let scenario = Scenario::from_file("scenarios/commander_lands.json").expect("Failed to load scenario");
    let request = scenario.request().expect("valid request");

    c.bench_function("commander_lands", |b| {
        b.iter(|| {
            calculate_probabilities(
                black_box(&request.deck),
                black_box(&request.criteria),
                black_box(request.hand_size),
                black_box(request.mulligans),
                black_box(request.extra_draws),
            )
            .expect("fits")
        })
    });
}

fn benchmark_three_types(c: &mut Criterion) {
    let scenario = Scenario::from_file("scenarios/custom_combo.json").expect("Failed to load scenario");
    let request = scenario.request().expect("valid request");

    c.bench_function("custom_combo", |b| b.iter(|| black_box(&request).run().expect("fits")));
}

fn benchmark_enumeration(c: &mut Criterion) {
    let scenario = Scenario::from_file("scenarios/standard_ramp.json").expect("Failed to load scenario");
    let deck = scenario.deck().expect("valid deck");

    c.bench_function("enumerate_hands", |b| {
        b.iter(|| enumerate_hands(black_box(&deck), black_box(7)))
    });
}

criterion_group!(benches, benchmark_single_type, benchmark_three_types, benchmark_enumeration);
criterion_main!(benches);
