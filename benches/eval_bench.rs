//! Benchmarks for hand ranking and equity estimation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdem_equity::{best_rank, estimate_equity, parse_cards, rank5, EquityOptions, VillainPool};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rank5_benchmark(c: &mut Criterion) {
    let paired = parse_cards("As Ad Kh Qc Jh").unwrap();
    let flush = parse_cards("As Ks 9s 7s 2s").unwrap();

    c.bench_function("rank5_paired_hand", |b| {
        b.iter(|| rank5(black_box(&paired)).unwrap())
    });
    c.bench_function("rank5_flush", |b| {
        b.iter(|| rank5(black_box(&flush)).unwrap())
    });
}

fn best_rank_benchmark(c: &mut Criterion) {
    let seven = parse_cards("As Ad 9h 9c 5d 5s Kh").unwrap();

    c.bench_function("best_rank_seven_cards", |b| {
        b.iter(|| best_rank(black_box(&seven)).unwrap())
    });
}

fn equity_benchmark(c: &mut Criterion) {
    let hero_cards = parse_cards("Ah Ad").unwrap();
    let hero = [hero_cards[0], hero_cards[1]];
    let pool = VillainPool::full_deck_minus(&hero_cards);
    let options = EquityOptions::new().with_trials(1_000);

    c.bench_function("equity_1000_trials_heads_up", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            estimate_equity(hero, &[], &[pool.clone()], black_box(&options), &mut rng).unwrap()
        })
    });
}

criterion_group!(benches, rank5_benchmark, best_rank_benchmark, equity_benchmark);
criterion_main!(benches);
