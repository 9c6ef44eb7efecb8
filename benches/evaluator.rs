use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_rs::cards::{parse_cards, Card};
use holdem_rs::deck::Deck;
use holdem_rs::evaluator::{evaluate, evaluate_cards};

fn seven(s: &str) -> [Card; 7] {
    let cards = parse_cards(s).expect("valid cards");
    cards.try_into().expect("seven cards")
}

fn bench_evaluate(c: &mut Criterion) {
    let hands = [
        ("high_card", seven("Ah Kd 7s 5c 2d 9h 3c")),
        ("full_house", seven("7c 7d 7h 2s 2c 9d Ks")),
        ("royal_flush", seven("As Ks Qs Js Ts 9s Ah")),
    ];

    let mut g = c.benchmark_group("evaluate");
    for (name, cards) in &hands {
        g.bench_with_input(BenchmarkId::new("seven", name), cards, |b, input| {
            b.iter(|| evaluate(black_box(input)))
        });
    }
    g.finish();
}

fn bench_evaluate_cards(c: &mut Criterion) {
    let five = parse_cards("As Ks Qs Js Ts").expect("valid cards");
    c.bench_function("evaluate_cards_five", |b| b.iter(|| evaluate_cards(black_box(&five))));
}

fn bench_shuffled_deals(c: &mut Criterion) {
    let mut deck = Deck::standard();
    deck.shuffle_seeded(42);
    let dealt: Vec<[Card; 7]> = (0..7)
        .map(|_| deck.draw_n(7).expect("enough cards").try_into().expect("seven cards"))
        .collect();
    c.bench_function("evaluate_random_sevens", |b| {
        b.iter(|| dealt.iter().map(|h| evaluate(black_box(h))).max())
    });
}

criterion_group!(benches, bench_evaluate, bench_evaluate_cards, bench_shuffled_deals);
criterion_main!(benches);
