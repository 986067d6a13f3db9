use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use fuzzdex::{IndexBuilder, Keyword, KEYWORD_LEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_word(rng: &mut StdRng) -> [u8; KEYWORD_LEN] {
    let mut word = [0u8; KEYWORD_LEN];
    for c in word.iter_mut() {
        *c = b'A' + rng.random_range(0..10u8);
    }
    word
}

fn bench_search(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keywords: Vec<[u8; KEYWORD_LEN]> = (0..100_000).map(|_| random_word(&mut rng)).collect();

    let mut builder = IndexBuilder::with_capacity(keywords.len());
    for w in &keywords {
        builder.insert(Keyword::parse(w).unwrap()).unwrap();
    }
    let index = builder.finalize();
    let mut searcher = index.searcher();

    // positive: an indexed keyword with two substitutions applied
    let mut near = keywords[500];
    near[0] = if near[0] == b'A' { b'B' } else { b'A' };
    near[7] = if near[7] == b'J' { b'I' } else { b'J' };

    let negatives: Vec<[u8; KEYWORD_LEN]> = (0..256).map(|_| random_word(&mut rng)).collect();

    let mut group = c.benchmark_group("search");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit_exact", |b| {
        b.iter(|| black_box(searcher.search(black_box(&keywords[500]), 3)))
    });

    group.bench_function("hit_two_substitutions", |b| {
        b.iter(|| black_box(searcher.search(black_box(&near), 3)))
    });

    group.bench_function("miss_random", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % negatives.len();
            black_box(searcher.search(black_box(&negatives[i]), 3))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
