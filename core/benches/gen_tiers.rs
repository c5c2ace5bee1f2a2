use criterion::{Criterion, criterion_group, criterion_main};
use lumo_core::{BoardGenerator, Difficulty, RandomBoardGenerator};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        group.bench_function(format!("{difficulty:?}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                RandomBoardGenerator::new(seed)
                    .generate(difficulty)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
