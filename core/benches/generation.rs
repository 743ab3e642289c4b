use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use synapse_core::*;

const WORDS: &[&str] = &["CAT", "NEURON", "SYNAPSES", "NEUROTRANSMITTER"];

fn all_features() -> Features {
    Features {
        swap: Feature::off(1.0),
        locked: Feature::on(0.1),
        hidden: Feature::on(0.15),
        hazard: Feature::on(0.1),
        direction_block: Feature::on(0.07),
    }
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for size in [4, 6, 10, MAX_GRID_SIZE] {
        for &word in WORDS {
            if word.len() > usize::from(size) * usize::from(size) {
                continue;
            }
            let config = LevelConfig::new(size, [word]).with_features(all_features());
            group.bench_with_input(
                BenchmarkId::new(format!("{size}x{size}"), word.len()),
                &config,
                |b, config| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        RandomGridGenerator::new(seed).generate(black_box(config), word)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_scatter_fallback(c: &mut Criterion) {
    let config = LevelConfig::new(4, ["NEUROTRANSMITTER"]);

    c.bench_function("generate/scatter 4x4", |b| {
        b.iter(|| {
            RandomGridGenerator::new(7)
                .with_max_attempts(0)
                .generate(black_box(&config), "NEUROTRANSMITTER")
        })
    });
}

fn bench_session_word(c: &mut Criterion) {
    let level = LevelConfig::new(6, ["NEURON"]).with_features(all_features());

    c.bench_function("session/load and spell", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut session = Session::start(
                level.clone(),
                0,
                seed,
                SessionOptions::default(),
                NullPresenter,
            )
            .unwrap();
            let targets = session.grid().target_coords().to_vec();
            for coords in targets {
                black_box(session.tap(coords).unwrap());
            }
            session.tick(black_box(SWAP_INTERVAL))
        })
    });
}

criterion_group!(
    benches,
    bench_generation,
    bench_scatter_fallback,
    bench_session_word
);
criterion_main!(benches);
