use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use murmuration_core::{FlockConfig, FlockWorld, Vec2};
use std::time::Duration;

fn seeded_world(boids: usize) -> FlockWorld {
    let config = FlockConfig {
        capacity: boids,
        spawn_extent: 50.0,
        rng_seed: Some(0xBEEF),
        history_capacity: 1,
        ..FlockConfig::default()
    };
    let mut world = FlockWorld::new(config).expect("world");
    world.spawn_scattered(boids);
    world
}

fn bench_flock_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_step");
    // Allow env overrides so CI and laptops can trade time for stability.
    let samples: usize = std::env::var("MURMUR_BENCH_SAMPLES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(30);
    let measure: u64 = std::env::var("MURMUR_BENCH_MEASURE_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);
    let steps: usize = std::env::var("MURMUR_BENCH_STEPS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(64);
    let populations: Vec<usize> = std::env::var("MURMUR_BENCH_BOIDS")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|t| t.trim().parse::<usize>().ok())
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![150, 300, 600]);
    group.sample_size(samples);
    group.measurement_time(Duration::from_secs(measure));

    let target = Vec2::new(30.0, 15.0);
    for &boids in &populations {
        group.bench_function(format!("sequential_steps{steps}_boids{boids}"), |b| {
            b.iter_batched(
                || seeded_world(boids),
                |mut world| {
                    for _ in 0..steps {
                        world.step(0.016, target);
                    }
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("parallel_steps{steps}_boids{boids}"), |b| {
            b.iter_batched(
                || seeded_world(boids),
                |mut world| {
                    for _ in 0..steps {
                        world.step_parallel(0.016, target);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flock_steps);
criterion_main!(benches);
