//! Benchmarks for gridphys
//!
//! Run with: `cargo bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridphys::prelude::*;
use gridphys::collision::calculate_collision;

fn scattered_world(bodies: usize, threads: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(WorldConfig {
        threads,
        ..WorldConfig::default()
    });
    let shape = Arc::new(Shape::rect(50.0, 50.0));
    // lay bodies out on a coarse lattice so a fraction of them overlap
    for i in 0..bodies {
        let x = (i % 100) as f32 * 97.0 % 9500.0;
        let y = (i / 100) as f32 * 131.0 % 9500.0;
        let mut body = PhysicsBody::dynamic(shape.clone(), 1.0);
        body.set_position(Vec2f::new(x, y));
        world.add_object(body);
    }
    world
}

fn bench_world_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");

    for &bodies in &[100usize, 1000] {
        group.bench_function(format!("{bodies}_bodies_serial"), |b| {
            b.iter_batched(
                || scattered_world(bodies, 0),
                |mut world| {
                    world.update();
                    black_box(world.collided().len())
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("{bodies}_bodies_4_threads"), |b| {
            b.iter_batched(
                || scattered_world(bodies, 4),
                |mut world| {
                    world.update();
                    black_box(world.collided().len())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");

    let shape = Arc::new(Shape::rect(100.0, 100.0));
    let mut a = PhysicsBody::dynamic(shape.clone(), 1.0);
    a.set_position(Vec2f::new(200.0, 200.0));
    let mut b = PhysicsBody::dynamic(shape, 1.0);
    b.set_position(Vec2f::new(250.0, 220.0));

    group.bench_function("overlapping_boxes", |bench| {
        bench.iter(|| black_box(calculate_collision(black_box(&a), black_box(&b))));
    });

    let mut far = PhysicsBody::dynamic(Arc::new(Shape::rect(100.0, 100.0)), 1.0);
    far.set_position(Vec2f::new(5000.0, 5000.0));

    group.bench_function("broad_phase_reject", |bench| {
        bench.iter(|| black_box(calculate_collision(black_box(&a), black_box(&far))));
    });

    group.finish();
}

criterion_group!(benches, bench_world_tick, bench_narrow_phase);
criterion_main!(benches);
