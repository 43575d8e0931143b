//! # Registry Benchmark
//!
//! Measures the three hot operations of a frame:
//! - Creating entities and attaching components
//! - Reconciling pending entities against systems
//! - Reading and writing components of system members
//!
//! Run with: `cargo bench --package kiln_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kiln_core::{Component, ComponentTypes, Registry, RegistryResult, System, SystemBase};

#[derive(Clone, Copy, Default)]
struct Position {
    x: f64,
    y: f64,
}
impl Component for Position {}

#[derive(Clone, Copy, Default)]
struct Velocity {
    x: f64,
    y: f64,
}
impl Component for Velocity {}

struct Movement {
    base: SystemBase,
}

impl Movement {
    fn new(types: &mut ComponentTypes) -> RegistryResult<Self> {
        let mut base = SystemBase::new();
        base.require_component::<Position>(types)?
            .require_component::<Velocity>(types)?;
        Ok(Self { base })
    }
}

impl System for Movement {
    fn base(&self) -> &SystemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SystemBase {
        &mut self.base
    }
}

/// Builds a registry with `count` moving entities, reconciled.
fn populated(count: usize) -> Registry {
    let mut registry = Registry::default();
    registry.add_system(Movement::new).unwrap();
    for i in 0..count {
        let entity = registry.create_entity();
        registry
            .add_component(entity, Position { x: i as f64, y: 0.0 })
            .unwrap();
        registry
            .add_component(entity, Velocity { x: 1.0, y: 0.5 })
            .unwrap();
    }
    registry.update();
    registry
}

/// Benchmark: create entities with two components.
fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_with_components");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut registry = Registry::default();
                for _ in 0..count {
                    let entity = registry.create_entity();
                    registry.add_component(entity, Position::default()).unwrap();
                    registry.add_component(entity, Velocity::default()).unwrap();
                }
                black_box(registry.entity_count())
            });
        });
    }

    group.finish();
}

/// Benchmark: reconcile a frame's worth of pending entities.
fn bench_update(c: &mut Criterion) {
    c.bench_function("update_10k_pending", |b| {
        b.iter_batched(
            || {
                let mut registry = Registry::default();
                registry.add_system(Movement::new).unwrap();
                for _ in 0..10_000 {
                    let entity = registry.create_entity();
                    registry.add_component(entity, Position::default()).unwrap();
                    registry.add_component(entity, Velocity::default()).unwrap();
                }
                registry
            },
            |mut registry| {
                registry.update();
                registry
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: integrate velocity into position for every member.
fn bench_movement_tick(c: &mut Criterion) {
    let mut registry = populated(100_000);

    c.bench_function("movement_tick_100k", |b| {
        b.iter(|| {
            let members = registry.get_system::<Movement>().unwrap().members().to_vec();
            for entity in members {
                let velocity = *registry.get_component::<Velocity>(entity).unwrap();
                let position = registry.get_component_mut::<Position>(entity).unwrap();
                position.x += velocity.x * 0.016;
                position.y += velocity.y * 0.016;
            }
        });
    });
}

criterion_group!(benches, bench_spawn, bench_update, bench_movement_tick);
criterion_main!(benches);
