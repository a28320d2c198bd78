//! Stencil kernel throughput on a 256x256 tile.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hearth_grid::{DomainState, SubdomainDescriptor, WorkerTopology};
use hearth_solver::{apply_boundary, step, step_serial};

fn tile(extent: usize) -> DomainState {
    let topology = WorkerTopology::for_workers(1).unwrap();
    let descriptor = SubdomainDescriptor::split(extent, extent, &topology, 0).unwrap();
    let mut state = DomainState::new(descriptor, extent).unwrap();
    apply_boundary(&mut state.current, &state.subdomain.neighbours);
    state
}

fn bench_stencil(c: &mut Criterion) {
    let mut state = tile(256);
    c.bench_function("step_serial_256", |b| {
        b.iter(|| {
            step_serial(
                black_box(&state.current),
                &state.diffusivity,
                &mut state.next,
                0.1,
            );
        })
    });
    c.bench_function("step_256", |b| {
        b.iter(|| {
            step(
                black_box(&state.current),
                &state.diffusivity,
                &mut state.next,
                0.1,
            );
        })
    });
}

criterion_group!(benches, bench_stencil);
criterion_main!(benches);
