//! # Toggle Hierarchy Benchmarks
//!
//! | Operation | Cost model |
//! |-----------|------------|
//! | Create | one lookup + at most one write per segment |
//! | Store resolver | one lookup per ancestor |
//! | Render / bulk status | O(n) over a pre-loaded application |
//! | Cascade | one write + one children query per node |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use toggle_hierarchy::{
    build_tree, is_effectively_enabled, AppId, FixedTimeSource, HierarchyConfig,
    InMemoryApplicationDirectory, InMemoryToggleStore, ToggleForest, ToggleLifecycleApi,
    ToggleService, ToggleServiceDependencies, ToggleStore,
};

const APP: &str = "bench";

type BenchService = ToggleService<InMemoryToggleStore, InMemoryApplicationDirectory, FixedTimeSource>;

fn service() -> BenchService {
    let app = AppId::parse(APP).unwrap();
    ToggleService::new(
        ToggleServiceDependencies {
            store: InMemoryToggleStore::new(),
            directory: InMemoryApplicationDirectory::with_apps([app]),
            clock: FixedTimeSource::new(0),
        },
        HierarchyConfig::default(),
    )
}

/// `fanout` roots, each with `fanout` children, each with `fanout` leaves.
fn populated(fanout: usize) -> BenchService {
    let svc = service();
    for a in 0..fanout {
        for b in 0..fanout {
            for c in 0..fanout {
                svc.create_toggle(&format!("r{a}.m{b}.l{c}"), true, true, APP).unwrap();
            }
        }
    }
    svc
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    for depth in [1usize, 4, 16] {
        let path: Vec<String> = (0..depth).map(|i| format!("s{i}")).collect();
        let path = path.join(".");
        group.bench_with_input(BenchmarkId::new("fresh_path", depth), &path, |b, path| {
            b.iter_batched(
                service,
                |svc| black_box(svc.create_toggle(path, true, true, APP).unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    for fanout in [4usize, 8, 12] {
        let svc = populated(fanout);
        let app = AppId::parse(APP).unwrap();
        let toggles = svc.store().get_by_app_id(&app).unwrap();
        group.throughput(Throughput::Elements(toggles.len() as u64));

        group.bench_with_input(BenchmarkId::new("store_walk_all", fanout), &toggles, |b, t| {
            b.iter(|| {
                t.iter()
                    .filter(|toggle| is_effectively_enabled(svc.store(), toggle))
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("forest_all", fanout), &toggles, |b, t| {
            b.iter(|| black_box(ToggleForest::new(t).effective_states()))
        });

        group.bench_with_input(BenchmarkId::new("render", fanout), &toggles, |b, t| {
            b.iter(|| black_box(build_tree(t)))
        });
    }

    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for fanout in [4usize, 8] {
        let svc = populated(fanout);
        let root = svc
            .store()
            .get_by_path("r0", &AppId::parse(APP).unwrap())
            .unwrap()
            .unwrap();
        let root_id = root.id.to_string();
        let mut enabled = false;

        group.bench_function(BenchmarkId::new("subtree", fanout), |b| {
            b.iter(|| {
                enabled = !enabled;
                black_box(svc.update_enabled_recursively(&root_id, enabled, APP).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create, bench_resolution, bench_cascade);
criterion_main!(benches);
