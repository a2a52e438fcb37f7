use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_ioc::*;
use std::sync::Arc;

#[derive(Default)]
struct Leaf;
impl Bean for Leaf {}

#[derive(Default)]
struct Node {
    leaf: Option<Arc<Leaf>>,
}

impl Bean for Node {
    fn inject(&mut self, field: &str, dependency: BeanRef) -> DiResult<()> {
        match field {
            "leaf" => {
                self.leaf = Some(cast_dependency(field, dependency)?);
                Ok(())
            }
            _ => Err(self.unknown_field(field)),
        }
    }
}

struct NoopHook;
impl BeanPostProcessor for NoopHook {
    fn post_process_after_initialization(&self, _bean_name: &str, bean: &mut dyn Bean) {
        black_box(bean);
    }
}

fn small_source() -> StaticTypeSource {
    let mut source = StaticTypeSource::new();
    source
        .add(ComponentDescriptor::<Leaf>::new().in_package("bench").component("leaf"))
        .add(
            ComponentDescriptor::<Node>::new()
                .in_package("bench")
                .component("node")
                .scope("prototype")
                .autowired("leaf"),
        );
    source
}

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let source = small_source();
    let context = ApplicationContext::new(ComponentScan::new("bench"), &source).unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = context.get_bean(black_box("leaf")).unwrap();
            black_box(v);
        })
    });
}

fn bench_prototype_create(c: &mut Criterion) {
    let source = small_source();
    let context = ApplicationContext::new(ComponentScan::new("bench"), &source).unwrap();

    c.bench_function("prototype_with_injection", |b| {
        b.iter(|| {
            let v = context.get_bean(black_box("node")).unwrap();
            black_box(v);
        })
    });
}

fn bench_hook_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("hook_chain");
    let source = small_source();

    for &hook_count in &[0usize, 1, 4, 16] {
        let mut builder = ApplicationContext::builder(ComponentScan::new("bench"), &source);
        for _ in 0..hook_count {
            builder = builder.post_processor(Arc::new(NoopHook));
        }
        let context = builder.build().unwrap();

        group.bench_with_input(BenchmarkId::new("prototype", hook_count), &hook_count, |b, _| {
            b.iter(|| {
                let v = context.get_bean("node").unwrap();
                black_box(v);
            })
        });
    }

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    let source = small_source();
    let context = ApplicationContext::new(ComponentScan::new("bench"), &source).unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let context = &context;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = context.get_bean("leaf").unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_container_startup(c: &mut Criterion) {
    let mut group = c.benchmark_group("startup");

    for &bean_count in &[10usize, 100, 1000] {
        let mut source = StaticTypeSource::new();
        source.add(ComponentDescriptor::<Leaf>::new().in_package("bench.startup").component("leaf"));
        for i in 0..bean_count {
            source.add(
                ComponentDescriptor::<Node>::new()
                    .in_package("bench.startup")
                    .component(format!("node{}", i))
                    .autowired("leaf"),
            );
        }

        group.bench_with_input(BenchmarkId::new("singletons", bean_count), &bean_count, |b, _| {
            b.iter(|| {
                let context = ApplicationContext::new(ComponentScan::new("bench.startup"), &source).unwrap();
                black_box(context.singleton_count());
            })
        });
    }

    group.finish();
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_prototype_create,
    bench_hook_chain,
    bench_contention
);

criterion_group!(macro_benches, bench_container_startup);

criterion_main!(micro_benches, macro_benches);
