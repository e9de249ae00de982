#![allow(missing_docs)]

use slight_di::{Identifier, Registry};

use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};

use std::sync::{Arc, RwLock};

fn benchmark(c: &mut Criterion) {
    let registry = Registry::new();
    registry.register(&Identifier::by_type(), |_| Counter::default());
    registry.register(&Identifier::by_key("cache"), |_| Cache::default());
    registry.register(&Identifier::by_type_and_key("cache"), |_| Cache::default());

    c.bench_function("register", |b| b.iter(
        || registry.register(black_box(&Identifier::by_key("transient")), |_| Transient)
    ));
    c.bench_function("resolve_by_type", |b| b.iter(
        || registry.resolve_shared(black_box(&Identifier::<Counter>::by_type()))
    ));
    c.bench_function("resolve_by_key", |b| b.iter(
        || registry.resolve(black_box(&Identifier::<Cache>::by_key("cache")))
    ));
    c.bench_function("resolve_by_type_and_key", |b| b.iter(
        || registry.resolve(black_box(&Identifier::<Cache>::by_type_and_key("cache")))
    ));
    c.bench_function("injected", |b| b.iter(
        || *registry.injected::<Counter>().0.read().unwrap()
    ));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);

#[derive(Default, Clone, Debug)]
struct Counter(Arc<RwLock<i32>>);

#[derive(Default, Clone, Debug)]
struct Cache(Arc<RwLock<Vec<i32>>>);

#[derive(Default, Clone, Debug)]
struct Transient;
