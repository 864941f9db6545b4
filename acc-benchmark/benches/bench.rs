use acc_benchmark::*;
use criterion::{criterion_group, criterion_main, Criterion};

const TEST_SET_SIZE: &[usize] = &[100, 1_000, 10_000];
prepare_fixtures!();

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for i in TEST_SET_SIZE {
        let items = generate_items(*i);
        iterate_fixtures!(|fixture: &Fixture<_>| {
            fixture.bench_insert(&mut group, &items);
        });
        bench_matrix_insert(&mut group, &items);
    }
    group.finish();
}

pub fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for i in TEST_SET_SIZE {
        let items = generate_items(*i);
        iterate_fixtures!(|fixture: &Fixture<_>| {
            fixture.bench_remove(&mut group, &items);
        });
    }
    group.finish();
}

pub fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");
    for i in TEST_SET_SIZE {
        let (set1, set2) = generate_two_item_sets(*i);
        iterate_fixtures!(|fixture: &Fixture<_>| {
            fixture.bench_union(&mut group, &set1, &set2);
        });
        bench_matrix_concat(&mut group, &set1, &set2);
    }
    group.finish();
}

pub fn bench_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("difference");
    for i in TEST_SET_SIZE {
        let (set1, set2) = generate_two_item_sets(*i);
        iterate_fixtures!(|fixture: &Fixture<_>| {
            fixture.bench_difference(&mut group, &set1, &set2);
        });
    }
    group.finish();
}

pub fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");
    let items = generate_items(TEST_SET_SIZE[0]);
    iterate_fixtures!(|fixture: &Fixture<_>| {
        fixture.bench_digest(&mut group, &items);
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_remove,
    bench_union,
    bench_difference,
    bench_digest,
);
criterion_main!(benches);
