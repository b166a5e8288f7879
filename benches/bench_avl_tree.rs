use avl_collections::avl_tree::AvlTree;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1_000;

fn keys() -> Vec<i32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.gen::<i32>()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for key in &keys {
                set.insert(*key);
            }
        })
    });
}

fn bench_avl_tree_add(c: &mut Criterion) {
    let keys = keys();
    c.bench_function("bench avl_tree add", move |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for key in &keys {
                tree.add(*key);
            }
        })
    });
}

fn bench_avl_tree_contains(c: &mut Criterion) {
    let keys = keys();
    let tree = AvlTree::from_slice(&keys);
    c.bench_function("bench avl_tree contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.contains(*key));
            }
        })
    });
}

fn bench_avl_tree_delete(c: &mut Criterion) {
    let keys = keys();
    let tree = AvlTree::from_slice(&keys);
    c.bench_function("bench avl_tree delete", move |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for key in &keys {
                tree.delete(*key);
            }
        })
    });
}

fn bench_avl_tree_iter(c: &mut Criterion) {
    let tree = AvlTree::from_slice(&keys());
    c.bench_function("bench avl_tree iter", move |b| {
        b.iter(|| black_box(tree.iter().map(i64::from).sum::<i64>()))
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_avl_tree_add,
    bench_avl_tree_contains,
    bench_avl_tree_delete,
    bench_avl_tree_iter
);
criterion_main!(benches);
