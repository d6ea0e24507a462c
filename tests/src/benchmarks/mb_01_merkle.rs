//! # MB-01 Merkle Accumulator Benchmarks
//!
//! Claims to validate:
//! - `insert` is O(depth) regardless of leaf count
//! - `root` is O(depth)
//! - `branch_root` over a 32-level path stays well under 100μs

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use mb_01_merkle_accumulator::{branch_root, IncrementalMerkle, Prover};
use rand::Rng;
use shared_types::Hash;
use std::time::Duration;

fn random_leaves(n: usize) -> Vec<Hash> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen()).collect()
}

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("mb-01/insert");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 10_000] {
        let leaves = random_leaves(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| {
                let mut tree = IncrementalMerkle::new();
                for leaf in leaves {
                    black_box(tree.insert(*leaf).ok());
                }
                tree
            })
        });
    }
    group.finish();
}

pub fn bench_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("mb-01/root");
    for size in [1usize, 1_000, 100_000] {
        let mut tree = IncrementalMerkle::new();
        for leaf in random_leaves(size) {
            let _ = tree.insert(leaf);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| black_box(tree.root()))
        });
    }
    group.finish();
}

pub fn bench_branch_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("mb-01/branch_root");
    let leaves = random_leaves(1_024);
    let prover = match Prover::from_leaves(leaves.iter().copied()) {
        Ok(prover) => prover,
        Err(_) => return,
    };
    let index = 777u32;
    let proof = match prover.prove(index) {
        Ok(proof) => proof,
        Err(_) => return,
    };

    group.bench_function("fold_32_levels", |b| {
        b.iter(|| black_box(branch_root(&proof.leaf, &proof.path, proof.index)))
    });
    group.bench_function("prove_1024", |b| {
        b.iter(|| black_box(prover.prove(black_box(index)).ok()))
    });
    group.finish();
}
