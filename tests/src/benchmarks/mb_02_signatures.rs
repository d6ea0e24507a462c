//! # MB-02 Checkpoint Signature Benchmarks
//!
//! Claims to validate:
//! - Signer recovery: < 500μs
//! - Quorum verification scales linearly with signer count

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use k256::ecdsa::SigningKey;
use mb_02_checkpoint_signatures::{Checkpoint, CheckpointSigner, SigningConfig};
use mb_04_validator_manager::{ValidatorManager, ValidatorRegistry};
use shared_types::{Address, TracingEventSink};
use std::sync::Arc;
use std::time::Duration;

const OWNER: Address = [0x01; 20];

fn checkpoint() -> Checkpoint {
    Checkpoint {
        origin_domain: 1000,
        origin_mailbox: [0x0A; 32],
        root: [0x42; 32],
        index: 12_345,
    }
}

fn generate_signer() -> CheckpointSigner {
    CheckpointSigner::new(SigningKey::random(&mut rand::thread_rng()))
}

pub fn bench_recover(c: &mut Criterion) {
    let mut group = c.benchmark_group("mb-02/recover");
    group.measurement_time(Duration::from_secs(5));

    let config = SigningConfig::default();
    let signer = generate_signer();
    let checkpoint = checkpoint();
    let Ok(signed) = signer.sign_checkpoint(&checkpoint, &config) else {
        return;
    };

    group.bench_function("sign_checkpoint", |b| {
        b.iter(|| black_box(signer.sign_checkpoint(&checkpoint, &config).ok()))
    });
    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(signed.recover(&config).ok()))
    });
    group.finish();
}

pub fn bench_quorum(c: &mut Criterion) {
    let mut group = c.benchmark_group("mb-02/quorum");
    let config = SigningConfig::default();
    let checkpoint = checkpoint();

    for size in [1usize, 4, 16] {
        let mut signers: Vec<_> = (0..size).map(|_| generate_signer()).collect();
        signers.sort_by_key(|s| s.address());

        let manager = ValidatorManager::new(
            [0x02; 20],
            OWNER,
            config.clone(),
            Arc::new(TracingEventSink),
        );
        for signer in &signers {
            let _ = manager.enroll_validator(&OWNER, 1000, signer.address());
        }
        let _ = manager.set_threshold(&OWNER, 1000, size);

        let signatures: Vec<_> = signers
            .iter()
            .filter_map(|s| s.sign_checkpoint(&checkpoint, &config).ok())
            .map(|signed| signed.signature)
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &signatures,
            |b, signatures| b.iter(|| black_box(manager.verify_quorum(&checkpoint, signatures).ok())),
        );
    }
    group.finish();
}
