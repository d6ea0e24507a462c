//! # Interchain Mailbox Benchmarks
//!
//! | Crate | Operation | Target |
//! |-------|-----------|--------|
//! | mb-01 Merkle Accumulator | insert | O(depth) |
//! | mb-01 Merkle Accumulator | branch_root | < 100μs |
//! | mb-02 Checkpoint Signatures | recover signer | < 500μs |
//! | mb-04 Validator Manager | quorum of 16 | linear in signers |

use criterion::{criterion_group, criterion_main};
use mb_tests::benchmarks::{mb_01_merkle, mb_02_signatures};

criterion_group!(
    benches,
    mb_01_merkle::bench_insert,
    mb_01_merkle::bench_root,
    mb_01_merkle::bench_branch_root,
    mb_02_signatures::bench_recover,
    mb_02_signatures::bench_quorum,
);

criterion_main!(benches);
