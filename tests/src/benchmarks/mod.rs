//! # Mailbox Benchmarks
//!
//! Criterion benchmarks for the hot paths: tree insertion, proof folding and
//! checkpoint signature recovery. Wired up in `benches/mailbox_benchmarks.rs`.

pub mod mb_01_merkle;
pub mod mb_02_signatures;
