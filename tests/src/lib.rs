//! # Interchain Mailbox Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per crate
//! │   ├── mb_01_merkle.rs
//! │   └── mb_02_signatures.rs
//! │
//! └── integration/      # Cross-crate flows, origin → validator → destination
//!     ├── fixtures.rs
//!     ├── e2e_choreography.rs
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mb-tests
//!
//! # By category
//! cargo test -p mb-tests integration::
//!
//! # Benchmarks
//! cargo bench -p mb-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
