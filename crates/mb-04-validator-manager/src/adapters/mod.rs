//! # Adapters

pub mod origin;
