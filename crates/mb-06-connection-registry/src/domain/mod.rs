//! # Domain Module

pub mod connection_map;
pub mod errors;

pub use connection_map::ConnectionMap;
pub use errors::*;
