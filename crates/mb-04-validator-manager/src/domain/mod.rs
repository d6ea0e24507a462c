//! # Domain Module

pub mod errors;
pub mod fraud;
pub mod validator_set;

pub use errors::*;
pub use fraud::FraudReport;
pub use validator_set::ValidatorSet;
