//! Prometheus metrics for the mailbox components.
//!
//! All metrics follow the naming convention: `mb_<component>_<metric>_total`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ORIGIN
    // =========================================================================

    /// Messages inserted into the origin tree
    pub static ref MESSAGES_DISPATCHED: Counter = Counter::new(
        "mb_origin_messages_dispatched_total",
        "Messages dispatched and inserted into the origin tree"
    ).expect("metric creation failed");

    /// Checkpoints recorded by the origin
    pub static ref CHECKPOINTS_CACHED: Counter = Counter::new(
        "mb_origin_checkpoints_cached_total",
        "Checkpoints snapshotted by the origin"
    ).expect("metric creation failed");

    // =========================================================================
    // DESTINATION
    // =========================================================================

    /// Signed checkpoints accepted
    pub static ref CHECKPOINTS_ACCEPTED: Counter = Counter::new(
        "mb_destination_checkpoints_accepted_total",
        "Signed checkpoints accepted by the destination"
    ).expect("metric creation failed");

    /// Signed checkpoints rejected
    pub static ref CHECKPOINTS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("mb_destination_checkpoints_rejected_total", "Rejected checkpoint submissions"),
        &["reason"]  // reason: stale/signature
    ).expect("metric creation failed");

    /// Proof attempts
    pub static ref PROOFS: CounterVec = CounterVec::new(
        Opts::new("mb_destination_proofs_total", "Inclusion proof attempts"),
        &["result"]  // result: accepted/rejected
    ).expect("metric creation failed");

    /// Delivery attempts
    pub static ref DELIVERIES: CounterVec = CounterVec::new(
        Opts::new("mb_destination_deliveries_total", "Recipient delivery attempts"),
        &["outcome"]  // outcome: success/reverted/out_of_gas/timeout/panicked/no_recipient
    ).expect("metric creation failed");

    /// Nested or concurrent process calls rejected
    pub static ref REENTRANCY_REJECTIONS: Counter = Counter::new(
        "mb_destination_reentrancy_rejections_total",
        "Process calls rejected by the reentrancy guard"
    ).expect("metric creation failed");

    // =========================================================================
    // VALIDATOR MANAGER
    // =========================================================================

    /// Origins halted by fraud proofs
    pub static ref FRAUD_HALTS: Counter = Counter::new(
        "mb_validators_fraud_halts_total",
        "Origins failed by improper checkpoint proofs"
    ).expect("metric creation failed");
}

/// Handle returned by [`register_metrics`]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Registry holding every mailbox metric.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(MESSAGES_DISPATCHED.clone()),
        Box::new(CHECKPOINTS_CACHED.clone()),
        Box::new(CHECKPOINTS_ACCEPTED.clone()),
        Box::new(CHECKPOINTS_REJECTED.clone()),
        Box::new(PROOFS.clone()),
        Box::new(DELIVERIES.clone()),
        Box::new(REENTRANCY_REJECTIONS.clone()),
        Box::new(FRAUD_HALTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
