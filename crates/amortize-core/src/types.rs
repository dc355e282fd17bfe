use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amounts: loan principal, payments, balances.
pub type Money = Decimal;

/// Periodic rates as decimals (0.004166… = 5% a year, monthly).
/// Percentages only ever appear on raw requests.
pub type Rate = Decimal;

const PRECISION: &str = "rust_decimal_128bit";

/// Envelope wrapping every top-level computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Echo of the request the result was computed from.
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    pub fn new(
        methodology: &str,
        assumptions: &impl Serialize,
        warnings: Vec<String>,
        elapsed_us: u64,
        result: T,
    ) -> Self {
        ComputationOutput {
            result,
            methodology: methodology.to_string(),
            assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
            warnings,
            metadata: ComputationMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                computation_time_us: elapsed_us,
                precision: PRECISION.to_string(),
            },
        }
    }
}
