//! Fixed-rate, level-payment loan amortization.
//!
//! The pipeline runs validation → term normalization → payment engine →
//! schedule generation. Each stage is a pure function and can be called on
//! its own; [`calculator::get_results`] chains them the way a presentation
//! layer needs them.

pub mod calculator;
pub mod format;
pub mod interest;
pub mod payment;
pub mod request;
pub mod schedule;
pub mod terms;
pub mod validation;

pub use calculator::{amortize, get_results, LoanResults};
pub use format::{FormattedRow, NumberFormat, Summary};
pub use request::{LoanRequest, LoanValue};
pub use schedule::{AmortizationRow, AmortizationSchedule};
pub use validation::{validate, ValidationResult};
