//! STROKEGUARD Humanization Validator
//!
//! Pure accept/reject decisions over a decoded stroke log. A rejection is a
//! normal outcome reported as a [`Verdict`], never an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod policy;
pub mod stats;
pub mod validator;

pub use policy::ValidationPolicy;
pub use stats::{average_set_color_distance, LogStats};
pub use validator::{
    accept, HumanizationValidator, RejectionReason, ValidationCheck, ValidationReport, Verdict,
};
