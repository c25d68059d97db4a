//! Checkout module: the fetch → availability → price pipeline.
//!
//! A checkout never fails at the call level. Every run ends in exactly one
//! [`CheckoutOutcome`]; lookup problems are folded into
//! [`CheckoutOutcome::NotFound`]. Human-readable reporting goes through the
//! injected [`OutcomeLogger`] and never influences the returned outcome.

pub mod logger;
pub mod outcome;
pub mod pipeline;
pub mod stage;

pub use logger::{CheckoutEvent, MemoryLogger, OutcomeLogger, TracingLogger};
pub use outcome::CheckoutOutcome;
pub use pipeline::{CheckoutConfig, CheckoutPipeline};
pub use stage::{CheckoutStage, apply_discount, check_availability};
