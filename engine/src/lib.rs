//! Pure cost calculations. Nothing in here performs I/O; every function is a
//! deterministic transformation of reference data, market inputs and a request.

pub mod comparison;
pub mod gas;
pub mod quote;
pub mod remittance;

pub use comparison::{compare, compare_all};
pub use quote::compute_quote;
