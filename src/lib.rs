//! Layout bookkeeping and switchlist rendering for model railroad operators.

pub mod domain;
pub mod engine;
pub mod util;
