//! Factory orchestration.
//!
//! Each factory endpoint follows the same sequence: resolve the
//! references the payload names, hand the whole graph to the pure
//! validators in `benchline_core::factory`, and only persist (in one
//! transaction) when validation passes. Every collected error is
//! returned to the caller at once.

pub mod ont;
pub mod pacbio;
