//! Nullable infrastructure for deterministic testing.
//!
//! The oracle is generic over [`ZetaEvaluator`](critline_arith::ZetaEvaluator).
//! This crate provides test-friendly implementations that:
//! - Return deterministic values without any arbitrary-precision work
//! - Can be scripted programmatically
//! - Count how often they were called
//!
//! Usage: swap the Euler–Maclaurin evaluator for a nullable in tests.

pub mod evaluator;

pub use evaluator::{NullEvaluator, ScriptedEvaluator};
