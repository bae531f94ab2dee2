//! Text normalization pipeline.
//!
//! This module provides the text processing components:
//! - **Stages**: The five pure string transformations, in pipeline order
//! - **Rules**: The ordered whole-word shorthand table
//! - **Normalizer**: Chains the stages into a single total entry point

pub mod normalizer;
pub mod rules;
pub mod stages;

pub use normalizer::TextNormalizer;
pub use rules::RuleTable;
