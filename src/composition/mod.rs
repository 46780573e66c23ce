//! Composition Stage: draft the contractor email

pub mod writer;

pub use writer::{CompositionResult, EmailWriter};
