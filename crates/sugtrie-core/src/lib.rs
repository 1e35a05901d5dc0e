//! Shared types for the sugtrie workspace.
//!
//! - [`candidate`] -- suggestion candidates produced by a query
//! - [`character`] -- character classification, case folding and the
//!   lowercase word tokenizer used when counting word frequencies

pub mod candidate;
pub mod character;

pub use candidate::{Candidate, CandidateKind};
