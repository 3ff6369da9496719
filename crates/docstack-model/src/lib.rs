//! Wire model types for the DocStack expression compiler.
//!
//! This crate holds the attribute value union shared by the expression
//! compiler and its transport-facing callers. The JSON wire format uses
//! single-key tagged objects, so the serde implementations are hand-written
//! rather than derived.
// Wire tag names (S, N, BOOL, ...) appear throughout the doc comments.
#![allow(clippy::doc_markdown)]

pub mod attribute_value;

pub use attribute_value::AttributeValue;
