//! Core business logic abstractions

pub mod catalog;
pub mod config;
pub mod log;
pub mod quote;

// Re-export main types for cleaner imports
pub use catalog::Catalog;
pub use quote::{QuoteError, QuoteProvider, QuoteResult, UpstreamQuote};
