//! Allow/deny flow filters for the relay.
//!
//! The relay evaluates the filters itself, this crate only validates the
//! user input and routes every criterion to the allow or the deny list.

mod builder;
mod criterion;

pub use builder::*;
pub use criterion::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid --verdict: {0}")]
    InvalidVerdict(String),
}
