//! Core types used across the SynapsePay client.

mod attachment;
mod common;
mod query;

pub use attachment::*;
pub use common::*;
pub use query::*;
