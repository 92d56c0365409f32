//! Test helpers shared by the workspace crates
//!
//! [`MockKraken`] serves the exchange REST routes from canned responses and
//! records every request it receives. [`fixtures`] holds realistic results.

pub mod fixtures;
pub mod server;

pub use server::{MockKraken, RecordedRequest};
