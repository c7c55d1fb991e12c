// Library root: re-exports all modules so integration tests and the binary
// can access the crate's public API.

pub mod config;
pub mod dataset;
pub mod fixtures;
pub mod lineup;
pub mod policy;
pub mod pool;
pub mod probability;
pub mod report;
pub mod roster;
pub mod tier;
