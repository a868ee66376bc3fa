//! Shared plumbing for the tuck shop: typed identifiers and the durable
//! key-value side-store the domain stores mirror themselves into.

pub mod ids;
pub mod persistence;
