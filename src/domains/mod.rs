//! Domains module containing business logic organized by bounded contexts.
//!
//! `tools` depends on `weight` and `weather` through their port traits only;
//! neither of those knows about tools or transports.

pub mod tools;
pub mod weather;
pub mod weight;
