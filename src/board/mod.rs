//! Project boards: cycles, their ordered columns and ranked tasks.
//!
//! A cycle is provisioned together with its default columns, tasks are
//! appended to columns with dense sequences, and bulk reorders apply as one
//! unit. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
