//! Percurso: ordering and lifecycle for project boards.
//!
//! A project is worked in time-boxed cycles. Each cycle owns an ordered set
//! of columns and each column holds an ordered list of tasks. This crate
//! allocates dense sibling sequences, resolves cycle statuses from the
//! calendar, and applies multi-row changes (cycle provisioning, bulk
//! reorders, task compaction) as single atomic units.
//!
//! # Architecture
//!
//! Percurso follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board rules with no infrastructure dependencies
//! - **Ports**: The repository contract services depend on
//! - **Adapters**: In-memory and `PostgreSQL` implementations of that contract
//!
//! # Modules
//!
//! - [`board`]: Cycles, columns, tasks and the services that order them
//! - [`config`]: Store settings loaded from the environment
//! - [`telemetry`]: Tracing subscriber installation

pub mod board;
pub mod config;
pub mod telemetry;
