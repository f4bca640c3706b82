//! Error types for board domain validation and parsing.

use super::EntityRef;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A cycle name is empty after trimming.
    #[error("cycle name must not be empty")]
    EmptyCycleName,

    /// A column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// A task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A cycle would start after it ends.
    #[error("cycle cannot start on {starts_on} and end on {ends_on}")]
    InvalidDateRange {
        /// Requested start date.
        starts_on: NaiveDate,
        /// Requested end date.
        ends_on: NaiveDate,
    },

    /// Sequences start at one.
    #[error("invalid sequence {0}, expected a positive integer")]
    InvalidSequence(u32),

    /// A reorder request carried no placements.
    #[error("placement list must not be empty")]
    EmptyPlacementList,

    /// An item was asked to live under a parent outside its own scope.
    #[error("{item} does not belong to {parent}")]
    ForeignParent {
        /// Item being placed.
        item: EntityRef,
        /// Parent the item was placed under.
        parent: EntityRef,
    },

    /// The store refused a write or returned data the domain cannot hold.
    #[error("rejected by store: {0}")]
    Rejected(String),
}

/// Error returned while parsing cycle statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown cycle status: {0}")]
pub struct ParseCycleStatusError(pub String);

/// Error returned while parsing a vacated slot policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown vacated slot policy: {0}")]
pub struct ParseVacatedSlotPolicyError(pub String);
