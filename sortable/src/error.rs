//! Setup-time errors. Gesture no-ops are not errors and never surface here.

use crate::registry::{ContainerId, ItemId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SortableError {
    /// `grid` attribute was neither `"true"` nor `"false"`.
    #[error("invalid value of grid attribute: {0:?}")]
    InvalidGrid(String),
    /// `tolerance` attribute was neither `"pointer"` nor `"element"`.
    #[error("invalid value of tolerance attribute: {0:?}")]
    InvalidTolerance(String),
    /// `revert` attribute was not `false` or a non-negative number.
    #[error("invalid value of revert attribute: {0:?}")]
    InvalidRevert(String),
    /// Easing name outside the closed set.
    #[error("unknown easing curve: {0:?}")]
    UnknownEasing(String),
    /// Numeric option could not be parsed.
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    /// A list key resolved to the empty string and no scope id was supplied.
    #[error("missing list identifier")]
    MissingIdentifier,
    /// Item registered against a container the registry does not know.
    #[error("container {0} is not registered")]
    UnknownContainer(ContainerId),
    /// Item referenced by an operation is not registered.
    #[error("item {0} is not registered")]
    UnknownItem(ItemId),
    /// The same container was registered twice.
    #[error("container {0} is already registered")]
    DuplicateContainer(ContainerId),
    /// The same item was registered twice.
    #[error("item {0} is already registered")]
    DuplicateItem(ItemId),
}
