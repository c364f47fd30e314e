//! Unified error types for the GasSafe monitor.
//!
//! The simulator has exactly one runtime failure: an ignition request
//! refused by the conditional-ignition policy. Signal setters and config
//! updates are total. All variants are `Copy` so they can be handed back
//! to the presentation layer without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible simulator operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An ignition request was refused. State is unchanged.
    Ignition(IgnitionBlocked),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignition(e) => write!(f, "ignition: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Ignition errors
// ---------------------------------------------------------------------------

/// Why an ignition request was refused.
///
/// Advisory only: the caller shows it to the user and nothing else
/// happens. It is never retried and never counted as a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnitionBlocked {
    /// Owner is outside the geofence and conditional ignition is enabled.
    AwayFromHome,
}

impl fmt::Display for IgnitionBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwayFromHome => {
                write!(f, "blocked, ignition is only allowed while at home")
            }
        }
    }
}

impl From<IgnitionBlocked> for Error {
    fn from(e: IgnitionBlocked) -> Self {
        Self::Ignition(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
