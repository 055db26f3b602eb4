//! Precondition failures reported at the engine boundary.

use thiserror::Error;

/// Why a layout pass (or a configuration change) was refused.
///
/// Continuing with bad geometry would only produce silently wrong visuals, so
/// the engine checks its inputs up front and bails out instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid viewport: {0}")]
    InvalidViewport(&'static str),

    #[error("velocity is not finite")]
    InvalidVelocity,

    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}
