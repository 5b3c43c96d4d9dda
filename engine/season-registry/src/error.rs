//! Error types for the season registry.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by registry operations. Lookups never fail with "not
/// found" (they construct on miss); everything here is either a caller
/// sequencing mistake or a data integrity conflict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The name index was built twice without an intervening drop.
    #[error("name index is already built")]
    IndexAlreadyBuilt,

    /// A by-name lookup or drop was attempted with no index built.
    #[error("name index has not been built")]
    IndexNotBuilt,

    /// Two independent first-discovery registrations disagreed on a
    /// player's identity.
    #[error("identity conflict for player '{id}': registered as '{existing}', re-registered as '{incoming}'")]
    IdentityConflict {
        id: String,
        existing: String,
        incoming: String,
    },

    /// A replacement baseline is already present; it must be cleared
    /// before being recomputed.
    #[error("replacement baseline already computed; clear it before recomputing")]
    BaselineAlreadySet,

    /// A team's defensive aggregate was supplied twice in one pass.
    #[error("team defense already recorded for '{team}'")]
    DefenseAlreadyRecorded { team: String },
}
