//! Mapper configuration.

use serde::Deserialize;

pub const DEFAULT_DISCRIMINATOR: &str = "@class";

/// Behaviour switches fixed when a [`Mapper`](crate::Mapper) is built.
///
/// Missing fields take their defaults, so a config can be loaded from a
/// partial document in any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Reserved key carrying the type tag of a family member.
    pub discriminator: String,
    /// Reject undeclared keys on decode instead of dropping them.
    pub fail_on_unknown_keys: bool,
    /// Whether fields without declared views are visible under a view.
    pub default_view_inclusion: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            discriminator: DEFAULT_DISCRIMINATOR.to_string(),
            fail_on_unknown_keys: false,
            default_view_inclusion: true,
        }
    }
}
