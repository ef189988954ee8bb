//! Role option entity - one entry of a guild's self-assignable role catalog

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A role members may pick from the role menu.
///
/// Options are kept in insertion order, which is also display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub id: Snowflake,
    pub name: String,
    /// Display color as `#rrggbb`
    pub color: String,
}

impl RoleOption {
    /// Create a role option from a raw 24-bit color value
    pub fn new(id: Snowflake, name: impl Into<String>, color: u32) -> Self {
        Self {
            id,
            name: name.into(),
            color: color_hex(color),
        }
    }
}

/// Format a 24-bit color as `#rrggbb`
pub fn color_hex(color: u32) -> String {
    format!("#{:06x}", color & 0x00FF_FFFF)
}
