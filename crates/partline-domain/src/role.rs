//! Account role types.

use serde::{Deserialize, Serialize};

/// Account role. Closed enumeration; every account belongs to exactly one
/// role partition.
///
/// Wire format: lowercase string (`admin`, `vendor`, `garage`, `delivery`)
/// in both JSON bodies and the `role` database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Vendor,
    Garage,
    Delivery,
}

/// Deterministic partition order for any operation that walks all roles
/// (admin listing, integrity checks).
pub const PARTITION_ORDER: [Role; 4] = [Role::Admin, Role::Vendor, Role::Garage, Role::Delivery];

impl Role {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "admin" => Some(Self::Admin),
            "vendor" => Some(Self::Vendor),
            "garage" => Some(Self::Garage),
            "delivery" => Some(Self::Delivery),
            _ => None,
        }
    }

    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
            Self::Garage => "garage",
            Self::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
