//! Per-role business profiles and addresses.
//!
//! The legacy payload was an open bag of optional fields shared by every
//! role. Here each role has a closed struct; unknown fields are rejected at
//! the boundary (`deny_unknown_fields`) and a patch for one role cannot
//! smuggle another role's fields in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// Error returned when a profile payload does not fit the account's role.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid profile payload: {0}")]
    Invalid(String),
    #[error("no fields to update")]
    Empty,
}

// ── Per-role profiles ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GarageProfile {
    pub garage_name: Option<String>,
    pub garage_size: Option<String>,
    #[serde(default)]
    pub brands_served: Vec<String>,
    #[serde(default)]
    pub vehicle_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorProfile {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub distributor_size: Option<String>,
    #[serde(default)]
    pub brands_carried: Vec<String>,
    #[serde(default)]
    pub category_focus: Vec<String>,
    pub pan_number: Option<String>,
    pub gstin: Option<String>,
    pub kyc_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryProfile {
    pub vehicle_type: Option<String>,
    pub vehicle_number: Option<String>,
    pub warehouse_assigned: Option<String>,
}

/// Business profile attached to an account, discriminated by the account's
/// role. Admins carry no business profile. The authentication core only
/// initializes and round-trips this; it never interprets the contents.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Admin,
    Vendor(VendorProfile),
    Garage(GarageProfile),
    Delivery(DeliveryProfile),
}

impl RoleProfile {
    /// Empty profile for a freshly registered account of the given role.
    pub fn empty_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Vendor => Self::Vendor(VendorProfile::default()),
            Role::Garage => Self::Garage(GarageProfile::default()),
            Role::Delivery => Self::Delivery(DeliveryProfile::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Vendor(_) => Role::Vendor,
            Self::Garage(_) => Role::Garage,
            Self::Delivery(_) => Role::Delivery,
        }
    }

    /// Decode a stored profile document. The variant is picked by the `role`
    /// column, not by the JSON itself.
    pub fn from_json(role: Role, value: serde_json::Value) -> Result<Self, ProfileError> {
        let profile = match role {
            Role::Admin => Self::Admin,
            Role::Vendor => Self::Vendor(
                serde_json::from_value(value).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
            Role::Garage => Self::Garage(
                serde_json::from_value(value).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
            Role::Delivery => Self::Delivery(
                serde_json::from_value(value).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
        };
        Ok(profile)
    }

    /// Encode for storage.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Admin => serde_json::json!({}),
            Self::Vendor(p) => serde_json::to_value(p).unwrap_or_default(),
            Self::Garage(p) => serde_json::to_value(p).unwrap_or_default(),
            Self::Delivery(p) => serde_json::to_value(p).unwrap_or_default(),
        }
    }
}

// ── Profile patches ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaragePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub garage_name: Option<String>,
    pub garage_size: Option<String>,
    pub brands_served: Option<Vec<String>>,
    pub vehicle_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub distributor_size: Option<String>,
    pub brands_carried: Option<Vec<String>>,
    pub category_focus: Option<Vec<String>>,
    pub pan_number: Option<String>,
    pub gstin: Option<String>,
    pub kyc_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_number: Option<String>,
    pub warehouse_assigned: Option<String>,
}

/// Validated profile update: base identity fields plus the role-specific
/// patch. Produced by [`ProfileUpdate::parse`], applied by
/// [`ProfileUpdate::apply_to`].
#[derive(Debug, Clone)]
pub enum ProfileUpdate {
    Admin(AdminPatch),
    Vendor(VendorPatch),
    Garage(GaragePatch),
    Delivery(DeliveryPatch),
}

impl ProfileUpdate {
    /// Parse a PATCH body against the account's stored role. Unknown fields
    /// (including another role's fields) fail with `ProfileError::Invalid`;
    /// a patch that sets nothing fails with `ProfileError::Empty`.
    pub fn parse(role: Role, body: serde_json::Value) -> Result<Self, ProfileError> {
        let update = match role {
            Role::Admin => Self::Admin(
                serde_json::from_value(body).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
            Role::Vendor => Self::Vendor(
                serde_json::from_value(body).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
            Role::Garage => Self::Garage(
                serde_json::from_value(body).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
            Role::Delivery => Self::Delivery(
                serde_json::from_value(body).map_err(|e| ProfileError::Invalid(e.to_string()))?,
            ),
        };
        if update.is_empty() {
            return Err(ProfileError::Empty);
        }
        Ok(update)
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Admin(p) => p.full_name.is_none() && p.email.is_none(),
            Self::Garage(p) => {
                p.full_name.is_none()
                    && p.email.is_none()
                    && p.garage_name.is_none()
                    && p.garage_size.is_none()
                    && p.brands_served.is_none()
                    && p.vehicle_types.is_none()
            }
            Self::Vendor(p) => {
                p.full_name.is_none()
                    && p.email.is_none()
                    && p.business_name.is_none()
                    && p.business_type.is_none()
                    && p.distributor_size.is_none()
                    && p.brands_carried.is_none()
                    && p.category_focus.is_none()
                    && p.pan_number.is_none()
                    && p.gstin.is_none()
                    && p.kyc_status.is_none()
            }
            Self::Delivery(p) => {
                p.full_name.is_none()
                    && p.email.is_none()
                    && p.vehicle_type.is_none()
                    && p.vehicle_number.is_none()
                    && p.warehouse_assigned.is_none()
            }
        }
    }

    pub fn full_name(&self) -> Option<&str> {
        match self {
            Self::Admin(p) => p.full_name.as_deref(),
            Self::Vendor(p) => p.full_name.as_deref(),
            Self::Garage(p) => p.full_name.as_deref(),
            Self::Delivery(p) => p.full_name.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Admin(p) => p.email.as_deref(),
            Self::Vendor(p) => p.email.as_deref(),
            Self::Garage(p) => p.email.as_deref(),
            Self::Delivery(p) => p.email.as_deref(),
        }
    }

    /// Apply the role-specific fields onto a stored profile. Set fields
    /// overwrite; unset fields are left alone. Panics never: a patch parsed
    /// for one role is only ever applied to a profile of that role.
    pub fn apply_to(&self, profile: &mut RoleProfile) {
        match (self, profile) {
            (Self::Admin(_), RoleProfile::Admin) => {}
            (Self::Garage(patch), RoleProfile::Garage(p)) => {
                overwrite(&mut p.garage_name, &patch.garage_name);
                overwrite(&mut p.garage_size, &patch.garage_size);
                if let Some(v) = &patch.brands_served {
                    p.brands_served = v.clone();
                }
                if let Some(v) = &patch.vehicle_types {
                    p.vehicle_types = v.clone();
                }
            }
            (Self::Vendor(patch), RoleProfile::Vendor(p)) => {
                overwrite(&mut p.business_name, &patch.business_name);
                overwrite(&mut p.business_type, &patch.business_type);
                overwrite(&mut p.distributor_size, &patch.distributor_size);
                if let Some(v) = &patch.brands_carried {
                    p.brands_carried = v.clone();
                }
                if let Some(v) = &patch.category_focus {
                    p.category_focus = v.clone();
                }
                overwrite(&mut p.pan_number, &patch.pan_number);
                overwrite(&mut p.gstin, &patch.gstin);
                overwrite(&mut p.kyc_status, &patch.kyc_status);
            }
            (Self::Delivery(patch), RoleProfile::Delivery(p)) => {
                overwrite(&mut p.vehicle_type, &patch.vehicle_type);
                overwrite(&mut p.vehicle_number, &patch.vehicle_number);
                overwrite(&mut p.warehouse_assigned, &patch.warehouse_assigned);
            }
            // Patch and profile are both derived from the stored role.
            (_, _) => unreachable!("profile patch role does not match stored profile"),
        }
    }
}

fn overwrite(slot: &mut Option<String>, patch: &Option<String>) {
    if let Some(v) = patch {
        *slot = Some(v.clone());
    }
}

// ── Addresses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Delivery/billing address attached to an account. Stored as a JSON array
/// on the account document; the core only initializes the array to empty and
/// appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address_id: Uuid,
    pub tag: String,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub location: Option<GeoPoint>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
