use sea_orm::entity::prelude::*;

/// Account record. All roles share one table; `role` is the partition
/// discriminant. `phone` and `referral_code` carry unique indexes, and a
/// partial unique index on `role` (where `role = 'admin'`) enforces the
/// single-admin invariant at the store level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    /// Argon2id PHC string; never the raw PIN.
    pub pin_hash: Option<String>,
    /// Role-specific business profile, shape depends on `role`.
    pub profile: Json,
    pub addresses: Json,
    #[sea_orm(unique)]
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: i32,
    /// Append-only list of referred account ids.
    pub referral_users: Vec<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
