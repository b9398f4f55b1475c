use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, Statement,
    sea_query::Expr,
};
use uuid::Uuid;

use partline_domain::profile::{Address, RoleProfile};
use partline_domain::role::Role;
use partline_identity_schema::accounts;

use crate::domain::repository::{AccountRepository, SequenceRepository};
use crate::domain::types::Account;
use crate::error::IdentityServiceError;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, IdentityServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find account by phone")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, IdentityServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<Account>, IdentityServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::ReferralCode.eq(code))
            .one(&self.db)
            .await
            .context("find account by referral code")?;
        model.map(account_from_model).transpose()
    }

    async fn count_role(&self, role: Role) -> Result<u64, IdentityServiceError> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await
            .context("count accounts in role partition")?;
        Ok(count)
    }

    async fn insert(&self, account: &Account) -> Result<(), IdentityServiceError> {
        accounts::ActiveModel {
            id: Set(account.id),
            phone: Set(account.phone.clone()),
            full_name: Set(account.full_name.clone()),
            email: Set(account.email.clone()),
            role: Set(account.role.as_str().to_owned()),
            pin_hash: Set(account.pin_hash.clone()),
            profile: Set(account.profile.to_json()),
            addresses: Set(serde_json::to_value(&account.addresses).unwrap_or_default()),
            referral_code: Set(account.referral_code.clone()),
            referred_by: Set(account.referred_by.clone()),
            referral_count: Set(account.referral_count),
            referral_users: Set(account.referral_users.clone()),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(map_insert_err)?;
        Ok(())
    }

    async fn apply_referral(
        &self,
        referral_code: &str,
        referred_id: Uuid,
    ) -> Result<(), IdentityServiceError> {
        // Increment + append must be one statement — two round trips would
        // lose updates under concurrent referred registrations.
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                UPDATE accounts
                SET referral_count = referral_count + 1,
                    referral_users = array_append(referral_users, $1),
                    updated_at = $2
                WHERE referral_code = $3
                "#,
                [referred_id.into(), Utc::now().into(), referral_code.into()],
            ))
            .await
            .context("apply referral")?;
        if result.rows_affected() == 0 {
            // Referrer was resolved moments ago; it vanishing mid-flight
            // means the code no longer exists.
            return Err(IdentityServiceError::InvalidReferralCode);
        }
        Ok(())
    }

    async fn set_pin_hash_by_id(
        &self,
        id: Uuid,
        pin_hash: &str,
    ) -> Result<bool, IdentityServiceError> {
        let result = accounts::Entity::update_many()
            .filter(accounts::Column::Id.eq(id))
            .col_expr(accounts::Column::PinHash, Expr::value(pin_hash.to_owned()))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("set pin hash by id")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_pin_hash_by_phone(
        &self,
        phone: &str,
        pin_hash: &str,
    ) -> Result<bool, IdentityServiceError> {
        let result = accounts::Entity::update_many()
            .filter(accounts::Column::Phone.eq(phone))
            .col_expr(accounts::Column::PinHash, Expr::value(pin_hash.to_owned()))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("set pin hash by phone")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_identity(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        profile: &RoleProfile,
    ) -> Result<(), IdentityServiceError> {
        let mut am = accounts::ActiveModel {
            id: Set(id),
            profile: Set(profile.to_json()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = full_name {
            am.full_name = Set(Some(name.to_owned()));
        }
        if let Some(email) = email {
            am.email = Set(Some(email.to_owned()));
        }
        am.update(&self.db).await.context("update identity")?;
        Ok(())
    }

    async fn replace_addresses(
        &self,
        id: Uuid,
        addresses: &[Address],
    ) -> Result<(), IdentityServiceError> {
        accounts::ActiveModel {
            id: Set(id),
            addresses: Set(serde_json::to_value(addresses).unwrap_or_default()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("replace addresses")?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>, IdentityServiceError> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list accounts")?;
        models.into_iter().map(account_from_model).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, IdentityServiceError> {
        let result = accounts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete account")?;
        Ok(result.rows_affected > 0)
    }
}

/// Map an insert failure to the domain conflict it represents, keyed on the
/// violated constraint. Anything else is internal.
fn map_insert_err(err: sea_orm::DbErr) -> IdentityServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
        if msg.contains("admin_singleton") {
            return IdentityServiceError::AdminRegistrationBlocked;
        }
        if msg.contains("referral_code") {
            return IdentityServiceError::DuplicateReferralCode;
        }
        if msg.contains("phone") {
            return IdentityServiceError::DuplicateAccount;
        }
    }
    IdentityServiceError::Internal(anyhow::Error::new(err).context("insert account"))
}

fn account_from_model(model: accounts::Model) -> Result<Account, IdentityServiceError> {
    let role = Role::from_str(&model.role)
        .ok_or_else(|| anyhow::anyhow!("corrupt role column: {}", model.role))?;
    let profile = RoleProfile::from_json(role, model.profile)
        .map_err(|e| anyhow::anyhow!("corrupt profile column: {e}"))?;
    let addresses: Vec<Address> = serde_json::from_value(model.addresses)
        .map_err(|e| anyhow::anyhow!("corrupt addresses column: {e}"))?;
    Ok(Account {
        id: model.id,
        phone: model.phone,
        full_name: model.full_name,
        email: model.email,
        role,
        pin_hash: model.pin_hash,
        profile,
        addresses,
        referral_code: model.referral_code,
        referred_by: model.referred_by,
        referral_count: model.referral_count,
        referral_users: model.referral_users,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Sequence repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSequenceRepository {
    pub db: DatabaseConnection,
}

impl SequenceRepository for DbSequenceRepository {
    async fn next(&self, key: &str) -> Result<i64, IdentityServiceError> {
        // Find-or-create + increment + read in one statement so concurrent
        // callers can never observe the same sequence number.
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                INSERT INTO counters (key, seq) VALUES ($1, 1)
                ON CONFLICT (key) DO UPDATE SET seq = counters.seq + 1
                RETURNING seq
                "#,
                [key.into()],
            ))
            .await
            .context("increment counter")?
            .ok_or_else(|| anyhow::anyhow!("counter upsert returned no row"))?;
        let seq: i64 = row.try_get("", "seq").context("read counter value")?;
        Ok(seq)
    }
}
