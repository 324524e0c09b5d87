//! MySQL implementation of the AccountRepository trait.
//!
//! Updates are version-checked: the UPDATE only matches when the stored
//! `version` equals the snapshot's, so concurrent read-modify-write
//! sequences against the same account never lose writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use komik_core::domain::entities::account::{Account, Role};
use komik_core::errors::{AuthError, DomainError};
use komik_core::repositories::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, role, avatar, password_hash,
           previous_password_hashes, password_changed_at,
           failed_login_attempts, lock_until, otp_code, otp_expires,
           reset_token_hash, reset_token_expires, is_verified, version,
           created_at, updated_at
    FROM accounts
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let get = |e: sqlx::Error, column: &str| {
            DomainError::storage(format!("failed to read column {column}: {e}"))
        };

        let id: String = row.try_get("id").map_err(|e| get(e, "id"))?;
        let role: String = row.try_get("role").map_err(|e| get(e, "role"))?;
        let history: Json<Vec<String>> = row
            .try_get("previous_password_hashes")
            .map_err(|e| get(e, "previous_password_hashes"))?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("invalid account id: {e}")))?,
            name: row.try_get("name").map_err(|e| get(e, "name"))?,
            email: row.try_get("email").map_err(|e| get(e, "email"))?,
            role: match role.as_str() {
                "admin" => Role::Admin,
                _ => Role::User,
            },
            avatar: row.try_get("avatar").map_err(|e| get(e, "avatar"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| get(e, "password_hash"))?,
            previous_password_hashes: history.0,
            password_changed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("password_changed_at")
                .map_err(|e| get(e, "password_changed_at"))?,
            failed_login_attempts: row
                .try_get::<u32, _>("failed_login_attempts")
                .map_err(|e| get(e, "failed_login_attempts"))?,
            lock_until: row
                .try_get::<Option<DateTime<Utc>>, _>("lock_until")
                .map_err(|e| get(e, "lock_until"))?,
            otp_code: row.try_get("otp_code").map_err(|e| get(e, "otp_code"))?,
            otp_expires: row
                .try_get::<Option<DateTime<Utc>>, _>("otp_expires")
                .map_err(|e| get(e, "otp_expires"))?,
            reset_token_hash: row
                .try_get("reset_token_hash")
                .map_err(|e| get(e, "reset_token_hash"))?,
            reset_token_expires: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_expires")
                .map_err(|e| get(e, "reset_token_expires"))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| get(e, "is_verified"))?,
            version: row.try_get("version").map_err(|e| get(e, "version"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get(e, "created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get(e, "updated_at"))?,
        })
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        bind: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!("{SELECT_COLUMNS} WHERE {clause} LIMIT 1");
        let row = sqlx::query(&query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("query failed: {e}")))?;
        row.as_ref().map(Self::row_to_account).transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("email = ?", email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("id = ?", &id.to_string()).await
    }

    async fn find_by_reset_digest(&self, digest: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("reset_token_hash = ?", digest).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, name, email, role, avatar, password_hash,
                previous_password_hashes, password_changed_at,
                failed_login_attempts, lock_until, otp_code, otp_expires,
                reset_token_hash, reset_token_expires, is_verified, version,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(account.role.as_str())
            .bind(account.avatar)
            .bind(&account.password_hash)
            .bind(Json(&account.previous_password_hashes))
            .bind(account.password_changed_at)
            .bind(account.failed_login_attempts)
            .bind(account.lock_until)
            .bind(&account.otp_code)
            .bind(account.otp_expires)
            .bind(&account.reset_token_hash)
            .bind(account.reset_token_expires)
            .bind(account.is_verified)
            .bind(account.version)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                _ => DomainError::storage(format!("insert failed: {e}")),
            })?;

        Ok(account)
    }

    async fn update(&self, mut account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                name = ?, email = ?, role = ?, avatar = ?, password_hash = ?,
                previous_password_hashes = ?, password_changed_at = ?,
                failed_login_attempts = ?, lock_until = ?, otp_code = ?,
                otp_expires = ?, reset_token_hash = ?, reset_token_expires = ?,
                is_verified = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.name)
            .bind(&account.email)
            .bind(account.role.as_str())
            .bind(account.avatar)
            .bind(&account.password_hash)
            .bind(Json(&account.previous_password_hashes))
            .bind(account.password_changed_at)
            .bind(account.failed_login_attempts)
            .bind(account.lock_until)
            .bind(&account.otp_code)
            .bind(account.otp_expires)
            .bind(&account.reset_token_hash)
            .bind(account.reset_token_expires)
            .bind(account.is_verified)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .bind(account.version)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("update failed: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::storage(format!(
                "version conflict for account {}",
                account.id
            )));
        }

        account.version += 1;
        Ok(account)
    }
}
