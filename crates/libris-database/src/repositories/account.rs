//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use libris_core::error::{AppError, ErrorKind};
use libris_core::result::AppResult;
use libris_entity::account::{Account, AccountDirectory, AccountSnapshot, Permission, Role, RoleGraph};

/// Roles held by an account, each with its permission ids ordered by permission name.
const ROLES_FOR_ACCOUNT: &str = "\
    SELECT r.id, r.name, \
           COALESCE(ARRAY_AGG(p.id ORDER BY p.name) FILTER (WHERE p.id IS NOT NULL), '{}') \
               AS permission_ids \
    FROM roles r \
    JOIN account_roles ar ON ar.role_id = r.id \
    LEFT JOIN role_permissions rp ON rp.role_id = r.id \
    LEFT JOIN permissions p ON p.id = rp.permission_id \
    WHERE ar.account_id = $1 \
    GROUP BY r.id, r.name \
    ORDER BY r.name";

/// Every permission reachable from the account's roles.
const PERMISSIONS_FOR_ACCOUNT: &str = "\
    SELECT DISTINCT p.id, p.name, p.description \
    FROM permissions p \
    JOIN role_permissions rp ON rp.permission_id = p.id \
    JOIN account_roles ar ON ar.role_id = rp.role_id \
    WHERE ar.account_id = $1";

/// Repository for account lookup and activation.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account row by email (case-insensitive).
    pub async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    /// Find an account row by primary key.
    pub async fn find_account_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    /// Load the role graph of an account.
    pub async fn load_role_graph(&self, account_id: Uuid) -> AppResult<RoleGraph> {
        let roles = sqlx::query_as::<_, Role>(ROLES_FOR_ACCOUNT)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load account roles", e)
            })?;

        let permissions = sqlx::query_as::<_, Permission>(PERMISSIONS_FOR_ACCOUNT)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load account permissions", e)
            })?;

        Ok(RoleGraph::new(roles, permissions))
    }

    async fn snapshot(&self, account: Option<Account>) -> AppResult<Option<AccountSnapshot>> {
        match account {
            Some(account) => {
                let graph = self.load_role_graph(account.id).await?;
                Ok(Some(AccountSnapshot::new(account, graph)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AccountDirectory for AccountRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AccountSnapshot>> {
        let account = self.find_account_by_email(email).await?;
        self.snapshot(account).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccountSnapshot>> {
        let account = self.find_account_by_id(id).await?;
        self.snapshot(account).await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE accounts SET active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update account status", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::account_not_found(format!("Account {id} not found")));
        }
        Ok(())
    }
}
