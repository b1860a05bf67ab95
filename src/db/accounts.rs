use crate::db::{is_unique_violation, DbResultExt, PortfolioDb};
use crate::types::{Account, AppError, Result, Role};
use libsql::Row;

pub const DUPLICATE_USERNAME: &str = "Username already exists";

/// The unique index on `username` is the source of truth for duplicates, so a
/// violation is a client error even when a concurrent write won the race.
fn account_write_error(err: libsql::Error, context: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::InvalidInput(DUPLICATE_USERNAME.to_string())
    } else {
        AppError::Database(format!("{}: {}", context, err))
    }
}

/// A row of the `users` table, including the password hash.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

impl AccountRecord {
    /// Drops the password hash.
    pub fn into_account(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
        }
    }
}

fn account_from_row(row: &Row) -> Result<Account> {
    let role: String = row.get(3).db_context("Failed to read role")?;
    Ok(Account {
        id: row.get(0).db_context("Failed to read id")?,
        username: row.get(1).db_context("Failed to read username")?,
        email: row.get(2).db_context("Failed to read email")?,
        role: role.parse()?,
    })
}

impl PortfolioDb {
    /// Inserts an account and returns its id. `password_hash` must already be hashed.
    /// A taken username is [`AppError::InvalidInput`].
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<i64> {
        let conn = self.connection().await?;

        conn.execute(
            "INSERT INTO users (username, password_hash, email, role) VALUES (?1, ?2, ?3, ?4)",
            (username, password_hash, email, role.as_str()),
        )
        .await
        .map_err(|e| account_write_error(e, "Failed to create user"))?;

        Ok(conn.last_insert_rowid())
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRecord>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query(
                "SELECT id, username, email, role, password_hash FROM users WHERE username = ?1",
                [username],
            )
            .await
            .db_context("Failed to query user")?;

        match rows.next().await.db_context("Failed to read user")? {
            Some(row) => {
                let account = account_from_row(&row)?;
                Ok(Some(AccountRecord {
                    id: account.id,
                    username: account.username,
                    email: account.email,
                    role: account.role,
                    password_hash: row.get(4).db_context("Failed to read password hash")?,
                }))
            }
            None => Ok(None),
        }
    }

    /// All accounts, without password hashes.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.connection().await?;

        let mut rows = conn
            .query("SELECT id, username, email, role FROM users ORDER BY id", ())
            .await
            .db_context("Failed to query users")?;

        let mut accounts = Vec::new();
        while let Some(row) = rows.next().await.db_context("Failed to read user")? {
            accounts.push(account_from_row(&row)?);
        }

        Ok(accounts)
    }

    /// Updates username and email; password hash and role only when given.
    /// Returns `false` when no account has this id.
    pub async fn update_account(
        &self,
        id: i64,
        username: &str,
        email: &str,
        password_hash: Option<&str>,
        role: Option<Role>,
    ) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE users SET username = ?1, email = ?2,
                    password_hash = COALESCE(?3, password_hash),
                    role = COALESCE(?4, role)
                 WHERE id = ?5",
                (username, email, password_hash, role.map(|r| r.as_str()), id),
            )
            .await
            .map_err(|e| account_write_error(e, "Failed to update user"))?;

        Ok(affected > 0)
    }

    /// Returns `false` when no account has this id.
    pub async fn delete_account(&self, id: i64) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .await
            .db_context("Failed to delete user")?;

        Ok(affected > 0)
    }

    /// Grants `super_admin` to the named account. Returns `false` when it does not exist.
    pub async fn promote_super_admin(&self, username: &str) -> Result<bool> {
        let conn = self.connection().await?;

        let affected = conn
            .execute(
                "UPDATE users SET role = ?1 WHERE username = ?2",
                (Role::SuperAdmin.as_str(), username),
            )
            .await
            .db_context("Failed to promote user")?;

        Ok(affected > 0)
    }
}
