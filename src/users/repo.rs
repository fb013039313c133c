use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Storage contract the service depends on. Any backend satisfies it by
/// implementing these seven operations; missing rows surface as
/// `sqlx::Error::RowNotFound`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<User, sqlx::Error>;
    async fn get_user_by_id(&self, id: Uuid) -> Result<User, sqlx::Error>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, sqlx::Error>;
    async fn get_user_by_username(&self, username: &str) -> Result<User, sqlx::Error>;
    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn update_user(&self, user: &User) -> Result<User, sqlx::Error>;
    async fn delete_user(&self, id: Uuid) -> Result<(), sqlx::Error>;
}

/// Postgres-backed repository. One parameterized query per operation;
/// timestamps come from the database via RETURNING.
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, sqlx::Error> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, first_name, last_name, email, phone, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, first_name, last_name, email, phone, password,
                      created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, first_name, last_name, email, phone, password,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, first_name, last_name, email, phone, password,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, first_name, last_name, email, phone, password,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_one(&self.db)
        .await
    }

    async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, first_name, last_name, email, phone, password,
                   created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await
    }

    async fn update_user(&self, user: &User) -> Result<User, sqlx::Error> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, first_name = $3, last_name = $4, email = $5,
                phone = $6, password = $7, updated_at = now()
            WHERE id = $1
            RETURNING id, username, first_name, last_name, email, phone, password,
                      created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password)
        .fetch_one(&self.db)
        .await?;
        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
