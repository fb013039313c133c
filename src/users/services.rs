use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::users::password::hash_password;
use crate::users::repo::UserRepository;
use crate::users::repo_types::User;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("password salt is not configured")]
    SaltNotConfigured,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Application service in front of the repository. The only business rule
/// lives in `create_user`; everything else delegates verbatim.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    salt: Option<String>,
}

impl UserService {
    /// The salt is injected here rather than read from the environment per
    /// call, so a missing salt is a deterministic per-request failure.
    pub fn new(repo: Arc<dyn UserRepository>, salt: Option<String>) -> Self {
        Self { repo, salt }
    }

    /// Assigns a fresh id (any caller-supplied value is discarded), hashes
    /// `password + salt`, then inserts. Fails before touching the store when
    /// the salt is absent.
    pub async fn create_user(&self, mut user: User) -> Result<User, ServiceError> {
        user.id = Uuid::new_v4();

        let salt = self
            .salt
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ServiceError::SaltNotConfigured)?;

        let salted = format!("{}{}", user.password, salt);
        user.password = hash_password(&salted).map_err(|e| ServiceError::Hash(e.to_string()))?;

        Ok(self.repo.create_user(&user).await?)
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        Ok(self.repo.get_user_by_id(id).await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, ServiceError> {
        Ok(self.repo.get_user_by_email(email).await?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, ServiceError> {
        Ok(self.repo.get_user_by_username(username).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.repo.list_users().await?)
    }

    /// Full-record replace. The password field is stored exactly as submitted,
    /// with no re-hash; callers are expected to send an already-hashed value.
    pub async fn update_user(&self, user: User) -> Result<User, ServiceError> {
        Ok(self.repo.update_user(&user).await?)
    }

    /// Hard delete.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        Ok(self.repo.delete_user(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::users::password::verify_password;
    use crate::users::repo::memory::MemoryRepository;

    fn sample_user(username: &str, email: &str, password: &str) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: Uuid::nil(),
            username: username.into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            email: email.into(),
            phone: None,
            password: password.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with_salt(salt: Option<&str>) -> (UserService, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::new());
        let svc = UserService::new(repo.clone(), salt.map(String::from));
        (svc, repo)
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let created = svc
            .create_user(sample_user("alice", "a@x.com", "pw1"))
            .await
            .expect("create");
        assert_ne!(created.password, "pw1");
        assert!(verify_password("pw1s", &created.password).unwrap());
        // plaintext alone does not verify: the salt is part of the hash input
        assert!(!verify_password("pw1", &created.password).unwrap());
    }

    #[tokio::test]
    async fn create_same_password_twice_yields_distinct_hashes() {
        let (svc, _repo) = service_with_salt(Some("pepper"));
        let a = svc
            .create_user(sample_user("a", "a@x.com", "secret"))
            .await
            .unwrap();
        let b = svc
            .create_user(sample_user("b", "b@x.com", "secret"))
            .await
            .unwrap();
        assert_ne!(a.password, b.password);
        assert!(verify_password("secretpepper", &a.password).unwrap());
        assert!(verify_password("secretpepper", &b.password).unwrap());
    }

    #[tokio::test]
    async fn create_without_salt_fails_and_writes_nothing() {
        let (svc, repo) = service_with_salt(None);
        let err = svc
            .create_user(sample_user("alice", "a@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SaltNotConfigured));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn empty_salt_is_treated_as_unset() {
        let (svc, repo) = service_with_salt(Some(""));
        let err = svc
            .create_user(sample_user("alice", "a@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SaltNotConfigured));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn create_replaces_caller_supplied_id() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let mut user = sample_user("alice", "a@x.com", "pw");
        let supplied = Uuid::new_v4();
        user.id = supplied;
        let created = svc.create_user(user).await.unwrap();
        assert_ne!(created.id, supplied);
        assert_ne!(created.id, Uuid::nil());
    }

    #[tokio::test]
    async fn update_stores_password_verbatim() {
        // Documents the design gap: update does not re-hash, so whatever the
        // caller sends lands in the store untouched.
        let (svc, _repo) = service_with_salt(Some("s"));
        let created = svc
            .create_user(sample_user("alice", "a@x.com", "pw"))
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.first_name = "Alicia".into();
        changed.password = "raw-plaintext".into();
        svc.update_user(changed).await.unwrap();

        let fetched = svc.get_user_by_id(created.id).await.unwrap();
        assert_eq!(fetched.first_name, "Alicia");
        assert_eq!(fetched.password, "raw-plaintext");
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let err = svc
            .update_user(sample_user("ghost", "g@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(sqlx::Error::RowNotFound)
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let created = svc
            .create_user(sample_user("alice", "a@x.com", "pw"))
            .await
            .unwrap();
        svc.delete_user(created.id).await.unwrap();
        let err = svc.get_user_by_id(created.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(sqlx::Error::RowNotFound)
        ));
    }

    #[tokio::test]
    async fn list_returns_every_remaining_user_once() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let a = svc
            .create_user(sample_user("a", "a@x.com", "pw"))
            .await
            .unwrap();
        let b = svc
            .create_user(sample_user("b", "b@x.com", "pw"))
            .await
            .unwrap();
        let c = svc
            .create_user(sample_user("c", "c@x.com", "pw"))
            .await
            .unwrap();
        svc.delete_user(b.id).await.unwrap();

        let mut ids: Vec<Uuid> = svc
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        ids.sort();
        let mut expected = vec![a.id, c.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn lookup_by_email_and_username() {
        let (svc, _repo) = service_with_salt(Some("s"));
        let created = svc
            .create_user(sample_user("alice", "a@x.com", "pw"))
            .await
            .unwrap();

        let by_email = svc.get_user_by_email("a@x.com").await.unwrap();
        assert_eq!(by_email.id, created.id);

        let by_username = svc.get_user_by_username("alice").await.unwrap();
        assert_eq!(by_username.id, created.id);

        let err = svc.get_user_by_email("nobody@x.com").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(sqlx::Error::RowNotFound)
        ));
    }
}
