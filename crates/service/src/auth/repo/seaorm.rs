use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_auth_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, email: u.email, name: u.name, role: u.role }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await?;
        Ok(res.map(to_auth_user))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_auth_user))
    }

    async fn create_user_with_password(
        &self,
        email: &str,
        name: &str,
        role: &str,
        password_hash: String,
        password_algorithm: String,
    ) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        let created = match models::user::create(&txn, email, name, role).await {
            Ok(u) => u,
            Err(models::errors::ModelError::Db(msg)) => {
                let _ = txn.rollback().await;
                // lost a race against a concurrent registration: the unique index wins
                if models::user::find_by_email(&self.db, email).await?.is_some() {
                    return Err(AuthError::Conflict);
                }
                return Err(AuthError::Repository(msg));
            }
            Err(e) => return Err(e.into()),
        };
        models::user_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_auth_user(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{domain::{LoginInput, RegisterInput}, service::{AuthConfig, AuthService}};
    use crate::test_support::get_db;
    use std::sync::Arc;

    #[tokio::test]
    async fn register_and_login_against_database() {
        let db = get_db().await.unwrap();
        let svc = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())), AuthConfig::with_secret("s", 1));
        let user = svc
            .register(RegisterInput { name: "Dee".into(), email: "dee@example.com".into(), password: "hunter2hunter2".into() })
            .await
            .unwrap();

        let cred = models::user_credentials::find_by_user(&db, user.id).await.unwrap().unwrap();
        assert_ne!(cred.password_hash, "hunter2hunter2");
        assert!(cred.password_hash.starts_with("$argon2"));

        let session = svc.login(LoginInput { email: "dee@example.com".into(), password: "hunter2hunter2".into() }).await.unwrap();
        assert_eq!(session.user.id, user.id);

        let dup = svc
            .register(RegisterInput { name: "Dee".into(), email: "dee@example.com".into(), password: "hunter2hunter2".into() })
            .await
            .unwrap_err();
        assert!(matches!(dup, AuthError::Conflict));
    }
}
