// src/services/auth.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Login por comparação direta de usuário e senha (sistema local).
    pub async fn login(
        &self,
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_username(pool, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.password != password {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 Login de {} ({:?})", user.username, user.role);
        Ok(user)
    }

    pub async fn list_users(&self, pool: &SqlitePool) -> Result<Vec<User>, AppError> {
        self.user_repo.get_all(pool).await
    }

    pub async fn create_user(
        &self,
        pool: &SqlitePool,
        username: String,
        name: String,
        password: String,
        role: UserRole,
    ) -> Result<User, AppError> {
        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            username,
            name,
            password,
            role,
        };
        self.user_repo.insert(pool, &user).await
    }

    /// Atualiza um usuário; senha vazia ou ausente mantém a atual.
    pub async fn update_user(
        &self,
        pool: &SqlitePool,
        id: &str,
        username: String,
        name: String,
        password: Option<String>,
        role: UserRole,
    ) -> Result<User, AppError> {
        let existing = self
            .user_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let password = match password {
            Some(p) if !p.trim().is_empty() => p,
            _ => existing.password,
        };

        let user = User { id: id.to_string(), username, name, password, role };
        self.user_repo.update(pool, &user).await
    }

    /// Exclui um usuário; o último administrador do sistema é intocável.
    pub async fn delete_user(&self, pool: &SqlitePool, id: &str) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let user = self
            .user_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if user.role == UserRole::Administrator {
            let admins = self
                .user_repo
                .count_by_role(&mut *tx, UserRole::Administrator)
                .await?;
            if admins <= 1 {
                return Err(AppError::LastAdministrator);
            }
        }

        self.user_repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!("🗑️ Usuário {} excluído", user.username);
        Ok(())
    }
}

// =============================================================================
//  TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::test_pool;

    fn service() -> AuthService {
        AuthService::new(UserRepository::new())
    }

    #[tokio::test]
    async fn login_com_usuario_seedado() {
        let pool = test_pool().await;
        let svc = service();

        let user = svc.login(&pool, "IAC2010", "2010").await.unwrap();
        assert_eq!(user.role, UserRole::Administrator);

        let err = svc.login(&pool, "IAC2010", "errada").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err = svc.login(&pool, "fantasma", "2010").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn ultimo_administrador_nao_pode_ser_excluido() {
        let pool = test_pool().await;
        let svc = service();

        // O seed traz dois administradores; o primeiro sai sem problema
        svc.delete_user(&pool, "user-admin-vivi").await.unwrap();

        let err = svc.delete_user(&pool, "user-admin-iac").await.unwrap_err();
        assert!(matches!(err, AppError::LastAdministrator));

        // Usuário comum continua excluível
        svc.delete_user(&pool, "user-rico").await.unwrap();
    }

    #[tokio::test]
    async fn senha_em_branco_mantem_a_atual() {
        let pool = test_pool().await;
        let svc = service();

        svc.update_user(
            &pool,
            "user-rico",
            "RICO".to_string(),
            "Ricardo Usuário".to_string(),
            Some("   ".to_string()),
            UserRole::User,
        )
        .await
        .unwrap();

        // Login segue com a senha antiga
        svc.login(&pool, "RICO", "2010").await.unwrap();

        svc.update_user(
            &pool,
            "user-rico",
            "RICO".to_string(),
            "Ricardo Usuário".to_string(),
            Some("nova123".to_string()),
            UserRole::User,
        )
        .await
        .unwrap();

        svc.login(&pool, "RICO", "nova123").await.unwrap();
        let err = svc.login(&pool, "RICO", "2010").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
