// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::IdGenerator, error::AppError},
    db::UserRepository,
    models::auth::{AuthResponse, Claims, Role, User},
};

// Contas criadas quando a tabela de usuários está vazia
const DEFAULT_USERS: [(&str, &str, &str, Role); 3] = [
    ("admin", "admin123", "Administrador", Role::Admin),
    ("cajero1", "cajero1", "Cajero 1", Role::Cajero),
    ("cajero2", "cajero2", "Cajero 2", Role::Cajero),
];

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    bcrypt_cost: u32,
    ids: IdGenerator,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        jwt_secret: String,
        bcrypt_cost: u32,
        ids: IdGenerator,
        pool: SqlitePool,
    ) -> Self {
        Self { user_repo, jwt_secret, bcrypt_cost, ids, pool }
    }

    /// Cria as contas padrão se ainda não existir nenhum usuário.
    pub async fn seed_default_users(&self) -> Result<usize, AppError> {
        if self.user_repo.count().await? > 0 {
            return Ok(0);
        }

        // Hashing fora da transação (não toca no banco)
        let mut hashed = Vec::with_capacity(DEFAULT_USERS.len());
        for (username, password, name, role) in DEFAULT_USERS {
            hashed.push((username, name, role, self.hash_password(password).await?));
        }

        let mut tx = self.pool.begin().await?;
        for (username, name, role, password_hash) in &hashed {
            self.user_repo
                .create_user(
                    &mut *tx,
                    self.ids.next_id(),
                    username,
                    name,
                    *role,
                    password_hash,
                    Utc::now(),
                )
                .await?;
        }
        tx.commit().await?;

        tracing::info!("👤 {} usuários padrão criados.", hashed.len());
        Ok(hashed.len())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user.username)?;
        tracing::info!("🔑 Login de '{}' ({:?})", user.username, user.role);
        Ok(AuthResponse { token, user })
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Usuário removido depois de emitir o token também invalida a sessão
        self.user_repo
            .find_by_username(&token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    fn create_token(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
