// src/services/preferences_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    db::PreferencesRepository,
    models::{
        auth::User,
        settings::{UpdatePreferencesRequest, UserPreferences},
    },
};

#[derive(Clone)]
pub struct PreferencesService {
    repo: PreferencesRepository,
}

impl PreferencesService {
    pub fn new(repo: PreferencesRepository) -> Self {
        Self { repo }
    }

    pub async fn get_preferences(&self, user: &User) -> Result<UserPreferences, AppError> {
        self.repo.get(&user.username).await
    }

    pub async fn update_preferences(
        &self,
        user: &User,
        input: UpdatePreferencesRequest,
    ) -> Result<UserPreferences, AppError> {
        input.validate()?;
        let current = self.repo.get(&user.username).await?;
        self.repo.upsert(&current, &input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::db_utils::test_pool, db::UserRepository, models::auth::Role};
    use chrono::Utc;

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let pool = test_pool().await;
        let service = PreferencesService::new(PreferencesRepository::new(pool.clone()));
        let user = User {
            id: 1,
            username: "cajero1".into(),
            name: "Cajero 1".into(),
            role: Role::Cajero,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        // As preferências apontam para um usuário existente
        UserRepository::new(pool.clone())
            .create_user(&pool, user.id, &user.username, &user.name, user.role, "hash", user.created_at)
            .await
            .unwrap();

        let defaults = service.get_preferences(&user).await.unwrap();
        assert_eq!(defaults.theme, "light");
        assert!(defaults.notifications_enabled);

        let update = |json: &str| serde_json::from_str::<UpdatePreferencesRequest>(json).unwrap();
        service
            .update_preferences(&user, update(r##"{"theme": "dark", "primaryColor": "#112233"}"##))
            .await
            .unwrap();
        let prefs = service
            .update_preferences(&user, update(r#"{"notificationsEnabled": false}"#))
            .await
            .unwrap();

        assert_eq!(prefs.theme, "dark");
        assert_eq!(prefs.primary_color.as_deref(), Some("#112233"));
        assert!(!prefs.notifications_enabled);
    }
}
