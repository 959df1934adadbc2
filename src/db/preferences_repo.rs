// src/db/preferences_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    models::settings::{UpdatePreferencesRequest, UserPreferences},
};

#[derive(Clone)]
pub struct PreferencesRepository {
    pool: SqlitePool,
}

impl PreferencesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, username: &str) -> Result<UserPreferences, AppError> {
        let prefs = sqlx::query_as::<_, UserPreferences>(
            "SELECT * FROM user_preferences WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        // Sem linha gravada ainda: valores padrão
        Ok(prefs.unwrap_or_else(|| UserPreferences::default_for(username)))
    }

    /// UPSERT: campos ausentes mantêm o valor atual.
    pub async fn upsert(
        &self,
        current: &UserPreferences,
        input: &UpdatePreferencesRequest,
    ) -> Result<UserPreferences, AppError> {
        let theme = input.theme.as_deref().unwrap_or(&current.theme);
        let primary = input.primary_color.as_ref().or(current.primary_color.as_ref());
        let secondary = input.secondary_color.as_ref().or(current.secondary_color.as_ref());
        let notifications = input
            .notifications_enabled
            .unwrap_or(current.notifications_enabled);

        let prefs = sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences
                (username, theme, primary_color, secondary_color, notifications_enabled, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (username)
            DO UPDATE SET
                theme = excluded.theme,
                primary_color = excluded.primary_color,
                secondary_color = excluded.secondary_color,
                notifications_enabled = excluded.notifications_enabled,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&current.username)
        .bind(theme)
        .bind(primary)
        .bind(secondary)
        .bind(notifications)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prefs)
    }
}
