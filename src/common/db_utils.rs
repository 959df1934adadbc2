// src/common/db_utils.rs

use std::str::FromStr;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};

use crate::common::error::AppError;

// ---
// Gerador de IDs
// ---
/// IDs derivados do relógio (milissegundos), estritamente crescentes.
/// Duas chamadas no mesmo milissegundo recebem IDs consecutivos.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: Arc<AtomicI64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > prev { now } else { prev + 1 };
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Garante que os próximos IDs fiquem acima de `id` (ex: após uma importação).
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}

// ---
// Helpers de decodificação
// ---
/// Lê uma coluna TEXT com valor decimal exato.
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Transação de escrita. `BEGIN IMMEDIATE` pega o lock de escrita já no início,
/// então dois escritores concorrentes esperam a vez em vez de falhar no upgrade.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Converte violação de chave única num erro de domínio.
pub(crate) fn map_unique_violation(e: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(what.to_string());
        }
    }
    e.into()
}

/// Banco em memória com as migrações aplicadas.
/// Uma única conexão: cada conexão nova de `sqlite::memory:` seria um banco vazio.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("banco em memória");
    sqlx::migrate!().run(&pool).await.expect("migrações");
    pool
}
