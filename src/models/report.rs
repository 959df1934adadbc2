// src/models/report.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::error::AppError;
use crate::models::cash::MovementType;
use crate::models::client::Client;

// ---
// Período (query string ?startDate=&endDate=)
// ---
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Primeiro dia (inclusive), formato YYYY-MM-DD
    pub start_date: NaiveDate,
    /// Último dia (inclusive), formato YYYY-MM-DD
    pub end_date: NaiveDate,
}

/// Dias inteiros: do início do primeiro dia até o início do dia seguinte ao último (exclusivo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
}

impl DateRange {
    pub fn from_days(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if end < start {
            return Err(AppError::InvalidInput(
                "La fecha final no puede ser anterior a la inicial".into(),
            ));
        }
        let next_day = end
            .succ_opt()
            .ok_or_else(|| AppError::InvalidInput("Fecha final fuera de rango".into()))?;
        Ok(Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end_exclusive: next_day.and_time(NaiveTime::MIN).and_utc(),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end_exclusive
    }
}

impl TryFrom<DateRangeQuery> for DateRange {
    type Error = AppError;

    fn try_from(q: DateRangeQuery) -> Result<Self, Self::Error> {
        DateRange::from_days(q.start_date, q.end_date)
    }
}

// ---
// Relatório de vendas
// ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_sales: usize,
    pub total_amount: Decimal,
    pub credit_amount: Decimal,
    pub completed: usize,
    pub pending: usize,
    pub waiting: usize,
}

// ---
// Relatório de clientes
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientReportRow {
    pub client: Client,
    pub total_spent: Decimal,
    pub purchase_count: usize,
}

// ---
// Cuadre de caixa
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCashRow {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashReport {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub daily: Vec<DailyCashRow>,
}

// ---
// Atividade diária
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Sale,
    CashMovement,
    ClientCreated,
    DeceasedCreated,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub date: DateTime<Utc>,
    #[schema(example = "Venta a María González")]
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_type: Option<MovementType>,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub activities: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_sales: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub activity_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityReport {
    pub days: Vec<ActivityDay>,
    pub summary: ActivitySummary,
}
