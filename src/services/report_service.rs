// src/services/report_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{CashRepository, ClientRepository, DeceasedRepository, SaleRepository},
    models::{
        auth::User,
        cash::{CashMovement, CashSummary, MovementType},
        client::Client,
        deceased::DeceasedRecord,
        report::{
            ActivityDay, ActivityEntry, ActivityKind, ActivitySummary, CashReport,
            ClientReportRow, DailyActivityReport, DailyCashRow, DateRange, SalesReport,
        },
        sale::{Sale, SaleStatus},
    },
};

const NO_ACCESS: &str = "No tiene acceso a los reportes";

// ---
// Geradores puros (sem banco)
// ---

pub fn build_sales_report(sales: &[Sale], range: &DateRange) -> SalesReport {
    let mut report = SalesReport::default();
    for sale in sales.iter().filter(|s| range.contains(s.date)) {
        report.total_sales += 1;
        report.total_amount += sale.total;
        if sale.on_credit {
            report.credit_amount += sale.total;
        }
        match sale.status {
            SaleStatus::Completado => report.completed += 1,
            SaleStatus::Pendiente => report.pending += 1,
            SaleStatus::Espera => report.waiting += 1,
        }
    }
    report
}

/// Clientes cadastrados no período, com o gasto acumulado em todas as vendas.
pub fn build_client_report(
    clients: &[Client],
    sales: &[Sale],
    range: &DateRange,
) -> Vec<ClientReportRow> {
    let mut rows: Vec<ClientReportRow> = clients
        .iter()
        .filter(|c| range.contains(c.created_at))
        .map(|client| {
            let purchases = sales.iter().filter(|s| s.client_id == client.id);
            let (total_spent, purchase_count) = purchases
                .fold((Decimal::ZERO, 0), |(sum, n), s| (sum + s.total, n + 1));
            ClientReportRow {
                client: client.clone(),
                total_spent,
                purchase_count,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    rows
}

pub fn build_cash_report(movements: &[CashMovement], range: &DateRange) -> CashReport {
    let in_range: Vec<&CashMovement> = movements.iter().filter(|m| range.contains(m.date)).collect();
    let totals = CashSummary::from_movements(in_range.iter().copied());

    let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for m in &in_range {
        let entry = by_day.entry(m.date.date_naive()).or_default();
        match m.movement_type {
            MovementType::Ingreso => entry.0 += m.amount,
            MovementType::Egreso => entry.1 += m.amount,
        }
    }

    // Dias mais recentes primeiro
    let daily = by_day
        .into_iter()
        .rev()
        .map(|(date, (income, expenses))| DailyCashRow {
            date,
            income,
            expenses,
            balance: income - expenses,
        })
        .collect();

    CashReport {
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        balance: totals.balance,
        daily,
    }
}

pub fn sale_activity(sale: &Sale, client_names: &HashMap<i64, String>) -> ActivityEntry {
    let client = client_names
        .get(&sale.client_id)
        .map(String::as_str)
        .unwrap_or("Cliente");
    ActivityEntry {
        kind: ActivityKind::Sale,
        date: sale.date,
        title: format!("Venta a {client}"),
        description: format!("{} items - {}", sale.items.len(), sale.total),
        amount: Some(sale.total),
        movement_type: None,
        user: sale.created_by.clone(),
    }
}

pub fn movement_activity(movement: &CashMovement) -> ActivityEntry {
    let title = match movement.movement_type {
        MovementType::Ingreso => "Ingreso",
        MovementType::Egreso => "Egreso",
    };
    ActivityEntry {
        kind: ActivityKind::CashMovement,
        date: movement.date,
        title: title.to_string(),
        description: movement.description.clone(),
        amount: Some(movement.amount),
        movement_type: Some(movement.movement_type),
        user: movement.created_by.clone(),
    }
}

/// Vendas e movimentos mesclados, do mais novo para o mais antigo.
pub fn recent_activity(
    sales: &[Sale],
    movements: &[CashMovement],
    client_names: &HashMap<i64, String>,
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut all: Vec<ActivityEntry> = sales
        .iter()
        .map(|s| sale_activity(s, client_names))
        .chain(movements.iter().map(movement_activity))
        .collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(limit);
    all
}

pub fn build_daily_activity_report(
    sales: &[Sale],
    movements: &[CashMovement],
    clients: &[Client],
    deceased: &[DeceasedRecord],
    range: &DateRange,
) -> DailyActivityReport {
    let client_names: HashMap<i64, String> =
        clients.iter().map(|c| (c.id, c.name.clone())).collect();

    let sales: Vec<&Sale> = sales.iter().filter(|s| range.contains(s.date)).collect();
    let movements: Vec<&CashMovement> =
        movements.iter().filter(|m| range.contains(m.date)).collect();

    let totals = CashSummary::from_movements(movements.iter().copied());
    let mut summary = ActivitySummary {
        total_sales: sales.iter().map(|s| s.total).sum(),
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        activity_count: 0,
    };

    let mut all: Vec<ActivityEntry> = sales
        .iter()
        .map(|s| sale_activity(s, &client_names))
        .chain(movements.iter().map(|m| movement_activity(m)))
        .chain(
            clients
                .iter()
                .filter(|c| range.contains(c.created_at))
                .map(|c| ActivityEntry {
                    kind: ActivityKind::ClientCreated,
                    date: c.created_at,
                    title: "Nuevo Cliente".into(),
                    description: c.name.clone(),
                    amount: None,
                    movement_type: None,
                    user: c.created_by.clone(),
                }),
        )
        .chain(
            deceased
                .iter()
                .filter(|d| range.contains(d.created_at))
                .map(|d| ActivityEntry {
                    kind: ActivityKind::DeceasedCreated,
                    date: d.created_at,
                    title: "Registro de Fallecido".into(),
                    description: d.name.clone(),
                    amount: None,
                    movement_type: None,
                    user: d.created_by.clone(),
                }),
        )
        .collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    summary.activity_count = all.len();

    // Como já está ordenado, dias consecutivos ficam juntos
    let mut days: Vec<ActivityDay> = Vec::new();
    for entry in all {
        let day = entry.date.date_naive();
        match days.last_mut() {
            Some(current) if current.date == day => current.activities.push(entry),
            _ => days.push(ActivityDay { date: day, activities: vec![entry] }),
        }
    }

    DailyActivityReport { days, summary }
}

// ---
// Serviço
// ---

#[derive(Clone)]
pub struct ReportService {
    sale_repo: SaleRepository,
    client_repo: ClientRepository,
    cash_repo: CashRepository,
    deceased_repo: DeceasedRepository,
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(
        sale_repo: SaleRepository,
        client_repo: ClientRepository,
        cash_repo: CashRepository,
        deceased_repo: DeceasedRepository,
        pool: SqlitePool,
    ) -> Self {
        Self { sale_repo, client_repo, cash_repo, deceased_repo, pool }
    }

    async fn all_sales(&self) -> Result<Vec<Sale>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.sale_repo.list(&mut conn).await
    }

    pub async fn sales_report(&self, range: DateRange, user: &User) -> Result<SalesReport, AppError> {
        user.require("reportes:view", NO_ACCESS)?;
        let sales = self.all_sales().await?;
        Ok(build_sales_report(&sales, &range))
    }

    pub async fn client_report(
        &self,
        range: DateRange,
        user: &User,
    ) -> Result<Vec<ClientReportRow>, AppError> {
        user.require("reportes:view", NO_ACCESS)?;
        let clients = self.client_repo.list(&self.pool).await?;
        let sales = self.all_sales().await?;
        Ok(build_client_report(&clients, &sales, &range))
    }

    pub async fn cash_report(&self, range: DateRange, user: &User) -> Result<CashReport, AppError> {
        user.require("reportes:view", NO_ACCESS)?;
        let movements = self.cash_repo.list_movements(&self.pool).await?;
        Ok(build_cash_report(&movements, &range))
    }

    pub async fn daily_activity_report(
        &self,
        range: DateRange,
        user: &User,
    ) -> Result<DailyActivityReport, AppError> {
        user.require("reportes:view", NO_ACCESS)?;
        let sales = self.all_sales().await?;
        let movements = self.cash_repo.list_movements(&self.pool).await?;
        let clients = self.client_repo.list(&self.pool).await?;
        let deceased = self.deceased_repo.list(&self.pool).await?;
        Ok(build_daily_activity_report(&sales, &movements, &clients, &deceased, &range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sale::PaymentStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movement(id: i64, kind: MovementType, amount: i64, date: DateTime<Utc>) -> CashMovement {
        CashMovement {
            id,
            movement_type: kind,
            amount: Decimal::from(amount),
            description: format!("mov {id}"),
            date,
            created_by: "admin".into(),
            sale_id: None,
            payment_method: None,
        }
    }

    fn sale(id: i64, client_id: i64, total: i64, status: SaleStatus, credit: bool, date: DateTime<Utc>) -> Sale {
        Sale {
            id,
            client_id,
            status,
            payment_status: PaymentStatus::Pendiente,
            payment_method: "efectivo".into(),
            items: vec![],
            total: Decimal::from(total),
            amount_paid: Decimal::ZERO,
            on_credit: credit,
            notes: None,
            date,
            created_by: "cajero1".into(),
            processed: false,
        }
    }

    fn client(id: i64, name: &str, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: name.into(),
            document_id: id.to_string(),
            phone: "1".into(),
            address: "x".into(),
            email: None,
            created_by: "admin".into(),
            created_at,
            updated_at: None,
        }
    }

    #[test]
    fn cash_report_balance_is_income_minus_expenses() {
        let range = DateRange::from_days(day(2025, 1, 1), day(2025, 1, 31)).unwrap();
        let movements = vec![
            movement(1, MovementType::Ingreso, 500, at(2025, 1, 10, 9)),
            movement(2, MovementType::Egreso, 200, at(2025, 1, 12, 15)),
            movement(3, MovementType::Ingreso, 999, at(2025, 2, 1, 0)),
        ];

        let report = build_cash_report(&movements, &range);
        assert_eq!(report.total_income, Decimal::from(500));
        assert_eq!(report.total_expenses, Decimal::from(200));
        assert_eq!(report.balance, Decimal::from(300));

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, day(2025, 1, 12));
        assert_eq!(report.daily[0].balance, Decimal::from(-200));
        assert_eq!(report.daily[1].income, Decimal::from(500));
    }

    #[test]
    fn sales_report_counts_by_status_and_credit() {
        let range = DateRange::from_days(day(2025, 3, 1), day(2025, 3, 1)).unwrap();
        let sales = vec![
            sale(1, 1, 100, SaleStatus::Completado, false, at(2025, 3, 1, 8)),
            sale(2, 1, 250, SaleStatus::Espera, true, at(2025, 3, 1, 23)),
            sale(3, 2, 50, SaleStatus::Pendiente, true, at(2025, 3, 1, 12)),
            sale(4, 2, 70, SaleStatus::Pendiente, true, at(2025, 3, 2, 0)),
        ];

        let report = build_sales_report(&sales, &range);
        assert_eq!(report.total_sales, 3);
        assert_eq!(report.total_amount, Decimal::from(400));
        assert_eq!(report.credit_amount, Decimal::from(300));
        assert_eq!((report.completed, report.pending, report.waiting), (1, 1, 1));
    }

    #[test]
    fn client_report_ranks_by_spend_over_all_sales() {
        let range = DateRange::from_days(day(2025, 1, 1), day(2025, 1, 31)).unwrap();
        let clients = vec![
            client(1, "Ana", at(2025, 1, 5, 10)),
            client(2, "Beto", at(2025, 1, 6, 10)),
            client(3, "Fuera", at(2024, 12, 1, 10)),
        ];
        // Venda fora do período também conta para o total do cliente
        let sales = vec![
            sale(10, 1, 100, SaleStatus::Completado, false, at(2025, 1, 5, 11)),
            sale(11, 2, 300, SaleStatus::Completado, false, at(2025, 6, 1, 11)),
            sale(12, 2, 50, SaleStatus::Completado, false, at(2025, 1, 7, 11)),
        ];

        let rows = build_client_report(&clients, &sales, &range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client.name, "Beto");
        assert_eq!(rows[0].total_spent, Decimal::from(350));
        assert_eq!(rows[0].purchase_count, 2);
        assert_eq!(rows[1].purchase_count, 1);
    }

    #[test]
    fn daily_activity_groups_newest_first() {
        let range = DateRange::from_days(day(2025, 1, 1), day(2025, 1, 2)).unwrap();
        let clients = vec![client(1, "Ana", at(2025, 1, 1, 9))];
        let sales = vec![sale(10, 1, 120, SaleStatus::Completado, false, at(2025, 1, 2, 10))];
        let movements = vec![
            movement(20, MovementType::Ingreso, 120, at(2025, 1, 2, 11)),
            movement(21, MovementType::Egreso, 30, at(2025, 1, 1, 12)),
        ];

        let report = build_daily_activity_report(&sales, &movements, &clients, &[], &range);
        assert_eq!(report.summary.activity_count, 4);
        assert_eq!(report.summary.total_sales, Decimal::from(120));
        assert_eq!(report.summary.total_expenses, Decimal::from(30));

        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, day(2025, 1, 2));
        assert_eq!(report.days[0].activities[0].kind, ActivityKind::CashMovement);
        assert_eq!(report.days[0].activities[1].title, "Venta a Ana");
        assert_eq!(report.days[1].activities.last().unwrap().kind, ActivityKind::ClientCreated);
    }

    #[test]
    fn recent_activity_keeps_the_latest_entries() {
        let names = HashMap::new();
        let sales = vec![sale(1, 9, 10, SaleStatus::Completado, false, at(2025, 1, 1, 1))];
        let movements: Vec<CashMovement> = (0..6)
            .map(|i| movement(i, MovementType::Ingreso, 1, at(2025, 1, 2, i as u32)))
            .collect();

        let recent = recent_activity(&sales, &movements, &names, 5);
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|a| a.kind == ActivityKind::CashMovement));
        assert_eq!(recent[0].description, "mov 5");
    }
}
