// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::db_utils::decimal_column;
use crate::models::cash::CashMovement;
use crate::models::inventory::validate_not_negative;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pendiente,
    Espera,
    Completado,
}

// pendiente -> parcial -> pagado (nunca volta)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pendiente,
    Parcial,
    Pagado,
}

// --- Linha da venda ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    #[schema(example = "Ataúd Roble")]
    pub name: String,
    #[schema(example = 1)]
    pub quantity: i64,
    #[schema(example = 1500.0)]
    pub price: Decimal,
    // Recalculado ao registrar a venda
    #[serde(default)]
    #[schema(example = 1500.0)]
    pub subtotal: Decimal,
    // Referência ao item de inventário (linhas antigas podem não ter)
    #[serde(default)]
    pub inventory_item_id: Option<i64>,
}

impl SaleLine {
    pub fn new(name: &str, quantity: i64, price: Decimal, inventory_item_id: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            price,
            subtotal: price * Decimal::from(quantity),
            inventory_item_id,
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for SaleLine {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            price: decimal_column(row, "price")?,
            subtotal: decimal_column(row, "subtotal")?,
            inventory_item_id: row.try_get("inventory_item_id")?,
        })
    }
}

// --- Venda ---

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pendiente
}

/// Aceita o ID como número ou como texto numérico.
pub fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("ID inválido: {text:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    // O formulário antigo gravava o cliente como texto ("1699999999999")
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub client_id: i64,
    pub status: SaleStatus,
    // Vendas anteriores ao controle de pagamentos não têm estes campos
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
    #[schema(example = "efectivo")]
    pub payment_method: String,
    #[serde(default)]
    pub items: Vec<SaleLine>,
    pub total: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub on_credit: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub processed: bool,
}

impl<'r> FromRow<'r, SqliteRow> for Sale {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            status: row.try_get("status")?,
            payment_status: row.try_get("payment_status")?,
            payment_method: row.try_get("payment_method")?,
            // As linhas são carregadas à parte pelo repositório
            items: Vec::new(),
            total: decimal_column(row, "total")?,
            amount_paid: decimal_column(row, "amount_paid")?,
            on_credit: row.try_get("on_credit")?,
            notes: row.try_get("notes")?,
            date: row.try_get("date")?,
            created_by: row.try_get("created_by")?,
            processed: row.try_get("processed")?,
        })
    }
}

impl Sale {
    pub fn amount_due(&self) -> Decimal {
        (self.total - self.amount_paid).max(Decimal::ZERO)
    }

    /// Aplica um pagamento e devolve o valor efetivamente abatido.
    /// O excedente é descartado, então amount_paid nunca passa do total.
    pub fn apply_payment(&mut self, amount: Decimal) -> Decimal {
        let applied = amount.min(self.amount_due()).max(Decimal::ZERO);
        self.amount_paid += applied;

        if self.amount_paid >= self.total {
            self.payment_status = PaymentStatus::Pagado;
            self.status = SaleStatus::Completado;
        } else {
            self.payment_status = PaymentStatus::Parcial;
        }
        applied
    }

    /// Quitada e concluída: pode ser removida pela limpeza diária depois de 30 dias.
    pub fn is_settled(&self) -> bool {
        self.payment_status == PaymentStatus::Pagado && self.status == SaleStatus::Completado
    }

    /// Processada e quitada: sai da lista de vendas, continua nos relatórios.
    pub fn is_archived(&self) -> bool {
        self.processed && self.is_settled()
    }
}

// ---
// Carrinho (venda em andamento)
// ---
/// Venda ainda não registrada. É um valor do chamador, não estado global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    #[serde(default)]
    pub items: Vec<SaleLine>,
}

impl SaleDraft {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|line| line.subtotal).sum()
    }

    pub fn push_line(&mut self, line: SaleLine) {
        self.items.push(line);
    }

    pub fn remove_line(&mut self, index: usize) -> Option<SaleLine> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---
// Payloads
// ---

fn validate_lines(lines: &[SaleLine]) -> Result<(), ValidationError> {
    if lines.is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("La venta no tiene items.".into());
        return Err(err);
    }
    if lines.iter().any(|l| l.quantity <= 0 || l.price.is_sign_negative()) {
        let mut err = ValidationError::new("range");
        err.message = Some("Cantidad o precio inválido.".into());
        return Err(err);
    }
    Ok(())
}

fn default_sale_status() -> SaleStatus {
    SaleStatus::Completado
}

fn default_payment_method() -> String {
    "efectivo".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSalePayload {
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub client_id: i64,

    #[serde(default = "default_sale_status")]
    pub status: SaleStatus,

    #[serde(default = "default_payment_method")]
    pub payment_method: String,

    #[validate(custom(function = "validate_lines"))]
    pub items: Vec<SaleLine>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub on_credit: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 300.0)]
    pub amount: Decimal,

    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    validate_not_negative(val)?;
    if val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("Datos de pago inválidos".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleStatusPayload {
    pub payment_status: PaymentStatus,
    pub status: SaleStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemPayload {
    #[serde(default)]
    pub cart: SaleDraft,

    #[validate(length(min = 1, message = "Ingrese el nombre del item"))]
    pub name: String,

    #[serde(default = "default_cart_quantity")]
    #[validate(range(min = 1, message = "Cantidad inválida"))]
    pub quantity: i64,
}

fn default_cart_quantity() -> i64 {
    1
}

// GET /api/sales?includeProcessed=true
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SaleListQuery {
    /// Inclui as vendas já quitadas e processadas (ocultas por padrão)
    #[serde(default)]
    pub include_processed: bool,
}

/// Venda atualizada e o movimento de caixa gerado pelo pagamento.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub sale: Sale,
    pub movement: CashMovement,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn sale(total: i64, paid: i64) -> Sale {
        Sale {
            id: 1,
            client_id: 1,
            status: SaleStatus::Espera,
            payment_status: PaymentStatus::Pendiente,
            payment_method: "efectivo".into(),
            items: vec![],
            total: dec(total),
            amount_paid: dec(paid),
            on_credit: true,
            notes: None,
            date: Utc::now(),
            created_by: "admin".into(),
            processed: false,
        }
    }

    #[test]
    fn partial_then_full_payment_completes_the_sale() {
        let mut s = sale(300, 0);
        assert_eq!(s.apply_payment(dec(100)), dec(100));
        assert_eq!(s.payment_status, PaymentStatus::Parcial);
        assert_eq!(s.status, SaleStatus::Espera);

        assert_eq!(s.apply_payment(dec(200)), dec(200));
        assert_eq!(s.payment_status, PaymentStatus::Pagado);
        assert_eq!(s.status, SaleStatus::Completado);
        assert_eq!(s.amount_paid, dec(300));
    }

    #[test]
    fn older_sales_with_text_client_id_still_parse() {
        let raw = serde_json::json!({
            "id": 1700000000001i64,
            "clientId": "1699999999999",
            "status": "completado",
            "paymentMethod": "efectivo",
            "items": [{"name": "Silla", "quantity": 2, "price": 10}],
            "total": 20,
            "notes": "",
            "date": "2024-11-14T22:13:20.000Z",
            "createdBy": "admin"
        });
        let parsed: Sale = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.client_id, 1699999999999);
        assert_eq!(parsed.payment_status, PaymentStatus::Pendiente);
        assert_eq!(parsed.amount_paid, Decimal::ZERO);
        assert!(!parsed.on_credit);

        let bad = serde_json::json!({"clientId": "abc", "items": [], "onCredit": false});
        assert!(serde_json::from_value::<RegisterSalePayload>(bad).is_err());
    }

    #[test]
    fn overpayment_is_capped_at_the_total() {
        let mut s = sale(300, 250);
        let applied = s.apply_payment(dec(1000));
        assert_eq!(applied, dec(50));
        assert_eq!(s.amount_paid, s.total);
        assert_eq!(s.amount_due(), Decimal::ZERO);
    }

    #[test]
    fn amount_paid_never_exceeds_total_for_any_sequence() {
        let mut s = sale(1000, 0);
        for amount in [1, 333, 7, 400, 999, 5000, 2] {
            s.apply_payment(dec(amount));
            assert!(s.amount_paid <= s.total);
        }
        assert_eq!(s.payment_status, PaymentStatus::Pagado);
    }

    #[test]
    fn cart_total_is_the_sum_of_subtotals() {
        let mut cart = SaleDraft::default();
        cart.push_line(SaleLine::new("Ataúd", 1, dec(1500), Some(1)));
        cart.push_line(SaleLine::new("Silla", 20, dec(15), Some(2)));
        assert_eq!(cart.total(), dec(1800));

        let removed = cart.remove_line(0).unwrap();
        assert_eq!(removed.name, "Ataúd");
        assert_eq!(cart.total(), dec(300));
        assert!(cart.remove_line(5).is_none());
    }

    #[test]
    fn register_payload_requires_lines() {
        let payload: RegisterSalePayload =
            serde_json::from_str(r#"{"clientId": 1, "items": []}"#).unwrap();
        assert!(payload.validate().is_err());
        assert_eq!(payload.status, SaleStatus::Completado);
        assert_eq!(payload.payment_method, "efectivo");
    }

    #[test]
    fn zero_payment_is_invalid() {
        let payload: PaymentPayload = serde_json::from_str(r#"{"amount": 0}"#).unwrap();
        assert!(payload.validate().is_err());
    }
}
