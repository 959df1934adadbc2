// src/services/sale_service.rs

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::{
    common::{
        db_utils::{begin_write, IdGenerator},
        error::AppError,
    },
    db::{CashRepository, ClientRepository, InventoryRepository, SaleRepository},
    models::{
        auth::User,
        cash::{CashMovement, MovementType},
        inventory::InventoryItem,
        notice::{Notice, WithNotices},
        sale::{
            AddCartItemPayload, PaymentPayload, PaymentStatus, RegisterSalePayload, Sale,
            SaleDraft, SaleLine, SaleStatus, UpdateSaleStatusPayload,
        },
    },
};

const SALE_NOT_FOUND: &str = "Venta no encontrada";
const CLIENT_NOT_FOUND: &str = "Cliente no encontrado";

#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    inventory_repo: InventoryRepository,
    client_repo: ClientRepository,
    cash_repo: CashRepository,
    ids: IdGenerator,
    low_stock_threshold: i64,
    pool: SqlitePool,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        inventory_repo: InventoryRepository,
        client_repo: ClientRepository,
        cash_repo: CashRepository,
        ids: IdGenerator,
        low_stock_threshold: i64,
        pool: SqlitePool,
    ) -> Self {
        Self {
            sale_repo,
            inventory_repo,
            client_repo,
            cash_repo,
            ids,
            low_stock_threshold,
            pool,
        }
    }

    // =========================================================================
    //  CARRINHO
    // =========================================================================

    /// Adiciona uma linha ao carrinho recebido e devolve o carrinho novo.
    /// Nada é gravado: o estoque só é baixado ao registrar a venda.
    pub async fn add_cart_item(
        &self,
        payload: AddCartItemPayload,
        user: &User,
    ) -> Result<WithNotices<SaleDraft>, AppError> {
        user.require("ventas:edit", "No tiene permiso para vender")?;
        payload.validate()?;

        let mut conn = self.pool.acquire().await?;
        let item = self
            .inventory_repo
            .find_by_name(&mut conn, &payload.name)
            .await?
            .ok_or_else(|| AppError::InvalidInput("Este item no existe en el inventario".into()))?;

        // O que já está no carrinho conta contra o mesmo estoque
        let in_cart: i64 = payload
            .cart
            .items
            .iter()
            .filter(|line| line.inventory_item_id == Some(item.id))
            .map(|line| line.quantity)
            .sum();
        let available = item.quantity - in_cart;
        if available < payload.quantity {
            return Err(AppError::InvalidInput(format!(
                "Solo hay {} unidades disponibles",
                available.max(0)
            )));
        }
        if item.price <= Decimal::ZERO {
            return Err(AppError::InvalidInput("El item tiene un precio inválido".into()));
        }

        let mut cart = payload.cart;
        cart.push_line(SaleLine::new(&item.name, payload.quantity, item.price, Some(item.id)));

        let remaining = available - payload.quantity;
        Ok(WithNotices {
            data: cart,
            notices: vec![Notice::info(format!("Quedan {remaining} unidades disponibles"))],
        })
    }

    // =========================================================================
    //  REGISTRO DA VENDA
    // =========================================================================

    /// Valida o estoque de todas as linhas e, se houver para todas, baixa o
    /// inventário e grava a venda numa única transação.
    pub async fn register_sale(
        &self,
        payload: RegisterSalePayload,
        user: &User,
    ) -> Result<WithNotices<Sale>, AppError> {
        user.require("ventas:edit", "No tiene permiso para vender")?;
        payload.validate()?;

        let mut tx = begin_write(&self.pool).await?;

        if self
            .client_repo
            .find_by_id(&mut *tx, payload.client_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(CLIENT_NOT_FOUND.into()));
        }

        // 1. Resolve cada linha no inventário. Linhas repetidas do mesmo item
        //    somam a quantidade pedida. Qualquer falta aborta tudo.
        let mut resolved: Vec<(Option<InventoryItem>, &SaleLine)> =
            Vec::with_capacity(payload.items.len());
        let mut requested: HashMap<i64, i64> = HashMap::new();
        for line in &payload.items {
            let item = self.resolve_line(&mut tx, line).await?;
            if let Some(item) = &item {
                *requested.entry(item.id).or_default() += line.quantity;
            }
            resolved.push((item, line));
        }

        let mut shortages = Vec::new();
        let mut reported = HashSet::new();
        for (item, line) in &resolved {
            let short = match item {
                Some(item) => requested[&item.id] > item.quantity && reported.insert(item.id),
                None => true,
            };
            if short {
                shortages.push(Notice::warning(format!("Stock insuficiente para {}", line.name)));
            }
        }
        if !shortages.is_empty() {
            // O drop do `tx` faz o rollback (nada foi escrito ainda)
            return Err(AppError::InsufficientStock(shortages));
        }

        // 2. Baixa o estoque e monta as linhas definitivas
        let mut lines = Vec::with_capacity(resolved.len());
        let mut low_stock: Vec<(i64, String, i64)> = Vec::new();
        for (item, line) in resolved {
            let Some(item) = item else { continue };
            let remaining = self
                .inventory_repo
                .decrement_quantity(&mut *tx, item.id, line.quantity)
                .await?;
            // Um aviso por item, com a quantidade final
            low_stock.retain(|(id, _, _)| *id != item.id);
            if remaining <= self.low_stock_threshold {
                low_stock.push((item.id, item.name.clone(), remaining));
            }
            lines.push(SaleLine::new(&line.name, line.quantity, line.price, Some(item.id)));
        }
        let mut notices: Vec<Notice> = low_stock
            .into_iter()
            .map(|(_, name, remaining)| {
                Notice::warning(format!("Stock bajo para {name}: {remaining} unidades"))
            })
            .collect();

        // 3. Estado inicial de pagamento
        let draft = SaleDraft { items: lines };
        let total = draft.total();
        let (payment_status, amount_paid) = if payload.on_credit {
            (PaymentStatus::Pendiente, Decimal::ZERO)
        } else {
            (PaymentStatus::Pagado, total)
        };

        let sale = Sale {
            id: self.ids.next_id(),
            client_id: payload.client_id,
            status: payload.status,
            payment_status,
            payment_method: payload.payment_method,
            items: draft.items,
            total,
            amount_paid,
            on_credit: payload.on_credit,
            notes: payload.notes.filter(|n| !n.trim().is_empty()),
            date: Utc::now(),
            created_by: user.username.clone(),
            processed: false,
        };
        self.sale_repo.insert(&mut tx, &sale).await?;

        tx.commit().await?;

        tracing::info!("🧾 Venda {} registrada por {} (total {})", sale.id, user.username, sale.total);
        notices.insert(0, Notice::success("Venta registrada correctamente"));
        Ok(WithNotices { data: sale, notices })
    }

    // Pelo ID do inventário primeiro, depois pelo nome
    async fn resolve_line(
        &self,
        conn: &mut SqliteConnection,
        line: &SaleLine,
    ) -> Result<Option<InventoryItem>, AppError> {
        if let Some(id) = line.inventory_item_id {
            if let Some(item) = self.inventory_repo.find_by_id(&mut *conn, id).await? {
                return Ok(Some(item));
            }
        }
        self.inventory_repo.find_by_name(&mut *conn, &line.name).await
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn list_sales(&self, user: &User, include_processed: bool) -> Result<Vec<Sale>, AppError> {
        user.require("ventas:view", "No tiene acceso a esta sección")?;
        let mut conn = self.pool.acquire().await?;
        let mut sales = if user.sees_only_own_records() {
            self.sale_repo.list_by_creator(&mut conn, &user.username).await?
        } else {
            self.sale_repo.list(&mut conn).await?
        };
        if !include_processed {
            sales.retain(|sale| !sale.is_archived());
        }
        Ok(sales)
    }

    pub async fn get_sale(&self, id: i64, user: &User) -> Result<Sale, AppError> {
        user.require("ventas:view", "No tiene acceso a esta sección")?;
        let mut conn = self.pool.acquire().await?;
        let sale = self
            .sale_repo
            .find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.into()))?;

        // Venda de outro caixa é tratada como inexistente
        if user.sees_only_own_records() && sale.created_by != user.username {
            return Err(AppError::NotFound(SALE_NOT_FOUND.into()));
        }
        Ok(sale)
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    /// Aplica um pagamento e registra o ingresso correspondente no caixa.
    pub async fn apply_payment(
        &self,
        sale_id: i64,
        payload: PaymentPayload,
        user: &User,
    ) -> Result<(Sale, CashMovement), AppError> {
        user.require("ventas:edit", "No tiene permiso para registrar pagos")?;
        payload.validate()?;

        let mut tx = begin_write(&self.pool).await?;

        let mut sale = self
            .sale_repo
            .find_by_id(&mut tx, sale_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.into()))?;

        if sale.amount_due() <= Decimal::ZERO {
            return Err(AppError::InvalidInput("La venta ya está pagada".into()));
        }

        let applied = sale.apply_payment(payload.amount);
        self.sale_repo.update_payment_state(&mut *tx, &sale).await?;

        let client_name = self
            .client_repo
            .find_by_id(&mut *tx, sale.client_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| CLIENT_NOT_FOUND.to_string());
        let kind = if sale.payment_status == PaymentStatus::Pagado { "completo" } else { "parcial" };

        let movement = CashMovement {
            id: self.ids.next_id(),
            movement_type: MovementType::Ingreso,
            amount: applied,
            description: format!("Pago {kind} de venta ID: {} - Cliente: {client_name}", sale.id),
            date: Utc::now(),
            created_by: user.username.clone(),
            sale_id: Some(sale.id),
            payment_method: Some(payload.payment_method),
        };
        self.cash_repo.insert_movement(&mut *tx, &movement).await?;

        tx.commit().await?;
        Ok((sale, movement))
    }

    /// Correção manual de status (admin). Venda quitada fica marcada como processada.
    pub async fn update_sale_status(
        &self,
        sale_id: i64,
        payload: UpdateSaleStatusPayload,
        user: &User,
    ) -> Result<Sale, AppError> {
        user.require("admin", "Solo el administrador puede cambiar el estado de las ventas")?;

        let mut tx = begin_write(&self.pool).await?;
        let mut sale = self
            .sale_repo
            .find_by_id(&mut tx, sale_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.into()))?;

        sale.payment_status = payload.payment_status;
        sale.status = payload.status;
        if sale.payment_status == PaymentStatus::Pagado && sale.status == SaleStatus::Completado {
            sale.processed = true;
        }

        self.sale_repo.update_payment_state(&mut *tx, &sale).await?;
        tx.commit().await?;
        Ok(sale)
    }

    // =========================================================================
    //  EXCLUSÃO
    // =========================================================================

    /// Remove a venda devolvendo ao estoque o que ela consumiu.
    pub async fn delete_sale(&self, sale_id: i64, user: &User) -> Result<Sale, AppError> {
        user.require("admin", "Solo el administrador puede eliminar ventas")?;

        let mut tx = begin_write(&self.pool).await?;
        let sale = self
            .sale_repo
            .find_by_id(&mut tx, sale_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.into()))?;

        for line in &sale.items {
            // Com ID do inventário, só o ID vale. Sem ID, tenta pelo nome.
            let target = match line.inventory_item_id {
                Some(id) => self.inventory_repo.find_by_id(&mut *tx, id).await?,
                None => self.inventory_repo.find_by_name(&mut *tx, &line.name).await?,
            };
            match target {
                Some(item) => {
                    self.inventory_repo
                        .increment_quantity(&mut *tx, item.id, line.quantity)
                        .await?
                }
                None => tracing::warn!(
                    "Item '{}' da venda {} não existe mais no inventário",
                    line.name,
                    sale.id
                ),
            }
        }

        self.sale_repo.delete(&mut tx, sale.id).await?;
        tx.commit().await?;

        tracing::info!("🗑️ Venda {} eliminada por {}", sale.id, user.username);
        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::db_utils::test_pool, models::auth::Role, models::client::Client};

    fn user(username: &str, role: Role) -> User {
        User {
            id: 1,
            username: username.into(),
            name: username.into(),
            role,
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    struct Fixture {
        service: SaleService,
        pool: SqlitePool,
        ids: IdGenerator,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let ids = IdGenerator::new();
        let service = SaleService::new(
            SaleRepository::new(),
            InventoryRepository::new(pool.clone()),
            ClientRepository::new(),
            CashRepository::new(),
            ids.clone(),
            5,
            pool.clone(),
        );
        Fixture { service, pool, ids }
    }

    async fn seed_item(f: &Fixture, name: &str, quantity: i64, price: i64) -> InventoryItem {
        let item = InventoryItem {
            id: f.ids.next_id(),
            item_type: "caja".into(),
            name: name.into(),
            quantity,
            price: Decimal::from(price),
            status: "disponible".into(),
            created_by: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
        };
        InventoryRepository::new(f.pool.clone())
            .insert_item(&f.pool, &item)
            .await
            .unwrap();
        item
    }

    async fn seed_client(f: &Fixture) -> Client {
        let client = Client {
            id: f.ids.next_id(),
            name: "María González".into(),
            document_id: "001".into(),
            phone: "809".into(),
            address: "Calle 1".into(),
            email: None,
            created_by: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
        };
        ClientRepository::new().insert(&f.pool, &client).await.unwrap();
        client
    }

    async fn quantity_of(f: &Fixture, id: i64) -> i64 {
        InventoryRepository::new(f.pool.clone())
            .find_by_id(&f.pool, id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    fn sale_payload(client_id: i64, lines: Vec<SaleLine>, on_credit: bool) -> RegisterSalePayload {
        RegisterSalePayload {
            client_id,
            status: SaleStatus::Espera,
            payment_method: "efectivo".into(),
            items: lines,
            notes: None,
            on_credit,
        }
    }

    #[tokio::test]
    async fn sale_payment_and_deletion_round_trip_the_stock() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let item = seed_item(&f, "Ataúd Roble", 10, 100).await;
        let client = seed_client(&f).await;

        let line = SaleLine::new(&item.name, 3, item.price, Some(item.id));
        let registered = f
            .service
            .register_sale(sale_payload(client.id, vec![line], true), &admin)
            .await
            .unwrap();
        let sale = registered.data;

        assert_eq!(quantity_of(&f, item.id).await, 7);
        assert_eq!(sale.total, Decimal::from(300));
        assert_eq!(sale.payment_status, PaymentStatus::Pendiente);
        assert_eq!(sale.amount_paid, Decimal::ZERO);

        let payment = PaymentPayload { amount: Decimal::from(300), payment_method: "efectivo".into() };
        let (paid, movement) = f.service.apply_payment(sale.id, payment, &admin).await.unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Pagado);
        assert_eq!(paid.status, SaleStatus::Completado);
        assert_eq!(movement.amount, Decimal::from(300));
        assert_eq!(
            movement.description,
            format!("Pago completo de venta ID: {} - Cliente: María González", sale.id)
        );

        f.service.delete_sale(sale.id, &admin).await.unwrap();
        assert_eq!(quantity_of(&f, item.id).await, 10);
    }

    #[tokio::test]
    async fn shortage_aborts_the_whole_sale() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let plenty = seed_item(&f, "Silla", 50, 10).await;
        let scarce = seed_item(&f, "Carpa", 1, 200).await;
        let client = seed_client(&f).await;

        let lines = vec![
            SaleLine::new(&plenty.name, 5, plenty.price, Some(plenty.id)),
            SaleLine::new(&scarce.name, 2, scarce.price, Some(scarce.id)),
            SaleLine::new("Inexistente", 1, Decimal::ONE, None),
        ];
        let err = f
            .service
            .register_sale(sale_payload(client.id, lines, false), &admin)
            .await
            .unwrap_err();

        match err {
            AppError::InsufficientStock(notices) => {
                assert_eq!(notices.len(), 2);
                assert_eq!(notices[0].message, "Stock insuficiente para Carpa");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
        // Nada mudou
        assert_eq!(quantity_of(&f, plenty.id).await, 50);
        assert_eq!(quantity_of(&f, scarce.id).await, 1);
        assert!(f.service.list_sales(&admin, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_lines_are_checked_against_the_combined_quantity() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let item = seed_item(&f, "Silla", 5, 10).await;
        let client = seed_client(&f).await;

        let line = |quantity| SaleLine::new(&item.name, quantity, item.price, Some(item.id));
        let err = f
            .service
            .register_sale(sale_payload(client.id, vec![line(3), line(3)], false), &admin)
            .await
            .unwrap_err();
        match err {
            AppError::InsufficientStock(notices) => {
                assert_eq!(notices.len(), 1);
                assert_eq!(notices[0].message, "Stock insuficiente para Silla");
            }
            other => panic!("erro inesperado: {other:?}"),
        }
        assert_eq!(quantity_of(&f, item.id).await, 5);

        // 2 + 3 cabe exatamente no estoque
        let result = f
            .service
            .register_sale(sale_payload(client.id, vec![line(2), line(3)], false), &admin)
            .await
            .unwrap();
        assert_eq!(quantity_of(&f, item.id).await, 0);
        assert_eq!(result.data.total, Decimal::from(50));
        let low: Vec<_> = result
            .notices
            .iter()
            .filter(|n| n.message.starts_with("Stock bajo"))
            .collect();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].message, "Stock bajo para Silla: 0 unidades");

        // A exclusão devolve exatamente o que havia antes da venda
        f.service.delete_sale(result.data.id, &admin).await.unwrap();
        assert_eq!(quantity_of(&f, item.id).await, 5);
    }

    #[tokio::test]
    async fn cart_counts_lines_already_added() {
        let f = fixture().await;
        let cashier = user("cajero1", Role::Cajero);
        let item = seed_item(&f, "Carpa", 4, 200).await;

        let mut cart = SaleDraft::default();
        cart.push_line(SaleLine::new(&item.name, 3, item.price, Some(item.id)));
        let payload = |quantity: i64, cart: SaleDraft| AddCartItemPayload {
            cart,
            name: "carpa".into(),
            quantity,
        };

        let err = f
            .service
            .add_cart_item(payload(2, cart.clone()), &cashier)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "Solo hay 1 unidades disponibles"));

        let ok = f.service.add_cart_item(payload(1, cart), &cashier).await.unwrap();
        assert_eq!(ok.data.items.len(), 2);
        assert_eq!(ok.notices[0].message, "Quedan 0 unidades disponibles");
    }

    #[tokio::test]
    async fn cash_sale_is_paid_up_front_and_warns_on_low_stock() {
        let f = fixture().await;
        let cashier = user("cajero1", Role::Cajero);
        let item = seed_item(&f, "Mesa", 6, 40).await;
        let client = seed_client(&f).await;

        // Linha sem ID: resolvida pelo nome, sem diferenciar maiúsculas
        let line = SaleLine::new("mesa", 2, item.price, None);
        let result = f
            .service
            .register_sale(sale_payload(client.id, vec![line], false), &cashier)
            .await
            .unwrap();

        assert_eq!(result.data.payment_status, PaymentStatus::Pagado);
        assert_eq!(result.data.amount_paid, result.data.total);
        assert_eq!(result.data.items[0].inventory_item_id, Some(item.id));
        assert!(result.notices.iter().any(|n| n.message == "Stock bajo para Mesa: 4 unidades"));
    }

    #[tokio::test]
    async fn partial_payments_never_exceed_the_total() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let item = seed_item(&f, "Ataúd", 3, 500).await;
        let client = seed_client(&f).await;

        let line = SaleLine::new(&item.name, 1, item.price, Some(item.id));
        let sale = f
            .service
            .register_sale(sale_payload(client.id, vec![line], true), &admin)
            .await
            .unwrap()
            .data;

        let pay = |amount: i64| PaymentPayload {
            amount: Decimal::from(amount),
            payment_method: "tarjeta".into(),
        };
        let (after_first, first) = f.service.apply_payment(sale.id, pay(200), &admin).await.unwrap();
        assert_eq!(after_first.payment_status, PaymentStatus::Parcial);
        assert!(first.description.starts_with("Pago parcial"));

        let (after_second, second) = f.service.apply_payment(sale.id, pay(900), &admin).await.unwrap();
        assert_eq!(after_second.amount_paid, Decimal::from(500));
        assert_eq!(second.amount, Decimal::from(300));

        let again = f.service.apply_payment(sale.id, pay(10), &admin).await;
        assert!(matches!(again, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn cashier_cannot_delete_and_only_sees_own_sales() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let cashier = user("cajero1", Role::Cajero);
        let item = seed_item(&f, "Silla", 100, 5).await;
        let client = seed_client(&f).await;

        let line = SaleLine::new(&item.name, 1, item.price, Some(item.id));
        let admin_sale = f
            .service
            .register_sale(sale_payload(client.id, vec![line.clone()], false), &admin)
            .await
            .unwrap()
            .data;
        f.service
            .register_sale(sale_payload(client.id, vec![line], false), &cashier)
            .await
            .unwrap();

        let visible = f.service.list_sales(&cashier, false).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].created_by, "cajero1");
        assert_eq!(f.service.list_sales(&admin, false).await.unwrap().len(), 2);

        let denied = f.service.delete_sale(admin_sale.id, &cashier).await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn manual_status_override_marks_settled_sales_processed() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let item = seed_item(&f, "Carpa", 5, 80).await;
        let client = seed_client(&f).await;

        let line = SaleLine::new(&item.name, 1, item.price, Some(item.id));
        let sale = f
            .service
            .register_sale(sale_payload(client.id, vec![line], true), &admin)
            .await
            .unwrap()
            .data;

        let updated = f
            .service
            .update_sale_status(
                sale.id,
                UpdateSaleStatusPayload {
                    payment_status: PaymentStatus::Pagado,
                    status: SaleStatus::Completado,
                },
                &admin,
            )
            .await
            .unwrap();
        assert!(updated.processed);
    }

    #[tokio::test]
    async fn cart_rejects_unknown_items_and_short_stock() {
        let f = fixture().await;
        let cashier = user("cajero2", Role::Cajero);
        seed_item(&f, "Ataúd Pino", 2, 700).await;

        let add = |name: &str, quantity: i64, cart: SaleDraft| AddCartItemPayload {
            cart,
            name: name.into(),
            quantity,
        };

        let result = f
            .service
            .add_cart_item(add("ataúd pino", 1, SaleDraft::default()), &cashier)
            .await
            .unwrap();
        assert_eq!(result.data.total(), Decimal::from(700));
        assert_eq!(result.notices[0].message, "Quedan 1 unidades disponibles");

        let short = f
            .service
            .add_cart_item(add("Ataúd Pino", 3, result.data.clone()), &cashier)
            .await;
        assert!(matches!(short, Err(AppError::InvalidInput(m)) if m == "Solo hay 2 unidades disponibles"));

        let unknown = f
            .service
            .add_cart_item(add("Corona", 1, result.data), &cashier)
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn processed_sales_leave_the_list_unless_requested() {
        let f = fixture().await;
        let admin = user("admin", Role::Admin);
        let item = seed_item(&f, "Mesa", 10, 30).await;
        let client = seed_client(&f).await;

        let line = SaleLine::new(&item.name, 1, item.price, Some(item.id));
        let sale = f
            .service
            .register_sale(sale_payload(client.id, vec![line], false), &admin)
            .await
            .unwrap()
            .data;

        let settled = UpdateSaleStatusPayload {
            payment_status: PaymentStatus::Pagado,
            status: SaleStatus::Completado,
        };
        let updated = f.service.update_sale_status(sale.id, settled, &admin).await.unwrap();
        assert!(updated.processed);

        assert!(f.service.list_sales(&admin, false).await.unwrap().is_empty());
        let all = f.service.list_sales(&admin, true).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, sale.id);
    }
}
