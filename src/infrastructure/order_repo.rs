use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CheckoutDetails, NewOrderItem, Order, OrderItem, STATUS_CONFIRMED, STATUS_PENDING,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn assemble(row: OrderRow, items: Vec<OrderItemRow>) -> Order {
    Order {
        id: row.id,
        customer_name: row.customer_name,
        customer_email: row.customer_email,
        customer_address: row.customer_address,
        order_date: row.order_date,
        total_amount: row.total_amount,
        status: row.status,
        items: items
            .into_iter()
            .map(|i| OrderItem {
                id: i.id,
                order_id: i.order_id,
                book_id: i.book_id,
                quantity: i.quantity,
                price: i.price,
            })
            .collect(),
    }
}

fn load_with_items(
    conn: &mut PgConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<Order>, DomainError> {
    let items = OrderItemRow::belonging_to(&rows)
        .select(OrderItemRow::as_select())
        .load(conn)?
        .grouped_by(&rows);
    Ok(rows
        .into_iter()
        .zip(items)
        .map(|(order, items)| assemble(order, items))
        .collect())
}

impl OrderRepository for DieselOrderRepository {
    fn create_pending(&self, details: &CheckoutDetails) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        let order_id = Uuid::new_v4();
        diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: order_id,
                customer_name: details.customer_name.clone(),
                customer_email: details.customer_email.clone(),
                customer_address: details.customer_address.clone(),
                total_amount: BigDecimal::from(0),
                status: STATUS_PENDING.to_string(),
            })
            .execute(&mut conn)?;
        Ok(order_id)
    }

    fn finalize(
        &self,
        order_id: Uuid,
        total_amount: &BigDecimal,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order_row: OrderRow = diesel::update(orders::table.find(order_id))
                .set((
                    orders::total_amount.eq(total_amount.clone()),
                    orders::status.eq(STATUS_CONFIRMED),
                ))
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let new_rows: Vec<NewOrderItemRow> = items
                .into_iter()
                .map(|i| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    book_id: i.book_id,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect();
            let item_rows: Vec<OrderItemRow> = diesel::insert_into(order_items::table)
                .values(&new_rows)
                .returning(OrderItemRow::as_returning())
                .get_results(conn)?;

            Ok(assemble(order_row, item_rows))
        })
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table.select(OrderRow::as_select()).load(&mut conn)?;
        load_with_items(&mut conn, rows)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(row.id))
            .select(OrderItemRow::as_select())
            .load(&mut conn)?;

        Ok(Some(assemble(row, items)))
    }

    fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_email.eq(email))
            .order(orders::order_date.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;
        load_with_items(&mut conn, rows)
    }

    fn find_by_status(&self, status: &str) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::status.eq(status))
            .order(orders::order_date.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;
        load_with_items(&mut conn, rows)
    }
}
