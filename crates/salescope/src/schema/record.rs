//! Typed, read-only view of one sales row.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::columns;
use crate::clean::parse_canonical_date;
use crate::input::DataTable;
use crate::stats::parse_number;

/// Positions of the known columns in a particular table.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    country: Option<usize>,
    city: Option<usize>,
    order_date: Option<usize>,
    ship_date: Option<usize>,
    sales: Option<usize>,
    quantity: Option<usize>,
    discount: Option<usize>,
    profit: Option<usize>,
    shipping_cost: Option<usize>,
    segment: Option<usize>,
    ship_mode: Option<usize>,
    order_priority: Option<usize>,
    category: Option<usize>,
    sub_category: Option<usize>,
    customer_id: Option<usize>,
    order_id: Option<usize>,
    postal_code: Option<usize>,
    delivery_time: Option<usize>,
}

impl ColumnIndex {
    /// Resolve column positions against a table's headers.
    pub fn resolve(table: &DataTable) -> Self {
        Self {
            country: table.column_index(columns::COUNTRY),
            city: table.column_index(columns::CITY),
            order_date: table.column_index(columns::ORDER_DATE),
            ship_date: table.column_index(columns::SHIP_DATE),
            sales: table.column_index(columns::SALES),
            quantity: table.column_index(columns::QUANTITY),
            discount: table.column_index(columns::DISCOUNT),
            profit: table.column_index(columns::PROFIT),
            shipping_cost: table.column_index(columns::SHIPPING_COST),
            segment: table.column_index(columns::SEGMENT),
            ship_mode: table.column_index(columns::SHIP_MODE),
            order_priority: table.column_index(columns::ORDER_PRIORITY),
            category: table.column_index(columns::CATEGORY),
            sub_category: table.column_index(columns::SUB_CATEGORY),
            customer_id: table.column_index(columns::CUSTOMER_ID),
            order_id: table.column_index(columns::ORDER_ID),
            postal_code: table.column_index(columns::POSTAL_CODE),
            delivery_time: table.column_index(columns::DELIVERY_TIME),
        }
    }

    /// Build the typed view of one row.
    pub fn record<'a>(&self, row: &'a [String]) -> SalesRecord<'a> {
        let text = |idx: Option<usize>| -> Option<&'a str> {
            let value = row.get(idx?)?.as_str();
            (!DataTable::is_null_value(value)).then_some(value)
        };
        let number = |idx: Option<usize>| text(idx).and_then(parse_number);
        let date = |idx: Option<usize>| text(idx).and_then(parse_canonical_date);

        SalesRecord {
            country: text(self.country),
            city: text(self.city),
            order_date: date(self.order_date),
            ship_date: date(self.ship_date),
            sales: number(self.sales),
            quantity: number(self.quantity),
            discount: number(self.discount),
            profit: number(self.profit),
            shipping_cost: number(self.shipping_cost),
            segment: text(self.segment),
            ship_mode: text(self.ship_mode),
            order_priority: text(self.order_priority),
            category: text(self.category),
            sub_category: text(self.sub_category),
            customer_id: text(self.customer_id),
            order_id: text(self.order_id),
            postal_code: text(self.postal_code),
            delivery_time: text(self.delivery_time)
                .and_then(|v| v.trim().parse::<i64>().ok()),
        }
    }
}

/// One sales transaction. Every field is optional: the column may be absent
/// or the cell missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord<'a> {
    pub country: Option<&'a str>,
    pub city: Option<&'a str>,
    pub order_date: Option<NaiveDateTime>,
    pub ship_date: Option<NaiveDateTime>,
    pub sales: Option<f64>,
    pub quantity: Option<f64>,
    pub discount: Option<f64>,
    pub profit: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub segment: Option<&'a str>,
    pub ship_mode: Option<&'a str>,
    pub order_priority: Option<&'a str>,
    pub category: Option<&'a str>,
    pub sub_category: Option<&'a str>,
    pub customer_id: Option<&'a str>,
    pub order_id: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    /// Days between order and shipment.
    pub delivery_time: Option<i64>,
}

/// Iterate typed views over every row of a table.
pub fn records(table: &DataTable) -> impl Iterator<Item = SalesRecord<'_>> {
    let index = ColumnIndex::resolve(table);
    table.rows.iter().map(move |row| index.record(row))
}
