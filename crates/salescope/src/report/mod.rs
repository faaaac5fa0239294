//! Descriptive aggregates over a cleaned dataset.
//!
//! Each table is an independent reduction over the same rows, so they can be
//! computed in any order.

mod groups;
mod monthly;

use serde::{Deserialize, Serialize};

pub use groups::{group_by, Aggregate, GroupKey, GroupRow, GroupTable, Measure};
pub use monthly::{monthly_trend, MonthlyBucket};

use crate::input::DataTable;

/// All aggregate tables for one cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Segment → sum(Sales), sum(Profit), count(Order ID).
    pub by_segment: GroupTable,
    /// Ship Mode → count(Order ID), mean(Shipping Cost), mean(Profit).
    pub by_ship_mode: GroupTable,
    /// Order Priority → count(Order ID), mean(Shipping Cost), mean(Profit).
    pub by_order_priority: GroupTable,
    /// Sub-Category → sum(Sales), sum(Profit), count(Order ID).
    pub by_sub_category: GroupTable,
    /// City → sum(Sales), sum(Profit), largest Sales first.
    pub city_sales: GroupTable,
    /// Category → sum(Profit).
    pub category_profit: GroupTable,
    /// Category → sum(Sales).
    pub category_sales: GroupTable,
    /// (Country, Category, Segment) → sum(Sales), sum(Profit).
    pub by_country_category_segment: GroupTable,
    /// Ship Mode → sum(Sales), sum(Profit).
    pub ship_mode_sales: GroupTable,
    /// Order Priority → sum(Sales), sum(Profit).
    pub order_priority_sales: GroupTable,
    /// Monthly Sales, Profit and Quantity by Order Date.
    pub monthly: Vec<MonthlyBucket>,
}

impl SalesReport {
    /// Compute every table from a cleaned dataset.
    pub fn build(table: &DataTable) -> Self {
        use Aggregate::{CountOrders, Mean, Sum};
        use Measure::{Profit, Sales, ShippingCost};

        let sales_profit = [Sum(Sales), Sum(Profit)];
        let order_costs = [CountOrders, Mean(ShippingCost), Mean(Profit)];

        Self {
            by_segment: group_by(table, &[GroupKey::Segment], &[Sum(Sales), Sum(Profit), CountOrders]),
            by_ship_mode: group_by(table, &[GroupKey::ShipMode], &order_costs),
            by_order_priority: group_by(table, &[GroupKey::OrderPriority], &order_costs),
            by_sub_category: group_by(
                table,
                &[GroupKey::SubCategory],
                &[Sum(Sales), Sum(Profit), CountOrders],
            ),
            city_sales: group_by(table, &[GroupKey::City], &sales_profit)
                .sort_descending(Sum(Sales)),
            category_profit: group_by(table, &[GroupKey::Category], &[Sum(Profit)]),
            category_sales: group_by(table, &[GroupKey::Category], &[Sum(Sales)]),
            by_country_category_segment: group_by(
                table,
                &[GroupKey::Country, GroupKey::Category, GroupKey::Segment],
                &sales_profit,
            ),
            ship_mode_sales: group_by(table, &[GroupKey::ShipMode], &sales_profit),
            order_priority_sales: group_by(table, &[GroupKey::OrderPriority], &sales_profit),
            monthly: monthly_trend(table),
        }
    }

    /// Named tables in display order.
    pub fn tables(&self) -> Vec<(&'static str, &GroupTable)> {
        vec![
            ("Sales and profit by segment", &self.by_segment),
            ("Shipping by ship mode", &self.by_ship_mode),
            ("Shipping by order priority", &self.by_order_priority),
            ("Sales and profit by sub-category", &self.by_sub_category),
            ("Sales and profit by city", &self.city_sales),
            ("Profit by category", &self.category_profit),
            ("Sales by category", &self.category_sales),
            ("Sales and profit by country, category and segment", &self.by_country_category_segment),
            ("Sales and profit by ship mode", &self.ship_mode_sales),
            ("Sales and profit by order priority", &self.order_priority_sales),
        ]
    }
}
