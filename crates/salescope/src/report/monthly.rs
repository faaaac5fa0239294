//! Monthly sales trend keyed on Order Date.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::schema::records;

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Last day of the month.
    pub month_end: NaiveDate,
    pub sales: f64,
    pub profit: f64,
    pub quantity: f64,
    /// Rows that fell in this month.
    pub orders: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    sales: f64,
    profit: f64,
    quantity: f64,
    orders: usize,
}

/// Sum Sales, Profit and Quantity per month of Order Date.
///
/// Buckets run chronologically from the first to the last month with orders;
/// months in between with no orders are present with zero totals. Rows
/// without an Order Date are left out.
pub fn monthly_trend(table: &DataTable) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<(i32, u32), Totals> = BTreeMap::new();

    for record in records(table) {
        let Some(date) = record.order_date else {
            continue;
        };
        let totals = months.entry((date.year(), date.month())).or_default();
        totals.sales += record.sales.unwrap_or(0.0);
        totals.profit += record.profit.unwrap_or(0.0);
        totals.quantity += record.quantity.unwrap_or(0.0);
        totals.orders += 1;
    }

    let (Some(&first), Some(&last)) = (months.keys().next(), months.keys().next_back()) else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut current = first;
    loop {
        let totals = months.get(&current).copied().unwrap_or_default();
        if let Some(month_end) = month_end(current.0, current.1) {
            buckets.push(MonthlyBucket {
                month_end,
                sales: totals.sales,
                profit: totals.profit,
                quantity: totals.quantity,
                orders: totals.orders,
            });
        }
        if current == last {
            break;
        }
        current = next_month(current);
    }

    buckets
}

fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = next_month((year, month));
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(2024, 2), Some(date("2024-02-29")));
        assert_eq!(month_end(2023, 12), Some(date("2023-12-31")));
    }

    #[test]
    fn test_monthly_trend_fills_gaps() {
        let table = Parser::new()
            .parse_str(
                "Order Date,Sales,Profit,Quantity\n\
                 2023-03-15,10,1,2\n\
                 2023-01-02,5,0.5,1\n\
                 2023-03-01,20,-1,3\n\
                 ,100,100,100\n",
            )
            .unwrap();

        let trend = monthly_trend(&table);

        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].month_end, date("2023-01-31"));
        assert_eq!(trend[0].sales, 5.0);
        assert_eq!(trend[1].month_end, date("2023-02-28"));
        assert_eq!(trend[1].orders, 0);
        assert_eq!(trend[1].sales, 0.0);
        assert_eq!(trend[2].sales, 30.0);
        assert_eq!(trend[2].profit, 0.0);
        assert_eq!(trend[2].quantity, 5.0);
    }

    #[test]
    fn test_monthly_trend_empty() {
        let table = Parser::new().parse_str("Order Date,Sales\n,1\n").unwrap();
        assert!(monthly_trend(&table).is_empty());
    }
}
