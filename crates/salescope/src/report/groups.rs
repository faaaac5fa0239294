//! Group-by aggregation over cleaned sales rows.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;
use crate::schema::{columns, records, SalesRecord};

/// Categorical columns that can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Country,
    City,
    Segment,
    ShipMode,
    OrderPriority,
    Category,
    SubCategory,
}

impl GroupKey {
    /// Source column name.
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::Country => columns::COUNTRY,
            GroupKey::City => columns::CITY,
            GroupKey::Segment => columns::SEGMENT,
            GroupKey::ShipMode => columns::SHIP_MODE,
            GroupKey::OrderPriority => columns::ORDER_PRIORITY,
            GroupKey::Category => columns::CATEGORY,
            GroupKey::SubCategory => columns::SUB_CATEGORY,
        }
    }

    fn value<'a>(&self, record: &SalesRecord<'a>) -> Option<&'a str> {
        match self {
            GroupKey::Country => record.country,
            GroupKey::City => record.city,
            GroupKey::Segment => record.segment,
            GroupKey::ShipMode => record.ship_mode,
            GroupKey::OrderPriority => record.order_priority,
            GroupKey::Category => record.category,
            GroupKey::SubCategory => record.sub_category,
        }
    }
}

/// Numeric columns that can be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Sales,
    Quantity,
    Discount,
    Profit,
    ShippingCost,
}

impl Measure {
    /// Source column name.
    pub fn column(&self) -> &'static str {
        match self {
            Measure::Sales => columns::SALES,
            Measure::Quantity => columns::QUANTITY,
            Measure::Discount => columns::DISCOUNT,
            Measure::Profit => columns::PROFIT,
            Measure::ShippingCost => columns::SHIPPING_COST,
        }
    }

    pub(crate) fn value(&self, record: &SalesRecord<'_>) -> Option<f64> {
        match self {
            Measure::Sales => record.sales,
            Measure::Quantity => record.quantity,
            Measure::Discount => record.discount,
            Measure::Profit => record.profit,
            Measure::ShippingCost => record.shipping_cost,
        }
    }
}

/// A reduction applied to each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "measure", rename_all = "snake_case")]
pub enum Aggregate {
    /// Sum of non-missing values; zero for a group with none.
    Sum(Measure),
    /// Mean of non-missing values; undefined for a group with none.
    Mean(Measure),
    /// Rows with a non-missing Order ID.
    CountOrders,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregate::Sum(m) => write!(f, "sum({})", m.column()),
            Aggregate::Mean(m) => write!(f, "mean({})", m.column()),
            Aggregate::CountOrders => write!(f, "count({})", columns::ORDER_ID),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, aggregate: &Aggregate, record: &SalesRecord<'_>) {
        match aggregate {
            Aggregate::Sum(m) | Aggregate::Mean(m) => {
                if let Some(v) = m.value(record) {
                    self.sum += v;
                    self.count += 1;
                }
            }
            Aggregate::CountOrders => {
                if record.order_id.is_some() {
                    self.count += 1;
                }
            }
        }
    }

    fn finish(&self, aggregate: &Aggregate) -> Option<f64> {
        match aggregate {
            Aggregate::Sum(_) => Some(self.sum),
            Aggregate::Mean(_) => (self.count > 0).then(|| self.sum / self.count as f64),
            Aggregate::CountOrders => Some(self.count as f64),
        }
    }
}

/// One group and its aggregate values, in the table's aggregate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub key: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Result of a group-by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTable {
    /// Grouping columns.
    pub keys: Vec<GroupKey>,
    /// Aggregates, one per value in each row.
    pub aggregates: Vec<Aggregate>,
    /// Groups in first-appearance order unless sorted afterwards.
    pub rows: Vec<GroupRow>,
}

impl GroupTable {
    /// Column headers: key column names followed by aggregate labels.
    pub fn headers(&self) -> Vec<String> {
        self.keys
            .iter()
            .map(|k| k.column().to_string())
            .chain(self.aggregates.iter().map(|a| a.to_string()))
            .collect()
    }

    /// Find a group by its key values.
    pub fn get(&self, key: &[&str]) -> Option<&GroupRow> {
        self.rows
            .iter()
            .find(|row| row.key.len() == key.len() && row.key.iter().zip(key).all(|(a, b)| a == b))
    }

    /// Value of `aggregate` for the group `key`.
    pub fn value(&self, key: &[&str], aggregate: Aggregate) -> Option<f64> {
        let position = self.aggregates.iter().position(|a| *a == aggregate)?;
        self.get(key)?.values.get(position).copied().flatten()
    }

    /// Stable sort, largest `aggregate` first. Undefined values sort last.
    pub fn sort_descending(mut self, aggregate: Aggregate) -> Self {
        if let Some(position) = self.aggregates.iter().position(|a| *a == aggregate) {
            self.rows.sort_by(|a, b| {
                let a = a.values[position].unwrap_or(f64::NEG_INFINITY);
                let b = b.values[position].unwrap_or(f64::NEG_INFINITY);
                b.total_cmp(&a)
            });
        }
        self
    }

    /// Keep at most `n` groups.
    pub fn truncate(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group cleaned rows by `keys` and reduce each group with `aggregates`.
///
/// Rows with a missing value in any key column are skipped.
pub fn group_by(table: &DataTable, keys: &[GroupKey], aggregates: &[Aggregate]) -> GroupTable {
    let mut groups: IndexMap<Vec<&str>, Vec<Accumulator>> = IndexMap::new();

    for record in records(table) {
        let Some(key) = keys
            .iter()
            .map(|k| k.value(&record))
            .collect::<Option<Vec<&str>>>()
        else {
            continue;
        };

        let accumulators = groups
            .entry(key)
            .or_insert_with(|| vec![Accumulator::default(); aggregates.len()]);
        for (acc, aggregate) in accumulators.iter_mut().zip(aggregates) {
            acc.add(aggregate, &record);
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, accumulators)| GroupRow {
            key: key.into_iter().map(|k| k.to_string()).collect(),
            values: accumulators
                .iter()
                .zip(aggregates)
                .map(|(acc, aggregate)| acc.finish(aggregate))
                .collect(),
        })
        .collect();

    GroupTable {
        keys: keys.to_vec(),
        aggregates: aggregates.to_vec(),
        rows,
    }
}
