//! Column names of the sales dataset.
//!
//! Names are matched exactly, including case and spacing.

pub const COUNTRY: &str = "Country";
pub const CITY: &str = "City";
pub const ORDER_DATE: &str = "Order Date";
pub const SHIP_DATE: &str = "Ship Date";
pub const SALES: &str = "Sales";
pub const QUANTITY: &str = "Quantity";
pub const DISCOUNT: &str = "Discount";
pub const PROFIT: &str = "Profit";
pub const SHIPPING_COST: &str = "Shipping Cost";
pub const SEGMENT: &str = "Segment";
pub const SHIP_MODE: &str = "Ship Mode";
pub const ORDER_PRIORITY: &str = "Order Priority";
pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub-Category";
pub const CUSTOMER_ID: &str = "Customer ID";
pub const ORDER_ID: &str = "Order ID";

/// Derived by the postal enrichment step.
pub const POSTAL_CODE: &str = "Postal Code";
/// Derived by the delivery time step.
pub const DELIVERY_TIME: &str = "Delivery Time";

/// Columns the pipeline refuses to run without.
pub const REQUIRED: &[&str] = &[COUNTRY];

/// Columns winsorized by the outlier step, in processing order.
pub const NUMERIC: &[&str] = &[SALES, QUANTITY, DISCOUNT, PROFIT, SHIPPING_COST];
