use serde::{Deserialize, Serialize};

/// Column names every order table must carry.
pub const COL_CUSTOMER_ID: &str = "customer_id";
pub const COL_CUSTOMER_CITY: &str = "customer_city";
pub const COL_PRODUCT_CATEGORY: &str = "product_category_name";
pub const COL_ORDER_ID: &str = "order_id";
pub const COL_PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const COL_PRICE: &str = "price";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_CUSTOMER_ID,
    COL_CUSTOMER_CITY,
    COL_PRODUCT_CATEGORY,
    COL_ORDER_ID,
    COL_PURCHASE_TIMESTAMP,
    COL_PRICE,
];

/// One line item of a flattened e-commerce order table.
///
/// Several records may share an `order_id` (one row per line item) and a
/// `customer_id`. Text fields are empty when the source value was missing;
/// `price` is `None` for rows without a line item (an order with no items
/// after the merge).
/// The purchase timestamp is kept as source text; aggregators parse it with
/// [`crate::parse_timestamp`] so each one reports its own failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub customer_id: String,
    pub customer_city: String,
    pub product_category_name: String,
    pub order_id: String,
    pub order_purchase_timestamp: String,
    pub price: Option<f64>,
}

impl OrderRecord {
    pub fn new(
        customer_id: &str,
        customer_city: &str,
        product_category_name: &str,
        order_id: &str,
        order_purchase_timestamp: &str,
        price: impl Into<Option<f64>>,
    ) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            customer_city: customer_city.to_string(),
            product_category_name: product_category_name.to_string(),
            order_id: order_id.to_string(),
            order_purchase_timestamp: order_purchase_timestamp.to_string(),
            price: price.into(),
        }
    }
}
