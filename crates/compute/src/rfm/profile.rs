use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shoplens_core::{parse_timestamp, OrderRecord, ShoplensError};
use tracing::{debug, warn};

/// Raw recency/frequency/monetary metrics for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    /// Latest purchase timestamp seen for this customer.
    pub last_purchase: NaiveDateTime,
    /// Whole days between the dataset's latest purchase and `last_purchase`.
    pub recency_days: i64,
    /// Distinct order ids.
    pub frequency: usize,
    /// Sum of line-item prices; rows without a price add nothing.
    pub monetary: f64,
}

/// Per-customer accumulator while scanning the order table.
struct ProfileAccumulator<'a> {
    last_purchase: Option<NaiveDateTime>,
    orders: HashSet<&'a str>,
    monetary: f64,
}

impl<'a> ProfileAccumulator<'a> {
    fn new() -> Self {
        Self {
            last_purchase: None,
            orders: HashSet::new(),
            monetary: 0.0,
        }
    }
}

/// Build one profile per distinct customer, ordered by customer id.
///
/// Rows whose timestamp does not parse still count toward frequency and
/// monetary. Rows without a customer id belong to no profile but still set
/// the reference instant; empty order ids and missing prices are not
/// counted. Customers left without a parseable timestamp or without any
/// order id are dropped with a warning. Fails only when a non-empty table
/// has no parseable timestamp at all, since recency then has no reference
/// instant.
pub fn build_profiles(records: &[OrderRecord]) -> Result<Vec<CustomerProfile>, ShoplensError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<&str, ProfileAccumulator<'_>> = BTreeMap::new();
    let mut reference: Option<NaiveDateTime> = None;
    let mut unparsed_rows = 0usize;
    let mut anonymous_rows = 0usize;

    for record in records {
        let purchased_at = parse_timestamp(&record.order_purchase_timestamp).ok();
        if let Some(ts) = purchased_at {
            reference = Some(reference.map_or(ts, |cur| cur.max(ts)));
        }

        if record.customer_id.is_empty() {
            anonymous_rows += 1;
            continue;
        }

        let acc = groups
            .entry(record.customer_id.as_str())
            .or_insert_with(ProfileAccumulator::new);

        if !record.order_id.is_empty() {
            acc.orders.insert(record.order_id.as_str());
        }
        if let Some(price) = record.price {
            acc.monetary += price;
        }

        match purchased_at {
            Some(ts) => acc.last_purchase = Some(acc.last_purchase.map_or(ts, |cur| cur.max(ts))),
            None => unparsed_rows += 1,
        }
    }

    let reference = reference.ok_or_else(|| {
        ShoplensError::validation(
            "rfm profile builder",
            "no parseable order_purchase_timestamp in the order table",
        )
    })?;

    if unparsed_rows > 0 {
        debug!(rows = unparsed_rows, "rows with unparseable timestamps ignored for recency");
    }
    if anonymous_rows > 0 {
        debug!(rows = anonymous_rows, "rows without customer_id ignored for RFM");
    }

    let mut profiles = Vec::with_capacity(groups.len());
    for (customer_id, acc) in groups {
        let Some(last_purchase) = acc.last_purchase else {
            warn!(customer_id, "customer has no valid purchase timestamp; excluded from RFM");
            continue;
        };
        if acc.orders.is_empty() {
            warn!(customer_id, "customer has no order_id; excluded from RFM");
            continue;
        }

        profiles.push(CustomerProfile {
            customer_id: customer_id.to_owned(),
            last_purchase,
            recency_days: (reference - last_purchase).num_days(),
            frequency: acc.orders.len(),
            monetary: acc.monetary,
        });
    }

    debug!(customers = profiles.len(), %reference, "built RFM profiles");
    Ok(profiles)
}
