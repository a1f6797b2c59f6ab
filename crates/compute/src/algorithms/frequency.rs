//! Categorical frequency counts (`value_counts().head(k)` over one column).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shoplens_core::OrderRecord;

/// A distinct category value and how many records carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Which text column of an [`OrderRecord`] to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    CustomerCity,
    ProductCategory,
}

impl CategoryField {
    pub fn select(self, record: &OrderRecord) -> &str {
        match self {
            CategoryField::CustomerCity => &record.customer_city,
            CategoryField::ProductCategory => &record.product_category_name,
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            CategoryField::CustomerCity => shoplens_core::COL_CUSTOMER_CITY,
            CategoryField::ProductCategory => shoplens_core::COL_PRODUCT_CATEGORY,
        }
    }
}

/// Count occurrences of `field` and return the `k` most frequent values.
pub fn top_k_by_field(
    records: &[OrderRecord],
    field: CategoryField,
    k: usize,
) -> Vec<CategoryCount> {
    top_k_categories(records, |r| field.select(r), k)
}

/// Count occurrences of the selected value and return the `k` most frequent,
/// sorted by count descending.
///
/// Empty values are treated as missing and not counted. Ties keep the order
/// in which the values were first encountered.
pub fn top_k_categories<F>(records: &[OrderRecord], select: F, k: usize) -> Vec<CategoryCount>
where
    F: Fn(&OrderRecord) -> &str,
{
    if k == 0 {
        return Vec::new();
    }

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        let value = select(record);
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort: equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(k);

    ranked
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(city: &str, category: &str) -> OrderRecord {
        OrderRecord::new("c", city, category, "o", "2024-01-01 00:00:00", 1.0)
    }

    #[test]
    fn two_categories_ranked_descending() {
        let mut records = Vec::new();
        records.extend((0..2).map(|_| order("x", "toys")));
        records.extend((0..5).map(|_| order("x", "books")));

        let top = top_k_by_field(&records, CategoryField::ProductCategory, 10);
        assert_eq!(
            top,
            vec![
                CategoryCount { category: "books".into(), count: 5 },
                CategoryCount { category: "toys".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![
            order("rio", "a"),
            order("sao paulo", "a"),
            order("curitiba", "a"),
            order("sao paulo", "a"),
            order("rio", "a"),
            order("curitiba", "a"),
        ];
        let top = top_k_by_field(&records, CategoryField::CustomerCity, 3);
        let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["rio", "sao paulo", "curitiba"]);
    }

    #[test]
    fn truncates_to_k() {
        let records: Vec<_> = ["a", "b", "c", "d"].iter().map(|c| order(c, "x")).collect();
        assert_eq!(top_k_by_field(&records, CategoryField::CustomerCity, 2).len(), 2);
    }

    #[test]
    fn zero_k_and_empty_input_yield_nothing() {
        let records = vec![order("rio", "a")];
        assert!(top_k_by_field(&records, CategoryField::CustomerCity, 0).is_empty());
        assert!(top_k_by_field(&[], CategoryField::CustomerCity, 10).is_empty());
    }

    #[test]
    fn missing_values_are_skipped() {
        let records = vec![order("rio", ""), order("rio", ""), order("rio", "garden")];
        let top = top_k_by_field(&records, CategoryField::ProductCategory, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].count, 1);
    }

    #[test]
    fn custom_selector() {
        let records = vec![order("rio", "a"), order("rio", "b")];
        let top = top_k_categories(&records, |r| r.customer_id.as_str(), 5);
        assert_eq!(top, vec![CategoryCount { category: "c".into(), count: 2 }]);
    }
}
