//! # Sales Reports
//!
//! Pure aggregation over the sales collection, backing the Insights screen.
//!
//! ## Pipeline
//! ```text
//! sales ──► filter_by_range(range, now) ──► filter_by_category(id)
//!                                                 │
//!        ┌────────────────┬──────────────┬────────┴──────┬─────────────┐
//!        ▼                ▼              ▼               ▼             ▼
//!  sales_by_date   sales_by_category  units_by_product  top_products  trend_series
//! ```
//!
//! The category filter keeps a whole sale when *any* of its line items
//! matches, so non-matching lines inside a matching sale still count in the
//! downstream totals (see DESIGN.md, Open Questions).
//!
//! Every function takes its inputs explicitly, including `now`, so the whole
//! module is deterministic under test.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{day_key, ReportRange};
use crate::types::{Category, Sale};

// =============================================================================
// Report Rows
// =============================================================================

/// Revenue total for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateBucket {
    /// `YYYY-MM-DD` grouping key.
    pub date: String,
    pub total: f64,
}

/// Revenue attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    /// Category name, or `"Unknown"` when the id no longer resolves.
    pub category: String,
    pub revenue: f64,
}

/// Units sold for one product (chart series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUnits {
    pub name: String,
    pub units: i64,
}

/// Units and revenue for one product (leaderboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: String,
    pub name: String,
    pub units: i64,
    pub revenue: f64,
}

/// One point on the trend axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub total: f64,
}

/// Headline figures over the whole sales history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub order_count: usize,
    pub average_order_value: f64,
}

// =============================================================================
// Filters
// =============================================================================

/// Keeps sales dated inside the range's filter window.
pub fn filter_by_range(sales: &[Sale], range: ReportRange, now: DateTime<Utc>) -> Vec<Sale> {
    let start = range.filter_start(now);
    sales.iter().filter(|s| s.date >= start).cloned().collect()
}

/// Keeps sales containing at least one line item of the given category.
///
/// This is a sale-level filter: the rest of a matching sale's lines stay in
/// the downstream totals.
pub fn filter_by_category(sales: &[Sale], category_id: &str) -> Vec<Sale> {
    sales
        .iter()
        .filter(|s| s.items.iter().any(|i| i.category_id == category_id))
        .cloned()
        .collect()
}

// =============================================================================
// Aggregations
// =============================================================================

/// Groups sales by calendar date and sums their totals, ascending by date.
pub fn sales_by_date(sales: &[Sale]) -> Vec<DateBucket> {
    let mut buckets: Vec<DateBucket> = Vec::new();

    for sale in sales {
        let key = day_key(sale.date);
        match buckets.iter_mut().find(|b| b.date == key) {
            Some(bucket) => bucket.total += sale.total,
            None => buckets.push(DateBucket {
                date: key,
                total: sale.total,
            }),
        }
    }

    buckets.sort_by(|a, b| a.date.cmp(&b.date));
    buckets
}

/// Accumulates `price × quantity` per category name across all line items.
///
/// Items whose category id no longer resolves are bucketed as `"Unknown"`.
/// Rows come back in first-encounter order.
pub fn sales_by_category(sales: &[Sale], categories: &[Category]) -> Vec<CategoryRevenue> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut rows: Vec<CategoryRevenue> = Vec::new();

    for sale in sales {
        for item in &sale.items {
            let name = names
                .get(item.category_id.as_str())
                .copied()
                .unwrap_or("Unknown");
            match rows.iter_mut().find(|r| r.category == name) {
                Some(row) => row.revenue += item.line_total(),
                None => rows.push(CategoryRevenue {
                    category: name.to_string(),
                    revenue: item.line_total(),
                }),
            }
        }
    }

    rows
}

/// Units sold per product name, descending, truncated to `limit`.
///
/// Ties keep first-encounter order (the sort is stable).
pub fn units_by_product(sales: &[Sale], limit: usize) -> Vec<ProductUnits> {
    let mut rows: Vec<ProductUnits> = Vec::new();

    for sale in sales {
        for item in &sale.items {
            match rows.iter_mut().find(|r| r.name == item.name) {
                Some(row) => row.units += item.quantity,
                None => rows.push(ProductUnits {
                    name: item.name.clone(),
                    units: item.quantity,
                }),
            }
        }
    }

    rows.sort_by(|a, b| b.units.cmp(&a.units));
    rows.truncate(limit);
    rows
}

/// Units and revenue per product id, sorted by revenue descending with
/// stable ties, truncated to `limit`.
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<ProductPerformance> {
    let mut rows: Vec<ProductPerformance> = Vec::new();

    for sale in sales {
        for item in &sale.items {
            match rows.iter_mut().find(|r| r.product_id == item.product_id) {
                Some(row) => {
                    row.units += item.quantity;
                    row.revenue += item.line_total();
                }
                None => rows.push(ProductPerformance {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    units: item.quantity,
                    revenue: item.line_total(),
                }),
            }
        }
    }

    rows.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(std::cmp::Ordering::Equal));
    rows.truncate(limit);
    rows
}

/// Builds the trend series for a range: zero-filled buckets spanning the
/// whole axis, then actual sales folded in.
///
/// Seeding before folding is what keeps the axis continuous; a week with no
/// sales renders as zero instead of disappearing.
pub fn trend_series(sales: &[Sale], range: ReportRange, now: DateTime<Utc>) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = Vec::new();

    let mut cursor = range.trend_start(now);
    while cursor <= now {
        let label = range.trend_label(cursor);
        if !points.iter().any(|p| p.label == label) {
            points.push(TrendPoint { label, total: 0.0 });
        }
        cursor = range.trend_step(cursor);
    }

    for sale in sales {
        let label = range.trend_label(sale.date);
        if let Some(point) = points.iter_mut().find(|p| p.label == label) {
            point.total += sale.total;
        }
    }

    points
}

/// Headline stat-card figures, computed over the full (unfiltered) history.
pub fn summary(sales: &[Sale]) -> SalesSummary {
    let total_revenue: f64 = sales.iter().map(|s| s.total).sum();
    let order_count = sales.len();
    let average_order_value = if order_count > 0 {
        total_revenue / order_count as f64
    } else {
        0.0
    };

    SalesSummary {
        total_revenue,
        order_count,
        average_order_value,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartItem, Customer};
    use chrono::Utc;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn item(product_id: &str, name: &str, category_id: &str, price: f64, quantity: i64) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            name: name.to_string(),
            price,
            quantity,
            category_id: category_id.to_string(),
            sku: format!("SKU-{}", product_id),
        }
    }

    fn sale(id: &str, date: &str, items: Vec<CartItem>) -> Sale {
        let subtotal: f64 = items.iter().map(|i| i.line_total()).sum();
        let tax = crate::currency::calculate_tax(subtotal);
        Sale {
            id: id.to_string(),
            invoice_number: format!("INV-{}", id),
            date: ts(date),
            customer: Customer::default(),
            items,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_same_day_sales_share_a_bucket() {
        let sales = vec![
            Sale {
                total: 100.0,
                ..sale("s1", "2024-01-01T09:00:00Z", vec![])
            },
            Sale {
                total: 50.0,
                ..sale("s2", "2024-01-01T18:00:00Z", vec![])
            },
        ];

        let buckets = sales_by_date(&sales);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, "2024-01-01");
        assert_eq!(buckets[0].total, 150.0);
    }

    #[test]
    fn test_sales_by_date_sorted_ascending() {
        let sales = vec![
            sale("s1", "2024-01-03T09:00:00Z", vec![]),
            sale("s2", "2024-01-01T09:00:00Z", vec![]),
            sale("s3", "2024-01-02T09:00:00Z", vec![]),
        ];

        let dates: Vec<_> = sales_by_date(&sales).into_iter().map(|b| b.date).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_category_revenue_with_unknown_bucket() {
        let categories = vec![category("c1", "Grocery")];
        let sales = vec![sale(
            "s1",
            "2024-01-01T09:00:00Z",
            vec![
                item("p1", "Milk", "c1", 2.0, 3),
                item("p2", "Gadget", "deleted-cat", 10.0, 1),
            ],
        )];

        let rows = sales_by_category(&sales, &categories);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Grocery");
        assert_eq!(rows[0].revenue, 6.0);
        assert_eq!(rows[1].category, "Unknown");
        assert_eq!(rows[1].revenue, 10.0);
    }

    #[test]
    fn test_category_filter_keeps_whole_sale() {
        let sales = vec![
            sale(
                "s1",
                "2024-01-01T09:00:00Z",
                vec![
                    item("p1", "Milk", "c1", 2.0, 1),
                    item("p2", "Pen", "c2", 1.0, 1),
                ],
            ),
            sale("s2", "2024-01-01T10:00:00Z", vec![item("p2", "Pen", "c2", 1.0, 1)]),
        ];

        let filtered = filter_by_category(&sales, "c1");
        assert_eq!(filtered.len(), 1);
        // the non-matching Pen line is still present in the kept sale
        assert_eq!(filtered[0].items.len(), 2);
    }

    #[test]
    fn test_top_products_sorted_by_revenue_with_stable_ties() {
        let sales = vec![sale(
            "s1",
            "2024-01-01T09:00:00Z",
            vec![
                item("p1", "Milk", "c1", 1.0, 5),   // revenue 5
                item("p2", "Bread", "c1", 5.0, 2),  // revenue 10
                item("p3", "Eggs", "c1", 5.0, 1),   // revenue 5, ties with Milk
            ],
        )];

        let rows = top_products(&sales, 5);
        assert_eq!(rows[0].product_id, "p2");
        // tie between p1 and p3 keeps encounter order
        assert_eq!(rows[1].product_id, "p1");
        assert_eq!(rows[2].product_id, "p3");
    }

    #[test]
    fn test_top_products_truncates() {
        let items: Vec<CartItem> = (0..8)
            .map(|i| item(&format!("p{}", i), &format!("Item {}", i), "c1", (i + 1) as f64, 1))
            .collect();
        let sales = vec![sale("s1", "2024-01-01T09:00:00Z", items)];

        assert_eq!(top_products(&sales, 5).len(), 5);
        assert_eq!(units_by_product(&sales, 10).len(), 8);
    }

    #[test]
    fn test_filter_by_range_daily_keeps_today_only() {
        let now = ts("2024-03-15T18:00:00Z");
        let sales = vec![
            sale("s1", "2024-03-15T09:00:00Z", vec![]),
            sale("s2", "2024-03-14T23:59:00Z", vec![]),
        ];

        let kept = filter_by_range(&sales, ReportRange::Daily, now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "s1");
    }

    #[test]
    fn test_trend_series_preseeds_zero_buckets() {
        let now = ts("2024-03-15T12:00:00Z");
        let sales = vec![Sale {
            total: 40.0,
            ..sale("s1", "2024-03-15T09:00:00Z", vec![])
        }];

        let points = trend_series(&sales, ReportRange::Daily, now);
        assert_eq!(points.len(), 7);
        // six empty days render as zeros, not gaps
        assert_eq!(points.iter().filter(|p| p.total == 0.0).count(), 6);
        assert_eq!(points.last().unwrap().label, "3/15");
        assert_eq!(points.last().unwrap().total, 40.0);
    }

    #[test]
    fn test_trend_series_drops_sales_outside_axis() {
        let now = ts("2024-03-15T12:00:00Z");
        let sales = vec![Sale {
            total: 40.0,
            ..sale("s1", "2023-06-01T09:00:00Z", vec![])
        }];

        let points = trend_series(&sales, ReportRange::Monthly, now);
        assert!(points.iter().all(|p| p.total == 0.0));
    }

    #[test]
    fn test_summary() {
        let sales = vec![
            Sale {
                total: 100.0,
                ..sale("s1", "2024-01-01T09:00:00Z", vec![])
            },
            Sale {
                total: 50.0,
                ..sale("s2", "2024-01-02T09:00:00Z", vec![])
            },
        ];

        let s = summary(&sales);
        assert_eq!(s.total_revenue, 150.0);
        assert_eq!(s.order_count, 2);
        assert_eq!(s.average_order_value, 75.0);

        let empty = summary(&[]);
        assert_eq!(empty.average_order_value, 0.0);
    }
}
