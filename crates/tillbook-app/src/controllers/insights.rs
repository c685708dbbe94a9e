//! # Insights Controller
//!
//! Assembles the report screen: loads the three collections and runs the
//! pure aggregations from `tillbook_core::reports` under the screen's
//! range and category filters.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::export::{self, Column};
use tillbook_core::dates::ReportRange;
use tillbook_core::reports::{
    self, CategoryRevenue, DateBucket, ProductPerformance, ProductUnits, SalesSummary, TrendPoint,
};
use tillbook_core::Product;
use tillbook_store::{CategoryRepository, ProductRepository, SaleRepository, Storage};

/// Leaderboard length in the top-products table.
const TOP_PRODUCTS_LIMIT: usize = 5;

/// Series length in the units-by-product chart.
const PRODUCT_CHART_LIMIT: usize = 10;

/// The report screen's filter state.
#[derive(Debug, Clone, Default)]
pub struct InsightsQuery {
    pub range: ReportRange,
    /// Sale-level category filter: a sale counts when any of its line items
    /// matches.
    pub category_id: Option<String>,
}

/// Everything the Insights screen renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    /// Stat cards; computed over the full history, unaffected by filters.
    pub summary: SalesSummary,
    pub sales_by_date: Vec<DateBucket>,
    pub sales_by_category: Vec<CategoryRevenue>,
    pub units_by_product: Vec<ProductUnits>,
    pub top_products: Vec<ProductPerformance>,
    pub trend: Vec<TrendPoint>,
    /// Range-independent, like the stat cards.
    pub low_stock: Vec<Product>,
}

/// Controller behind the Insights screen.
pub struct InsightsController {
    sales: SaleRepository,
    products: ProductRepository,
    categories: CategoryRepository,
}

impl InsightsController {
    /// Creates the controller over a shared store.
    pub fn new(storage: Arc<Storage>) -> Self {
        InsightsController {
            sales: SaleRepository::new(storage.clone()),
            products: ProductRepository::new(storage.clone()),
            categories: CategoryRepository::new(storage),
        }
    }

    /// Builds the full report as of now.
    pub fn report(&self, query: &InsightsQuery) -> InsightsReport {
        self.report_at(query, Utc::now())
    }

    /// Builds the full report as of an explicit instant.
    pub fn report_at(&self, query: &InsightsQuery, now: DateTime<Utc>) -> InsightsReport {
        debug!(range = ?query.range, category = ?query.category_id, "building insights report");

        let all_sales = self.sales.load();
        let categories = self.categories.load();

        let in_range = reports::filter_by_range(&all_sales, query.range, now);
        let filtered = match query.category_id.as_deref() {
            Some(category_id) => reports::filter_by_category(&in_range, category_id),
            None => in_range,
        };

        InsightsReport {
            summary: reports::summary(&all_sales),
            sales_by_date: reports::sales_by_date(&filtered),
            sales_by_category: reports::sales_by_category(&filtered, &categories),
            units_by_product: reports::units_by_product(&filtered, PRODUCT_CHART_LIMIT),
            top_products: reports::top_products(&filtered, TOP_PRODUCTS_LIMIT),
            trend: reports::trend_series(&filtered, query.range, now),
            low_stock: self.products.low_stock(),
        }
    }

    /// Exports the top-products leaderboard as CSV.
    pub fn export_top_products(&self, query: &InsightsQuery, path: &Path) -> AppResult<()> {
        self.export_top_products_at(query, Utc::now(), path)
    }

    /// Same as [`export_top_products`](Self::export_top_products) with an
    /// explicit instant.
    pub fn export_top_products_at(
        &self,
        query: &InsightsQuery,
        now: DateTime<Utc>,
        path: &Path,
    ) -> AppResult<()> {
        let report = self.report_at(query, now);
        let columns = vec![
            Column::text("name", "Product"),
            Column::text("units", "Units Sold"),
            Column::currency("revenue", "Revenue"),
        ];
        export::write_csv(&report.top_products, &columns, path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
