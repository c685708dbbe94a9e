//! # Catalog Filtering
//!
//! Product list filtering shared by the inventory and billing screens, plus
//! the low-stock rule.

use crate::types::Product;
use crate::LOW_STOCK_THRESHOLD;

/// Filters a product list by optional category id and a case-insensitive
/// substring match on name or SKU.
///
/// An empty search term matches everything; both screens pass their current
/// filter state through this one function so they can never drift apart.
pub fn filter_products<'a>(
    products: &'a [Product],
    category_id: Option<&str>,
    search: &str,
) -> Vec<&'a Product> {
    let needle = search.trim().to_lowercase();

    products
        .iter()
        .filter(|p| category_id.map_or(true, |c| p.category_id == c))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.sku.to_lowercase().contains(&needle)
        })
        .collect()
}

/// True when a product's stock is below the low-stock threshold.
#[inline]
pub fn is_low_stock(product: &Product) -> bool {
    product.quantity < LOW_STOCK_THRESHOLD
}

/// All products below the low-stock threshold, in catalog order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| is_low_stock(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, name: &str, sku: &str, category_id: &str, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            category_id: category_id.to_string(),
            price: 1.0,
            quantity,
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn filters_by_category_and_search() {
        let products = vec![
            product("p1", "Milk", "GRO-1001", "c1", 50),
            product("p2", "Headphones", "ELE-2002", "c2", 15),
            product("p3", "Bread", "GRO-1002", "c1", 30),
        ];

        let grocery = filter_products(&products, Some("c1"), "");
        assert_eq!(grocery.len(), 2);

        let by_name = filter_products(&products, None, "milk");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "p1");

        let by_sku = filter_products(&products, None, "gro-");
        assert_eq!(by_sku.len(), 2);

        let both = filter_products(&products, Some("c2"), "gro-");
        assert!(both.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let products = vec![product("p1", "Milk", "GRO-1001", "c1", 50)];
        assert_eq!(filter_products(&products, None, "  MILK ").len(), 1);
    }

    #[test]
    fn low_stock_uses_strict_threshold() {
        let products = vec![
            product("p1", "A", "S1", "c1", 9),
            product("p2", "B", "S2", "c1", 10),
            product("p3", "C", "S3", "c1", 0),
        ];

        let low = low_stock(&products);
        assert_eq!(low.len(), 2);
        assert!(low.iter().all(|p| p.quantity < 10));
    }
}
