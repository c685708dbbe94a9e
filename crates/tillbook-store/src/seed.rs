//! # Demo Data
//!
//! Seeds the store with a demo catalog and randomized sample sales so the
//! billing and insights screens have something to show on first run.
//!
//! Seeding is idempotent: the catalog is only written when both the
//! category and product collections are empty.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::error::StoreResult;
use crate::ident;
use crate::kv::Storage;
use crate::repository::{CategoryRepository, ProductRepository, SaleRepository};
use tillbook_core::{currency, CartItem, Category, Customer, Product, Sale};

/// Seeds the demo catalog when the store is empty.
///
/// Returns `true` when data was written, `false` when existing data was
/// left alone.
pub fn seed_catalog(storage: &std::sync::Arc<Storage>) -> StoreResult<bool> {
    let categories = CategoryRepository::new(storage.clone());
    let products = ProductRepository::new(storage.clone());

    if !categories.load().is_empty() || !products.load().is_empty() {
        info!("store already has data, skipping catalog seed");
        return Ok(false);
    }

    let now = Utc::now();
    let seeded_categories = demo_categories(now);
    let seeded_products = demo_products(&seeded_categories, now);

    categories.save(&seeded_categories)?;
    products.save(&seeded_products)?;

    info!(
        categories = seeded_categories.len(),
        products = seeded_products.len(),
        "seeded demo catalog"
    );
    Ok(true)
}

/// Generates `count` randomized sales over the trailing 30 days and
/// replaces the sales history with them.
pub fn seed_sales(
    storage: &std::sync::Arc<Storage>,
    count: usize,
    rng: &mut impl Rng,
) -> StoreResult<usize> {
    let products = ProductRepository::new(storage.clone()).load();
    if products.is_empty() {
        return Ok(0);
    }

    let now = Utc::now();
    let sales: Vec<Sale> = (0..count)
        .map(|i| random_sale(i, &products, now, rng))
        .collect();

    SaleRepository::new(storage.clone()).save(&sales)?;
    info!(count = sales.len(), "seeded sample sales");
    Ok(sales.len())
}

fn random_sale(index: usize, products: &[Product], now: DateTime<Utc>, rng: &mut impl Rng) -> Sale {
    let date = now - Duration::days(rng.gen_range(0..30));

    // 1-5 picks; picking the same product twice merges into one line
    let mut items: Vec<CartItem> = Vec::new();
    for _ in 0..rng.gen_range(1..=5) {
        let product = &products[rng.gen_range(0..products.len())];
        let quantity = rng.gen_range(1..=5);

        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => line.quantity += quantity,
            None => items.push(CartItem::from_product(product, quantity)),
        }
    }

    let subtotal: f64 = items.iter().map(|i| i.line_total()).sum();
    let tax = currency::calculate_tax(subtotal);

    Sale {
        id: ident::generate_id(),
        invoice_number: ident::generate_invoice_number(),
        date,
        customer: Customer {
            name: Some(format!("Customer {}", index + 1)),
            phone: Some(format!("555-{:04}", rng.gen_range(1000..10_000))),
            email: Some(format!("customer{}@example.com", index + 1)),
        },
        items,
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

fn demo_categories(now: DateTime<Utc>) -> Vec<Category> {
    [
        ("Grocery", "Food and household items"),
        ("Electronics", "Electronic devices and accessories"),
        ("Clothing", "Apparel and fashion items"),
        ("Stationery", "Office and school supplies"),
        ("Pharmacy", "Medicines and health products"),
    ]
    .into_iter()
    .map(|(name, description)| Category {
        id: ident::generate_id(),
        name: name.to_string(),
        description: Some(description.to_string()),
        created_at: now,
        updated_at: None,
    })
    .collect()
}

fn demo_products(categories: &[Category], now: DateTime<Utc>) -> Vec<Product> {
    // (category index, name, sku, price, quantity, description)
    let rows: &[(usize, &str, &str, f64, i64, &str)] = &[
        (0, "Milk", "GRO-1001", 3.99, 50, "1 gallon whole milk"),
        (0, "Bread", "GRO-1002", 2.49, 30, "Whole wheat bread"),
        (0, "Eggs", "GRO-1003", 3.29, 40, "Dozen large eggs"),
        (0, "Coffee", "GRO-1005", 8.99, 15, "Ground coffee"),
        (1, "Smartphone", "ELE-2001", 599.99, 10, "Latest model smartphone"),
        (1, "Headphones", "ELE-2002", 49.99, 15, "Wireless headphones"),
        (1, "Laptop", "ELE-2003", 899.99, 8, "15-inch laptop"),
        (2, "T-shirt", "CLO-3001", 15.99, 25, "Cotton t-shirt"),
        (2, "Jeans", "CLO-3002", 39.99, 20, "Denim jeans"),
        (2, "Jacket", "CLO-3004", 59.99, 10, "Winter jacket"),
        (3, "Notebook", "STA-4001", 4.99, 100, "Spiral notebook"),
        (3, "Pens (Pack of 10)", "STA-4002", 7.99, 50, "Ballpoint pens"),
        (3, "Stapler", "STA-4005", 8.99, 25, "Desktop stapler"),
        (4, "Pain Reliever", "PHA-5001", 6.99, 35, "Bottle of 50 tablets"),
        (4, "Hand Sanitizer", "PHA-5004", 3.99, 5, "8 oz bottle"),
        (4, "First Aid Kit", "PHA-5005", 15.99, 3, "Basic first aid supplies"),
    ];

    rows.iter()
        .map(|&(cat, name, sku, price, quantity, description)| Product {
            id: ident::generate_id(),
            name: name.to_string(),
            sku: sku.to_string(),
            category_id: categories[cat].id.clone(),
            price,
            quantity,
            description: Some(description.to_string()),
            created_at: now,
            updated_at: None,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
