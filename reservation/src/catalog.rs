//! Product catalog reads.
//!
//! The catalog is read-only on the public side; products are managed
//! through [`crate::admin`].

use crate::error::Result;
use crate::providers::{DataStore, Filter, OrderBy};
use crate::records::Product;

/// Load the full catalog, newest products first.
///
/// # Errors
///
/// Returns error if the data store cannot be reached or a row does not
/// decode.
pub async fn list_products<S: DataStore>(store: &S) -> Result<Vec<Product>> {
    store
        .select(Filter::new(), Some(OrderBy::desc("created_at")))
        .await
}

/// Narrow a loaded catalog down to one category.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}
