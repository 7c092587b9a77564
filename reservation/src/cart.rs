//! In-memory shopping cart.
//!
//! Pure and synchronous; one cart per browsing session. Lines keep
//! insertion order so the UI renders them the way the customer built
//! them. The cart never talks to the data store, it only snapshots
//! product name and price at the moment of adding.

use serde::{Deserialize, Serialize};

use crate::records::{Money, Product, ProductId};

/// One cart line: a product reference with the quantity selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub unit_price: Money,
    /// Selected quantity, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line, `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// The customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
            });
        }
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// Removes the line entirely when the quantity would drop to zero or
    /// below. Unknown product ids are ignored.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i32) {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        else {
            return;
        };

        let updated = i64::from(self.items[index].quantity) + i64::from(delta);
        if updated <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line regardless of its quantity.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Quantity currently selected for `product_id`, if the line exists.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
    }
}
