//! Typed records for every persisted collection.
//!
//! Each row shape the data store can return is an explicit struct here,
//! deserialized at the store boundary. A row that does not decode into its
//! record type surfaces as a typed error naming the collection, never as a
//! loosely-typed value drifting through the workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::store::Record;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub uuid::Uuid);

impl ProductId {
    /// Generate a new random `ProductId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub uuid::Uuid);

impl ReservationId {
    /// Generate a new random `ReservationId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a contact-form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub uuid::Uuid);

impl ContactId {
    /// Generate a new random `ContactId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Money
// ═══════════════════════════════════════════════════════════════════════

/// An amount of money in euro cents.
///
/// Stored and wire-encoded as an integer number of cents, so arithmetic
/// is exact. `Display` renders euros for user-facing surfaces.
///
/// # Examples
///
/// ```
/// use fournil_reservation::records::Money;
///
/// let unit = Money::cents(1250);
/// assert_eq!(unit * 2, Money::cents(2500));
/// assert_eq!(unit.to_string(), "12.50 €");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    /// Zero euros.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a number of cents.
    #[must_use]
    pub const fn cents(value: i64) -> Self {
        Self(value)
    }

    /// The amount as cents.
    #[must_use]
    pub const fn as_cents(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}{}.{:02} €", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * i64::from(rhs))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Reservation Status
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle status of a reservation.
///
/// Reservations are created `pending` by the customer workflow and moved
/// to `confirmed` by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting confirmation by the shop.
    Pending,
    /// Confirmed by the shop.
    Confirmed,
}

// ═══════════════════════════════════════════════════════════════════════
// Rows
// ═══════════════════════════════════════════════════════════════════════

/// A product from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Short description shown on the product card.
    pub description: String,

    /// Unit price.
    pub price: Money,

    /// Image URL.
    pub image: String,

    /// Category label used for filtering (e.g. "viennoiserie").
    pub category: String,

    /// Smallest quantity the shop accepts for this product.
    pub minimum_quantity: u32,

    /// Creation timestamp, set by the database.
    pub created_at: Option<DateTime<Utc>>,
}

/// A product to insert; the database assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Short description shown on the product card.
    pub description: String,

    /// Unit price.
    pub price: Money,

    /// Image URL.
    pub image: String,

    /// Category label used for filtering.
    pub category: String,

    /// Smallest quantity the shop accepts for this product.
    pub minimum_quantity: u32,
}

/// A persisted reservation (base table row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: ReservationId,

    /// Customer's full name.
    pub customer_name: String,

    /// Customer's email address, also the duplicate-booking key.
    pub customer_email: String,

    /// Customer's phone number.
    pub customer_phone: String,

    /// Delivery or pickup address, when the customer gave one.
    pub address: Option<String>,

    /// Current lifecycle status.
    pub status: ReservationStatus,

    /// Creation timestamp, set by the database.
    pub created_at: Option<DateTime<Utc>>,
}

/// A reservation to insert; the database assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    /// Customer's full name.
    pub customer_name: String,

    /// Customer's email address.
    pub customer_email: String,

    /// Customer's phone number.
    pub customer_phone: String,

    /// Delivery or pickup address, when the customer gave one.
    pub address: Option<String>,

    /// Initial lifecycle status (always pending from the workflow).
    pub status: ReservationStatus,
}

/// One reserved line item, tied to its reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationItem {
    /// The reservation this line belongs to.
    pub reservation_id: ReservationId,

    /// The reserved product.
    pub product_id: ProductId,

    /// How many units were reserved.
    pub quantity: u32,

    /// Unit price at reservation time.
    pub unit_price: Money,
}

/// A joined reservation row from the read-only details view.
///
/// The view aggregates the reservation with its items into a display
/// summary and total. It is only ever read; confirmation and deletion go
/// through the base `reservations` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// Reservation identifier (same as the base table id).
    pub id: ReservationId,

    /// Customer's full name.
    pub customer_name: String,

    /// Customer's email address.
    pub customer_email: String,

    /// Customer's phone number.
    pub customer_phone: String,

    /// Delivery or pickup address, when given.
    pub address: Option<String>,

    /// Current lifecycle status.
    pub status: ReservationStatus,

    /// When the reservation was placed.
    pub reservation_date: DateTime<Utc>,

    /// Human-readable item summary (e.g. "2× Croissant, 1× Baguette").
    pub products_summary: String,

    /// Total amount across all items.
    pub total_amount: Money,
}

/// A persisted contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique contact identifier.
    pub id: ContactId,

    /// Sender's name.
    pub name: String,

    /// Sender's email address.
    pub email: String,

    /// Sender's phone number.
    pub phone: String,

    /// Free-form message, if any.
    pub message: Option<String>,

    /// Creation timestamp, set by the database.
    pub created_at: Option<DateTime<Utc>>,
}

/// A contact-form submission to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    /// Sender's name.
    pub name: String,

    /// Sender's email address.
    pub email: String,

    /// Sender's phone number.
    pub phone: String,

    /// Free-form message, if any.
    pub message: Option<String>,
}

/// Membership row in the administrators list.
///
/// Authentication alone does not grant admin access; the signed-in email
/// must also appear in this collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminEntry {
    /// Row identifier.
    pub id: uuid::Uuid,

    /// Administrator's email address.
    pub email: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Collection bindings
// ═══════════════════════════════════════════════════════════════════════

impl Record for Product {
    const COLLECTION: &'static str = "products";
}

impl Record for NewProduct {
    const COLLECTION: &'static str = "products";
}

impl Record for Reservation {
    const COLLECTION: &'static str = "reservations";
}

impl Record for NewReservation {
    const COLLECTION: &'static str = "reservations";
}

impl Record for ReservationItem {
    const COLLECTION: &'static str = "reservation_items";
}

impl Record for ReservationDetails {
    const COLLECTION: &'static str = "reservation_details_view";
}

impl Record for Contact {
    const COLLECTION: &'static str = "contacts";
}

impl Record for NewContact {
    const COLLECTION: &'static str = "contacts";
}

impl Record for AdminEntry {
    const COLLECTION: &'static str = "admins";
}
