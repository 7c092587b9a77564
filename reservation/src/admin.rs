//! Admin console operations.
//!
//! Thin CRUD over the data store: reservation review (list, confirm,
//! delete) and product management. [`sign_in`] is the gate: it
//! authenticates and then checks membership in the `admins` collection,
//! signing back out when the account is not on the list. Row-level
//! access control on the store side does the actual enforcement; these
//! helpers assume a signed-in administrator.

use crate::error::{ReservationError, Result};
use crate::providers::{DataStore, Filter, OrderBy, Record, Session};
use crate::records::{
    AdminEntry, NewProduct, Product, ProductId, Reservation, ReservationDetails, ReservationId,
};

// ═══════════════════════════════════════════════════════════════════════
// Access
// ═══════════════════════════════════════════════════════════════════════

/// Sign in and verify membership in the administrators list.
///
/// Authentication alone is not enough: the email must also appear in the
/// `admins` collection. Accounts that authenticate but are not on the
/// list are signed back out and rejected.
///
/// # Errors
///
/// Returns [`ReservationError::AuthFailed`] for bad credentials,
/// [`ReservationError::NotAuthorized`] for authenticated non-admins, or a
/// transport error if the membership check could not run.
pub async fn sign_in<S: DataStore>(store: &S, email: &str, password: &str) -> Result<Session> {
    let session = store.sign_in(email, password).await?;

    let membership: Vec<AdminEntry> = match store
        .select(Filter::new().eq("email", email), None)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            sign_out_quietly(store).await;
            return Err(e);
        }
    };

    if membership.is_empty() {
        tracing::warn!(email, "authenticated account is not an administrator");
        sign_out_quietly(store).await;
        return Err(ReservationError::NotAuthorized);
    }

    Ok(session)
}

/// End the admin session.
///
/// # Errors
///
/// Returns error if the auth endpoint rejects the request.
pub async fn sign_out<S: DataStore>(store: &S) -> Result<()> {
    store.sign_out().await
}

async fn sign_out_quietly<S: DataStore>(store: &S) {
    if let Err(e) = store.sign_out().await {
        tracing::warn!(error = %e, "sign-out after rejected admin check failed");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Reservations
// ═══════════════════════════════════════════════════════════════════════

/// List all reservations from the joined view, newest first.
///
/// # Errors
///
/// Returns error if the data store cannot be reached or a row does not
/// decode.
pub async fn list_reservations<S: DataStore>(store: &S) -> Result<Vec<ReservationDetails>> {
    store
        .select(Filter::new(), Some(OrderBy::desc("reservation_date")))
        .await
}

/// Mark a reservation as confirmed.
///
/// The update targets the base `reservations` table; the joined view is
/// read-only and reflects the change on the next read.
///
/// # Errors
///
/// Returns error if the data store cannot be reached or rejects the
/// update.
pub async fn confirm_reservation<S: DataStore>(store: &S, id: ReservationId) -> Result<()> {
    store
        .update::<Reservation>(
            serde_json::json!({ "status": "confirmed" }),
            Filter::new().eq("id", id.0),
        )
        .await
}

/// Delete a reservation row from the base table.
///
/// # Errors
///
/// Returns error if the data store cannot be reached or rejects the
/// delete.
pub async fn delete_reservation<S: DataStore>(store: &S, id: ReservationId) -> Result<()> {
    store
        .delete::<Reservation>(Filter::new().eq("id", id.0))
        .await
}

// ═══════════════════════════════════════════════════════════════════════
// Products
// ═══════════════════════════════════════════════════════════════════════

/// Create a product and return the stored row.
///
/// # Errors
///
/// Returns error if the data store cannot be reached, rejects the insert,
/// or returns no row.
pub async fn create_product<S: DataStore>(store: &S, product: NewProduct) -> Result<Product> {
    let rows: Vec<Product> = store.insert(&[product]).await?;

    rows.into_iter()
        .next()
        .ok_or(ReservationError::MissingRow {
            collection: Product::COLLECTION,
        })
}

/// Overwrite a product's editable fields.
///
/// # Errors
///
/// Returns error if the changes do not serialize or the data store cannot
/// be reached or rejects the update.
pub async fn update_product<S: DataStore>(
    store: &S,
    id: ProductId,
    changes: NewProduct,
) -> Result<()> {
    let patch = serde_json::to_value(&changes).map_err(|e| ReservationError::MalformedRow {
        collection: Product::COLLECTION,
        message: e.to_string(),
    })?;

    store
        .update::<Product>(patch, Filter::new().eq("id", id.0))
        .await
}

/// Delete a product.
///
/// # Errors
///
/// Returns error if the data store cannot be reached or rejects the
/// delete.
pub async fn delete_product<S: DataStore>(store: &S, id: ProductId) -> Result<()> {
    store.delete::<Product>(Filter::new().eq("id", id.0)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockDataStore;
    use crate::records::{Money, ReservationStatus};
    use chrono::{TimeZone, Utc};

    fn admin_entry(email: &str) -> AdminEntry {
        AdminEntry {
            id: uuid::Uuid::new_v4(),
            email: email.to_string(),
        }
    }

    fn reservation(email: &str) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            customer_name: "Marie Dupont".to_string(),
            customer_email: email.to_string(),
            customer_phone: "+33612345678".to_string(),
            address: None,
            status: ReservationStatus::Pending,
            created_at: Some(Utc::now()),
        }
    }

    fn details(id: ReservationId, day: u32) -> ReservationDetails {
        ReservationDetails {
            id,
            customer_name: "Marie Dupont".to_string(),
            customer_email: "marie@example.com".to_string(),
            customer_phone: "+33612345678".to_string(),
            address: None,
            status: ReservationStatus::Pending,
            reservation_date: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
            products_summary: "1x Tarte aux pommes".to_string(),
            total_amount: Money::cents(1850),
        }
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: Money::cents(500),
            image: String::new(),
            category: "tarte".to_string(),
            minimum_quantity: 1,
        }
    }

    #[tokio::test]
    async fn sign_in_accepts_listed_admin() {
        let store = MockDataStore::new();
        store.register_credentials("admin@fournil.fr", "s3cret");
        store.seed(&[admin_entry("admin@fournil.fr")]);

        let session = sign_in(&store, "admin@fournil.fr", "s3cret").await.unwrap();

        assert!(!session.access_token.is_empty());
        assert_eq!(
            store.signed_in_email().as_deref(),
            Some("admin@fournil.fr")
        );
    }

    #[tokio::test]
    async fn sign_in_rejects_unlisted_account_and_signs_out() {
        let store = MockDataStore::new();
        store.register_credentials("intruder@example.com", "s3cret");

        let result = sign_in(&store, "intruder@example.com", "s3cret").await;

        assert!(matches!(result, Err(ReservationError::NotAuthorized)));
        assert!(store.signed_in_email().is_none());
    }

    #[tokio::test]
    async fn sign_in_rejects_bad_credentials() {
        let store = MockDataStore::new();
        store.register_credentials("admin@fournil.fr", "s3cret");

        let result = sign_in(&store, "admin@fournil.fr", "wrong").await;

        assert!(matches!(result, Err(ReservationError::AuthFailed { .. })));
    }

    #[tokio::test]
    async fn confirm_updates_base_table_not_the_view() {
        let store = MockDataStore::new();
        let row = reservation("marie@example.com");
        let id = row.id;
        store.seed(&[row]);
        store.seed(&[details(id, 10)]);

        confirm_reservation(&store, id).await.unwrap();

        let base = store.rows_as::<Reservation>();
        assert_eq!(base[0].status, ReservationStatus::Confirmed);

        // The view is read-only; only a fresh read reflects the change
        let view = store.rows_as::<ReservationDetails>();
        assert_eq!(view[0].status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn delete_removes_the_base_row() {
        let store = MockDataStore::new();
        let row = reservation("marie@example.com");
        let id = row.id;
        store.seed(&[row]);

        delete_reservation(&store, id).await.unwrap();

        assert!(store.rows_as::<Reservation>().is_empty());
    }

    #[tokio::test]
    async fn reservations_list_newest_first() {
        let store = MockDataStore::new();
        store.seed(&[
            details(ReservationId::new(), 3),
            details(ReservationId::new(), 21),
            details(ReservationId::new(), 12),
        ]);

        let listed = list_reservations(&store).await.unwrap();

        let days: Vec<u32> = listed
            .iter()
            .map(|d| chrono::Datelike::day(&d.reservation_date))
            .collect();
        assert_eq!(days, [21, 12, 3]);
    }

    #[tokio::test]
    async fn product_crud_round_trip() {
        let store = MockDataStore::new();

        let stored = create_product(&store, new_product("Tarte aux pommes"))
            .await
            .unwrap();
        assert_eq!(stored.name, "Tarte aux pommes");

        let mut changes = new_product("Tarte fine aux pommes");
        changes.price = Money::cents(2100);
        update_product(&store, stored.id, changes).await.unwrap();

        let rows = store.rows_as::<Product>();
        assert_eq!(rows[0].name, "Tarte fine aux pommes");
        assert_eq!(rows[0].price, Money::cents(2100));

        delete_product(&store, stored.id).await.unwrap();
        assert!(store.rows_as::<Product>().is_empty());
    }
}
