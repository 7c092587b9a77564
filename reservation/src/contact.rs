//! Contact form submission.

use crate::error::{ReservationError, Result};
use crate::providers::{DataStore, Record};
use crate::records::{Contact, NewContact};

/// Persist a contact message and return the stored row.
///
/// # Errors
///
/// Returns error if the data store cannot be reached, rejects the insert,
/// or returns no row.
pub async fn submit<S: DataStore>(store: &S, message: NewContact) -> Result<Contact> {
    let rows: Vec<Contact> = store.insert(&[message]).await?;

    rows.into_iter()
        .next()
        .ok_or(ReservationError::MissingRow {
            collection: Contact::COLLECTION,
        })
}
