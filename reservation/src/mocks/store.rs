//! In-memory data store for testing.

use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{ReservationError, Result};
use crate::providers::store::{DataStore, Filter, OrderBy, Record, Session};

/// Per-operation failure switches.
#[derive(Debug, Default)]
struct FailureSwitches {
    select: bool,
    insert: bool,
    update: bool,
    delete: bool,
    insert_collections: HashSet<String>,
}

/// In-memory [`DataStore`].
///
/// Rows are kept as JSON values per collection, so the same instance can
/// serve every record type. Inserts fill in `id` and `created_at` the way
/// the database would; tests can queue ids with [`MockDataStore::preassign_id`]
/// to make keys predictable. Each operation has a failure switch for
/// testing outage paths.
#[derive(Debug, Clone, Default)]
pub struct MockDataStore {
    collections: Arc<Mutex<HashMap<String, Vec<serde_json::Value>>>>,
    credentials: Arc<Mutex<HashMap<String, String>>>,
    signed_in: Arc<Mutex<Option<String>>>,
    failures: Arc<Mutex<FailureSwitches>>,
    assigned_ids: Arc<Mutex<VecDeque<String>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> ReservationError {
    ReservationError::StoreUnreachable("mock store lock poisoned".to_string())
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn row_matches(row: &serde_json::Value, filter: &Filter) -> bool {
    filter
        .clauses()
        .iter()
        .all(|(column, expected)| row.get(column).is_some_and(|v| value_text(v) == *expected))
}

impl MockDataStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with typed rows.
    #[allow(clippy::expect_used)]
    pub fn seed<R: Record>(&self, rows: &[R]) {
        let mut collections = self.collections.lock().expect("mock store lock");
        let stored = collections.entry(R::COLLECTION.to_string()).or_default();
        for row in rows {
            stored.push(serde_json::to_value(row).expect("seed row serializes"));
        }
    }

    /// Register credentials accepted by [`DataStore::sign_in`].
    #[allow(clippy::expect_used)]
    pub fn register_credentials(&self, email: impl Into<String>, password: impl Into<String>) {
        self.credentials
            .lock()
            .expect("mock store lock")
            .insert(email.into(), password.into());
    }

    /// Email of the currently signed-in user, if any.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn signed_in_email(&self) -> Option<String> {
        self.signed_in.lock().expect("mock store lock").clone()
    }

    /// Raw rows currently stored in `collection`.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn rows(&self, collection: &str) -> Vec<serde_json::Value> {
        self.collections
            .lock()
            .expect("mock store lock")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Typed rows currently stored in `R`'s collection.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn rows_as<R: Record>(&self) -> Vec<R> {
        self.rows(R::COLLECTION)
            .into_iter()
            .map(|row| serde_json::from_value(row).expect("stored row decodes"))
            .collect()
    }

    /// Make every `select` fail with a transport error.
    #[allow(clippy::expect_used)]
    pub fn set_select_failure(&self, fail: bool) {
        self.failures.lock().expect("mock store lock").select = fail;
    }

    /// Make every `insert` fail with a transport error.
    #[allow(clippy::expect_used)]
    pub fn set_insert_failure(&self, fail: bool) {
        self.failures.lock().expect("mock store lock").insert = fail;
    }

    /// Make inserts into one collection fail while others succeed.
    #[allow(clippy::expect_used)]
    pub fn set_insert_failure_for(&self, collection: &str, fail: bool) {
        let mut failures = self.failures.lock().expect("mock store lock");
        if fail {
            failures.insert_collections.insert(collection.to_string());
        } else {
            failures.insert_collections.remove(collection);
        }
    }

    /// Queue the `id` the next insert will assign.
    ///
    /// Lets a test know a row's key before the row exists, e.g. to seed a
    /// view row that a later insert must line up with.
    #[allow(clippy::expect_used)]
    pub fn preassign_id(&self, id: impl ToString) {
        self.assigned_ids
            .lock()
            .expect("mock store lock")
            .push_back(id.to_string());
    }

    /// Make every `update` fail with a transport error.
    #[allow(clippy::expect_used)]
    pub fn set_update_failure(&self, fail: bool) {
        self.failures.lock().expect("mock store lock").update = fail;
    }

    /// Make every `delete` fail with a transport error.
    #[allow(clippy::expect_used)]
    pub fn set_delete_failure(&self, fail: bool) {
        self.failures.lock().expect("mock store lock").delete = fail;
    }
}

impl DataStore for MockDataStore {
    fn select<R: Record>(
        &self,
        filter: Filter,
        order: Option<OrderBy>,
    ) -> impl Future<Output = Result<Vec<R>>> + Send {
        let collections = Arc::clone(&self.collections);
        let failures = Arc::clone(&self.failures);

        async move {
            if failures.lock().map_err(poisoned)?.select {
                return Err(ReservationError::StoreUnreachable(
                    "select failure injected".to_string(),
                ));
            }

            let mut rows: Vec<serde_json::Value> = collections
                .lock()
                .map_err(poisoned)?
                .get(R::COLLECTION)
                .map(|rows| {
                    rows.iter()
                        .filter(|row| row_matches(row, &filter))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            if let Some(order) = order {
                rows.sort_by(|a, b| {
                    let left = a.get(&order.column).map(value_text).unwrap_or_default();
                    let right = b.get(&order.column).map(value_text).unwrap_or_default();
                    if order.descending {
                        right.cmp(&left)
                    } else {
                        left.cmp(&right)
                    }
                });
            }

            rows.into_iter()
                .map(|row| {
                    serde_json::from_value(row).map_err(|e| ReservationError::MalformedRow {
                        collection: R::COLLECTION,
                        message: e.to_string(),
                    })
                })
                .collect()
        }
    }

    fn insert<I: Record, R: Record>(
        &self,
        rows: &[I],
    ) -> impl Future<Output = Result<Vec<R>>> + Send {
        let collections = Arc::clone(&self.collections);
        let failures = Arc::clone(&self.failures);
        let assigned_ids = Arc::clone(&self.assigned_ids);
        let rows: Vec<Result<serde_json::Value>> = rows
            .iter()
            .map(|row| {
                serde_json::to_value(row).map_err(|e| ReservationError::MalformedRow {
                    collection: I::COLLECTION,
                    message: e.to_string(),
                })
            })
            .collect();

        async move {
            {
                let failures = failures.lock().map_err(poisoned)?;
                if failures.insert || failures.insert_collections.contains(I::COLLECTION) {
                    return Err(ReservationError::StoreUnreachable(
                        "insert failure injected".to_string(),
                    ));
                }
            }

            let mut stored_rows = Vec::with_capacity(rows.len());
            for row in rows {
                let mut value = row?;
                // Fill server-assigned columns the way the database would
                if let Some(map) = value.as_object_mut() {
                    map.entry("id").or_insert_with(|| {
                        let queued = assigned_ids.lock().ok().and_then(|mut ids| ids.pop_front());
                        serde_json::Value::String(
                            queued.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                        )
                    });
                    map.entry("created_at").or_insert_with(|| {
                        serde_json::Value::String(chrono::Utc::now().to_rfc3339())
                    });
                }
                stored_rows.push(value);
            }

            collections
                .lock()
                .map_err(poisoned)?
                .entry(I::COLLECTION.to_string())
                .or_default()
                .extend(stored_rows.iter().cloned());

            stored_rows
                .into_iter()
                .map(|row| {
                    serde_json::from_value(row).map_err(|e| ReservationError::MalformedRow {
                        collection: R::COLLECTION,
                        message: e.to_string(),
                    })
                })
                .collect()
        }
    }

    fn update<R: Record>(
        &self,
        patch: serde_json::Value,
        filter: Filter,
    ) -> impl Future<Output = Result<()>> + Send {
        let collections = Arc::clone(&self.collections);
        let failures = Arc::clone(&self.failures);

        async move {
            if failures.lock().map_err(poisoned)?.update {
                return Err(ReservationError::StoreUnreachable(
                    "update failure injected".to_string(),
                ));
            }

            let Some(fields) = patch.as_object() else {
                return Err(ReservationError::StoreRejected {
                    collection: R::COLLECTION,
                    status: 400,
                    message: "patch must be a JSON object".to_string(),
                });
            };

            let mut collections = collections.lock().map_err(poisoned)?;
            if let Some(rows) = collections.get_mut(R::COLLECTION) {
                for row in rows.iter_mut().filter(|row| row_matches(row, &filter)) {
                    if let Some(target) = row.as_object_mut() {
                        for (key, value) in fields {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
            }

            Ok(())
        }
    }

    fn delete<R: Record>(&self, filter: Filter) -> impl Future<Output = Result<()>> + Send {
        let collections = Arc::clone(&self.collections);
        let failures = Arc::clone(&self.failures);

        async move {
            if failures.lock().map_err(poisoned)?.delete {
                return Err(ReservationError::StoreUnreachable(
                    "delete failure injected".to_string(),
                ));
            }

            let mut collections = collections.lock().map_err(poisoned)?;
            if let Some(rows) = collections.get_mut(R::COLLECTION) {
                rows.retain(|row| !row_matches(row, &filter));
            }

            Ok(())
        }
    }

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        let credentials = Arc::clone(&self.credentials);
        let signed_in = Arc::clone(&self.signed_in);
        let email = email.to_string();
        let password = password.to_string();

        async move {
            let known = credentials.lock().map_err(poisoned)?.get(&email).cloned();

            match known {
                Some(expected) if expected == password => {
                    *signed_in.lock().map_err(poisoned)? = Some(email.clone());
                    Ok(Session {
                        access_token: format!("mock-token-{email}"),
                        token_type: None,
                        expires_in: None,
                        refresh_token: None,
                    })
                }
                _ => Err(ReservationError::AuthFailed {
                    message: "invalid credentials".to_string(),
                }),
            }
        }
    }

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
        let signed_in = Arc::clone(&self.signed_in);

        async move {
            *signed_in.lock().map_err(poisoned)? = None;
            Ok(())
        }
    }
}
