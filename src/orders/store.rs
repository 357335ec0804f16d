//! JSON-file-backed order store
//!
//! The full collection lives in memory behind a mutex and is flushed to
//! `orders.json` after every mutation. Startup is data-loss tolerant: a
//! missing or unparsable file initializes an empty collection instead of
//! failing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::orders::Order;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable, insertion-ordered collection of submitted orders
#[derive(Clone)]
pub struct OrderStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    orders: Mutex<Vec<Order>>,
}

impl OrderStore {
    /// Open the store at `path`, loading persisted orders if present.
    ///
    /// Corrupt state is absorbed: the store starts empty and logs a warning.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let orders = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Order>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(
                        "Discarding unparsable order state at {}: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("Cannot read order state at {}: {}", path.display(), e);
                Vec::new()
            }
        };

        Self {
            inner: Arc::new(Inner {
                path,
                orders: Mutex::new(orders),
            }),
        }
    }

    /// Append an order and persist the collection.
    ///
    /// On persist failure the in-memory append is rolled back so no partial
    /// state is exposed.
    pub fn append(&self, order: Order) -> StoreResult<()> {
        let mut orders = self.inner.orders.lock();
        orders.push(order);
        if let Err(e) = persist(&self.inner.path, &orders) {
            orders.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Full ordered sequence of current orders (insertion order)
    pub fn list_all(&self) -> Vec<Order> {
        self.inner.orders.lock().clone()
    }

    /// Current size without materializing the list
    pub fn count(&self) -> usize {
        self.inner.orders.lock().len()
    }

    /// Empty the collection and persist the empty state. Idempotent.
    pub fn clear(&self) -> StoreResult<()> {
        let mut orders = self.inner.orders.lock();
        orders.clear();
        persist(&self.inner.path, &orders)
    }
}

fn persist(path: &Path, orders: &[Order]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(orders)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(serial: &str) -> Order {
        Order {
            serial: serial.into(),
            description: "books".into(),
            total_weight: 1500.0,
            package_volume: String::new(),
            cod_value: String::new(),
            special_notes: "notes".into(),
            customer_name: "Ali".into(),
            mobile_no: "0100".into(),
            street: "12 Nile St".into(),
            city: "CAIRO".into(),
            package_ref: String::new(),
            merchant_name: String::new(),
            warehouse_name: String::new(),
            has_pod: String::new(),
            seller_name: String::new(),
        }
    }

    #[test]
    fn append_list_count_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrderStore::open(dir.path().join("orders.json"));

        assert_eq!(store.count(), 0);
        store.append(sample_order("ORD1")).unwrap();
        store.append(sample_order("ORD2")).unwrap();

        assert_eq!(store.count(), 2);
        let all = store.list_all();
        assert_eq!(all[0].serial, "ORD1");
        assert_eq!(all[1].serial, "ORD2");

        store.clear().unwrap();
        assert_eq!(store.count(), 0);
        // Idempotent
        store.clear().unwrap();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn persisted_orders_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");

        let store = OrderStore::open(&path);
        store.append(sample_order("ORD1")).unwrap();
        drop(store);

        let reopened = OrderStore::open(&path);
        assert_eq!(reopened.count(), 1);
        assert_eq!(reopened.list_all()[0].serial, "ORD1");
    }

    #[test]
    fn corrupt_state_initializes_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        fs::write(&path, "{not json").unwrap();

        let store = OrderStore::open(&path);
        assert_eq!(store.count(), 0);

        // The store stays usable and overwrites the corrupt file
        store.append(sample_order("ORD1")).unwrap();
        let reopened = OrderStore::open(&path);
        assert_eq!(reopened.count(), 1);
    }

    #[test]
    fn failed_persist_rolls_back_the_append() {
        let dir = tempfile::tempdir().unwrap();
        // Point the state file at a directory so the write must fail
        let store = OrderStore::open(dir.path());

        assert!(store.append(sample_order("ORD1")).is_err());
        assert_eq!(store.count(), 0);
    }
}
