//! Persisted session state.
//!
//! The cart and filter selection are mirrored to a named store (`cart-store`)
//! after every mutation and restored at startup. The in-memory state is the
//! source of truth: a failed save is logged, never surfaced to the shopper.
//!
//! # Layout
//!
//! ```json
//! {
//!   "name": "cart-store",
//!   "version": 1,
//!   "saved_at": "2026-10-16T09:30:00Z",
//!   "cart": { "visible": false, "lines": [ { "product": {..}, "size": "M", "quantity": 2 } ] },
//!   "filter": { "sizes": ["M"], "sort": [ { "property": "price", "order": "desc" } ] }
//! }
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cart::CartLedger;
use crate::filter::FilterState;

/// Name the state is stored under.
pub const STORE_NAME: &str = "cart-store";

/// Snapshot layout version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur when loading or saving state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not a valid snapshot.
    #[error("Stored state is corrupt: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot was written by a newer build.
    #[error("Unsupported state version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The store was written to by a panicking thread.
    #[error("State store lock poisoned")]
    Poisoned,
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_name")]
    pub name: String,
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub cart: CartLedger,
    #[serde(default)]
    pub filter: FilterState,
}

fn default_name() -> String {
    STORE_NAME.to_string()
}

impl Snapshot {
    /// Capture the current state, stamped now.
    #[must_use]
    pub fn capture(cart: &CartLedger, filter: &FilterState) -> Self {
        Self {
            name: default_name(),
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            cart: cart.clone(),
            filter: filter.clone(),
        }
    }

    /// Parse and version-check a serialized snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] for malformed input and
    /// [`StoreError::UnsupportedVersion`] for snapshots from a newer build.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Backing storage for [`Snapshot`]s.
pub trait StateStore {
    /// Read the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// Stores the snapshot as a JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Unique per call, so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_else(|| STORE_NAME.into());
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Snapshot::from_json(&json).map(Some)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let written = std::fs::write(&temp, snapshot.to_json()?)
            .and_then(|()| std::fs::rename(&temp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), lines = snapshot.cart.len(), "State saved");
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Keeps the serialized snapshot in memory.
///
/// Clones share the same slot, so a test can hand one clone to the
/// application and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON last saved, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the slot lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        self.raw()?.as_deref().map(Snapshot::from_json).transpose()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = Some(json);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use groovy_core::{CurrencyCode, ProductId, ProductRef, SizeLabel, Sku};
    use rust_decimal::Decimal;

    use super::*;

    fn cart() -> CartLedger {
        let product = ProductRef {
            id: ProductId::new(1),
            sku: Sku::new(100),
            title: "Skuul".to_string(),
            description: String::new(),
            style: "Black".to_string(),
            price: Decimal::new(1400, 2),
            installments: 5,
            currency_id: CurrencyCode::USD,
            currency_format: "$".to_string(),
            is_free_shipping: true,
            available_sizes: vec![SizeLabel::parse("M").unwrap()],
        };
        let mut cart = CartLedger::new();
        cart.add_product(&product, SizeLabel::parse("M").unwrap(), 3)
            .unwrap();
        cart
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("groovy-store-{}", uuid::Uuid::new_v4()))
            .join("cart-store.json")
    }

    fn leftover_temp_files(path: &std::path::Path) -> Vec<PathBuf> {
        std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = JsonFileStore::new(temp_path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_restores_saved_state() {
        let path = temp_path();
        let store = JsonFileStore::new(&path);
        let snapshot = Snapshot::capture(&cart(), &FilterState::default());
        store.save(&snapshot).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.cart.total_item_count(), 3);
        assert!(leftover_temp_files(&path).is_empty());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let store = JsonFileStore::new(temp_path());
        assert_ne!(store.temp_path(), store.temp_path());
        assert_eq!(store.temp_path().parent(), store.path.parent());
    }

    #[test]
    fn test_concurrent_saves_do_not_clobber() {
        let path = temp_path();
        let snapshot = Snapshot::capture(&cart(), &FilterState::default());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let store = JsonFileStore::new(&path);
                let snapshot = &snapshot;
                scope.spawn(move || {
                    for _ in 0..25 {
                        store.save(snapshot).unwrap();
                    }
                });
            }
        });

        let restored = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(restored.cart, cart());
        assert!(leftover_temp_files(&path).is_empty());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse(_))));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let mut snapshot = Snapshot::capture(&cart(), &FilterState::default());
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(StoreError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemoryStore::new();
        let handle = store.clone();
        assert!(handle.load().unwrap().is_none());

        store
            .save(&Snapshot::capture(&cart(), &FilterState::default()))
            .unwrap();
        let restored = handle.load().unwrap().unwrap();
        assert_eq!(restored.cart, cart());
        assert!(handle.raw().unwrap().unwrap().contains(STORE_NAME));
    }
}
