use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Durable key-value storage holding serialized collections.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Typed access on top of any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads and decodes the value under `key`.
    ///
    /// Absent keys, JSON `null`, read failures and undecodable payloads all
    /// yield `T::default()`.
    fn load_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!("failed to read '{}', using empty value: {:#}", key, err);
                return T::default();
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                warn!("corrupt data under '{}', using empty value: {}", key, err);
                T::default()
            }
        }
    }

    fn save_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value).with_context(|| format!("failed to encode '{key}'"))?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

#[derive(Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw payloads.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(feature = "rocksdb")]
pub use rocks::RocksDbStore;

#[cfg(feature = "rocksdb")]
mod rocks {
    use super::KeyValueStore;
    use anyhow::{Context, Result};
    use rocksdb::{DB, Options};
    use std::sync::Arc;

    /// On-disk store for native embeddings of the storefront state.
    pub struct RocksDbStore {
        db: Arc<DB>,
    }

    impl RocksDbStore {
        pub fn open_default(path: &str) -> Result<Self> {
            let mut options = Options::default();
            options.create_if_missing(true);
            let db = DB::open(&options, path).with_context(|| format!("failed to open rocksdb at {path}"))?;
            Ok(Self { db: Arc::new(db) })
        }

        fn key_for_collection(key: &str) -> String {
            format!("collection:{key}")
        }
    }

    impl KeyValueStore for RocksDbStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            let key = Self::key_for_collection(key);
            let value = self.db.get(key.as_bytes())?;
            match value {
                Some(raw) => Ok(Some(String::from_utf8(raw).context("collection is not utf-8")?)),
                None => Ok(None),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let key = Self::key_for_collection(key);
            self.db.put(key.as_bytes(), value.as_bytes())?;
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            let key = Self::key_for_collection(key);
            self.db.delete(key.as_bytes())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_loads_default() {
        let store = InMemoryStore::new();
        let loaded: Vec<String> = store.load_or_default("sportx_cart");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_payload_loads_default() {
        let store = InMemoryStore::with_entries([("sportx_cart", "{not json")]);
        let loaded: Vec<u32> = store.load_or_default("sportx_cart");
        assert!(loaded.is_empty());
    }

    #[test]
    fn null_payload_loads_default() {
        let store = InMemoryStore::with_entries([("sportx_wishlist", "null")]);
        let loaded: Vec<u32> = store.load_or_default("sportx_wishlist");
        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_shape_loads_default() {
        let store = InMemoryStore::with_entries([("sportx_cart", r#"{"qty":1}"#)]);
        let loaded: Vec<u32> = store.load_or_default("sportx_cart");
        assert!(loaded.is_empty());
    }

    #[test]
    fn saved_collection_reloads() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        store.save_json("sportx_cart", &vec![3_u32, 1, 2])?;

        let loaded: Vec<u32> = store.load_or_default("sportx_cart");
        assert_eq!(loaded, vec![3, 1, 2]);
        assert_eq!(store.get("sportx_cart")?.as_deref(), Some("[3,1,2]"));

        Ok(())
    }

    #[test]
    fn remove_drops_key() -> anyhow::Result<()> {
        let store = InMemoryStore::with_entries([("k", "[1]")]);
        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        Ok(())
    }

    #[test]
    fn noop_store_forgets_writes() -> anyhow::Result<()> {
        let store = NoopStore;
        store.save_json("k", &vec![1_u8])?;
        let loaded: Vec<u8> = store.load_or_default("k");
        assert!(loaded.is_empty());
        Ok(())
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn rocksdb_collection_survives_reopen() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state");
        let path = path.to_str().ok_or_else(|| anyhow!("non utf-8 temp path"))?;

        {
            let store = RocksDbStore::open_default(path)?;
            store.save_json("sportx_cart", &vec!["Shoe A"])?;
        }

        let store = RocksDbStore::open_default(path)?;
        let loaded: Vec<String> = store.load_or_default("sportx_cart");
        assert_eq!(loaded, vec!["Shoe A".to_owned()]);

        store.remove("sportx_cart")?;
        assert_eq!(store.get("sportx_cart")?, None);

        Ok(())
    }
}
