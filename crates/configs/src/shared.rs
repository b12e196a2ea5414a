use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::error::{GetError, LoadError};
use crate::store::Store;

/// Cloneable, lock-guarded handle over a [`Store`] for services that keep
/// loading configuration while other tasks read it.
///
/// Loads hold the write lock only while parsing; file contents are read before
/// the lock is taken.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self { inner: Arc::new(RwLock::new(store)) }
    }
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load_from_str(&self, cfg: &str) -> Result<(), LoadError> {
        self.inner.write().await.load_from_str(cfg)
    }

    pub async fn load_from_slice(&self, cfg: &[u8]) -> Result<(), LoadError> {
        self.inner.write().await.load_from_slice(cfg)
    }

    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let mut file = File::open(path).await.map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.map_err(LoadError::Read)?;
        drop(file);
        debug!(path = %path.display(), bytes = buf.len(), "read config file");
        self.load_from_slice(&buf).await
    }

    /// See [`Store::get`].
    pub async fn get<T>(&self, key: &str) -> Result<T, GetError>
    where
        T: DeserializeOwned + Default,
    {
        self.inner.read().await.get(key)
    }

    /// See [`Store::get_into`].
    pub async fn get_into<T>(&self, key: &str, target: Option<&mut T>) -> Result<(), GetError>
    where
        T: DeserializeOwned,
    {
        self.inner.read().await.get_into(key, target)
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Borrow the underlying store for several lookups under one read lock.
    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().await
    }

    /// Take the store back out. Fails, returning the handle, while other clones
    /// are alive.
    pub fn into_inner(self) -> Result<Store, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
