use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use serde_json::Deserializer;
use tracing::{debug, trace};

use crate::error::{GetError, LoadError};

type Sections = HashMap<String, Box<RawValue>>;

/// Configuration sections keyed by name, each kept as the raw JSON text it was
/// loaded from until a caller asks for it as a concrete type.
///
/// Loads take `&mut self` and lookups take `&self`: populate the store first,
/// then share it read-only. Use [`SharedStore`](crate::SharedStore) when loads
/// and lookups have to interleave across tasks.
#[derive(Debug, Default, Clone)]
pub struct Store {
    sections: Sections,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load sections from a reader holding one JSON object, or several objects
    /// back to back. Each top-level key becomes a section; a key seen again
    /// replaces the earlier value.
    ///
    /// An empty source is not an error. On failure, sections from objects that
    /// were fully decoded earlier in the stream stay loaded.
    pub fn load<R: Read>(&mut self, src: R) -> Result<(), LoadError> {
        let stream = Deserializer::from_reader(BufReader::new(src)).into_iter::<Sections>();
        let mut captured = 0usize;
        for item in stream {
            let sections = item?;
            captured += sections.len();
            self.sections.extend(sections);
        }
        debug!(captured, total = self.sections.len(), "loaded config sections");
        Ok(())
    }

    pub fn load_from_str(&mut self, cfg: &str) -> Result<(), LoadError> {
        self.load(cfg.as_bytes())
    }

    pub fn load_from_slice(&mut self, cfg: &[u8]) -> Result<(), LoadError> {
        self.load(cfg)
    }

    /// Load sections from the file at `path`. The file is closed before this
    /// returns, whatever the outcome.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading config file");
        self.load(file)
    }

    /// Decode section `key` into a new `T`.
    ///
    /// An empty key means nothing was asked for and yields `T::default()`
    /// without consulting the store.
    pub fn get<T>(&self, key: &str) -> Result<T, GetError>
    where
        T: DeserializeOwned + Default,
    {
        if key.is_empty() {
            return Ok(T::default());
        }
        self.decode(key)
    }

    /// Decode section `key` over `target`.
    ///
    /// With no target or an empty key this does nothing and succeeds, so a
    /// caller can pass a pre-filled default and skip the lookup. `target` is
    /// only written when decoding succeeds.
    pub fn get_into<T>(&self, key: &str, target: Option<&mut T>) -> Result<(), GetError>
    where
        T: DeserializeOwned,
    {
        let Some(target) = target else {
            return Ok(());
        };
        if key.is_empty() {
            return Ok(());
        }
        *target = self.decode(key)?;
        Ok(())
    }

    /// Raw JSON text of section `key`, exactly as it appeared in the source.
    pub fn raw(&self, key: &str) -> Option<&RawValue> {
        self.sections.get(key).map(|raw| &**raw)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, GetError> {
        let raw = self
            .sections
            .get(key)
            .ok_or_else(|| GetError::NotFound(key.to_string()))?;
        trace!(key, "decoding config section");
        serde_json::from_str(raw.get()).map_err(|source| GetError::Decode {
            key: key.to_string(),
            source,
        })
    }
}

impl FromStr for Store {
    type Err = LoadError;

    fn from_str(cfg: &str) -> Result<Self, Self::Err> {
        let mut store = Store::new();
        store.load_from_str(cfg)?;
        Ok(store)
    }
}
