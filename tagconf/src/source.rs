//! Value sources: where raw strings come from

use std::collections::HashMap;
use std::env::{self, VarError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Dotenv file read by [`DotenvSource::load`].
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// A key-to-string lookup consulted by the [`Loader`](crate::Loader).
///
/// The loader treats `Some("")` exactly like `None`: a key set to the empty
/// string is indistinguishable from a missing key, and the next source is
/// asked.
pub trait ValueSource: Send + Sync {
    /// Look up a raw value.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment at lookup time.
///
/// Variables whose value is not valid unicode read as missing, with a debug
/// event naming the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ValueSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::debug!(key, "ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}

/// A fixed in-memory table.
///
/// ```
/// use tagconf::{MapSource, ValueSource};
///
/// let source: MapSource = [("PORT", "8080")].into_iter().collect();
/// assert_eq!(source.get("PORT").as_deref(), Some("8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value for the key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ValueSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Values parsed from one or more dotenv files, loaded up front.
///
/// When several files define the same key, the first file wins; within one
/// file the last definition wins. The process environment is not modified.
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    values: HashMap<String, String>,
}

impl DotenvSource {
    /// Load [`DEFAULT_DOTENV_FILE`] from the working directory.
    pub fn load() -> Result<Self, SourceError> {
        Self::from_paths([DEFAULT_DOTENV_FILE])
    }

    /// Load the given files in order.
    ///
    /// # Errors
    ///
    /// - A file cannot be opened
    /// - A file is not valid dotenv content
    pub fn from_paths<I, P>(paths: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut source = Self::default();
        for path in paths {
            let path = path.as_ref();
            let file = File::open(path).map_err(|e| SourceError::Io {
                path: PathBuf::from(path),
                source: e,
            })?;
            let loaded = source.merge(file, &path.display().to_string())?;
            tracing::debug!(path = %path.display(), keys = loaded, "loaded dotenv file");
        }
        Ok(source)
    }

    /// Load dotenv content from readers, in order.
    pub fn from_readers<I, R>(readers: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut source = Self::default();
        for reader in readers {
            source.merge(reader, "<reader>")?;
        }
        Ok(source)
    }

    /// Parse one blob and add the keys not loaded yet. Within the blob the
    /// last definition of a key wins. Returns the number of distinct keys in
    /// the blob.
    fn merge<R: Read>(&mut self, reader: R, origin: &str) -> Result<usize, SourceError> {
        let mut blob = HashMap::new();
        for item in dotenvy::from_read_iter(reader) {
            let (key, value) = item.map_err(|e| SourceError::Dotenv {
                origin: origin.to_string(),
                source: e,
            })?;
            blob.insert(key, value);
        }

        let count = blob.len();
        for (key, value) in blob {
            self.values.entry(key).or_insert(value);
        }
        Ok(count)
    }

    /// Number of distinct keys loaded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys were loaded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for DotenvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
