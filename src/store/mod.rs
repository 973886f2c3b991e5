//! Flat-file JSON document store.
//!
//! Each named document is one pretty-printed JSON file under the data
//! directory. Reads that fail for any reason (missing file, unreadable,
//! malformed JSON) collapse to a caller-supplied default and are never
//! surfaced; writes rewrite the whole file and do propagate errors so the
//! request boundary can answer 500.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Load the named document, falling back to `default` when the file is
    /// absent, unreadable, or not well-formed JSON for `T`.
    pub async fn load<T>(&self, name: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        let path = self.path(name);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) => {
                debug!("No readable document at {}: {err}", path.display());
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("Ignoring malformed document {}: {err}", path.display());
                default
            }
        }
    }

    /// Serialize `value` and overwrite the named document.
    /// # Errors
    /// Returns an error if the data directory cannot be created or the file
    /// cannot be written.
    pub async fn save<T>(&self, name: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path(name);

        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", self.dir.display()))?;

        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize document {name}"))?;

        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn load_returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        let value: Vec<String> = store.load("nothing", vec!["seed".to_string()]).await;
        assert_eq!(value, vec!["seed".to_string()]);
    }

    #[tokio::test]
    async fn load_returns_default_on_malformed_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());
        tokio::fs::write(dir.path().join("broken.json"), "{not json").await?;

        let value: Vec<u32> = store.load("broken", vec![7]).await;
        assert_eq!(value, vec![7]);
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("nested"));

        let doc = Doc {
            name: "pla".to_string(),
            count: 3,
        };
        store.save("doc", &doc).await?;

        let loaded: Doc = store
            .load(
                "doc",
                Doc {
                    name: String::new(),
                    count: 0,
                },
            )
            .await;
        assert_eq!(loaded, doc);
        Ok(())
    }

    #[tokio::test]
    async fn save_overwrites_previous_content() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        store.save("list", &vec![1, 2, 3]).await?;
        store.save("list", &vec![4]).await?;

        let loaded: Vec<u32> = store.load("list", Vec::new()).await;
        assert_eq!(loaded, vec![4]);
        Ok(())
    }
}
