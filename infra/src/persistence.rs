use std::path::Path;

use anyhow::{Context, Result};
use log::*;
use serde::{de::DeserializeOwned, Serialize};

/// A local, string-keyed durable map of serde_json documents. Each key
/// holds one whole document; `save` overwrites whatever was there.
pub trait Storage {
    fn save<D: Serialize>(&self, key: &str, doc: &D) -> Result<()>;

    /// Absent keys and undecodable payloads both read as `None`; a payload
    /// we cannot understand is logged and then treated as missing.
    fn load<D: DeserializeOwned>(&self, key: &str) -> Result<Option<D>>;
}

#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).context("open sled database")?;
        Ok(SledStore { db })
    }

    /// A throwaway store on temporary storage, for tests.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .context("open temporary sled database")?;
        Ok(SledStore { db })
    }
}

impl Storage for SledStore {
    fn save<D: Serialize>(&self, key: &str, doc: &D) -> Result<()> {
        let body = serde_json::to_vec(doc).context("serialize document")?;
        debug!("Save {} bytes under {:?}", body.len(), key);
        self.db.insert(key, body).context("write document")?;
        self.db.flush().context("flush documents")?;
        Ok(())
    }

    fn load<D: DeserializeOwned>(&self, key: &str) -> Result<Option<D>> {
        let found = self.db.get(key).context("read document")?;
        match found {
            None => Ok(None),
            Some(body) => match serde_json::from_slice(&body) {
                Ok(doc) => Ok(Some(doc)),
                Err(e) => {
                    warn!("Discarding undecodable document under {:?}: {}", key, e);
                    Ok(None)
                }
            },
        }
    }
}
