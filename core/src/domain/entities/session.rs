//! Session handle mutated during a transition.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::SessionError;

/// Serializable contents of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Values that persist until unset
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, Value>,

    /// Values that are removed the first time they are read
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flash: BTreeMap<String, Value>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.flash.is_empty()
    }
}

/// A session read at the start of a request and persisted before responding
///
/// Stores that keep data server-side set `id`; cookie stores leave it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    id: Option<String>,
    data: SessionData,
}

impl Session {
    /// Fresh, empty session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(id: Option<String>, data: SessionData) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read a value; a flashed value is consumed by the read
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.values.get(key) {
            return Some(value.clone());
        }
        self.data.flash.remove(key)
    }

    /// Read and deserialize a value; a flashed value is consumed by the read
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, SessionError> {
        match self.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Look at a value without consuming a flash
    pub fn peek(&self, key: &str) -> Option<&Value> {
        self.data
            .values
            .get(key)
            .or_else(|| self.data.flash.get(key))
    }

    /// Look at a value without consuming a flash, deserialized
    pub fn peek_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match self.peek(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Store a value until it is unset
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)?;
        self.data.flash.remove(key);
        self.data.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Store a value readable once
    pub fn flash<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)?;
        self.data.values.remove(key);
        self.data.flash.insert(key.to_string(), value);
        Ok(())
    }

    pub fn unset(&mut self, key: &str) {
        self.data.values.remove(key);
        self.data.flash.remove(key);
    }
}
