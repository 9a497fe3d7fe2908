//! Bus message envelope

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named message with a key/value payload, as carried by the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub name: String,
    #[serde(default)]
    pub info: Value,
}

impl BusMessage {
    /// Create a message with an arbitrary payload
    pub fn new(name: impl Into<String>, info: Value) -> Self {
        Self {
            name: name.into(),
            info,
        }
    }

    /// Create a message with no payload
    pub fn signal(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    /// Create a message by serializing a typed payload
    pub fn encode<T: Serialize>(name: impl Into<String>, payload: &T) -> serde_json::Result<Self> {
        Ok(Self::new(name, serde_json::to_value(payload)?))
    }

    /// Deserialize the payload into a typed value
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.info)
    }
}
