//! Request-scoped scratch space.
//!
//! Middleware writes into [`Locals`]; later middleware and the matched
//! handler read it back. One `Locals` lives inside one [`Request`](crate::Request)
//! and dies with it, so nothing leaks from one request into the next.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Clone, Debug, Default)]
pub struct Locals {
    values: HashMap<String, Value>,
}

impl Locals {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Stores `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
