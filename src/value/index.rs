use std::ops::{Index, IndexMut};

use super::Value;
use crate::error::AccessError;

impl Value {
    /// Returns the element at `index` of an array.
    pub fn get(&self, index: usize) -> Result<&Value, AccessError> {
        let values = self.as_array()?;
        let len = values.len();
        values.get(index).ok_or(AccessError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value, AccessError> {
        let values = self.as_array_mut()?;
        let len = values.len();
        values.get_mut(index).ok_or(AccessError::IndexOutOfRange { index, len })
    }

    /// Returns the value of the member `key` of an object.
    pub fn member(&self, key: &str) -> Result<&Value, AccessError> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| AccessError::KeyNotFound { key: key.to_string() })
    }

    /// Returns the value of the member `key` of an object, inserting `Null` if the key is absent.
    pub fn member_mut(&mut self, key: &str) -> Result<&mut Value, AccessError> {
        let map = self.as_object_mut()?;
        // an existing key keeps its position, a new one is appended
        Ok(map.entry(key.to_string()).or_insert(Value::Null))
    }
}

// The Index impls are for code that already knows the shape of the document, misuse is a bug
// and panics with the AccessError message. Use get()/member() to handle it instead.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get(index).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.get_mut(index).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.member(key).unwrap_or_else(|err| panic!("{err}"))
    }
}

// val["key"] = ... on a missing key inserts it
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.member_mut(key).unwrap_or_else(|err| panic!("{err}"))
    }
}
