use std::collections::BTreeMap;

use serde::Serialize;

/// Variable naming the instance. Records without it are not instances.
pub const INSTANCE_NAME: &str = "instancename";
/// Variable naming the owning project. Drives the auto-created project group.
pub const INSTANCE_PROJECT: &str = "instanceproject";

/// Declared variables of one record.
///
/// Later declarations of the same key replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableMap(BTreeMap<String, String>);

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.get(INSTANCE_NAME)
    }

    pub fn project(&self) -> Option<&str> {
        self.get(INSTANCE_PROJECT)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for VariableMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
