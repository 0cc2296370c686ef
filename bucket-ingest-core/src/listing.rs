use serde::Serialize;

use crate::category::Category;
use crate::contract::RemoteObject;
use crate::resolve;

/// Keys found under a category prefix, in the order the store returned them.
/// The prefix's directory marker is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteListing {
    pub category: Category,
    pub prefix: String,
    pub keys: Vec<String>,
}

impl RemoteListing {
    pub fn from_objects(category: Category, objects: Vec<RemoteObject>) -> Self {
        let prefix = resolve::category_prefix(category).to_string();
        let marker = resolve::directory_marker(&prefix);
        let keys = objects
            .into_iter()
            .map(|o| o.key)
            .filter(|k| *k != marker)
            .collect();
        Self {
            category,
            prefix,
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl IntoIterator for RemoteListing {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
