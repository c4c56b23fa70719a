use std::fmt;

use serde::{Deserialize, Serialize};

/// Records that can be stored in a [`Repository`] carry a stable key.
pub trait Keyed {
    type Key: Copy + PartialEq + fmt::Display;

    fn key(&self) -> Self::Key;
}

/// What `update`/`delete` do when no record has the requested key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Report `RepositoryError::NotFound`
    #[default]
    Strict,
    /// Silently do nothing
    Lenient,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Ordered store of one entity type, addressed by key.
///
/// `update` and `delete` return the record they displaced. A miss is
/// `Ok(None)` in lenient mode and `Err(NotFound)` in strict mode.
pub trait Repository<T: Keyed> {
    /// Append a record. No uniqueness check.
    fn create(&mut self, item: T);

    /// Live view of every record, in insertion order
    fn read_all(&self) -> &[T];

    fn read_all_mut(&mut self) -> &mut [T];

    fn get(&self, key: &T::Key) -> Option<&T> {
        self.read_all().iter().find(|item| item.key() == *key)
    }

    fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.read_all_mut().iter_mut().find(|item| item.key() == *key)
    }

    /// Replace the first record with this key, keeping its position
    fn update(&mut self, key: &T::Key, item: T) -> Result<Option<T>, RepositoryError>;

    /// Remove the first record with this key
    fn delete(&mut self, key: &T::Key) -> Result<Option<T>, RepositoryError>;

    fn len(&self) -> usize {
        self.read_all().len()
    }

    fn is_empty(&self) -> bool {
        self.read_all().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
    policy: MissingPolicy,
}

impl<T: Keyed> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_policy(MissingPolicy::default())
    }

    pub fn with_policy(policy: MissingPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    fn missing(&self, key: &T::Key) -> Result<Option<T>, RepositoryError> {
        match self.policy {
            MissingPolicy::Strict => Err(RepositoryError::NotFound(key.to_string())),
            MissingPolicy::Lenient => {
                tracing::debug!("No record with key {key}, ignoring");
                Ok(None)
            }
        }
    }
}

impl<T: Keyed> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> Extend<T> for InMemoryRepository<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Keyed> Repository<T> for InMemoryRepository<T> {
    fn create(&mut self, item: T) {
        self.items.push(item);
    }

    fn read_all(&self) -> &[T] {
        &self.items
    }

    fn read_all_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    fn update(&mut self, key: &T::Key, item: T) -> Result<Option<T>, RepositoryError> {
        match self.position(key) {
            Some(index) => Ok(Some(std::mem::replace(&mut self.items[index], item))),
            None => self.missing(key),
        }
    }

    fn delete(&mut self, key: &T::Key) -> Result<Option<T>, RepositoryError> {
        match self.position(key) {
            Some(index) => Ok(Some(self.items.remove(index))),
            None => self.missing(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn test_create_preserves_insertion_order() {
        let mut repo = InMemoryRepository::new();
        repo.create(item(3, "c"));
        repo.create(item(1, "a"));
        repo.create(item(2, "b"));

        let ids: Vec<_> = repo.read_all().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_field_identical_records_are_distinct_by_key() {
        let mut repo = InMemoryRepository::new();
        repo.create(item(1, "same"));
        repo.create(item(2, "same"));

        repo.delete(&2).unwrap();
        assert_eq!(repo.read_all(), &[item(1, "same")]);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut repo = InMemoryRepository::new();
        repo.create(item(1, "a"));
        repo.create(item(2, "b"));
        repo.create(item(3, "c"));

        let old = repo.update(&2, item(2, "B")).unwrap();
        assert_eq!(old, Some(item(2, "b")));
        assert_eq!(repo.read_all()[1], item(2, "B"));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_read_all_mut_is_live() {
        let mut repo = InMemoryRepository::new();
        repo.create(item(1, "a"));

        repo.read_all_mut()[0].label = "changed";
        assert_eq!(repo.get(&1).unwrap().label, "changed");
    }

    #[test]
    fn test_strict_miss_reports_not_found() {
        let mut repo: InMemoryRepository<Item> = InMemoryRepository::new();

        assert_eq!(
            repo.delete(&9),
            Err(RepositoryError::NotFound("9".to_string()))
        );
        assert!(repo.update(&9, item(9, "x")).is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_lenient_miss_is_silent_noop() {
        let mut repo = InMemoryRepository::with_policy(MissingPolicy::Lenient);
        repo.create(item(1, "a"));

        assert_eq!(repo.delete(&9), Ok(None));
        assert_eq!(repo.update(&9, item(9, "x")), Ok(None));
        assert_eq!(repo.read_all(), &[item(1, "a")]);
    }

    #[test]
    fn test_duplicate_keys_only_first_removed() {
        let mut repo = InMemoryRepository::new();
        repo.create(item(1, "first"));
        repo.create(item(1, "second"));

        let removed = repo.delete(&1).unwrap();
        assert_eq!(removed, Some(item(1, "first")));
        assert_eq!(repo.read_all(), &[item(1, "second")]);
    }
}
