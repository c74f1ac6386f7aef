//! Reader/writer-locked hash map.

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Thread-safe map: any number of concurrent readers, writers exclusive.
///
/// Values are cloned out on read, so `V` is normally a cheap handle.
pub struct ConcurrentMap<K, V> {
    inner: RwLock<FxHashMap<K, V>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        ConcurrentMap {
            inner: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Insert or overwrite.
    pub fn set(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Return the existing value for `key`, or insert the one produced by
    /// `supplier`. The flag is `true` when `supplier` ran.
    ///
    /// `supplier` runs under the write lock and must not touch this map.
    pub fn set_if_absent(&self, key: K, supplier: impl FnOnce() -> V) -> (V, bool) {
        let mut map = self.inner.write();
        if let Some(existing) = map.get(&key) {
            return (existing.clone(), false);
        }
        let value = supplier();
        map.insert(key, value.clone());
        (value, true)
    }

    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
