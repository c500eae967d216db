use super::{object_for, RefIter};
use crate::pool::RefPool;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Map from pool objects to pool objects, possibly of another pool.
pub struct RefRefMap<K, V> {
    key_pool: Arc<dyn RefPool<K>>,
    value_pool: Arc<dyn RefPool<V>>,
    map: FxHashMap<i32, i32>,
}

impl<K, V> RefRefMap<K, V> {
    pub fn new(key_pool: Arc<dyn RefPool<K>>, value_pool: Arc<dyn RefPool<V>>) -> Self {
        Self {
            key_pool,
            value_pool,
            map: FxHashMap::default(),
        }
    }

    pub fn create_key_ref(&self) -> K {
        self.key_pool.create_ref()
    }

    pub fn create_value_ref(&self) -> V {
        self.value_pool.create_ref()
    }

    pub fn release_value_ref(&self, value: V) {
        self.value_pool.release_ref(value)
    }

    /// Map `key` to `value`; the previous value, if any, is written to `replaced`.
    pub fn put_into<'a>(&mut self, key: &K, value: &V, replaced: &'a mut V) -> Option<&'a mut V> {
        let old = self
            .map
            .insert(self.key_pool.get_id(key), self.value_pool.get_id(value))?;
        Some(self.value_pool.get_object_into(old, replaced))
    }

    pub fn put(&mut self, key: &K, value: &V) -> Option<V> {
        let old = self
            .map
            .insert(self.key_pool.get_id(key), self.value_pool.get_id(value))?;
        Some(object_for(self.value_pool.as_ref(), old))
    }

    pub fn get_into<'a>(&self, key: &K, value: &'a mut V) -> Option<&'a mut V> {
        let id = *self.map.get(&self.key_pool.get_id(key))?;
        Some(self.value_pool.get_object_into(id, value))
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let id = *self.map.get(&self.key_pool.get_id(key))?;
        Some(object_for(self.value_pool.as_ref(), id))
    }

    pub fn remove_into<'a>(&mut self, key: &K, removed: &'a mut V) -> Option<&'a mut V> {
        let id = self.map.remove(&self.key_pool.get_id(key))?;
        Some(self.value_pool.get_object_into(id, removed))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(&self.key_pool.get_id(key))?;
        Some(object_for(self.value_pool.as_ref(), id))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(&self.key_pool.get_id(key))
    }

    pub fn contains_value(&self, value: &V) -> bool {
        let id = self.value_pool.get_id(value);
        self.map.values().any(|&v| v == id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn keys(&self) -> RefIter<'_, K, std::iter::Copied<std::collections::hash_map::Keys<'_, i32, i32>>> {
        RefIter::new(self.key_pool.as_ref(), self.map.keys().copied())
    }

    pub fn values(&self) -> RefIter<'_, V, std::iter::Copied<std::collections::hash_map::Values<'_, i32, i32>>> {
        RefIter::new(self.value_pool.as_ref(), self.map.values().copied())
    }
}

/// Map from `i32` keys to pool objects.
pub struct IntRefMap<O> {
    pool: Arc<dyn RefPool<O>>,
    map: FxHashMap<i32, i32>,
}

impl<O> IntRefMap<O> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            pool,
            map: FxHashMap::default(),
        }
    }

    pub fn create_ref(&self) -> O {
        self.pool.create_ref()
    }

    pub fn release_ref(&self, obj: O) {
        self.pool.release_ref(obj)
    }

    pub fn put_into<'a>(&mut self, key: i32, obj: &O, replaced: &'a mut O) -> Option<&'a mut O> {
        let old = self.map.insert(key, self.pool.get_id(obj))?;
        Some(self.pool.get_object_into(old, replaced))
    }

    pub fn put(&mut self, key: i32, obj: &O) -> Option<O> {
        let old = self.map.insert(key, self.pool.get_id(obj))?;
        Some(object_for(self.pool.as_ref(), old))
    }

    pub fn get_into<'a>(&self, key: i32, obj: &'a mut O) -> Option<&'a mut O> {
        let id = *self.map.get(&key)?;
        Some(self.pool.get_object_into(id, obj))
    }

    pub fn get(&self, key: i32) -> Option<O> {
        let id = *self.map.get(&key)?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn remove_into<'a>(&mut self, key: i32, removed: &'a mut O) -> Option<&'a mut O> {
        let id = self.map.remove(&key)?;
        Some(self.pool.get_object_into(id, removed))
    }

    pub fn remove(&mut self, key: i32) -> Option<O> {
        let id = self.map.remove(&key)?;
        Some(object_for(self.pool.as_ref(), id))
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.map.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.map.keys().copied()
    }

    pub fn values(&self) -> RefIter<'_, O, std::iter::Copied<std::collections::hash_map::Values<'_, i32, i32>>> {
        RefIter::new(self.pool.as_ref(), self.map.values().copied())
    }
}

/// Map from pool objects to plain values, with a sentinel for missing keys.
pub struct RefPrimitiveMap<O, T: Copy> {
    pool: Arc<dyn RefPool<O>>,
    map: FxHashMap<i32, T>,
    no_entry_value: T,
}

pub type RefIntMap<O> = RefPrimitiveMap<O, i32>;
pub type RefDoubleMap<O> = RefPrimitiveMap<O, f64>;

impl<O, T: Copy> RefPrimitiveMap<O, T> {
    pub fn new(pool: Arc<dyn RefPool<O>>, no_entry_value: T) -> Self {
        Self {
            pool,
            map: FxHashMap::default(),
            no_entry_value,
        }
    }

    pub fn no_entry_value(&self) -> T {
        self.no_entry_value
    }

    /// Returns the previous value, or the no-entry value.
    pub fn put(&mut self, key: &O, value: T) -> T {
        self.map
            .insert(self.pool.get_id(key), value)
            .unwrap_or(self.no_entry_value)
    }

    pub fn get(&self, key: &O) -> T {
        self.map
            .get(&self.pool.get_id(key))
            .copied()
            .unwrap_or(self.no_entry_value)
    }

    pub fn remove(&mut self, key: &O) -> T {
        self.map
            .remove(&self.pool.get_id(key))
            .unwrap_or(self.no_entry_value)
    }

    pub fn contains_key(&self, key: &O) -> bool {
        self.map.contains_key(&self.pool.get_id(key))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn keys(&self) -> RefIter<'_, O, std::iter::Copied<std::collections::hash_map::Keys<'_, i32, T>>> {
        RefIter::new(self.pool.as_ref(), self.map.keys().copied())
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.map.values().copied()
    }
}

impl<O> RefPrimitiveMap<O, i32> {
    /// Add `delta` to the value of `key`, inserting `delta` if absent.
    pub fn adjust_or_put(&mut self, key: &O, delta: i32) -> i32 {
        let entry = self.map.entry(self.pool.get_id(key)).or_insert(0);
        *entry += delta;
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexPool;
    use crate::model::SimpleVertex;

    fn vertices(n: usize) -> (Arc<VertexPool<SimpleVertex>>, Vec<SimpleVertex>) {
        let pool = Arc::new(VertexPool::<SimpleVertex>::new(4));
        let v = (0..n).map(|_| pool.create()).collect();
        (pool, v)
    }

    #[test]
    fn test_ref_ref_map_put_replaces() {
        let (pool, v) = vertices(3);
        let mut map = RefRefMap::new(pool.clone(), pool.clone());
        assert!(map.put(&v[0], &v[1]).is_none());

        let mut replaced = map.create_value_ref();
        let old = map.put_into(&v[0], &v[2], &mut replaced).cloned();
        assert_eq!(old.as_ref(), Some(&v[1]));
        assert_eq!(map.get(&v[0]).as_ref(), Some(&v[2]));
        assert_eq!(map.len(), 1);
        assert!(map.contains_value(&v[2]));
        assert!(!map.contains_value(&v[1]));
    }

    #[test]
    fn test_ref_ref_map_remove_into_reuses_cursor() {
        let (pool, v) = vertices(2);
        let mut map = RefRefMap::new(pool.clone(), pool.clone());
        map.put(&v[1], &v[0]);

        let mut cursor = map.create_value_ref();
        assert!(map.get_into(&v[0], &mut cursor).is_none());
        assert!(map.remove_into(&v[1], &mut cursor).is_some());
        assert_eq!(cursor, v[0]);
        assert!(map.is_empty());
        map.release_value_ref(cursor);
    }

    #[test]
    fn test_int_ref_map() {
        let (pool, v) = vertices(2);
        let mut map = IntRefMap::new(pool.clone());
        map.put(10, &v[0]);
        map.put(20, &v[1]);

        assert!(map.contains_key(10));
        assert_eq!(map.get(20).as_ref(), Some(&v[1]));
        assert_eq!(map.remove(10).as_ref(), Some(&v[0]));
        assert!(map.get(10).is_none());

        let mut keys: Vec<i32> = map.keys().collect();
        keys.sort();
        assert_eq!(keys, vec![20]);
        assert_eq!(map.values().count(), 1);
    }

    #[test]
    fn test_primitive_map_no_entry_value() {
        let (pool, v) = vertices(2);
        let mut ints: RefIntMap<SimpleVertex> = RefPrimitiveMap::new(pool.clone(), -1);
        assert_eq!(ints.get(&v[0]), -1);
        assert_eq!(ints.put(&v[0], 5), -1);
        assert_eq!(ints.put(&v[0], 7), 5);
        assert_eq!(ints.adjust_or_put(&v[0], 3), 10);
        assert_eq!(ints.adjust_or_put(&v[1], 2), 2);
        assert_eq!(ints.remove(&v[1]), 2);
        assert_eq!(ints.remove(&v[1]), -1);

        let mut doubles: RefDoubleMap<SimpleVertex> = RefPrimitiveMap::new(pool, f64::NAN);
        assert!(doubles.get(&v[1]).is_nan());
        doubles.put(&v[1], 0.5);
        assert_eq!(doubles.get(&v[1]), 0.5);
        assert_eq!(doubles.keys().next().as_ref(), Some(&v[1]));
    }
}
