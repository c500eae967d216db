use super::PropertyMap;
use crate::pool::RefPool;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Map from pool objects to arbitrary values.
///
/// Interior mutability lets listeners clean the map up through a shared
/// handle.
pub struct ObjPropertyMap<O, T> {
    pool: Arc<dyn RefPool<O>>,
    values: RwLock<FxHashMap<i32, T>>,
}

impl<O, T: Clone> ObjPropertyMap<O, T> {
    pub fn new(pool: Arc<dyn RefPool<O>>) -> Self {
        Self {
            pool,
            values: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn pool(&self) -> &Arc<dyn RefPool<O>> {
        &self.pool
    }

    /// Returns the previous value.
    pub fn set(&self, obj: &O, value: T) -> Option<T> {
        self.set_by_id(self.pool.get_id(obj), value)
    }

    pub fn set_by_id(&self, id: i32, value: T) -> Option<T> {
        self.values.write().insert(id, value)
    }

    pub fn get(&self, obj: &O) -> Option<T> {
        self.values.read().get(&self.pool.get_id(obj)).cloned()
    }

    pub fn is_set(&self, obj: &O) -> bool {
        self.values.read().contains_key(&self.pool.get_id(obj))
    }

    pub fn remove(&self, obj: &O) -> Option<T> {
        self.values.write().remove(&self.pool.get_id(obj))
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }

    /// Copy of all `(id, value)` pairs, ordered by id.
    pub fn entries(&self) -> Vec<(i32, T)> {
        let mut entries: Vec<(i32, T)> = self
            .values
            .read()
            .iter()
            .map(|(&id, value)| (id, value.clone()))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }
}

impl<O, T> PropertyMap<O> for ObjPropertyMap<O, T>
where
    T: Clone + Send + Sync,
{
    fn remove_property(&self, obj: &O) {
        self.remove(obj);
    }

    fn clear_properties(&self) {
        self.clear();
    }

    fn property_count(&self) -> usize {
        self.len()
    }
}

/// Map from pool objects to plain values, answering a fixed "no entry"
/// value for unset objects.
pub struct PrimitivePropertyMap<O, T: Copy> {
    map: ObjPropertyMap<O, T>,
    no_entry_value: T,
}

pub type IntPropertyMap<O> = PrimitivePropertyMap<O, i32>;
pub type DoublePropertyMap<O> = PrimitivePropertyMap<O, f64>;

impl<O, T: Copy> PrimitivePropertyMap<O, T> {
    pub fn new(pool: Arc<dyn RefPool<O>>, no_entry_value: T) -> Self {
        Self {
            map: ObjPropertyMap::new(pool),
            no_entry_value,
        }
    }

    pub fn no_entry_value(&self) -> T {
        self.no_entry_value
    }

    /// Returns the previous value or the no-entry value.
    pub fn set(&self, obj: &O, value: T) -> T {
        self.map.set(obj, value).unwrap_or(self.no_entry_value)
    }

    pub fn get(&self, obj: &O) -> T {
        self.map.get(obj).unwrap_or(self.no_entry_value)
    }

    pub fn is_set(&self, obj: &O) -> bool {
        self.map.is_set(obj)
    }

    pub fn remove(&self, obj: &O) -> T {
        self.map.remove(obj).unwrap_or(self.no_entry_value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    /// The underlying id -> value map.
    pub fn as_obj_map(&self) -> &ObjPropertyMap<O, T> {
        &self.map
    }
}

impl<O, T> PropertyMap<O> for PrimitivePropertyMap<O, T>
where
    T: Copy + Send + Sync,
{
    fn remove_property(&self, obj: &O) {
        self.map.remove(obj);
    }

    fn clear_properties(&self) {
        self.map.clear();
    }

    fn property_count(&self) -> usize {
        self.map.len()
    }
}
