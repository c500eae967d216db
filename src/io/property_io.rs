//! Raw persistence of property maps.
//!
//! Layout: `int count`, then for each map its registered name (utf), `int n`,
//! `n` file ids and `n` values.

use super::codec::{capacity_hint, RawReader, RawWriter};
use super::file_id::{FileIdToObjectMap, ObjectToFileIdMap};
use super::{GraphIoError, GraphIoResult};
use crate::properties::{ObjPropertyMap, PrimitivePropertyMap};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Encoding of a single property value.
pub trait PropertyValueCodec: Sized + Clone + Send + Sync + 'static {
    fn write_value(&self, out: &mut RawWriter<'_>) -> GraphIoResult<()>;

    fn read_value(input: &mut RawReader<'_>) -> GraphIoResult<Self>;
}

impl PropertyValueCodec for i32 {
    fn write_value(&self, out: &mut RawWriter<'_>) -> GraphIoResult<()> {
        out.write_int(*self)
    }

    fn read_value(input: &mut RawReader<'_>) -> GraphIoResult<Self> {
        input.read_int()
    }
}

impl PropertyValueCodec for f64 {
    fn write_value(&self, out: &mut RawWriter<'_>) -> GraphIoResult<()> {
        out.write_double(*self)
    }

    fn read_value(input: &mut RawReader<'_>) -> GraphIoResult<Self> {
        input.read_double()
    }
}

impl PropertyValueCodec for String {
    fn write_value(&self, out: &mut RawWriter<'_>) -> GraphIoResult<()> {
        out.write_utf(self)
    }

    fn read_value(input: &mut RawReader<'_>) -> GraphIoResult<Self> {
        input.read_utf()
    }
}

/// Writes and restores the content of one property map.
pub trait PropertyMapSerializer<O>: Send + Sync {
    fn write_map(&self, file_ids: &ObjectToFileIdMap<O>, out: &mut RawWriter<'_>) -> GraphIoResult<()>;

    fn read_map(&self, file_ids: &FileIdToObjectMap<O>, input: &mut RawReader<'_>) -> GraphIoResult<()>;

    /// Drop every value, ahead of reading a whole new graph.
    fn clear_map(&self);
}

impl<O, T> PropertyMapSerializer<O> for Arc<ObjPropertyMap<O, T>>
where
    O: 'static,
    T: PropertyValueCodec,
{
    fn write_map(&self, file_ids: &ObjectToFileIdMap<O>, out: &mut RawWriter<'_>) -> GraphIoResult<()> {
        write_entries(self, file_ids, out)
    }

    fn read_map(&self, file_ids: &FileIdToObjectMap<O>, input: &mut RawReader<'_>) -> GraphIoResult<()> {
        read_entries(self, file_ids, input)
    }

    fn clear_map(&self) {
        self.clear();
    }
}

impl<O, T> PropertyMapSerializer<O> for Arc<PrimitivePropertyMap<O, T>>
where
    O: 'static,
    T: PropertyValueCodec + Copy,
{
    fn write_map(&self, file_ids: &ObjectToFileIdMap<O>, out: &mut RawWriter<'_>) -> GraphIoResult<()> {
        write_entries(self.as_obj_map(), file_ids, out)
    }

    fn read_map(&self, file_ids: &FileIdToObjectMap<O>, input: &mut RawReader<'_>) -> GraphIoResult<()> {
        read_entries(self.as_obj_map(), file_ids, input)
    }

    fn clear_map(&self) {
        self.clear();
    }
}

fn write_entries<O, T: PropertyValueCodec>(
    map: &ObjPropertyMap<O, T>,
    file_ids: &ObjectToFileIdMap<O>,
    out: &mut RawWriter<'_>,
) -> GraphIoResult<()> {
    let mut entries = Vec::with_capacity(map.len());
    for (id, value) in map.entries() {
        match file_ids.file_id_of(id) {
            Some(file_id) => entries.push((file_id, value)),
            None => warn!("Skipping property of object {} that was not written", id),
        }
    }

    out.write_int(entries.len() as i32)?;
    for (file_id, _) in &entries {
        out.write_int(*file_id)?;
    }
    for (_, value) in &entries {
        value.write_value(out)?;
    }
    Ok(())
}

fn read_entries<O, T: PropertyValueCodec>(
    map: &ObjPropertyMap<O, T>,
    file_ids: &FileIdToObjectMap<O>,
    input: &mut RawReader<'_>,
) -> GraphIoResult<()> {
    let n = input.read_count("property entry count")?;
    let mut ids = Vec::with_capacity(capacity_hint(n));
    for _ in 0..n {
        let file_id = input.read_int()?;
        let id = file_ids.object_id(file_id).ok_or(GraphIoError::Invalid {
            what: "property file id",
            value: file_id as i64,
        })?;
        ids.push(id);
    }
    for id in ids {
        map.set_by_id(id, T::read_value(input)?);
    }
    Ok(())
}

/// Named property map serializers, written in registration order.
pub struct PropertyMapSerializers<O> {
    serializers: IndexMap<String, Box<dyn PropertyMapSerializer<O>>>,
}

impl<O> PropertyMapSerializers<O> {
    pub fn new() -> Self {
        Self {
            serializers: IndexMap::new(),
        }
    }

    /// Register `serializer` under `name`, replacing any previous one.
    pub fn put(&mut self, name: impl Into<String>, serializer: impl PropertyMapSerializer<O> + 'static) {
        self.serializers.insert(name.into(), Box::new(serializer));
    }

    pub fn get(&self, name: &str) -> Option<&dyn PropertyMapSerializer<O>> {
        self.serializers.get(name).map(|s| s.as_ref())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.serializers.shift_remove(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.serializers.keys().map(String::as_str)
    }

    pub fn clear_maps(&self) {
        for serializer in self.serializers.values() {
            serializer.clear_map();
        }
    }

    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }
}

impl<O> Default for PropertyMapSerializers<O> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_property_maps<O>(
    file_ids: &ObjectToFileIdMap<O>,
    serializers: &PropertyMapSerializers<O>,
    out: &mut RawWriter<'_>,
) -> GraphIoResult<()> {
    out.write_int(serializers.len() as i32)?;
    for (name, serializer) in &serializers.serializers {
        debug!("Writing property map {}", name);
        out.write_utf(name)?;
        serializer.write_map(file_ids, out)?;
    }
    Ok(())
}

/// Restore property maps. Every stored name must have a registered serializer.
pub fn read_property_maps<O>(
    file_ids: &FileIdToObjectMap<O>,
    serializers: &PropertyMapSerializers<O>,
    input: &mut RawReader<'_>,
) -> GraphIoResult<()> {
    let count = input.read_count("property map count")?;
    for _ in 0..count {
        let name = input.read_utf()?;
        let serializer = serializers
            .get(&name)
            .ok_or_else(|| GraphIoError::NoSerializer(name.clone()))?;
        debug!("Reading property map {}", name);
        serializer.read_map(file_ids, input)?;
    }
    Ok(())
}
