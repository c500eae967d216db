//! Backing stores for fixed-size slots.
//!
//! A [`SlabStorage`] is a flat sequence of equally sized byte records. Two
//! backings exist: [`SingleArrayStorage`] keeps every slot in one `Vec<u8>`,
//! [`MultiArrayStorage`] spreads them over fixed-size slabs so growth never
//! copies existing data and no single allocation exceeds the slab size.

use serde::{Deserialize, Serialize};

/// Default slab size for [`MultiArrayStorage`]: 16 MiB.
pub const DEFAULT_SLAB_BYTES: usize = 16 * 1024 * 1024;

/// Selects the slot backing of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// One contiguous byte array, reallocated on growth.
    #[default]
    SingleArray,
    /// A growable list of fixed-size slabs.
    MultiArray,
}

/// Index-addressed store of fixed-size byte slots.
///
/// Slot access is bounds-checked by slice indexing only; reading past the
/// capacity panics.
pub trait SlabStorage: Send + Sync {
    /// Size of one slot in bytes.
    fn element_size(&self) -> usize;

    /// Number of slots currently backed by memory.
    fn capacity(&self) -> usize;

    /// Grow so that at least `capacity` slots are backed. Existing slot
    /// contents are preserved. Never shrinks.
    fn grow_to(&mut self, capacity: usize);

    fn slot(&self, index: usize) -> &[u8];

    fn slot_mut(&mut self, index: usize) -> &mut [u8];

    /// Exchange the bytes of two slots.
    fn swap(&mut self, i: usize, j: usize);
}

/// Build the backing selected by `kind`.
pub fn new_storage(
    kind: StorageKind,
    element_size: usize,
    capacity: usize,
    slab_bytes: usize,
) -> Box<dyn SlabStorage> {
    match kind {
        StorageKind::SingleArray => Box::new(SingleArrayStorage::new(element_size, capacity)),
        StorageKind::MultiArray => {
            Box::new(MultiArrayStorage::new(element_size, capacity, slab_bytes))
        }
    }
}

/// All slots in one contiguous byte array.
#[derive(Debug, Clone)]
pub struct SingleArrayStorage {
    data: Vec<u8>,
    element_size: usize,
}

impl SingleArrayStorage {
    pub fn new(element_size: usize, capacity: usize) -> Self {
        assert!(element_size > 0, "slots must be at least one byte");
        Self {
            data: vec![0; element_size * capacity],
            element_size,
        }
    }
}

impl SlabStorage for SingleArrayStorage {
    fn element_size(&self) -> usize {
        self.element_size
    }

    fn capacity(&self) -> usize {
        self.data.len() / self.element_size
    }

    fn grow_to(&mut self, capacity: usize) {
        let bytes = capacity * self.element_size;
        if bytes > self.data.len() {
            self.data.resize(bytes, 0);
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> &[u8] {
        let start = index * self.element_size;
        &self.data[start..start + self.element_size]
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        let start = index * self.element_size;
        &mut self.data[start..start + self.element_size]
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let es = self.element_size;
        let (head, tail) = self.data.split_at_mut(hi * es);
        head[lo * es..(lo + 1) * es].swap_with_slice(&mut tail[..es]);
    }
}

/// Slots spread over equally sized slabs. A slot never straddles two slabs.
#[derive(Debug, Clone)]
pub struct MultiArrayStorage {
    slabs: Vec<Box<[u8]>>,
    element_size: usize,
    elements_per_slab: usize,
}

impl MultiArrayStorage {
    pub fn new(element_size: usize, capacity: usize, slab_bytes: usize) -> Self {
        assert!(element_size > 0, "slots must be at least one byte");
        let mut storage = Self {
            slabs: Vec::new(),
            element_size,
            elements_per_slab: (slab_bytes / element_size).max(1),
        };
        storage.grow_to(capacity);
        storage
    }

    pub fn elements_per_slab(&self) -> usize {
        self.elements_per_slab
    }

    pub fn slab_count(&self) -> usize {
        self.slabs.len()
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        let slab = index / self.elements_per_slab;
        let start = (index % self.elements_per_slab) * self.element_size;
        (slab, start)
    }
}

impl SlabStorage for MultiArrayStorage {
    fn element_size(&self) -> usize {
        self.element_size
    }

    fn capacity(&self) -> usize {
        self.slabs.len() * self.elements_per_slab
    }

    fn grow_to(&mut self, capacity: usize) {
        let slab_len = self.elements_per_slab * self.element_size;
        while self.capacity() < capacity {
            self.slabs.push(vec![0u8; slab_len].into_boxed_slice());
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> &[u8] {
        let (slab, start) = self.locate(index);
        &self.slabs[slab][start..start + self.element_size]
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        let (slab, start) = self.locate(index);
        let es = self.element_size;
        &mut self.slabs[slab][start..start + es]
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let es = self.element_size;
        let (slab_i, start_i) = self.locate(i);
        let (slab_j, start_j) = self.locate(j);
        if slab_i == slab_j {
            let (lo, hi) = if start_i < start_j {
                (start_i, start_j)
            } else {
                (start_j, start_i)
            };
            let (head, tail) = self.slabs[slab_i].split_at_mut(hi);
            head[lo..lo + es].swap_with_slice(&mut tail[..es]);
        } else {
            let (lo_slab, lo_start, hi_slab, hi_start) = if slab_i < slab_j {
                (slab_i, start_i, slab_j, start_j)
            } else {
                (slab_j, start_j, slab_i, start_i)
            };
            let (head, tail) = self.slabs.split_at_mut(hi_slab);
            head[lo_slab][lo_start..lo_start + es]
                .swap_with_slice(&mut tail[0][hi_start..hi_start + es]);
        }
    }
}
