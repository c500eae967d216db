//! Tracking model: spots (detections in 3D space and time) joined by links.

use crate::config::GraphConfig;
use crate::graph::{
    Edge, EdgePool, Graph, ListenableGraph, ReadOnlyGraph, Vertex, VertexPool, EDGE_HEADER_SIZE,
    VERTEX_HEADER_SIZE,
};
use crate::io::{
    read_property_maps, read_raw_graph, write_property_maps, write_raw_graph, FileIdToGraphMap,
    GraphIoResult, GraphToFileIdMap, PoolGraphSerializer, PropertyMapSerializers, RawReader,
    RawWriter,
};
use crate::pool::byte_utils::{DOUBLE_SIZE, INT_SIZE};
use crate::pool::{ByteMappedElement, MappedElement, PoolObject, NO_INDEX};
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::debug;

pub const NUM_DIMENSIONS: usize = 3;

const ID_OFFSET: usize = VERTEX_HEADER_SIZE;
const POSITION_OFFSET: usize = ID_OFFSET + INT_SIZE;
const RADIUS_OFFSET: usize = POSITION_OFFSET + NUM_DIMENSIONS * DOUBLE_SIZE;
const TIMEPOINT_OFFSET: usize = RADIUS_OFFSET + DOUBLE_SIZE;
const SPOT_SIZE: usize = TIMEPOINT_OFFSET + INT_SIZE;

/// A detection: position, radius and timepoint, plus a model-wide id.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Spot {
    access: ByteMappedElement,
}

impl Spot {
    /// Id assigned by the owning [`ModelGraph`]. Unlike the pool index it
    /// is never reused within one model.
    pub fn internal_id(&self) -> i32 {
        self.access.get_int(ID_OFFSET)
    }

    fn set_internal_id(&self, id: i32) {
        self.access.put_int(ID_OFFSET, id);
    }

    pub fn position(&self) -> [f64; NUM_DIMENSIONS] {
        std::array::from_fn(|d| self.coordinate(d))
    }

    pub fn coordinate(&self, d: usize) -> f64 {
        debug_assert!(d < NUM_DIMENSIONS);
        self.access.get_double(POSITION_OFFSET + d * DOUBLE_SIZE)
    }

    pub fn set_position(&self, position: [f64; NUM_DIMENSIONS]) {
        for (d, value) in position.into_iter().enumerate() {
            self.access.put_double(POSITION_OFFSET + d * DOUBLE_SIZE, value);
        }
    }

    pub fn radius(&self) -> f64 {
        self.access.get_double(RADIUS_OFFSET)
    }

    pub fn set_radius(&self, radius: f64) {
        self.access.put_double(RADIUS_OFFSET, radius);
    }

    pub fn timepoint(&self) -> i32 {
        self.access.get_int(TIMEPOINT_OFFSET)
    }

    pub fn set_timepoint(&self, timepoint: i32) {
        self.access.put_int(TIMEPOINT_OFFSET, timepoint);
    }
}

impl PoolObject for Spot {
    const SIZE_IN_BYTES: usize = SPOT_SIZE;

    fn from_access(access: ByteMappedElement) -> Self {
        Self { access }
    }

    fn access(&self) -> &ByteMappedElement {
        &self.access
    }

    fn access_mut(&mut self) -> &mut ByteMappedElement {
        &mut self.access
    }

    fn set_to_uninitialized_state(&self) {
        self.set_internal_id(NO_INDEX);
    }
}

impl Vertex for Spot {}

impl std::fmt::Debug for Spot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.access.is_pointed() {
            return f.write_str("Spot(unpointed)");
        }
        f.debug_struct("Spot")
            .field("id", &self.internal_id())
            .field("t", &self.timepoint())
            .field("position", &self.position())
            .field("radius", &self.radius())
            .finish()
    }
}

/// Link between two spots, usually from one timepoint to the next.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Link {
    access: ByteMappedElement,
}

impl PoolObject for Link {
    const SIZE_IN_BYTES: usize = EDGE_HEADER_SIZE;

    fn from_access(access: ByteMappedElement) -> Self {
        Self { access }
    }

    fn access(&self) -> &ByteMappedElement {
        &self.access
    }

    fn access_mut(&mut self) -> &mut ByteMappedElement {
        &mut self.access
    }
}

impl Edge for Link {}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.access.is_pointed() {
            return f.write_str("Link(unpointed)");
        }
        write!(
            f,
            "Link({}->{})",
            self.source_vertex_internal_pool_index(),
            self.target_vertex_internal_pool_index()
        )
    }
}

/// Graph of spots and links that hands out spot ids.
///
/// Each model owns its id counter, so independent models never influence
/// each other's ids.
pub struct ModelGraph {
    graph: ListenableGraph<Spot, Link>,
    id_counter: i32,
    vertex_properties: PropertyMapSerializers<Spot>,
}

impl ModelGraph {
    pub fn new(config: &GraphConfig) -> Self {
        Self {
            graph: ListenableGraph::new(config),
            id_counter: 0,
            vertex_properties: PropertyMapSerializers::new(),
        }
    }

    pub fn graph(&self) -> &ListenableGraph<Spot, Link> {
        &self.graph
    }

    /// Direct access for listener registration and pausing. Structural
    /// changes made through it bypass id assignment.
    pub fn graph_mut(&mut self) -> &mut ListenableGraph<Spot, Link> {
        &mut self.graph
    }

    /// Property maps saved and loaded together with the graph.
    pub fn vertex_property_serializers(&mut self) -> &mut PropertyMapSerializers<Spot> {
        &mut self.vertex_properties
    }

    /// Id the next added spot will get.
    pub fn next_id(&self) -> i32 {
        self.id_counter
    }

    pub fn add_spot_into<'a>(
        &mut self,
        timepoint: i32,
        position: [f64; NUM_DIMENSIONS],
        radius: f64,
        spot: &'a mut Spot,
    ) -> &'a mut Spot {
        let id = self.id_counter;
        self.id_counter += 1;
        self.graph.add_vertex_with_into(spot, |s| {
            s.set_internal_id(id);
            s.set_position(position);
            s.set_radius(radius);
            s.set_timepoint(timepoint);
        })
    }

    pub fn add_spot(&mut self, timepoint: i32, position: [f64; NUM_DIMENSIONS], radius: f64) -> Spot {
        let mut spot = self.graph.vertex_ref();
        self.add_spot_into(timepoint, position, radius, &mut spot);
        spot
    }

    pub fn add_link_into<'a>(&mut self, source: &Spot, target: &Spot, link: &'a mut Link) -> Option<&'a mut Link> {
        self.graph.add_edge_into(source, target, link)
    }

    pub fn add_link(&mut self, source: &Spot, target: &Spot) -> Option<Link> {
        self.graph.add_edge(source, target)
    }

    pub fn remove_spot(&mut self, spot: &Spot) {
        self.graph.remove_vertex(spot);
    }

    pub fn remove_link(&mut self, link: &Link) {
        self.graph.remove_edge(link);
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.vertex_properties.clear_maps();
        self.id_counter = 0;
    }

    /// Write spots, links and registered vertex property maps.
    pub fn save_raw(&self, out: &mut dyn Write) -> GraphIoResult<GraphToFileIdMap<Spot, Link>> {
        let mut writer = RawWriter::new(out);
        let file_ids = write_raw_graph(&self.graph, &raw_serializer(), &mut writer)?;
        write_property_maps(file_ids.vertices(), &self.vertex_properties, &mut writer)?;
        writer.flush()?;
        Ok(file_ids)
    }

    /// Replace the content of this model with a raw file.
    ///
    /// Listeners see no per-entity events, only a single `graph_rebuilt` at
    /// the end, which is sent even if reading fails half way.
    pub fn load_raw(&mut self, input: &mut dyn Read) -> GraphIoResult<FileIdToGraphMap<Spot, Link>> {
        self.graph.pause_listeners();
        let result = self.load_raw_paused(input);
        self.graph.resume_listeners();
        result
    }

    fn load_raw_paused(&mut self, input: &mut dyn Read) -> GraphIoResult<FileIdToGraphMap<Spot, Link>> {
        self.clear();
        let mut reader = RawReader::new(input);
        let file_ids = read_raw_graph(&mut self.graph, &raw_serializer(), &mut reader)?;
        read_property_maps(file_ids.vertices(), &self.vertex_properties, &mut reader)?;

        let mut max_id = NO_INDEX;
        let mut spot = self.graph.vertex_ref();
        let mut spots = self.graph.vertices();
        while spots.next_into(&mut spot) {
            max_id = max_id.max(spot.internal_id());
        }
        self.graph.release_vertex_ref(spot);
        self.id_counter = max_id + 1;
        debug!("Loaded model, next spot id {}", self.id_counter);
        Ok(file_ids)
    }
}

fn raw_serializer() -> PoolGraphSerializer {
    PoolGraphSerializer::payload::<Spot, Link>()
}

impl Default for ModelGraph {
    fn default() -> Self {
        Self::new(&GraphConfig::default())
    }
}

impl ReadOnlyGraph<Spot, Link> for ModelGraph {
    fn vertex_pool(&self) -> &Arc<VertexPool<Spot>> {
        self.graph.vertex_pool()
    }

    fn edge_pool(&self) -> &Arc<EdgePool<Spot, Link>> {
        self.graph.edge_pool()
    }
}

impl std::fmt::Debug for ModelGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGraph")
            .field("graph", &self.graph)
            .field("next_id", &self.id_counter)
            .finish()
    }
}
