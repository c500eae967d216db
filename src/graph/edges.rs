//! Views over a vertex's adjacency lists.

use super::edge::Edge;
use super::edge_pool::EdgePool;
use super::vertex::Vertex;
use crate::pool::{from_link, NO_INDEX};

/// Which adjacency list(s) of a vertex to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    /// Outgoing first, then incoming.
    Both,
}

/// Index-walking iterator over the edges of one vertex.
///
/// `next` is O(1). [`Edges::len`] and [`Edges::get`] walk from the list
/// head, so they cost O(degree) and O(i). Iteration reads the successor of
/// an edge before handing it out, which makes [`Edges::remove`] of the
/// current edge safe.
pub struct Edges<'a, V: Vertex, E: Edge> {
    edge_pool: &'a EdgePool<V, E>,
    vertex: usize,
    direction: Direction,
    in_outgoing: bool,
    next: i32,
    current: i32,
}

impl<'a, V: Vertex, E: Edge> Edges<'a, V, E> {
    pub(crate) fn new(edge_pool: &'a EdgePool<V, E>, vertex: usize, direction: Direction) -> Self {
        let vertex_pool = edge_pool.vertex_pool();
        let (in_outgoing, next) = match direction {
            Direction::Outgoing | Direction::Both => {
                (true, vertex_pool.first_out_edge_index_of(vertex))
            }
            Direction::Incoming => (false, vertex_pool.first_in_edge_index_of(vertex)),
        };
        Self {
            edge_pool,
            vertex,
            direction,
            in_outgoing,
            next,
            current: NO_INDEX,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn restart(&self) -> Self {
        Self::new(self.edge_pool, self.vertex, self.direction)
    }

    /// Slot index of the next edge, advancing the iterator.
    pub fn next_index(&mut self) -> Option<usize> {
        loop {
            if let Some(index) = from_link(self.next) {
                self.current = self.next;
                self.next = self.edge_pool.next_edge_index_of(index, self.in_outgoing);
                return Some(index);
            }
            if self.in_outgoing && self.direction == Direction::Both {
                self.in_outgoing = false;
                self.next = self
                    .edge_pool
                    .vertex_pool()
                    .first_in_edge_index_of(self.vertex);
                continue;
            }
            self.current = NO_INDEX;
            return None;
        }
    }

    /// Point `edge` at the next edge. Returns `false` when exhausted.
    pub fn next_into(&mut self, edge: &mut E) -> bool {
        match self.next_index() {
            Some(index) => {
                self.edge_pool.get_into(index, edge);
                true
            }
            None => false,
        }
    }

    /// Release the edge returned last, unlinking it from both of its lists.
    /// Returns `false` if there is no current edge.
    ///
    /// This works on the edge pool directly: listeners of a
    /// [`ListenableGraph`](super::ListenableGraph) are not told, and property
    /// maps cleaned up by listeners keep the value of the freed id. Collect
    /// the edges and use `Graph::remove_edge` when listeners must see it.
    pub fn remove(&mut self) -> bool {
        let Some(index) = from_link(self.current) else {
            return false;
        };
        let mut edge = self.edge_pool.tmp_ref();
        self.edge_pool.get_into(index, &mut edge);
        self.edge_pool.release(&edge);
        self.edge_pool.release_tmp_ref(edge);
        self.current = NO_INDEX;
        true
    }

    /// Number of edges in the list(s), counted from the head.
    pub fn len(&self) -> usize {
        let mut walker = self.restart();
        let mut count = 0;
        while walker.next_index().is_some() {
            count += 1;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.restart().next_index().is_none()
    }

    /// Point `edge` at the `i`-th edge counted from the head.
    pub fn get_into<'e>(&self, i: usize, edge: &'e mut E) -> Option<&'e mut E> {
        let mut walker = self.restart();
        for _ in 0..i {
            walker.next_index()?;
        }
        let index = walker.next_index()?;
        Some(self.edge_pool.get_into(index, edge))
    }

    pub fn get(&self, i: usize) -> Option<E> {
        let mut edge = self.edge_pool.create_ref();
        if self.get_into(i, &mut edge).is_some() {
            Some(edge)
        } else {
            self.edge_pool.release_ref(edge);
            None
        }
    }
}

impl<V: Vertex, E: Edge> Iterator for Edges<'_, V, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.next_index().map(|index| self.edge_pool.get(index))
    }
}
