//! Half-edge mesh kernel.
//!
//! Entities live in slotted arenas addressed by stable integer ids; a
//! destroyed entity leaves a hole that iteration skips, and ids are never
//! recycled within one mesh. Every undirected edge is represented by two
//! half-edges pointing oppositely, found through the `(from, to)` key
//! index.
//!
//! Invariants maintained across every edit:
//!
//! - for every live directed pair `(a, b)` there is exactly one half-edge
//!   under that key, and its twin is keyed `(b, a)`;
//! - following `next` from `face.edge` enumerates the face's vertices
//!   exactly once;
//! - boundary edges carry `face = None` on one side of the twin pair;
//! - every vertex's `outgoing` names a live half-edge leaving it.

pub mod decimate;
pub mod subdivide;

pub use self::decimate::collapse_edges;
pub use self::subdivide::{catmull_clark_subdivide, loop_subdivide};

use fxhash::FxHashMap;
use log::trace;
use smallvec::SmallVec;

use crate::error::{MeshError, MeshResult};
use crate::math::{Vec3, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Directed edge key: `(from, to)`.
pub type EdgeKey = (VertexId, VertexId);

#[derive(Debug, Clone)]
pub struct MeshVertex {
    pub id: VertexId,
    pub data: Vertex,
    /// Some half-edge leaving this vertex, if any edge does.
    pub outgoing: Option<EdgeId>,
}

#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub id: EdgeId,
    /// The vertex this half-edge points at.
    pub target: VertexId,
    /// The face on this half-edge's side, `None` on a boundary.
    pub face: Option<FaceId>,
    pub twin: EdgeId,
    /// The next half-edge around `face`; `None` for boundary edges.
    pub next: Option<EdgeId>,
}

#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    /// One half-edge of this face's cycle.
    pub edge: EdgeId,
    pub normal: Vec3,
}

type Adjacency<T> = SmallVec<[T; 8]>;

#[derive(Debug, Default, Clone)]
pub struct HalfEdgeMesh {
    vertices: Vec<Option<MeshVertex>>,
    edges: Vec<Option<HalfEdge>>,
    faces: Vec<Option<Face>>,
    edge_map: FxHashMap<EdgeKey, EdgeId>,
}

impl HalfEdgeMesh {
    pub fn new() -> HalfEdgeMesh {
        HalfEdgeMesh::default()
    }

    // ------------------------------------------------------------------
    // accessors

    pub fn vertex(&self, id: VertexId) -> Option<&MeshVertex> {
        self.vertices.get(id.0).and_then(Option::as_ref)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&HalfEdge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0).and_then(Option::as_ref)
    }

    /// Live vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = &MeshVertex> {
        self.vertices.iter().filter_map(Option::as_ref)
    }

    /// Live half-edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &HalfEdge> {
        self.edges.iter().filter_map(Option::as_ref)
    }

    /// Live faces in creation order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter_map(Option::as_ref)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    /// Number of undirected edges (half-edge pairs).
    pub fn edge_count(&self) -> usize {
        self.edges().count() / 2
    }

    pub fn face_count(&self) -> usize {
        self.faces().count()
    }

    /// Number of slots ever allocated for vertices; ids index this range.
    pub fn vertex_slots(&self) -> usize {
        self.vertices.len()
    }

    /// Number of slots ever allocated for faces.
    pub fn face_slots(&self) -> usize {
        self.faces.len()
    }

    /// The directed half-edge from `a` to `b`, if the vertices are
    /// connected.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_map.get(&(a, b)).copied()
    }

    fn edge_ref(&self, id: EdgeId) -> &HalfEdge {
        self.edges[id.0].as_ref().expect("live half-edge")
    }

    fn edge_mut(&mut self, id: EdgeId) -> &mut HalfEdge {
        self.edges[id.0].as_mut().expect("live half-edge")
    }

    fn vertex_ref(&self, id: VertexId) -> &MeshVertex {
        self.vertices[id.0].as_ref().expect("live vertex")
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut MeshVertex {
        self.vertices[id.0].as_mut().expect("live vertex")
    }

    fn check_vertex(&self, id: VertexId) -> MeshResult<()> {
        match self.vertex(id) {
            Some(_) => Ok(()),
            None => Err(MeshError::DeadVertex(id.0)),
        }
    }

    // ------------------------------------------------------------------
    // construction

    pub fn add_vertex(&mut self, data: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Some(MeshVertex { id, data, outgoing: None }));
        id
    }

    /// Look up or create the half-edge pair from `v0` to `v1`. Creation
    /// re-points `v0`'s outgoing edge at the new half-edge.
    fn add_edge(&mut self, v0: VertexId, v1: VertexId) -> EdgeId {
        if let Some(&edge) = self.edge_map.get(&(v0, v1)) {
            return edge;
        }

        let id = EdgeId(self.edges.len());
        let twin = EdgeId(self.edges.len() + 1);
        self.edges.push(Some(HalfEdge { id, target: v1, face: None, twin, next: None }));
        self.edges.push(Some(HalfEdge { id: twin, target: v0, face: None, twin: id, next: None }));

        self.vertex_mut(v0).outgoing = Some(id);
        self.edge_map.insert((v0, v1), id);
        self.edge_map.insert((v1, v0), twin);

        id
    }

    /// Add a face over the given vertices, which must be supplied in
    /// consistent orientation. Shared edges are reused through the key
    /// index; missing ones are created together with their twins.
    pub fn add_face(&mut self, vertex_ids: &[VertexId]) -> MeshResult<FaceId> {
        if vertex_ids.len() < 3 {
            return Err(MeshError::FaceTooSmall(vertex_ids.len()));
        }
        for &id in vertex_ids {
            self.check_vertex(id)?;
        }

        let n = vertex_ids.len();
        let mut edges: Adjacency<EdgeId> = SmallVec::with_capacity(n);
        for i in 0..n {
            edges.push(self.add_edge(vertex_ids[i], vertex_ids[(i + 1) % n]));
        }

        let face_id = FaceId(self.faces.len());
        for i in 0..n {
            let edge = self.edge_mut(edges[i]);
            edge.next = Some(edges[(i + 1) % n]);
            edge.face = Some(face_id);
        }

        let p0 = self.vertex_ref(vertex_ids[0]).data.position.xyz();
        let p1 = self.vertex_ref(vertex_ids[1]).data.position.xyz();
        let p2 = self.vertex_ref(vertex_ids[2]).data.position.xyz();
        let normal = (p1 - p0).cross(p2 - p1).normalize();

        self.faces.push(Some(Face { id: face_id, edge: edges[0], normal }));
        Ok(face_id)
    }

    // ------------------------------------------------------------------
    // queries

    /// All half-edges leaving `vertex`, walking face cycles through twin
    /// jumps. On a boundary the walk restarts from the twin side so every
    /// outgoing edge is still collected exactly once.
    pub fn edges_from_vertex(&self, vertex: VertexId) -> Adjacency<EdgeId> {
        let mut edges: Adjacency<EdgeId> = SmallVec::new();
        let first = match self.vertex(vertex).and_then(|v| v.outgoing) {
            Some(first) => first,
            None => return edges,
        };

        edges.push(first);
        let prime = self.edge_ref(first).target;
        let mut boundary = true;
        let mut edge = first;

        // Bounded by the arena size; malformed meshes terminate instead of
        // spinning.
        for _ in 0..self.edges.len() {
            edge = match self.edge_ref(edge).next {
                Some(next) => next,
                None => break,
            };
            if self.edge_ref(edge).target == prime {
                boundary = false;
                break;
            }
            if self.edge_ref(edge).target == vertex {
                edge = self.edge_ref(edge).twin;
                edges.push(edge);
            }
        }

        if boundary {
            let mut edge = self.edge_ref(first).twin;
            for _ in 0..self.edges.len() {
                edge = match self.edge_ref(edge).next {
                    Some(next) => next,
                    None => break,
                };
                edges.push(edge);
                edge = self.edge_ref(edge).twin;
            }
        }

        edges
    }

    /// The face's vertices in cycle order.
    pub fn vertices_from_face(&self, face: FaceId) -> Adjacency<VertexId> {
        let mut vertices: Adjacency<VertexId> = SmallVec::new();
        let start = self.faces[face.0].as_ref().expect("live face").edge;
        let prime = self.edge_ref(start).target;
        let mut edge = start;
        for _ in 0..self.edges.len() {
            edge = self.edge_ref(edge).next.expect("face cycles are complete");
            let target = self.edge_ref(edge).target;
            vertices.push(target);
            if target == prime {
                break;
            }
        }
        vertices
    }

    /// `(source, target)` of a half-edge.
    pub fn vertices_from_edge(&self, edge: EdgeId) -> (VertexId, VertexId) {
        let e = self.edge_ref(edge);
        (self.edge_ref(e.twin).target, e.target)
    }

    /// Faces incident to `vertex`, one per outgoing edge that has one.
    pub fn faces_from_vertex(&self, vertex: VertexId) -> Adjacency<FaceId> {
        self.edges_from_vertex(vertex)
            .iter()
            .filter_map(|&edge| self.edge_ref(edge).face)
            .collect()
    }

    /// Distinct vertices sharing a face with `vertex`, in discovery order.
    pub fn neighbor_vertices(&self, vertex: VertexId) -> Adjacency<VertexId> {
        let mut neighbors: Adjacency<VertexId> = SmallVec::new();
        for face in self.faces_from_vertex(vertex) {
            for candidate in self.vertices_from_face(face) {
                if candidate != vertex && !neighbors.contains(&candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// Fan-triangulate every live face into a triangle-list vertex buffer,
    /// ready for [`Pipeline::set_vertex_buffer`](crate::Pipeline::set_vertex_buffer).
    pub fn triangulate(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        for face in self.faces() {
            let ids = self.vertices_from_face(face.id);
            for i in 1..ids.len().saturating_sub(1) {
                out.push(self.vertex_ref(ids[0]).data);
                out.push(self.vertex_ref(ids[i]).data);
                out.push(self.vertex_ref(ids[i + 1]).data);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // destructive edits

    /// Remove `vertex` together with its incident faces and edges.
    ///
    /// If the surrounding neighbors form a closed ring of length three or
    /// more, the hole is closed with a new face; otherwise the ring edges
    /// become boundary. Surviving neighbors are re-pointed at live
    /// outgoing edges.
    pub fn delete_vertex(&mut self, vertex: VertexId) -> MeshResult<()> {
        self.check_vertex(vertex)?;
        trace!("delete_vertex {}", vertex.0);

        let outgoing = self.edges_from_vertex(vertex);
        if outgoing.is_empty() {
            self.vertices[vertex.0] = None;
            return Ok(());
        }

        let mut dead_edges: Vec<EdgeId> = Vec::with_capacity(outgoing.len() * 2);
        let mut fan_targets: Vec<VertexId> = Vec::with_capacity(outgoing.len());
        for &edge in &outgoing {
            let target = self.edge_ref(edge).target;
            fan_targets.push(target);
            dead_edges.push(edge);
            dead_edges.push(self.edge_ref(edge).twin);
            self.edge_map.remove(&(vertex, target));
            self.edge_map.remove(&(target, vertex));
        }

        let dead_faces = self.faces_from_vertex(vertex);
        for &face in &dead_faces {
            self.faces[face.0] = None;
        }

        // Walk the hole ring the way the incident faces spelled it out.
        let first = outgoing[0];
        let mut neighbors: Vec<VertexId> = vec![self.edge_ref(first).target];
        let prime = self.edge_ref(first).target;
        let mut closed = false;
        let mut edge = first;
        for _ in 0..self.edges.len() {
            edge = match self.edge_ref(edge).next {
                Some(next) => next,
                None => break,
            };
            let target = self.edge_ref(edge).target;
            if target == prime {
                closed = true;
                break;
            }
            if target == vertex {
                edge = self.edge_ref(edge).twin;
                continue;
            }
            neighbors.push(target);
        }

        for &dead in &dead_edges {
            self.edges[dead.0] = None;
        }

        // Re-point survivors: ring edges first, then any surviving edge
        // between two fan members for neighbors the ring walk missed.
        let n = neighbors.len();
        for i in 0..n {
            let along = self.edge_map.get(&(neighbors[i], neighbors[(i + 1) % n])).copied();
            let back = self.edge_map.get(&(neighbors[i], neighbors[(i + n - 1) % n])).copied();
            if let Some(edge) = along.or(back) {
                self.vertex_mut(neighbors[i]).outgoing = Some(edge);
            }
        }
        for &target in &fan_targets {
            let alive = self
                .vertex_ref(target)
                .outgoing
                .map_or(false, |e| self.edges[e.0].is_some());
            if !alive {
                let replacement = fan_targets
                    .iter()
                    .find_map(|&other| self.edge_map.get(&(target, other)).copied());
                self.vertex_mut(target).outgoing = replacement;
            }
        }

        if closed && neighbors.len() >= 3 {
            self.add_face(&neighbors)?;
        } else {
            // Open hole: demote surviving ring edges to boundary.
            for i in 0..n.saturating_sub(1) {
                if let Some(&edge) = self.edge_map.get(&(neighbors[i], neighbors[i + 1])) {
                    let face = self.edge_ref(edge).face;
                    if face.map_or(false, |f| self.faces[f.0].is_none()) {
                        let e = self.edge_mut(edge);
                        e.face = None;
                        e.next = None;
                    }
                }
            }
        }

        self.vertices[vertex.0] = None;
        Ok(())
    }

    /// Collapse the edge between `v0` and `v1` into a fresh vertex
    /// carrying `data`.
    ///
    /// Every other edge of either endpoint is re-parented onto the new
    /// vertex. Incident faces that degenerate into digons are dissolved,
    /// pairing their outer twins so exactly one half-edge pair survives
    /// per neighbor; larger faces are re-created over their remaining
    /// vertices.
    pub fn join_vertex(&mut self, v0: VertexId, v1: VertexId, data: Vertex) -> MeshResult<VertexId> {
        self.check_vertex(v0)?;
        self.check_vertex(v1)?;
        let collapse = match self.edge_map.get(&(v0, v1)) {
            Some(&edge) => edge,
            None => return Err(MeshError::NotAdjacent(v0.0, v1.0)),
        };
        let collapse_twin = self.edge_ref(collapse).twin;
        let f0 = self.edge_ref(collapse).face;
        let f1 = self.edge_ref(collapse_twin).face;
        trace!("join_vertex {} {} over edge {}", v0.0, v1.0, collapse.0);

        // Capture both fans before any re-targeting disturbs the walks.
        let v0_edges = self.edges_from_vertex(v0);
        let v1_edges = self.edges_from_vertex(v1);

        let new_vertex = self.add_vertex(data);

        let mut reparented: Vec<EdgeId> = Vec::new();
        for (old, other, fan) in [(v0, v1, &v0_edges), (v1, v0, &v1_edges)] {
            for &edge in fan.iter() {
                let target = self.edge_ref(edge).target;
                if target == other {
                    continue;
                }
                self.edge_map.remove(&(old, target));
                self.edge_map.remove(&(target, old));
                let twin = self.edge_ref(edge).twin;
                self.edge_mut(twin).target = new_vertex;
                self.edge_map.insert((new_vertex, target), edge);
                self.edge_map.insert((target, new_vertex), twin);
                reparented.push(edge);
            }
        }

        for face in [f0, f1].iter().flatten().copied() {
            if self.faces[face.0].is_none() {
                continue;
            }
            // The face cycle, minus the collapsing pair.
            let mut cycle: Adjacency<EdgeId> = SmallVec::new();
            let start = self.faces[face.0].as_ref().expect("live face").edge;
            let mut edge = start;
            loop {
                cycle.push(edge);
                edge = self.edge_ref(edge).next.expect("face cycles are complete");
                if edge == start {
                    break;
                }
            }
            let survivors: Adjacency<EdgeId> = cycle
                .iter()
                .copied()
                .filter(|&e| e != collapse && e != collapse_twin)
                .collect();

            if survivors.len() >= 3 {
                let targets: Adjacency<VertexId> =
                    survivors.iter().map(|&e| self.edge_ref(e).target).collect();
                self.faces[face.0] = None;
                self.add_face(&targets)?;
            } else {
                // Digon: drop both inner half-edges and stitch their outer
                // twins into a single pair.
                let (inner_out, inner_in) = if self.edge_ref(survivors[0]).target == new_vertex {
                    (survivors[1], survivors[0])
                } else {
                    (survivors[0], survivors[1])
                };
                let neighbor = self.edge_ref(inner_out).target;
                let keep_out = self.edge_ref(inner_in).twin;
                let keep_in = self.edge_ref(inner_out).twin;

                self.edge_mut(keep_out).twin = keep_in;
                self.edge_mut(keep_in).twin = keep_out;
                self.edge_map.insert((new_vertex, neighbor), keep_out);
                self.edge_map.insert((neighbor, new_vertex), keep_in);
                self.vertex_mut(neighbor).outgoing = Some(keep_in);

                self.faces[face.0] = None;
                self.edges[inner_out.0] = None;
                self.edges[inner_in.0] = None;
            }
        }

        self.edge_map.remove(&(v0, v1));
        self.edge_map.remove(&(v1, v0));
        self.edges[collapse.0] = None;
        self.edges[collapse_twin.0] = None;
        self.vertices[v0.0] = None;
        self.vertices[v1.0] = None;

        let outgoing = reparented.into_iter().find(|e| self.edges[e.0].is_some());
        self.vertex_mut(new_vertex).outgoing = outgoing;

        Ok(new_vertex)
    }
}
