//! Quadric-error-metric edge collapse decimation

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::{EdgeId, HalfEdgeMesh, VertexId};
use crate::error::MeshResult;
use crate::math::{vertex_lerp, Mat4, Vec3, Vec4, Vertex};

/// A collapse candidate: the cheapest record sits on top of the heap.
struct EdgeRecord {
    cost: f32,
    edge: EdgeId,
    v0: VertexId,
    v1: VertexId,
    vertex: Vertex,
}

impl PartialEq for EdgeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for EdgeRecord {}

impl PartialOrd for EdgeRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeRecord {
    // Reversed, so the BinaryHeap pops the minimum cost first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

/// The plane quadric `K` for a face with unit normal `n` and plane offset
/// `d` (`n·p + d = 0`).
fn plane_quadric(n: Vec3, d: f32) -> Mat4 {
    Mat4::from_rows(
        Vec4::new(n.x * n.x, n.x * n.y, n.x * n.z, n.x * d),
        Vec4::new(n.x * n.y, n.y * n.y, n.y * n.z, n.y * d),
        Vec4::new(n.x * n.z, n.y * n.z, n.z * n.z, n.z * d),
        Vec4::new(n.x * d, n.y * d, n.z * d, d * d),
    )
}

/// A collapse must not create doubled edges: the endpoints may share only
/// the apex vertices of the triangles flanking the collapsing edge.
fn collapse_is_safe(mesh: &HalfEdgeMesh, edge: EdgeId, v0: VertexId, v1: VertexId) -> bool {
    let mut shared = 0;
    for outgoing in mesh.edges_from_vertex(v0) {
        let target = mesh.edge_ref(outgoing).target;
        if target != v1 && mesh.find_edge(v1, target).is_some() {
            shared += 1;
        }
    }

    let e = mesh.edge_ref(edge);
    let mut triangle_flanks = 0;
    for face in [e.face, mesh.edge_ref(e.twin).face].iter().flatten() {
        if mesh.vertices_from_face(*face).len() == 3 {
            triangle_flanks += 1;
        }
    }

    shared == triangle_flanks
}

fn edge_record(
    mesh: &HalfEdgeMesh,
    vertex_quadrics: &[Option<Mat4>],
    edge: EdgeId,
    v0: VertexId,
    v1: VertexId,
) -> EdgeRecord {
    let quadric = vertex_quadrics[v0.0].expect("endpoint is live")
        + vertex_quadrics[v1.0].expect("endpoint is live");

    // Constrain the solve with the homogeneous row.
    let mut constrained = quadric;
    constrained.rows[0].w = 0.0;
    constrained.rows[1].w = 0.0;
    constrained.rows[2].w = 0.0;
    constrained.rows[3].w = 1.0;

    let d0 = &mesh.vertex_ref(v0).data;
    let d1 = &mesh.vertex_ref(v1).data;
    let mut vertex = vertex_lerp(d0, d1, 0.5);
    if constrained.determinant() >= 1e-6 {
        vertex.position = constrained.inverse().mul_vec4(Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    let cost = quadric.mul_vec4(vertex.position).dot(vertex.position);
    EdgeRecord { cost, edge, v0, v1, vertex }
}

/// Collapse `n` edges in ascending cost order, returning how many actually
/// collapsed (fewer when the mesh runs out of viable candidates).
///
/// Each collapse assigns the new vertex the summed endpoint quadrics and
/// re-enqueues records for its fan; records referencing geometry an
/// earlier collapse removed are discarded when popped.
pub fn collapse_edges(mesh: &mut HalfEdgeMesh, n: usize) -> MeshResult<usize> {
    // Per-face plane quadrics.
    let mut face_quadrics: Vec<Option<Mat4>> = vec![None; mesh.face_slots()];
    for face in mesh.faces() {
        let p0 = mesh.vertex_ref(mesh.edge_ref(face.edge).target).data.position.xyz();
        let d = -face.normal.dot(p0);
        face_quadrics[face.id.0] = Some(plane_quadric(face.normal, d));
    }

    // Per-vertex sums over the incident faces.
    let mut vertex_quadrics: Vec<Option<Mat4>> = vec![None; mesh.vertex_slots()];
    for vertex in mesh.vertices() {
        let mut quadric = Mat4::default();
        for face in mesh.faces_from_vertex(vertex.id) {
            quadric = quadric + face_quadrics[face.0].expect("incident face is live");
        }
        vertex_quadrics[vertex.id.0] = Some(quadric);
    }

    // One record per undirected edge.
    let mut records = BinaryHeap::new();
    for edge in mesh.edges() {
        let (v0, v1) = mesh.vertices_from_edge(edge.id);
        if v0 > v1 {
            continue;
        }
        records.push(edge_record(mesh, &vertex_quadrics, edge.id, v0, v1));
    }

    let mut collapsed = 0;
    while collapsed < n {
        let record = match records.pop() {
            Some(record) => record,
            None => break,
        };

        // Stale records reference edges an earlier collapse removed or
        // re-parented away.
        if mesh.find_edge(record.v0, record.v1) != Some(record.edge) {
            continue;
        }
        if !collapse_is_safe(mesh, record.edge, record.v0, record.v1) {
            continue;
        }

        let joined = mesh.join_vertex(record.v0, record.v1, record.vertex)?;
        collapsed += 1;
        debug!(
            "collapse {}/{}: edge {} at cost {}",
            collapsed, n, record.edge.0, record.cost
        );

        // The new vertex inherits the summed endpoint quadrics, and its
        // fan goes back on the heap.
        let joined_quadric = vertex_quadrics[record.v0.0].expect("endpoint quadric")
            + vertex_quadrics[record.v1.0].expect("endpoint quadric");
        if vertex_quadrics.len() < mesh.vertex_slots() {
            vertex_quadrics.resize(mesh.vertex_slots(), None);
        }
        vertex_quadrics[joined.0] = Some(joined_quadric);

        for edge in mesh.edges_from_vertex(joined) {
            let target = mesh.edge_ref(edge).target;
            records.push(edge_record(mesh, &vertex_quadrics, edge, joined, target));
        }
    }

    Ok(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Regular icosahedron: 12 vertices, 30 edges, 20 faces.
    fn icosahedron() -> HalfEdgeMesh {
        let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
        let coords: [(f32, f32, f32); 12] = [
            (-1.0, phi, 0.0),
            (1.0, phi, 0.0),
            (-1.0, -phi, 0.0),
            (1.0, -phi, 0.0),
            (0.0, -1.0, phi),
            (0.0, 1.0, phi),
            (0.0, -1.0, -phi),
            (0.0, 1.0, -phi),
            (phi, 0.0, -1.0),
            (phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
        ];
        let faces: [[usize; 3]; 20] = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        let mut mesh = HalfEdgeMesh::new();
        let ids: Vec<VertexId> = coords
            .iter()
            .map(|&(x, y, z)| mesh.add_vertex(Vertex::from_position(x, y, z)))
            .collect();
        for face in &faces {
            mesh.add_face(&[ids[face[0]], ids[face[1]], ids[face[2]]]).unwrap();
        }
        mesh
    }

    fn euler_characteristic(mesh: &HalfEdgeMesh) -> i64 {
        mesh.vertex_count() as i64 - mesh.edge_count() as i64 + mesh.face_count() as i64
    }

    #[test]
    fn icosahedron_is_well_formed() {
        let mesh = icosahedron();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.edge_count(), 30);
        assert_eq!(mesh.face_count(), 20);
        assert_eq!(euler_characteristic(&mesh), 2);
    }

    #[test]
    fn collapsing_five_edges_keeps_the_sphere_topology() {
        let mut mesh = icosahedron();
        let collapsed = collapse_edges(&mut mesh, 5).unwrap();
        assert_eq!(collapsed, 5);
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(euler_characteristic(&mesh), 2);
        // Still closed: every half-edge keeps a face.
        assert!(mesh.edges().all(|e| e.face.is_some()));
    }

    #[test]
    fn collapse_count_is_bounded_by_viable_edges() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(Vertex::from_position(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vertex::from_position(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vertex::from_position(0.0, 1.0, 0.0));
        mesh.add_face(&[a, b, c]).unwrap();
        // A lone triangle offers one collapse at most.
        let collapsed = collapse_edges(&mut mesh, 10).unwrap();
        assert!(collapsed <= 1);
    }

    #[test]
    fn optimal_vertex_of_a_flat_pair_stays_in_plane() {
        // Two coplanar triangles: any collapse target must stay in the
        // z = 0 plane, where the quadric error is zero.
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(Vertex::from_position(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vertex::from_position(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vertex::from_position(1.0, 1.0, 0.0));
        let d = mesh.add_vertex(Vertex::from_position(0.0, 1.0, 0.0));
        mesh.add_face(&[a, b, c]).unwrap();
        mesh.add_face(&[a, c, d]).unwrap();

        let collapsed = collapse_edges(&mut mesh, 1).unwrap();
        assert_eq!(collapsed, 1);
        for vertex in mesh.vertices() {
            assert!(vertex.data.position.z.abs() < 1e-4);
        }
    }
}
