//! Loop and Catmull-Clark subdivision.
//!
//! Both schemes build a fresh mesh: new vertex positions and colors are
//! computed from the source mesh, then the refined topology is assembled
//! face by face. Positions and colors are the interpolated channels;
//! normals and texture coordinates of inserted vertices are left default,
//! to be derived by the caller if needed.

use fxhash::FxHashMap;

use super::{EdgeKey, HalfEdgeMesh, VertexId};
use crate::error::{MeshError, MeshResult};
use crate::math::{Vec4, Vertex};

fn blend(position: Vec4, color: Vec4) -> Vertex {
    Vertex {
        position,
        color,
        ..Vertex::default()
    }
}

/// One round of Loop subdivision. The input must be a triangle mesh;
/// boundaries are allowed.
pub fn loop_subdivide(mesh: &HalfEdgeMesh) -> MeshResult<HalfEdgeMesh> {
    let mut result = HalfEdgeMesh::new();

    // Reposition the existing (even) vertices.
    let mut even: Vec<Option<VertexId>> = vec![None; mesh.vertex_slots()];
    for vertex in mesh.vertices() {
        let neighbors = mesh.neighbor_vertices(vertex.id);
        let n = neighbors.len() as f32;
        let u = if neighbors.len() == 3 { 3.0 / 16.0 } else { 3.0 / (8.0 * n) };

        let mut position = (1.0 - n * u) * vertex.data.position;
        let mut color = (1.0 - n * u) * vertex.data.color;
        for neighbor in neighbors {
            let data = &mesh.vertex_ref(neighbor).data;
            position = position + u * data.position;
            color = color + u * data.color;
        }

        even[vertex.id.0] = Some(result.add_vertex(blend(position, color)));
    }

    // One odd vertex per undirected edge.
    let mut odd: FxHashMap<EdgeKey, VertexId> = FxHashMap::default();
    for edge in mesh.edges() {
        let (v0, v1) = mesh.vertices_from_edge(edge.id);
        if odd.contains_key(&(v0, v1)) {
            continue;
        }

        let d0 = &mesh.vertex_ref(v0).data;
        let d1 = &mesh.vertex_ref(v1).data;

        let boundary = edge.face.is_none() || mesh.edge_ref(edge.twin).face.is_none();
        let data = if boundary {
            blend(0.5 * (d0.position + d1.position), 0.5 * (d0.color + d1.color))
        } else {
            // Opposite vertices of the two adjacent triangles.
            let v2 = mesh.edge_ref(edge.next.expect("interior edges cycle")).target;
            let twin = mesh.edge_ref(edge.twin);
            let v3 = mesh.edge_ref(twin.next.expect("interior edges cycle")).target;
            let d2 = &mesh.vertex_ref(v2).data;
            let d3 = &mesh.vertex_ref(v3).data;
            blend(
                3.0 / 8.0 * (d0.position + d1.position) + 1.0 / 8.0 * (d2.position + d3.position),
                3.0 / 8.0 * (d0.color + d1.color) + 1.0 / 8.0 * (d2.color + d3.color),
            )
        };

        let inserted = result.add_vertex(data);
        odd.insert((v0, v1), inserted);
        odd.insert((v1, v0), inserted);
    }

    // Every triangle becomes four: the central triangle of odd vertices,
    // plus one corner triangle per even vertex.
    for face in mesh.faces() {
        if mesh.vertices_from_face(face.id).len() != 3 {
            return Err(MeshError::NotTriangular(face.id.0));
        }

        let e0 = face.edge;
        let e1 = mesh.edge_ref(e0).next.expect("triangle cycles");
        let e2 = mesh.edge_ref(e1).next.expect("triangle cycles");
        let edges = [e0, e1, e2];

        let mut center = [VertexId(0); 3];
        for i in 0..3 {
            let key = (
                mesh.edge_ref(edges[i]).target,
                mesh.edge_ref(edges[(i + 2) % 3]).target,
            );
            center[i] = odd[&key];
        }
        result.add_face(&center)?;

        for i in 0..3 {
            let corner = mesh.edge_ref(edges[(i + 2) % 3]).target;
            let triangle = [
                even[corner.0].expect("even vertex was emitted"),
                center[i],
                center[(i + 2) % 3],
            ];
            result.add_face(&triangle)?;
        }
    }

    Ok(result)
}

/// One round of Catmull-Clark subdivision over an arbitrary polygon mesh.
pub fn catmull_clark_subdivide(mesh: &HalfEdgeMesh) -> MeshResult<HalfEdgeMesh> {
    let mut result = HalfEdgeMesh::new();

    // Face points: the centroid of each face, indexed by every directed
    // edge of that face.
    let mut face_points: FxHashMap<EdgeKey, VertexId> = FxHashMap::default();
    for face in mesh.faces() {
        let ring = mesh.vertices_from_face(face.id);
        let n = ring.len();

        let mut position = Vec4::ZERO;
        let mut color = Vec4::ZERO;
        for &id in &ring {
            let data = &mesh.vertex_ref(id).data;
            position = position + data.position;
            color = color + data.color;
        }
        let inserted = result.add_vertex(blend(position / n as f32, color / n as f32));

        for i in 0..n {
            face_points.insert((ring[i], ring[(i + 1) % n]), inserted);
        }
    }

    // Edge points: endpoint average pulled toward the adjacent face
    // points, when those exist (boundary edges only see their endpoints).
    let mut edge_points: FxHashMap<EdgeKey, VertexId> = FxHashMap::default();
    for edge in mesh.edges() {
        let (v0, v1) = mesh.vertices_from_edge(edge.id);
        if edge_points.contains_key(&(v0, v1)) {
            continue;
        }

        let d0 = &mesh.vertex_ref(v0).data;
        let d1 = &mesh.vertex_ref(v1).data;
        let mut count = 2.0;
        let mut position = d0.position + d1.position;
        let mut color = d0.color + d1.color;

        for key in [(v0, v1), (v1, v0)] {
            if let Some(&face_point) = face_points.get(&key) {
                let data = &result.vertex_ref(face_point).data;
                position = position + data.position;
                color = color + data.color;
                count += 1.0;
            }
        }

        let inserted = result.add_vertex(blend(position / count, color / count));
        edge_points.insert((v0, v1), inserted);
        edge_points.insert((v1, v0), inserted);
    }

    // Even vertices: (4v + 2 Σ edge points + Σ face points) / (4 + 3n).
    let mut even: Vec<Option<VertexId>> = vec![None; mesh.vertex_slots()];
    for vertex in mesh.vertices() {
        let mut count = 4.0;
        let mut position = 4.0 * vertex.data.position;
        let mut color = 4.0 * vertex.data.color;

        for edge in mesh.edges_from_vertex(vertex.id) {
            let target = mesh.edge_ref(edge).target;

            let edge_point = &result.vertex_ref(edge_points[&(vertex.id, target)]).data;
            position = position + 2.0 * edge_point.position;
            color = color + 2.0 * edge_point.color;
            count += 2.0;

            if let Some(&face_point) = face_points.get(&(vertex.id, target)) {
                let data = &result.vertex_ref(face_point).data;
                position = position + data.position;
                color = color + data.color;
                count += 1.0;
            }
        }

        even[vertex.id.0] = Some(result.add_vertex(blend(position / count, color / count)));
    }

    // Every n-gon becomes n quads around its face point.
    for face in mesh.faces() {
        let ring = mesh.vertices_from_face(face.id);
        let n = ring.len();
        let center = face_points[&(ring[0], ring[1])];

        for i in 0..n {
            let quad = [
                even[ring[i].0].expect("even vertex was emitted"),
                edge_points[&(ring[i], ring[(i + 1) % n])],
                center,
                edge_points[&(ring[(i + n - 1) % n], ring[i])],
            ];
            result.add_face(&quad)?;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn triangle_mesh() -> HalfEdgeMesh {
        // A square split into two triangles along the diagonal.
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(Vertex::from_position(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vertex::from_position(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vertex::from_position(1.0, 1.0, 0.0));
        let d = mesh.add_vertex(Vertex::from_position(0.0, 1.0, 0.0));
        mesh.add_face(&[a, b, c]).unwrap();
        mesh.add_face(&[a, c, d]).unwrap();
        mesh
    }

    fn tetrahedron() -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(Vertex::from_position(1.0, 1.0, 1.0));
        let b = mesh.add_vertex(Vertex::from_position(1.0, -1.0, -1.0));
        let c = mesh.add_vertex(Vertex::from_position(-1.0, 1.0, -1.0));
        let d = mesh.add_vertex(Vertex::from_position(-1.0, -1.0, 1.0));
        mesh.add_face(&[a, c, b]).unwrap();
        mesh.add_face(&[a, b, d]).unwrap();
        mesh.add_face(&[a, d, c]).unwrap();
        mesh.add_face(&[b, c, d]).unwrap();
        mesh
    }

    fn boundary_edge_count(mesh: &HalfEdgeMesh) -> usize {
        mesh.edges().filter(|e| e.face.is_none()).count()
    }

    #[test]
    fn loop_rejects_polygons() {
        let (mesh, _) = crate::mesh::tests::cube();
        assert!(loop_subdivide(&mesh).is_err());
    }

    #[test]
    fn loop_on_closed_mesh_adds_one_vertex_per_edge() {
        let mesh = tetrahedron();
        let refined = loop_subdivide(&mesh).unwrap();
        // V' = V + E, F' = 4F, closed stays closed.
        assert_eq!(refined.vertex_count(), 4 + 6);
        assert_eq!(refined.face_count(), 16);
        assert_eq!(boundary_edge_count(&refined), 0);
    }

    #[test]
    fn loop_preserves_boundary_edge_count() {
        let mesh = triangle_mesh();
        let refined = loop_subdivide(&mesh).unwrap();
        assert_eq!(refined.vertex_count(), 4 + 5);
        assert_eq!(refined.face_count(), 8);
        // Each of the four boundary edges splits in two.
        assert_eq!(boundary_edge_count(&mesh), 4);
        assert_eq!(boundary_edge_count(&refined), 8);
    }

    #[test]
    fn loop_midpoints_boundary_edges() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(Vertex {
            position: crate::math::Vec4::new(0.0, 0.0, 0.0, 1.0),
            color: crate::math::Vec4::new(1.0, 0.0, 0.0, 1.0),
            texcoord: Vec2::ZERO,
            normal: crate::math::Vec3::ZERO,
        });
        let b = mesh.add_vertex(Vertex {
            position: crate::math::Vec4::new(2.0, 0.0, 0.0, 1.0),
            color: crate::math::Vec4::new(0.0, 1.0, 0.0, 1.0),
            texcoord: Vec2::ZERO,
            normal: crate::math::Vec3::ZERO,
        });
        let c = mesh.add_vertex(Vertex::from_position(0.0, 2.0, 0.0));
        mesh.add_face(&[a, b, c]).unwrap();

        let refined = loop_subdivide(&mesh).unwrap();
        // The odd vertex on the a-b boundary edge sits at the midpoint and
        // blends the endpoint colors evenly.
        let found = refined.vertices().any(|v| {
            (v.data.position.x - 1.0).abs() < 1e-6
                && v.data.position.y.abs() < 1e-6
                && (v.data.color.x - 0.5).abs() < 1e-6
                && (v.data.color.y - 0.5).abs() < 1e-6
        });
        assert!(found);
    }

    #[test]
    fn catmull_clark_cube_counts() {
        let (mesh, _) = crate::mesh::tests::cube();
        let refined = catmull_clark_subdivide(&mesh).unwrap();
        // V' = V + E + F, E' = 4E, F' = n-gons split into n quads.
        assert_eq!(refined.vertex_count(), 8 + 12 + 6);
        assert_eq!(refined.edge_count(), 48);
        assert_eq!(refined.face_count(), 24);
        assert_eq!(boundary_edge_count(&refined), 0);
        for face in refined.faces() {
            assert_eq!(refined.vertices_from_face(face.id).len(), 4);
        }
    }

    #[test]
    fn catmull_clark_face_point_is_centroid() {
        let (mesh, _) = crate::mesh::tests::cube();
        let refined = catmull_clark_subdivide(&mesh).unwrap();
        // Face points of a unit cube land at the face centers, e.g.
        // (0, 0, ±1): the first six inserted vertices are the face points.
        let face_centers: Vec<_> = refined.vertices().take(6).collect();
        for center in face_centers {
            let p = center.data.position;
            let ones = [p.x.abs(), p.y.abs(), p.z.abs()]
                .iter()
                .filter(|a| (**a - 1.0).abs() < 1e-6)
                .count();
            let zeros = [p.x.abs(), p.y.abs(), p.z.abs()]
                .iter()
                .filter(|a| **a < 1e-6)
                .count();
            assert_eq!((ones, zeros), (1, 2), "face point off-center: {:?}", p);
        }
    }
}
