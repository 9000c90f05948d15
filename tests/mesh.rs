//! Mesh kernel scenarios: topology invariants across edit sequences, the
//! subdivision count formulas, decimation, and the mesh-to-pipeline flow.

use softrast::math::{Vec4, Vertex};
use softrast::mesh::{catmull_clark_subdivide, collapse_edges, loop_subdivide, HalfEdgeMesh, VertexId};
use softrast::{GouraudShader, Pipeline};

fn cube() -> (HalfEdgeMesh, Vec<VertexId>) {
    let mut mesh = HalfEdgeMesh::new();
    let coords = [
        (-1.0, 1.0, 1.0),
        (-1.0, -1.0, 1.0),
        (1.0, -1.0, 1.0),
        (1.0, 1.0, 1.0),
        (1.0, -1.0, -1.0),
        (1.0, 1.0, -1.0),
        (-1.0, -1.0, -1.0),
        (-1.0, 1.0, -1.0),
    ];
    let ids: Vec<VertexId> = coords
        .iter()
        .map(|&(x, y, z)| {
            mesh.add_vertex(Vertex {
                position: Vec4::new(x, y, z, 1.0),
                color: Vec4::new(0.0, 1.0, 0.8, 1.0),
                ..Vertex::default()
            })
        })
        .collect();
    let faces: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [3, 2, 4, 5],
        [5, 4, 6, 7],
        [7, 0, 3, 5],
        [7, 6, 1, 0],
        [1, 6, 4, 2],
    ];
    for face in &faces {
        let quad = [ids[face[0]], ids[face[1]], ids[face[2]], ids[face[3]]];
        mesh.add_face(&quad).unwrap();
    }
    (mesh, ids)
}

fn assert_twin_pairing(mesh: &HalfEdgeMesh) {
    for edge in mesh.edges() {
        let (from, to) = mesh.vertices_from_edge(edge.id);
        assert_eq!(mesh.find_edge(from, to), Some(edge.id));
        let twin = mesh.edge(edge.twin).expect("twin is alive");
        assert_eq!(mesh.find_edge(to, from), Some(twin.id));
        assert_eq!(twin.twin, edge.id);
    }
}

#[test]
fn catmull_clark_on_a_cube_produces_26_48_24() {
    let (cube, _) = cube();
    let refined = catmull_clark_subdivide(&cube).unwrap();
    assert_eq!(refined.vertex_count(), 26);
    assert_eq!(refined.edge_count(), 48);
    assert_eq!(refined.face_count(), 24);
    assert_twin_pairing(&refined);
    // Closed in, closed out.
    assert!(refined.edges().all(|e| e.face.is_some()));
}

#[test]
fn two_rounds_of_catmull_clark_keep_the_formula() {
    let (cube, _) = cube();
    let once = catmull_clark_subdivide(&cube).unwrap();
    let twice = catmull_clark_subdivide(&once).unwrap();
    // V' = V + E + F from the 26/48/24 mesh.
    assert_eq!(twice.vertex_count(), 26 + 48 + 24);
    assert_eq!(twice.face_count(), 24 * 4);
    assert_twin_pairing(&twice);
}

#[test]
fn loop_after_triangulating_a_catmull_clark_cube() {
    // Quads from Catmull-Clark re-enter Loop as triangle pairs.
    let (cube, _) = cube();
    let quads = catmull_clark_subdivide(&cube).unwrap();

    let mut triangles = HalfEdgeMesh::new();
    let ids: Vec<VertexId> = quads
        .vertices()
        .map(|v| triangles.add_vertex(v.data))
        .collect();
    for face in quads.faces() {
        let ring = quads.vertices_from_face(face.id);
        let lookup: Vec<VertexId> = ring.iter().map(|id| ids[id.0]).collect();
        triangles.add_face(&[lookup[0], lookup[1], lookup[2]]).unwrap();
        triangles.add_face(&[lookup[0], lookup[2], lookup[3]]).unwrap();
    }
    assert_eq!(triangles.face_count(), 48);

    let refined = loop_subdivide(&triangles).unwrap();
    // V' = V + E on the closed triangulation (26 vertices, 48 + 24 edges).
    assert_eq!(refined.vertex_count(), 26 + 72);
    assert_eq!(refined.face_count(), 4 * 48);
    assert_twin_pairing(&refined);
}

#[test]
fn edit_sequence_preserves_the_key_index() {
    let (mut mesh, ids) = cube();

    mesh.delete_vertex(ids[6]).unwrap();
    assert_twin_pairing(&mesh);

    let replacement = Vertex {
        position: Vec4::new(1.0, 0.0, 1.0, 1.0),
        ..Vertex::default()
    };
    let joined = mesh.join_vertex(ids[2], ids[3], replacement).unwrap();
    assert_twin_pairing(&mesh);
    assert!(mesh.vertex(joined).is_some());

    // A follow-up face over the joined vertex still wires cleanly.
    assert!(mesh.vertices().count() > 0);
    for vertex in mesh.vertices() {
        if let Some(outgoing) = vertex.outgoing {
            assert!(mesh.edge(outgoing).is_some());
        }
    }
}

#[test]
fn decimation_keeps_euler_characteristic() {
    let (cube, _) = cube();
    // Catmull-Clark twice, then triangulate into a decimation candidate.
    let refined = catmull_clark_subdivide(&cube).unwrap();

    let mut triangles = HalfEdgeMesh::new();
    let ids: Vec<VertexId> = refined
        .vertices()
        .map(|v| triangles.add_vertex(v.data))
        .collect();
    for face in refined.faces() {
        let ring = refined.vertices_from_face(face.id);
        let lookup: Vec<VertexId> = ring.iter().map(|id| ids[id.0]).collect();
        triangles.add_face(&[lookup[0], lookup[1], lookup[2]]).unwrap();
        triangles.add_face(&[lookup[0], lookup[2], lookup[3]]).unwrap();
    }

    let (v, e, f) = (
        triangles.vertex_count() as i64,
        triangles.edge_count() as i64,
        triangles.face_count() as i64,
    );
    assert_eq!(v - e + f, 2);

    let collapsed = collapse_edges(&mut triangles, 8).unwrap();
    assert_eq!(collapsed, 8);
    assert_eq!(triangles.vertex_count() as i64, v - 8);
    let (v2, e2, f2) = (
        triangles.vertex_count() as i64,
        triangles.edge_count() as i64,
        triangles.face_count() as i64,
    );
    assert_eq!(v2 - e2 + f2, 2);
    assert_twin_pairing(&triangles);
}

#[test]
fn subdivided_mesh_renders_through_the_pipeline() {
    let (cube, _) = cube();
    let refined = catmull_clark_subdivide(&cube).unwrap();
    let vertices = refined.triangulate();
    assert_eq!(vertices.len(), 24 * 2 * 3);

    let mut pipeline = Pipeline::new(16, 16, 1).unwrap();
    // Scale the cube into clip range with a plain orthographic view.
    let mut shader = GouraudShader::new();
    shader.pass.proj = softrast::math::transform::orthographic(-2.0, 2.0, 2.0, -2.0, -2.0, 2.0);
    pipeline.set_shader(shader);
    pipeline.clear(Vec4::ZERO, f32::INFINITY);
    pipeline.set_vertex_buffer(&vertices);
    pipeline.draw(0, vertices.len()).unwrap();

    let mut lit = 0;
    for y in 0..16 {
        for x in 0..16 {
            let c = pipeline.read_framebuffer(x, y);
            if c.y > 0.0 {
                lit += 1;
            }
        }
    }
    assert!(lit > 0, "subdivided cube should cover pixels");
}
