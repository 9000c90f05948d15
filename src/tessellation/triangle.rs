//! Bernstein-Bézier triangular patches

use crate::math::{factorial, vertex_lerp, Vec4, Vertex};

/// A triangular Bézier patch of degree `n`.
///
/// The control net is stored as rows `rows[i][j]` with `i + j + k = n`:
/// `rows[i]` holds `n - i + 1` points, so `rows[n][0]` is the `u = 1`
/// corner, `rows[0][n]` the `v = 1` corner and `rows[0][0]` the `w = 1`
/// corner. The net carries `(n+1)(n+2)/2` control points in total.
#[derive(Debug, Default, Clone)]
pub struct BezierTriangle {
    control_points: Vec<Vec<Vertex>>,
}

impl BezierTriangle {
    /// Wrap an existing control net. Rows must shrink by one point each,
    /// ending in a single corner point.
    pub fn new(control_points: Vec<Vec<Vertex>>) -> BezierTriangle {
        debug_assert!(control_points
            .iter()
            .enumerate()
            .all(|(i, row)| row.len() == control_points.len() - i));
        BezierTriangle { control_points }
    }

    /// A degree-`n` net interpolating three corner vertices barycentrically.
    pub fn from_corners(corners: &[Vertex; 3], degree: usize) -> BezierTriangle {
        let n = degree.max(1);
        let mut rows = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let mut row = Vec::with_capacity(n - i + 1);
            for j in 0..=(n - i) {
                let k = n - i - j;
                let (fu, fv, fw) = (i as f32 / n as f32, j as f32 / n as f32, k as f32 / n as f32);
                row.push(Vertex {
                    position: fu * corners[0].position + fv * corners[1].position + fw * corners[2].position,
                    color: fu * corners[0].color + fv * corners[1].color + fw * corners[2].color,
                    ..Vertex::default()
                });
            }
            rows.push(row);
        }
        BezierTriangle { control_points: rows }
    }

    /// The cubic PN-triangle net for three positioned and normaled corner
    /// vertices: each edge point is projected into the tangent plane of
    /// its nearest corner, and the center point balances the edge and
    /// corner averages.
    pub fn from_pn_triangle(corners: &[Vertex; 3]) -> BezierTriangle {
        let mut edge_points = Vec::with_capacity(6);
        for i in 0..3 {
            let a = &corners[i];
            let b = &corners[(i + 1) % 3];

            let mut p = vertex_lerp(a, b, 1.0 / 3.0);
            let distance = (p.position.xyz() - a.position.xyz()).dot(a.normal);
            p.position = Vec4::from_vec3(p.position.xyz() - distance * a.normal, 1.0);
            edge_points.push(p);

            let mut q = vertex_lerp(a, b, 2.0 / 3.0);
            let distance = (q.position.xyz() - b.position.xyz()).dot(b.normal);
            q.position = Vec4::from_vec3(q.position.xyz() - distance * b.normal, 1.0);
            edge_points.push(q);
        }

        let mut center = Vertex::default();
        for p in &edge_points {
            center.position = center.position + 1.0 / 6.0 * p.position;
        }
        for v in corners.iter() {
            center.position = center.position + 1.0 / 3.0 * v.position;
            center.color = center.color + 1.0 / 3.0 * v.color;
        }
        center.position = 0.5 * center.position;

        BezierTriangle {
            control_points: vec![
                vec![corners[2], edge_points[3], edge_points[2], corners[1]],
                vec![edge_points[4], center, edge_points[1]],
                vec![edge_points[5], edge_points[0]],
                vec![corners[0]],
            ],
        }
    }

    pub fn degree(&self) -> usize {
        self.control_points.len().saturating_sub(1)
    }

    pub fn control_points(&self) -> &[Vec<Vertex>] {
        &self.control_points
    }

    /// Evaluate at barycentric `(u, v, w)` with the multinomial Bernstein
    /// formula `n!/(i! j! k!) · uⁱ vʲ wᵏ`.
    pub fn surface_point(&self, u: f32, v: f32, w: f32) -> Vertex {
        let n = self.degree();
        let mut point = Vertex::default();
        for i in (0..=n).rev() {
            for j in (0..=(n - i)).rev() {
                let k = n - i - j;
                let coefficient = (factorial(n) / (factorial(i) * factorial(j) * factorial(k))) as f32;
                let bernstein = coefficient * u.powi(i as i32) * v.powi(j as i32) * w.powi(k as i32);
                let control = &self.control_points[i][j];
                point.position = point.position + bernstein * control.position;
                point.color = point.color + bernstein * control.color;
            }
        }
        point
    }

    /// Evaluate by recursive trilinear blending: each round shrinks the
    /// net by one degree, blending every simplex's three children.
    pub fn surface_point_recursive(&self, u: f32, v: f32, w: f32) -> Vertex {
        reduce(&self.control_points, u, v, w)
    }
}

fn reduce(rows: &[Vec<Vertex>], u: f32, v: f32, w: f32) -> Vertex {
    let n = rows.len() - 1;
    if n == 0 {
        return rows[0][0];
    }

    let m = n - 1;
    let mut next = Vec::with_capacity(m + 1);
    for i in 0..=m {
        let mut row = Vec::with_capacity(m - i + 1);
        for j in 0..=(m - i) {
            let mut point = Vertex::default();
            point.position = u * rows[i + 1][j].position
                + v * rows[i][j + 1].position
                + w * rows[i][j].position;
            point.color =
                u * rows[i + 1][j].color + v * rows[i][j + 1].color + w * rows[i][j].color;
            row.push(point);
        }
        next.push(row);
    }
    reduce(&next, u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};

    fn corners() -> [Vertex; 3] {
        [
            Vertex {
                position: Vec4::new(0.0, 0.0, 0.0, 1.0),
                color: Vec4::new(1.0, 0.0, 0.0, 1.0),
                normal: Vec3::new(0.0, 0.0, 1.0),
                ..Vertex::default()
            },
            Vertex {
                position: Vec4::new(1.0, 0.0, 0.0, 1.0),
                color: Vec4::new(0.0, 1.0, 0.0, 1.0),
                normal: Vec3::new(0.0, 0.0, 1.0),
                ..Vertex::default()
            },
            Vertex {
                position: Vec4::new(0.0, 1.0, 0.0, 1.0),
                color: Vec4::new(0.0, 0.0, 1.0, 1.0),
                normal: Vec3::new(0.0, 0.0, 1.0),
                ..Vertex::default()
            },
        ]
    }

    #[test]
    fn corner_evaluation_is_exact() {
        let patch = BezierTriangle::from_corners(&corners(), 3);
        let u_corner = patch.surface_point(1.0, 0.0, 0.0).position;
        let v_corner = patch.surface_point(0.0, 1.0, 0.0).position;
        let w_corner = patch.surface_point(0.0, 0.0, 1.0).position;
        assert!((u_corner.x - 0.0).abs() < 1e-6 && u_corner.y.abs() < 1e-6);
        assert!((v_corner.x - 1.0).abs() < 1e-6);
        assert!((w_corner.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn both_evaluators_agree() {
        let patch = BezierTriangle::from_corners(&corners(), 3);
        let samples = [
            (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            (0.5, 0.25, 0.25),
            (0.2, 0.5, 0.3),
        ];
        for &(u, v, w) in &samples {
            let a = patch.surface_point(u, v, w);
            let b = patch.surface_point_recursive(u, v, w);
            assert!((a.position.x - b.position.x).abs() < 1e-5);
            assert!((a.position.y - b.position.y).abs() < 1e-5);
            assert!((a.position.z - b.position.z).abs() < 1e-5);
            assert!((a.color.x - b.color.x).abs() < 1e-5);
        }
    }

    #[test]
    fn flat_pn_triangle_stays_flat() {
        // Coplanar corners with a shared normal produce a flat patch.
        let patch = BezierTriangle::from_pn_triangle(&corners());
        assert_eq!(patch.degree(), 3);
        for &(u, v) in &[(0.25, 0.25), (0.1, 0.6), (0.4, 0.4)] {
            let w = 1.0 - u - v;
            let p = patch.surface_point(u, v, w).position;
            assert!(p.z.abs() < 1e-5, "flat patch bulged to {}", p.z);
        }
    }

    #[test]
    fn pn_triangle_corners_match_input() {
        let patch = BezierTriangle::from_pn_triangle(&corners());
        let net = patch.control_points();
        assert_eq!(net[3][0].position, corners()[0].position);
        assert_eq!(net[0][3].position, corners()[1].position);
        assert_eq!(net[0][0].position, corners()[2].position);
    }

    #[test]
    fn barycentric_interior_blends_colors() {
        let patch = BezierTriangle::from_corners(&corners(), 2);
        let c = patch.surface_point(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0).color;
        assert!((c.x - 1.0 / 3.0).abs() < 1e-5);
        assert!((c.y - 1.0 / 3.0).abs() < 1e-5);
        assert!((c.z - 1.0 / 3.0).abs() < 1e-5);
    }
}
