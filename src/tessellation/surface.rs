//! Tensor-product Bézier surfaces

use super::bezier::BezierCurve;
use crate::math::Vertex;

/// A surface spanned by a family of Bézier control curves.
///
/// Evaluation runs the tensor-product construction: every control curve is
/// sampled at `u`, and the resulting points form the control polygon of a
/// transverse curve evaluated at `v`.
#[derive(Debug, Default, Clone)]
pub struct BezierSurface {
    curves: Vec<BezierCurve>,
}

impl BezierSurface {
    pub fn new(curves: Vec<BezierCurve>) -> BezierSurface {
        BezierSurface { curves }
    }

    /// Build the control curves from a grid of control points, one row per
    /// curve.
    pub fn from_grid(rows: Vec<Vec<Vertex>>) -> BezierSurface {
        BezierSurface {
            curves: rows.into_iter().map(BezierCurve::new).collect(),
        }
    }

    pub fn control_curves(&self) -> &[BezierCurve] {
        &self.curves
    }

    /// The transverse curve at parameter `t`.
    pub fn surface_curve(&self, t: f32) -> BezierCurve {
        let control_points = self.curves.iter().map(|curve| curve.curve_point(t)).collect();
        BezierCurve::new(control_points)
    }

    /// Evaluate the surface at `(u, v)`.
    pub fn surface_point(&self, u: f32, v: f32) -> Vertex {
        self.surface_curve(u).curve_point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A bilinear patch over the unit square with a raised far edge.
    fn patch() -> BezierSurface {
        BezierSurface::from_grid(vec![
            vec![
                Vertex::from_position(0.0, 0.0, 0.0),
                Vertex::from_position(0.0, 1.0, 0.0),
            ],
            vec![
                Vertex::from_position(1.0, 0.0, 1.0),
                Vertex::from_position(1.0, 1.0, 1.0),
            ],
        ])
    }

    #[test]
    fn corners_reproduce_the_control_grid() {
        let patch = patch();
        assert_eq!(patch.surface_point(0.0, 0.0).position.y, 0.0);
        assert_eq!(patch.surface_point(0.0, 1.0).position.y, 1.0);
        assert_eq!(patch.surface_point(1.0, 0.0).position.z, 1.0);
        assert_eq!(patch.surface_point(1.0, 1.0).position.x, 1.0);
    }

    #[test]
    fn bilinear_patch_interpolates_linearly() {
        let p = patch().surface_point(0.5, 0.25).position;
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.25).abs() < 1e-6);
        assert!((p.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn surface_curve_matches_pointwise_evaluation() {
        let patch = patch();
        let curve = patch.surface_curve(0.5);
        for i in 0..=4 {
            let v = i as f32 / 4.0;
            let direct = patch.surface_point(0.5, v).position;
            let via_curve = curve.curve_point(v).position;
            assert!((direct.x - via_curve.x).abs() < 1e-6);
            assert!((direct.y - via_curve.y).abs() < 1e-6);
            assert!((direct.z - via_curve.z).abs() < 1e-6);
        }
    }
}
