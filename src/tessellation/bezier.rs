//! Bézier curves via de Casteljau's algorithm

use crate::math::{vertex_lerp, Vertex};

/// A Bézier curve of arbitrary degree over vertex control points.
#[derive(Debug, Default, Clone)]
pub struct BezierCurve {
    control_points: Vec<Vertex>,
}

impl BezierCurve {
    pub fn new(control_points: Vec<Vertex>) -> BezierCurve {
        BezierCurve { control_points }
    }

    pub fn control_points(&self) -> &[Vertex] {
        &self.control_points
    }

    /// Evaluate the curve at `t ∈ [0, 1]` by repeated affine combination.
    /// Numerically stable across the whole parameter range.
    pub fn curve_point(&self, t: f32) -> Vertex {
        match self.control_points.len() {
            0 => Vertex::default(),
            1 => self.control_points[0],
            _ => {
                let mut points = self.control_points.clone();
                while points.len() > 1 {
                    for i in 0..points.len() - 1 {
                        points[i] = vertex_lerp(&points[i], &points[i + 1], t);
                    }
                    points.pop();
                }
                points[0]
            }
        }
    }

    /// Raise the degree `elevation` times without changing the curve.
    /// Each round replaces the `n` control points with `n + 1`.
    pub fn degree_elevation(&mut self, elevation: usize) {
        for _ in 0..elevation {
            let old = self.control_points.clone();
            let n = old.len();
            if n < 2 {
                break;
            }

            let mut raised = Vec::with_capacity(n + 1);
            raised.push(old[0]);
            for i in 1..n {
                let ratio = i as f32 / n as f32;
                raised.push(vertex_lerp(&old[i], &old[i - 1], ratio));
            }
            raised.push(old[n - 1]);
            self.control_points = raised;
        }
    }
}
