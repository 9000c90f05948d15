//! B-spline curves: de Boor evaluation and knot insertion

use crate::error::SplineError;
use crate::math::Vertex;

/// A B-spline over vertex control points with an explicit knot vector.
///
/// With `n + 1` control points and `k + 1` knots the order is
/// `k - n` (degree plus one). Position and color are the interpolated
/// channels, as in the other tessellation schemes.
#[derive(Debug, Clone)]
pub struct BSpline {
    control_points: Vec<Vertex>,
    knots: Vec<f32>,
    order: usize,
}

impl BSpline {
    pub fn new(control_points: Vec<Vertex>, knots: Vec<f32>) -> Result<BSpline, SplineError> {
        let invalid = SplineError::InvalidKnotVector(knots.len(), control_points.len());
        if knots.len() <= control_points.len() {
            return Err(invalid);
        }
        let order = knots.len() - control_points.len();
        if control_points.len() < order {
            return Err(invalid);
        }
        if knots.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(invalid);
        }
        Ok(BSpline { control_points, knots, order })
    }

    pub fn control_points(&self) -> &[Vertex] {
        &self.control_points
    }

    pub fn knots(&self) -> &[f32] {
        &self.knots
    }

    /// Degree plus one.
    pub fn order(&self) -> usize {
        self.order
    }

    /// `(t - knots[i]) / (knots[i + order - r] - knots[i])`, or zero when
    /// the span degenerates.
    fn basis_factor(&self, i: usize, r: usize, t: f32) -> f32 {
        let span = self.knots[i + self.order - r] - self.knots[i];
        if span <= 1e-6 {
            return 0.0;
        }
        (t - self.knots[i]) / span
    }

    /// Insert a knot, reshaping the control polygon without changing the
    /// curve. The value must fall inside the existing knot range.
    pub fn add_knot(&mut self, value: f32) -> Result<(), SplineError> {
        let first = self.knots[0];
        let last = self.knots[self.knots.len() - 1];
        if value < first || value >= last {
            return Err(SplineError::KnotOutOfRange(value));
        }

        // The span containing the new value.
        let index = self.knots.partition_point(|&k| k <= value) - 1;

        let old = std::mem::take(&mut self.control_points);
        let count = old.len() + 1;
        let mut points = Vec::with_capacity(count);

        let low = (index + 2).saturating_sub(self.order);
        for i in 0..low {
            points.push(old[i]);
        }
        for i in low..=index {
            let b = self.basis_factor(i, 1, value);
            points.push(Vertex {
                position: (1.0 - b) * old[i - 1].position + b * old[i].position,
                color: (1.0 - b) * old[i - 1].color + b * old[i].color,
                ..Vertex::default()
            });
        }
        for i in (index + 1)..count {
            points.push(old[i - 1]);
        }

        self.knots.insert(index + 1, value);
        self.control_points = points;
        Ok(())
    }

    /// Evaluate the curve at `t` by de Boor's algorithm: pick the knot
    /// span, take `order` control points and reduce them by repeated
    /// affine interpolation. The span index clamps into `[order-1, n]` so
    /// the domain endpoints evaluate exactly.
    pub fn curve_point(&self, t: f32) -> Vertex {
        let n = self.control_points.len() - 1;
        let j = (self.knots.partition_point(|&k| k <= t).saturating_sub(1))
            .min(n)
            .max(self.order - 1);

        let start = j + 1 - self.order;
        let points = self.control_points[start..=j].to_vec();
        self.reduce(points, t, start)
    }

    fn reduce(&self, points: Vec<Vertex>, t: f32, index: usize) -> Vertex {
        if points.len() == 1 {
            return points[0];
        }
        let r = self.order - points.len() + 1;
        let index = index + 1;

        let mut next = Vec::with_capacity(points.len() - 1);
        for i in 0..points.len() - 1 {
            let b = self.basis_factor(index + i, r, t);
            next.push(Vertex {
                position: (1.0 - b) * points[i].position + b * points[i + 1].position,
                color: (1.0 - b) * points[i].color + b * points[i + 1].color,
                ..Vertex::default()
            });
        }
        self.reduce(next, t, index)
    }
}
