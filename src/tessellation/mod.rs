//! Parametric curves and surfaces.
//!
//! Everything here evaluates to full [`Vertex`](crate::math::Vertex)
//! records so curve and patch samples can flow straight into the
//! pipeline's vertex buffer: positions and colors interpolate through the
//! control nets, the remaining attributes ride along linearly where the
//! scheme defines them.

pub mod bezier;
pub mod bspline;
pub mod surface;
pub mod triangle;

pub use self::bezier::BezierCurve;
pub use self::bspline::BSpline;
pub use self::surface::BezierSurface;
pub use self::triangle::BezierTriangle;
