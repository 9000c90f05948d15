//! Software rasterizer and half-edge geometry kernel.
//!
//! The crate is split into two halves that share the math layer:
//!
//! - a rasterization pipeline ([`pipeline::Pipeline`]) that transforms
//!   vertex buffers through a Gouraud-style shader into a multisampled
//!   framebuffer, and
//! - a mesh kernel ([`mesh::HalfEdgeMesh`]) with Loop and Catmull-Clark
//!   subdivision, quadric-error decimation and parametric tessellation
//!   ([`tessellation`]), whose output can be fed back into the pipeline
//!   as plain vertex lists.
//!
//! Everything runs on the CPU, single-threaded, with no I/O: textures and
//! meshes are handed in as in-memory data and pixels are read back with
//! [`pipeline::Pipeline::read_framebuffer`].

pub mod error;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod shader;
pub mod tessellation;
pub mod texture;

#[cfg(feature = "image_compat")]
pub mod image_compat;

pub use crate::error::{MeshError, MeshResult, RenderError, RenderResult, SplineError};
pub use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4, Vertex};
pub use crate::pipeline::{FaceWinding, Pipeline, Topology};
pub use crate::shader::GouraudShader;
pub use crate::texture::{AddressMode, Filter, Image, Sampler, Texture};
