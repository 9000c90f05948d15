//! Programmable vertex and fragment stages.
//!
//! The shader is a plain value holding its per-pass, per-object and
//! per-material constants, plus a borrowed texture and a sampler. The
//! pipeline invokes [`GouraudShader::vertex_shader`] once per primitive
//! vertex and [`GouraudShader::fragment_shader`] once per covered pixel.

pub mod lighting;

pub use self::lighting::{Light, LightType};

use self::lighting::{
    compute_directional_light, compute_point_light, compute_spot_light, LitMaterial,
};
use crate::math::{Interpolate, Mat4, Vec2, Vec3, Vec4, Vertex};
use crate::texture::{Sampler, Texture};

/// Constants that hold for a whole render pass.
#[derive(Debug, Clone, Copy)]
pub struct PassConstants {
    pub eye_pos: Vec3,
    pub ambient_light: Vec3,
    pub view: Mat4,
    pub proj: Mat4,
    pub light: Light,
}

impl Default for PassConstants {
    fn default() -> PassConstants {
        PassConstants {
            eye_pos: Vec3::ZERO,
            ambient_light: Vec3::ZERO,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            light: Light::default(),
        }
    }
}

/// Constants that hold for one object: its world transform and the matrix
/// normals transform by (usually the inverse transpose of the world
/// matrix).
#[derive(Debug, Clone, Copy)]
pub struct ObjectConstants {
    pub world: Mat4,
    pub normal_matrix: Mat4,
}

impl Default for ObjectConstants {
    fn default() -> ObjectConstants {
        ObjectConstants {
            world: Mat4::IDENTITY,
            normal_matrix: Mat4::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaterialConstants {
    pub diffuse_albedo: Vec4,
    pub fresnel_r0: Vec3,
    pub roughness: f32,
}

impl Default for MaterialConstants {
    fn default() -> MaterialConstants {
        MaterialConstants {
            diffuse_albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.02),
            roughness: 0.5,
        }
    }
}

/// What the input assembler hands to the vertex stage.
#[derive(Debug, Clone, Copy)]
pub struct VertexInput {
    pub position: Vec4,
    pub color: Vec4,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

/// Interpolated data flowing from the vertex stage to the fragment stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentInput {
    pub world_pos: Vec3,
    pub color: Vec4,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

impl Interpolate for FragmentInput {
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        FragmentInput {
            world_pos: Interpolate::barycentric_interpolate(u, &x1.world_pos, v, &x2.world_pos, w, &x3.world_pos),
            color: Interpolate::barycentric_interpolate(u, &x1.color, v, &x2.color, w, &x3.color),
            texcoord: Interpolate::barycentric_interpolate(u, &x1.texcoord, v, &x2.texcoord, w, &x3.texcoord),
            normal: Interpolate::barycentric_interpolate(u, &x1.normal, v, &x2.normal, w, &x3.normal),
        }
    }

    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        FragmentInput {
            world_pos: Interpolate::linear_interpolate(t, &x1.world_pos, &x2.world_pos),
            color: Interpolate::linear_interpolate(t, &x1.color, &x2.color),
            texcoord: Interpolate::linear_interpolate(t, &x1.texcoord, &x2.texcoord),
            normal: Interpolate::linear_interpolate(t, &x1.normal, &x2.normal),
        }
    }
}

/// Gouraud-style shader: world/view/projection vertex transform, then
/// per-pixel Blinn-Phong lighting of a sampled texture. Without a texture
/// bound it degrades to unlit vertex colors, which is what the flat-color
/// line and point paths want.
#[derive(Debug, Default, Clone)]
pub struct GouraudShader<'t> {
    pub pass: PassConstants,
    pub object: ObjectConstants,
    pub material: MaterialConstants,
    pub sampler: Sampler,
    pub texture: Option<&'t Texture>,
}

impl<'t> GouraudShader<'t> {
    pub fn new() -> GouraudShader<'t> {
        GouraudShader::default()
    }

    #[inline]
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }

    pub fn input_assembler(&self, vertex: &Vertex) -> VertexInput {
        VertexInput {
            position: vertex.position,
            color: vertex.color,
            texcoord: vertex.texcoord,
            normal: vertex.normal,
        }
    }

    /// Transform a vertex into clip space, producing the interpolated data
    /// for the fragment stage as a side product.
    pub fn vertex_shader(&self, input: VertexInput) -> (Vec4, FragmentInput) {
        let view_proj = self.pass.view.multiply(&self.pass.proj);
        let world_pos = self.object.world.mul_vec4(input.position).xyz();
        let normal = self
            .object
            .normal_matrix
            .mul_vec4(Vec4::from_vec3(input.normal, 0.0))
            .xyz();

        let output = FragmentInput {
            world_pos,
            color: input.color,
            texcoord: input.texcoord,
            normal,
        };

        (view_proj.mul_vec4(Vec4::from_vec3(world_pos, 1.0)), output)
    }

    /// Shade one fragment.
    pub fn fragment_shader(&self, input: FragmentInput) -> Vec4 {
        let texture = match self.texture {
            Some(texture) => texture,
            // Vertex-color path: no texture, no lighting.
            None => return input.color,
        };

        let diffuse = self.material.diffuse_albedo * texture.sample(&self.sampler, input.texcoord);

        let normal = input.normal.normalize();
        let to_eye = (self.pass.eye_pos - input.world_pos).normalize();

        let mat = LitMaterial {
            diffuse_albedo: self.material.diffuse_albedo,
            fresnel_r0: self.material.fresnel_r0,
            shininess: 1.0 - self.material.roughness,
        };

        let light = &self.pass.light;
        let lighting = match light.light_type {
            LightType::Directional => compute_directional_light(light, &mat, normal, to_eye),
            LightType::Point => compute_point_light(light, &mat, input.world_pos, normal, to_eye),
            LightType::Spot => compute_spot_light(light, &mat, input.world_pos, normal, to_eye),
        };

        let lit = Vec4::from_vec3(self.pass.ambient_light + lighting, 1.0) * diffuse;
        let mut lit = lit.saturate();
        lit.w = self.material.diffuse_albedo.w;
        lit
    }
}
