//! Blinn-Phong lighting kernel with Schlick's Fresnel approximation

use crate::math::{saturate, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Directional,
    Point,
    Spot,
}

/// A single light source. Which fields are meaningful depends on the type:
/// `direction` drives directional and spot lights, `position` drives point
/// and spot lights, `spot_power` only spot lights.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub light_type: LightType,
    pub strength: Vec3,
    pub direction: Vec3,
    pub position: Vec3,
    pub spot_power: f32,
}

impl Default for Light {
    fn default() -> Light {
        Light {
            light_type: LightType::Directional,
            strength: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
            position: Vec3::ZERO,
            spot_power: 1.0,
        }
    }
}

/// Material terms as the lighting kernel consumes them; `shininess` here is
/// already the `1 - roughness` form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LitMaterial {
    pub diffuse_albedo: Vec4,
    pub fresnel_r0: Vec3,
    pub shininess: f32,
}

/// Schlick's approximation `R0 + (1-R0)(1-cos)^5` of the Fresnel equations.
fn schlick_fresnel(r0: Vec3, normal: Vec3, light_vec: Vec3) -> Vec3 {
    let cos_incident = saturate(normal.dot(light_vec));
    let f0 = 1.0 - cos_incident;
    r0 + f0.powi(5) * (Vec3::ONE - r0)
}

fn blinn_phong(light_strength: Vec3, light_vec: Vec3, normal: Vec3, to_eye: Vec3, mat: &LitMaterial) -> Vec3 {
    // Microfacet term
    let shininess = mat.shininess * 256.0;
    let half_vec = (to_eye + light_vec).normalize();
    let roughness_factor = (shininess + 8.0) * half_vec.dot(normal).max(0.0).powf(shininess) / 8.0;

    let reflect_percent = schlick_fresnel(mat.fresnel_r0, normal, light_vec);

    let specular_albedo = roughness_factor * reflect_percent;

    // (diffuse + specular) * light strength
    (mat.diffuse_albedo.xyz() + specular_albedo) * light_strength
}

pub(crate) fn compute_directional_light(light: &Light, mat: &LitMaterial, normal: Vec3, to_eye: Vec3) -> Vec3 {
    let light_vec = -light.direction;
    let lambert_factor = normal.dot(light_vec).max(0.0);
    let light_strength = light.strength * lambert_factor;
    blinn_phong(light_strength, light_vec, normal, to_eye, mat)
}

pub(crate) fn compute_point_light(light: &Light, mat: &LitMaterial, pos: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
    let light_vec = light.position - pos;

    let lambert_factor = normal.dot(light.direction).max(0.0);
    let light_strength = light.strength * lambert_factor;

    let distance = light_vec.length();
    let light_strength = light_strength / (distance * distance);

    blinn_phong(light_strength, light_vec, normal, to_eye, mat)
}

pub(crate) fn compute_spot_light(light: &Light, mat: &LitMaterial, pos: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
    let light_vec = light.position - pos;

    let lambert_factor = normal.dot(light.direction).max(0.0);
    let light_strength = light.strength * lambert_factor;

    let distance = light_vec.length();
    let light_strength = light_strength / (distance * distance);

    let spot_factor = (-light_vec.normalize()).dot(light.direction).max(0.0).powf(light.spot_power);
    let light_strength = spot_factor * light_strength;

    blinn_phong(light_strength, light_vec, normal, to_eye, mat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matte() -> LitMaterial {
        LitMaterial {
            diffuse_albedo: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fresnel_r0: Vec3::splat(0.02),
            shininess: 0.5,
        }
    }

    #[test]
    fn directional_light_scales_with_incidence() {
        let mat = matte();
        let to_eye = Vec3::new(0.0, 0.0, 1.0);
        let mut light = Light::default();
        light.strength = Vec3::ONE;

        light.direction = Vec3::new(0.0, 0.0, -1.0);
        let head_on = compute_directional_light(&light, &mat, Vec3::new(0.0, 0.0, 1.0), to_eye);

        light.direction = Vec3::new(0.0, -1.0, -1.0).normalize();
        let grazing = compute_directional_light(&light, &mat, Vec3::new(0.0, 0.0, 1.0), to_eye);

        assert!(head_on.x > grazing.x);
    }

    #[test]
    fn backfacing_directional_light_is_dark() {
        let mat = matte();
        let mut light = Light::default();
        light.strength = Vec3::ONE;
        light.direction = Vec3::new(0.0, 0.0, 1.0);
        // Surface faces the same way the light travels: no contribution.
        let lit = compute_directional_light(&light, &mat, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(lit, Vec3::ZERO);
    }

    #[test]
    fn point_light_attenuates_with_distance() {
        let mat = matte();
        let mut light = Light::default();
        light.light_type = LightType::Point;
        light.strength = Vec3::ONE;
        light.direction = Vec3::new(0.0, 0.0, -1.0);
        light.position = Vec3::new(0.0, 0.0, 2.0);

        let normal = Vec3::new(0.0, 0.0, 1.0);
        let to_eye = Vec3::new(0.0, 0.0, 1.0);
        let near = compute_point_light(&light, &mat, Vec3::new(0.0, 0.0, 1.0), normal, to_eye);
        let far = compute_point_light(&light, &mat, Vec3::new(0.0, 0.0, -6.0), normal, to_eye);
        assert!(near.x > far.x);
    }
}
