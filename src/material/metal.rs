use bytemuck::{Pod, Zeroable};

use crate::Vec3f;

/// Reflective bucket entry: `[r, g, b, fuzz]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MetalParams {
    pub albedo: [f32; 3],
    pub fuzz: f32,
}

impl MetalParams {
    pub fn new(albedo: Vec3f, fuzz: f32) -> Self {
        Self {
            albedo: albedo.into(),
            fuzz,
        }
    }
}
