use bytemuck::{Pod, Zeroable};

use crate::Vec3f;

/// Diffuse bucket entry: `[r, g, b, 0]`, 16 bytes so the kernel can read it as a `vec4`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MatteParams {
    pub albedo: [f32; 3],
    pub _pad: f32,
}

impl MatteParams {
    pub fn new(albedo: Vec3f) -> Self {
        Self {
            albedo: albedo.into(),
            _pad: 0.0,
        }
    }
}
