use bytemuck::{Pod, Zeroable};

/// Refractive bucket entry: a single index of refraction.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GlassParams {
    pub ior: f32,
}

impl GlassParams {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }
}
