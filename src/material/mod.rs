use crate::Vec3f;

pub mod matte;
pub mod metal;
pub mod glass;
pub mod buckets;

pub use buckets::MaterialBuckets;
pub use glass::GlassParams;
pub use matte::MatteParams;
pub use metal::MetalParams;

/// The closed set of surface types the traversal kernel knows how to shade.
///
/// Each variant flattens into its own fixed-width parameter struct, stored in a bucket of its own
/// on the GPU side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Material {
    /// Lambertian diffuse reflector.
    Matte { albedo: Vec3f },

    /// Specular reflector; `fuzz` perturbs the reflected direction.
    Metal { albedo: Vec3f, fuzz: f32 },

    /// Dielectric with index of refraction `ior`.
    Glass { ior: f32 },
}

/// Numeric tags are part of the node buffer layout, don't reorder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum MaterialKind {
    Matte = 0,
    Metal = 1,
    Glass = 2,
}

impl MaterialKind {
    pub const COUNT: usize = 3;

    pub const ALL: [MaterialKind; MaterialKind::COUNT] =
        [MaterialKind::Matte, MaterialKind::Metal, MaterialKind::Glass];

    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(MaterialKind::Matte),
            1 => Some(MaterialKind::Metal),
            2 => Some(MaterialKind::Glass),
            _ => None,
        }
    }

    /// Width of one bucket entry, in f32 words.
    pub fn entry_width(self) -> usize {
        let bytes = match self {
            MaterialKind::Matte => std::mem::size_of::<MatteParams>(),
            MaterialKind::Metal => std::mem::size_of::<MetalParams>(),
            MaterialKind::Glass => std::mem::size_of::<GlassParams>(),
        };
        bytes / std::mem::size_of::<f32>()
    }
}

impl Material {
    pub fn matte(albedo: Vec3f) -> Self {
        Material::Matte { albedo }
    }

    pub fn metal(albedo: Vec3f, fuzz: f32) -> Self {
        Material::Metal { albedo, fuzz }
    }

    pub fn glass(ior: f32) -> Self {
        Material::Glass { ior }
    }

    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Matte { .. } => MaterialKind::Matte,
            Material::Metal { .. } => MaterialKind::Metal,
            Material::Glass { .. } => MaterialKind::Glass,
        }
    }

    /// The parameter vector as the kernel sees it.
    pub fn data(&self) -> Vec<f32> {
        match *self {
            Material::Matte { albedo } => bytemuck::cast::<_, [f32; 4]>(MatteParams::new(albedo)).to_vec(),
            Material::Metal { albedo, fuzz } => {
                bytemuck::cast::<_, [f32; 4]>(MetalParams::new(albedo, fuzz)).to_vec()
            }
            Material::Glass { ior } => vec![GlassParams::new(ior).ior],
        }
    }
}
