use std::borrow::Cow;
use std::convert::TryFrom;

use crate::error::{SceneError, SceneResult};
use crate::material::{GlassParams, Material, MaterialKind, MatteParams, MetalParams};

/// Converts a bucket position into the index stored in a leaf record.
fn entry_index(kind: MaterialKind, idx: usize) -> SceneResult<u32> {
    u32::try_from(idx).map_err(|_| SceneError::MaterialCapacityExceeded { kind, entries: idx + 1 })
}

/// Per-variant parameter arrays, one GPU buffer each.
///
/// A leaf in the node buffer refers to its material by `(MaterialKind::tag(), index)`, where
/// `index` counts entries (not floats) into the bucket of that kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialBuckets {
    matte: Vec<MatteParams>,
    metal: Vec<MetalParams>,
    glass: Vec<GlassParams>,
}

impl MaterialBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the material's parameters to its bucket and return the entry index.
    pub fn push(&mut self, material: &Material) -> SceneResult<u32> {
        let len = match *material {
            Material::Matte { albedo } => {
                self.matte.push(MatteParams::new(albedo));
                self.matte.len()
            }
            Material::Metal { albedo, fuzz } => {
                self.metal.push(MetalParams::new(albedo, fuzz));
                self.metal.len()
            }
            Material::Glass { ior } => {
                self.glass.push(GlassParams::new(ior));
                self.glass.len()
            }
        };
        entry_index(material.kind(), len - 1)
    }

    pub fn matte(&self) -> &[MatteParams] {
        &self.matte
    }

    pub fn metal(&self) -> &[MetalParams] {
        &self.metal
    }

    pub fn glass(&self) -> &[GlassParams] {
        &self.glass
    }

    /// Number of real entries of the given kind. The placeholder is not counted.
    pub fn len(&self, kind: MaterialKind) -> usize {
        match kind {
            MaterialKind::Matte => self.matte.len(),
            MaterialKind::Metal => self.metal.len(),
            MaterialKind::Glass => self.glass.len(),
        }
    }

    pub fn total_len(&self) -> usize {
        MaterialKind::ALL.iter().map(|&kind| self.len(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// The parameter words of one entry, or `None` if `index` is out of range.
    pub fn entry(&self, kind: MaterialKind, index: usize) -> Option<&[f32]> {
        match kind {
            MaterialKind::Matte => self.matte.get(index).map(|p| bytemuck::cast_slice(std::slice::from_ref(p))),
            MaterialKind::Metal => self.metal.get(index).map(|p| bytemuck::cast_slice(std::slice::from_ref(p))),
            MaterialKind::Glass => self.glass.get(index).map(|p| bytemuck::cast_slice(std::slice::from_ref(p))),
        }
    }

    /// Bytes to upload for one bucket.
    ///
    /// The binding layout has a slot per kind whether or not the scene uses it, and zero-sized
    /// storage buffers aren't allowed, so an unused kind gets a single zeroed entry.
    pub fn bytes(&self, kind: MaterialKind) -> Cow<'_, [u8]> {
        let bytes: &[u8] = match kind {
            MaterialKind::Matte => bytemuck::cast_slice(&self.matte),
            MaterialKind::Metal => bytemuck::cast_slice(&self.metal),
            MaterialKind::Glass => bytemuck::cast_slice(&self.glass),
        };
        if bytes.is_empty() {
            Cow::Owned(vec![0u8; kind.entry_width() * std::mem::size_of::<f32>()])
        } else {
            Cow::Borrowed(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_returns_running_index() {
        let mut buckets = MaterialBuckets::new();
        assert_eq!(buckets.push(&Material::matte(vec3f!(1, 0, 0))), Ok(0));
        assert_eq!(buckets.push(&Material::glass(1.5)), Ok(0));
        assert_eq!(buckets.push(&Material::matte(vec3f!(0, 1, 0))), Ok(1));
        assert_eq!(buckets.push(&Material::metal(vec3f!(0, 0, 1), 0.3)), Ok(0));
        assert_eq!(buckets.push(&Material::glass(1.3)), Ok(1));

        assert_eq!(buckets.len(MaterialKind::Matte), 2);
        assert_eq!(buckets.len(MaterialKind::Metal), 1);
        assert_eq!(buckets.len(MaterialKind::Glass), 2);
        assert_eq!(buckets.total_len(), 5);
        assert_eq!(buckets.entry(MaterialKind::Matte, 1), Some(&[0.0, 1.0, 0.0, 0.0][..]));
        assert_eq!(buckets.entry(MaterialKind::Glass, 1), Some(&[1.3][..]));
        assert_eq!(buckets.entry(MaterialKind::Metal, 1), None);
    }

    #[test]
    fn test_entry_index_capacity() {
        assert_eq!(entry_index(MaterialKind::Metal, u32::MAX as usize), Ok(u32::MAX));
        assert_eq!(
            entry_index(MaterialKind::Glass, u32::MAX as usize + 1),
            Err(SceneError::MaterialCapacityExceeded {
                kind: MaterialKind::Glass,
                entries: u32::MAX as usize + 2,
            })
        );
    }

    #[test]
    fn test_empty_bucket_gets_placeholder() {
        let mut buckets = MaterialBuckets::new();
        buckets.push(&Material::glass(1.5)).unwrap();

        assert_eq!(&*buckets.bytes(MaterialKind::Matte), &[0u8; 16][..]);
        assert_eq!(&*buckets.bytes(MaterialKind::Metal), &[0u8; 16][..]);
        assert_eq!(&*buckets.bytes(MaterialKind::Glass), &1.5f32.to_ne_bytes()[..]);
        // placeholders are not entries
        assert_eq!(buckets.len(MaterialKind::Matte), 0);
        assert!(matches!(buckets.bytes(MaterialKind::Glass), Cow::Borrowed(_)));
    }
}
