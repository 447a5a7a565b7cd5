use thiserror::Error;

use crate::material::MaterialKind;
use crate::Float;

/// Everything that can stop a scene from being turned into GPU buffers.
///
/// None of these are transient: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("cannot build a BVH over an empty scene")]
    EmptyScene,

    #[error("sphere radius must be positive, got {radius}")]
    NonPositiveRadius { radius: Float },

    #[error("sphere radius must be finite, got {radius}")]
    NonFiniteRadius { radius: Float },

    #[error("sphere center must be finite")]
    NonFiniteCenter,

    #[error("{nodes} BVH nodes cannot be addressed with 32-bit signed indices")]
    CapacityExceeded { nodes: usize },

    #[error("{entries} {kind:?} material entries cannot be addressed with 32-bit indices")]
    MaterialCapacityExceeded { kind: MaterialKind, entries: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;
