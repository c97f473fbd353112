//! Name-based kernel registries. Two independent families share one flat
//! strategy namespace: whole-matrix names are looked up first and the block
//! registry is consulted only on a miss, which works because the whole
//! family keeps the `_whole` suffix. An unknown name is an explicit
//! configuration error, never a silent default.

use crate::error::ConfigError;
use crate::kern::{BlockKernel, HybridShape, InterleavedShape, WholeKernel};

/// Stable block-family strategy identifiers (external string contract).
pub const BLOCK_STRATEGIES: &[&str] = &["scalar", "vector", "hybrid", "interleaved", "delegate"];

/// Stable whole-matrix-family strategy identifiers.
pub const WHOLE_STRATEGIES: &[&str] = &["scalar_whole", "delegate_whole"];

/// Numeric kernel configuration supplied at run setup. The hybrid and
/// interleaved group factors live here so the same binary can run several
/// configurations.
#[derive(Clone, Copy, Debug, Default)]
pub struct KernelShapes {
    pub hybrid: HybridShape,
    pub interleaved: InterleavedShape,
}

impl KernelShapes {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hybrid.validate()?;
        self.interleaved.validate()
    }
}

/// Block-family registry lookup.
pub fn lookup_block(name: &str, shapes: &KernelShapes) -> Option<BlockKernel> {
    match name {
        "scalar" => Some(BlockKernel::Scalar),
        "vector" => Some(BlockKernel::Vector),
        "hybrid" => Some(BlockKernel::Hybrid(shapes.hybrid)),
        "interleaved" => Some(BlockKernel::Interleaved(shapes.interleaved)),
        "delegate" => Some(BlockKernel::Delegate),
        _ => None,
    }
}

/// Whole-matrix-family registry lookup.
pub fn lookup_whole(name: &str) -> Option<WholeKernel> {
    match name {
        "scalar_whole" => Some(WholeKernel::Scalar),
        "delegate_whole" => Some(WholeKernel::Delegate),
        _ => None,
    }
}

/// A strategy name resolved to its kernel family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolved {
    Whole(WholeKernel),
    Block(BlockKernel),
}

/// Resolves a strategy name, whole-matrix family first, then the block
/// family. Validates the kernel shapes before handing out a block kernel
/// that carries them.
pub fn resolve(name: &str, shapes: &KernelShapes) -> Result<Resolved, ConfigError> {
    if let Some(k) = lookup_whole(name) {
        return Ok(Resolved::Whole(k));
    }
    shapes.validate()?;
    lookup_block(name, shapes)
        .map(Resolved::Block)
        .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_published_name_resolves() {
        let shapes = KernelShapes::default();
        for name in BLOCK_STRATEGIES {
            assert!(matches!(resolve(name, &shapes), Ok(Resolved::Block(_))), "{name}");
        }
        for name in WHOLE_STRATEGIES {
            assert!(matches!(resolve(name, &shapes), Ok(Resolved::Whole(_))), "{name}");
        }
    }

    #[test]
    fn unknown_name_is_an_error_not_a_default() {
        let shapes = KernelShapes::default();
        assert_eq!(
            resolve("avx1024", &shapes),
            Err(ConfigError::UnknownStrategy("avx1024".to_string()))
        );
    }

    #[test]
    fn whole_registry_wins_over_block() {
        let shapes = KernelShapes::default();
        assert_eq!(
            resolve("scalar_whole", &shapes),
            Ok(Resolved::Whole(WholeKernel::Scalar))
        );
        assert_eq!(resolve("scalar", &shapes), Ok(Resolved::Block(BlockKernel::Scalar)));
    }

    #[test]
    fn bad_shapes_are_rejected_at_resolution() {
        let shapes = KernelShapes {
            hybrid: HybridShape { vector_chunks: 9, scalar_cols: 0 },
            ..Default::default()
        };
        assert!(resolve("hybrid", &shapes).is_err());
        // Whole-matrix kernels carry no shape, so they still resolve.
        assert!(resolve("delegate_whole", &shapes).is_ok());
    }
}
