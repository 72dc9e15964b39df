//! Grid configuration and validation.

use agentworld_core::Point;

use crate::error::ConfigError;

/// Where a thing lands when it is added without an explicit location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Always the same cell.
    Fixed(Point),
    /// A uniformly random cell within the active bounds.
    Random,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Fixed(Point::new(1, 1))
    }
}

/// Builder-input for a [`GridEnvironment`](crate::GridEnvironment).
///
/// # Examples
///
/// ```
/// use agentworld_env::{GridConfig, Placement};
///
/// let config = GridConfig {
///     width: 8,
///     height: 6,
///     seed: 42,
///     ..GridConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.default_placement, Placement::default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of columns. Default: 10.
    pub width: u32,
    /// Number of rows. Default: 10.
    pub height: u32,
    /// Seed for the environment's random number generator. Default: 0.
    pub seed: u64,
    /// Default radius of agent perception. Default: 1.
    pub perceptible_distance: u32,
    /// Where things land when added without a location. Default: `(1, 1)`.
    pub default_placement: Placement,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 0,
            perceptible_distance: 1,
            default_placement: Placement::default(),
        }
    }
}

impl GridConfig {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "width",
                value: self.width,
                max: Self::MAX_DIM,
            });
        }
        if self.height > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "height",
                value: self.height,
                max: Self::MAX_DIM,
            });
        }
        if self.perceptible_distance > Self::MAX_DIM {
            return Err(ConfigError::PerceptionTooLarge {
                value: self.perceptible_distance,
                max: Self::MAX_DIM,
            });
        }
        if let Placement::Fixed(p) = self.default_placement {
            let inside = p.x >= 0
                && p.y >= 0
                && (p.x as u32) < self.width
                && (p.y as u32) < self.height;
            if !inside {
                return Err(ConfigError::PlacementOutOfBounds {
                    location: p,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}
