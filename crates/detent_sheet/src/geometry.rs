//! Sheet geometry and the live height model

use detent_core::Detent;

use crate::config::validate_ratios;
use crate::error::{ConfigError, Result};

/// Detent heights derived from the container height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    container_height: f32,
    medium_ratio: f32,
    large_ratio: f32,
}

impl SheetGeometry {
    pub fn new(container_height: f32, medium_ratio: f32, large_ratio: f32) -> Result<Self> {
        validate_ratios(medium_ratio, large_ratio)?;
        validate_container(container_height)?;
        Ok(Self {
            container_height,
            medium_ratio,
            large_ratio,
        })
    }

    /// Same ratios, new container (rotation, window resize)
    pub fn with_container_height(&self, container_height: f32) -> Result<Self> {
        validate_container(container_height)?;
        Ok(Self {
            container_height,
            ..*self
        })
    }

    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn medium_height(&self) -> f32 {
        self.container_height * self.medium_ratio
    }

    pub fn large_height(&self) -> f32 {
        self.container_height * self.large_ratio
    }

    pub fn height_for(&self, detent: Detent) -> f32 {
        match detent {
            Detent::Medium => self.medium_height(),
            Detent::Large => self.large_height(),
        }
    }

    /// Closest detent to `height`; an exact tie goes to Medium
    pub fn nearest_detent(&self, height: f32) -> Detent {
        let to_medium = (height - self.medium_height()).abs();
        let to_large = (height - self.large_height()).abs();
        if to_large < to_medium {
            Detent::Large
        } else {
            Detent::Medium
        }
    }
}

fn validate_container(container_height: f32) -> Result<()> {
    if container_height.is_finite() && container_height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidContainerHeight(container_height))
    }
}

/// Current sheet height plus the geometry it is measured against
///
/// Only the drag path, the snap animation and the entry/exit one-shots write
/// the height; everything goes through [`HeightModel::set_current_height`],
/// which keeps it inside `0..=large_height`.
#[derive(Debug, Clone)]
pub struct HeightModel {
    geometry: SheetGeometry,
    current_height: f32,
}

impl HeightModel {
    pub fn new(geometry: SheetGeometry) -> Self {
        Self {
            geometry,
            current_height: 0.0,
        }
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    pub fn height_for(&self, detent: Detent) -> f32 {
        self.geometry.height_for(detent)
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn set_current_height(&mut self, height: f32) {
        self.current_height = height.clamp(0.0, self.geometry.large_height());
    }

    /// True when the sheet sits at (or within half a unit of) the large detent
    pub fn is_at_large(&self) -> bool {
        self.current_height >= self.geometry.large_height() - 0.5
    }

    pub fn is_at(&self, detent: Detent) -> bool {
        (self.current_height - self.height_for(detent)).abs() < 0.5
    }

    pub(crate) fn set_geometry(&mut self, geometry: SheetGeometry) {
        self.geometry = geometry;
        self.set_current_height(self.current_height);
    }
}
