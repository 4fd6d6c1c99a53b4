//! Map-space primitives shared by the view, the tile layers and interactions

use serde::{Deserialize, Serialize};

/// Position in a projection's map units; y grows upward
pub type Coordinate = [f64; 2];
/// Position in viewport pixels; y grows downward
pub type Pixel = [f64; 2];

/// Axis-aligned rectangle `[min_x, min_y, max_x, max_y]` in map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Square contact-map extent of `side` map units hanging below the origin
    pub fn square_below_origin(side: f64) -> Self {
        Self::new(0.0, -side, side, 0.0)
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate[0] >= self.min_x
            && coordinate[0] <= self.max_x
            && coordinate[1] >= self.min_y
            && coordinate[1] <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A named coordinate frame.
///
/// Projections differ only by how many shared world units one of their map units
/// represents, so transforming between two is a rescale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub code: String,
    pub extent: Extent,
    /// World units per map unit of this projection
    pub scale: f64,
}

impl Projection {
    pub fn new(code: impl Into<String>, extent: Extent) -> Self {
        Self {
            code: code.into(),
            extent,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Convert `coordinate` from the `from` frame into the `to` frame
    pub fn transform(coordinate: Coordinate, from: &Projection, to: &Projection) -> Coordinate {
        if from.code == to.code || from.scale == to.scale {
            return coordinate;
        }
        let k = from.scale / to.scale;
        [coordinate[0] * k, coordinate[1] * k]
    }
}
