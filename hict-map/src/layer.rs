//! Hi-C tile layers, one per pyramid level
//!
//! Only the layer whose resolution window contains the view resolution renders,
//! so at most one data layer reports data under the pointer at a time.

use crate::geometry::{Coordinate, Extent, Projection};
use hict_core::{CoreError, CoreResult, LevelIndex, ResolutionTable};

/// What an interaction needs to know about a rendered tile layer
pub trait TileLayer {
    /// Whether the layer renders data at `coordinate` (in `view_projection`) at `view_resolution`
    fn has_data_at(&self, coordinate: Coordinate, view_projection: &Projection, view_resolution: f64) -> bool;

    fn z_index(&self) -> i32;

    fn projection(&self) -> &Projection;

    /// Map units per bin at this level
    fn pixel_resolution(&self) -> f64;

    /// Bin resolution key of this level, string encoded
    fn bp_resolution(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HicTileLayer {
    level: LevelIndex,
    projection: Projection,
    pixel_resolution: f64,
    bp_resolution: String,
    z_index: i32,
    /// Renders while `min_resolution <= view resolution < max_resolution`
    min_resolution: f64,
    max_resolution: f64,
}

impl HicTileLayer {
    pub fn level(&self) -> LevelIndex {
        self.level
    }

    pub fn resolution_window(&self) -> (f64, f64) {
        (self.min_resolution, self.max_resolution)
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }
}

impl TileLayer for HicTileLayer {
    fn has_data_at(&self, coordinate: Coordinate, view_projection: &Projection, view_resolution: f64) -> bool {
        if !(view_resolution >= self.min_resolution && view_resolution < self.max_resolution) {
            return false;
        }
        let local = Projection::transform(coordinate, view_projection, &self.projection);
        self.projection.extent.contains(local)
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn projection(&self) -> &Projection {
        &self.projection
    }

    fn pixel_resolution(&self) -> f64 {
        self.pixel_resolution
    }

    fn bp_resolution(&self) -> &str {
        &self.bp_resolution
    }
}

/// Build one layer per level of `table`; `matrix_sizes_bins[i]` is the side of level `i` in bins
pub fn build_hic_layers(table: &ResolutionTable, matrix_sizes_bins: &[u64]) -> CoreResult<Vec<HicTileLayer>> {
    if matrix_sizes_bins.len() != table.len() {
        return Err(CoreError::assembly(format!(
            "{} matrix sizes for {} pyramid levels",
            matrix_sizes_bins.len(),
            table.len()
        )));
    }

    let layers = table
        .iter()
        .zip(matrix_sizes_bins)
        .map(|((level, pixel_resolution, bin_resolution), &bins)| {
            let side = bins as f64 * pixel_resolution;
            let projection = Projection::new(format!("hict-level-{}", level), Extent::square_below_origin(side));
            let max_resolution = if level == 0 {
                f64::INFINITY
            } else {
                table.pixel_resolutions()[level - 1]
            };
            let min_resolution = if level + 1 == table.len() { 0.0 } else { pixel_resolution };
            HicTileLayer {
                level,
                projection,
                pixel_resolution,
                bp_resolution: bin_resolution.to_string(),
                z_index: level as i32,
                min_resolution,
                max_resolution,
            }
        })
        .collect();
    Ok(layers)
}
