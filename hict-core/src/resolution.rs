//! Resolution pyramid bookkeeping
//!
//! Each level of the tile pyramid has a pixel resolution (map units per pixel,
//! strictly descending from the coarsest level) and a bin resolution (bp per bin).
//! Both arrays are kept in lockstep so a level index found in one addresses the other.

use crate::error::{CoreError, CoreResult};
use crate::types::{BinResolution, LevelIndex, ResolutionKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of a binary search over a descending sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The target was present in the sequence
    pub found: bool,
    /// Index of the match, or the insertion point that keeps the sequence descending
    pub index: usize,
}

/// Binary search over a sequence sorted in descending order.
///
/// Returns the index of an exact match, otherwise the position where `target` would
/// have to be inserted. NaN targets land at the end of the sequence.
pub fn search_descending(seq: &[f64], target: f64) -> SearchResult {
    match seq.binary_search_by(|probe| target.partial_cmp(probe).unwrap_or(Ordering::Less)) {
        Ok(index) => SearchResult { found: true, index },
        Err(index) => SearchResult { found: false, index },
    }
}

/// Parallel pixel-resolution and bin-resolution arrays of the tile pyramid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResolutionTable", into = "RawResolutionTable")]
pub struct ResolutionTable {
    pixel_resolutions: Vec<f64>,
    bin_resolutions: Vec<BinResolution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResolutionTable {
    pixel_resolutions: Vec<f64>,
    resolutions: Vec<BinResolution>,
}

impl TryFrom<RawResolutionTable> for ResolutionTable {
    type Error = CoreError;

    fn try_from(raw: RawResolutionTable) -> CoreResult<Self> {
        ResolutionTable::new(raw.pixel_resolutions, raw.resolutions)
    }
}

impl From<ResolutionTable> for RawResolutionTable {
    fn from(table: ResolutionTable) -> Self {
        Self {
            pixel_resolutions: table.pixel_resolutions,
            resolutions: table.bin_resolutions,
        }
    }
}

impl ResolutionTable {
    /// Build a table, validating the lockstep and ordering invariants.
    pub fn new(pixel_resolutions: Vec<f64>, bin_resolutions: Vec<BinResolution>) -> CoreResult<Self> {
        if pixel_resolutions.is_empty() {
            return Err(CoreError::resolution_table("at least one level is required"));
        }
        if pixel_resolutions.len() != bin_resolutions.len() {
            return Err(CoreError::resolution_table(format!(
                "{} pixel resolutions but {} bin resolutions",
                pixel_resolutions.len(),
                bin_resolutions.len()
            )));
        }
        if let Some(bad) = pixel_resolutions.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(CoreError::resolution_table(format!(
                "pixel resolution {} is not a positive finite number",
                bad
            )));
        }
        if let Some(i) = pixel_resolutions.windows(2).position(|w| w[0] <= w[1]) {
            return Err(CoreError::resolution_table(format!(
                "pixel resolutions must be strictly descending (level {}: {} then {})",
                i,
                pixel_resolutions[i],
                pixel_resolutions[i + 1]
            )));
        }
        if bin_resolutions.contains(&0) {
            return Err(CoreError::resolution_table("bin resolution 0 is not allowed"));
        }

        Ok(Self {
            pixel_resolutions,
            bin_resolutions,
        })
    }

    pub fn len(&self) -> usize {
        self.pixel_resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_resolutions.is_empty()
    }

    pub fn pixel_resolutions(&self) -> &[f64] {
        &self.pixel_resolutions
    }

    pub fn bin_resolutions(&self) -> &[BinResolution] {
        &self.bin_resolutions
    }

    /// Raw lookup of a view resolution, exposing the insertion point on a miss
    pub fn search(&self, pixel_resolution: f64) -> SearchResult {
        search_descending(&self.pixel_resolutions, pixel_resolution)
    }

    /// Level index of a view resolution: the exact level, or the insertion point.
    ///
    /// May equal `len()` when the resolution is finer than the finest level.
    pub fn level_of(&self, pixel_resolution: f64) -> LevelIndex {
        self.search(pixel_resolution).index
    }

    /// Like [`level_of`](Self::level_of) but always addresses a real level
    pub fn clamped_level_of(&self, pixel_resolution: f64) -> LevelIndex {
        self.level_of(pixel_resolution).min(self.len() - 1)
    }

    pub fn pixel_resolution(&self, level: LevelIndex) -> Option<f64> {
        self.pixel_resolutions.get(level).copied()
    }

    pub fn bin_resolution(&self, level: LevelIndex) -> Option<BinResolution> {
        self.bin_resolutions.get(level).copied()
    }

    pub fn resolution_key(&self, level: LevelIndex) -> Option<ResolutionKey> {
        self.bin_resolution(level).map(ResolutionKey::new)
    }

    /// Level whose bin resolution equals `resolution`
    pub fn level_of_bin_resolution(&self, resolution: BinResolution) -> Option<LevelIndex> {
        self.bin_resolutions.iter().position(|&r| r == resolution)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LevelIndex, f64, BinResolution)> + '_ {
        self.pixel_resolutions
            .iter()
            .zip(self.bin_resolutions.iter())
            .enumerate()
            .map(|(level, (&px, &bp))| (level, px, bp))
    }
}
