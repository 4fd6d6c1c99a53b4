//! Assembly description as announced by the backend when a map is opened
//!
//! Contig and scaffold descriptors follow the backend's camelCase JSON; the enum
//! codes are the integers the backend sends.

use crate::error::{CoreError, CoreResult};
use crate::resolution::ResolutionTable;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContigDescriptor {
    pub contig_id: u32,
    pub contig_name: String,
    pub contig_length_bp: BpPos,
    /// Contig length in bins keyed by bin resolution
    #[serde(default)]
    pub contig_length_bins: BTreeMap<BinResolution, BinIndex>,
    #[serde(rename = "contigDirection")]
    pub direction: ContigDirection,
    /// Visibility keyed by bin resolution; missing entries mean shown
    #[serde(rename = "contigPresenceAtResolution", default)]
    pub presence_at_resolution: BTreeMap<BinResolution, ContigHideType>,
    #[serde(default)]
    pub scaffold_id: Option<u32>,
}

impl ContigDescriptor {
    pub fn new(contig_id: u32, contig_name: impl Into<String>, contig_length_bp: BpPos) -> Self {
        Self {
            contig_id,
            contig_name: contig_name.into(),
            contig_length_bp,
            contig_length_bins: BTreeMap::new(),
            direction: ContigDirection::Forward,
            presence_at_resolution: BTreeMap::new(),
            scaffold_id: None,
        }
    }

    /// Bins the contig spans at `resolution`, zero when hidden there
    pub fn length_bins_at(&self, resolution: BinResolution) -> BinIndex {
        if !self.is_shown_at(resolution) {
            return 0;
        }
        self.contig_length_bins
            .get(&resolution)
            .copied()
            .unwrap_or_else(|| self.contig_length_bp.div_ceil(resolution))
    }

    pub fn is_shown_at(&self, resolution: BinResolution) -> bool {
        self.presence_at_resolution
            .get(&resolution)
            .copied()
            .unwrap_or_default()
            .is_shown()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldBorders {
    pub start_contig_id: u32,
    pub end_contig_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldDescriptor {
    pub scaffold_id: u32,
    pub scaffold_name: String,
    #[serde(default)]
    pub scaffold_borders: Option<ScaffoldBorders>,
    #[serde(rename = "scaffoldDirection")]
    pub direction: ScaffoldDirection,
    #[serde(default)]
    pub spacer_length: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyInfo {
    pub contig_descriptors: Vec<ContigDescriptor>,
    #[serde(default)]
    pub scaffold_descriptors: Vec<ScaffoldDescriptor>,
}

impl AssemblyInfo {
    /// Check identifiers are unique and scaffold references resolve
    pub fn validate(&self) -> CoreResult<()> {
        let mut seen = HashMap::new();
        for (pos, contig) in self.contig_descriptors.iter().enumerate() {
            if let Some(prev) = seen.insert(contig.contig_id, pos) {
                return Err(CoreError::assembly(format!(
                    "contig id {} appears at positions {} and {}",
                    contig.contig_id, prev, pos
                )));
            }
        }
        for contig in &self.contig_descriptors {
            if let Some(scaffold_id) = contig.scaffold_id {
                if self.scaffold(scaffold_id).is_none() {
                    return Err(CoreError::assembly(format!(
                        "contig {} references missing scaffold {}",
                        contig.contig_name, scaffold_id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn total_length_bp(&self) -> BpPos {
        self.contig_descriptors.iter().map(|c| c.contig_length_bp).sum()
    }

    pub fn contig(&self, contig_id: u32) -> Option<&ContigDescriptor> {
        self.contig_descriptors.iter().find(|c| c.contig_id == contig_id)
    }

    pub fn scaffold(&self, scaffold_id: u32) -> Option<&ScaffoldDescriptor> {
        self.scaffold_descriptors.iter().find(|s| s.scaffold_id == scaffold_id)
    }

    pub fn scaffold_of_contig(&self, contig_id: u32) -> Option<&ScaffoldDescriptor> {
        self.contig(contig_id)
            .and_then(|c| c.scaffold_id)
            .and_then(|id| self.scaffold(id))
    }
}

/// Map metadata returned when a Hi-C file is opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDescriptor {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub dtype: String,
    /// Bin resolutions per pyramid level
    pub resolutions: Vec<BinResolution>,
    /// Pixel resolutions per pyramid level, strictly descending
    pub pixel_resolutions: Vec<f64>,
    pub tile_size: u32,
    pub assembly_info: AssemblyInfo,
    /// Matrix side length in bins per pyramid level
    #[serde(default)]
    pub matrix_sizes_bins: Vec<BinIndex>,
}

impl MapDescriptor {
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let descriptor: MapDescriptor = serde_json::from_str(json)?;
        descriptor.assembly_info.validate()?;
        if !descriptor.matrix_sizes_bins.is_empty()
            && descriptor.matrix_sizes_bins.len() != descriptor.resolutions.len()
        {
            return Err(CoreError::assembly(format!(
                "{} matrix sizes for {} resolutions",
                descriptor.matrix_sizes_bins.len(),
                descriptor.resolutions.len()
            )));
        }
        Ok(descriptor)
    }

    pub fn resolution_table(&self) -> CoreResult<ResolutionTable> {
        ResolutionTable::new(self.pixel_resolutions.clone(), self.resolutions.clone())
    }
}
