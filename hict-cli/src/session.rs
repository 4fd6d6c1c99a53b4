//! Opened-map session files
//!
//! A session file is the JSON the backend returns when a map is opened: the
//! resolution pyramid, matrix sizes and the assembly in display order.

use crate::error::{CliError, CliResult};
use hict_core::{ContigDimensionHolder, DimensionHolder, MapDescriptor, ResolutionTable};
use hict_map::{build_hic_layers, Extent, HicTileLayer, Projection};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Session {
    pub path: PathBuf,
    pub descriptor: MapDescriptor,
    pub table: Arc<ResolutionTable>,
    pub holder: Arc<ContigDimensionHolder>,
}

impl Session {
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let session = Self::from_json(&content, path)?;
        log::info!(
            "Loaded session {} ({} contigs, {} resolutions)",
            path.display(),
            session.descriptor.assembly_info.contig_descriptors.len(),
            session.table.len()
        );
        Ok(session)
    }

    pub fn from_json(content: &str, path: &Path) -> CliResult<Self> {
        let mut descriptor = MapDescriptor::from_json(content)?;
        let table = descriptor.resolution_table()?;
        let holder = ContigDimensionHolder::new(&descriptor.assembly_info.contig_descriptors, &descriptor.resolutions)?;

        if descriptor.matrix_sizes_bins.is_empty() {
            descriptor.matrix_sizes_bins = descriptor
                .resolutions
                .iter()
                .map(|&r| holder.total_bins_at(r))
                .collect::<Result<_, _>>()?;
        }
        for (level, bin_resolution) in descriptor.resolutions.iter().enumerate() {
            let computed = holder.total_bins_at(*bin_resolution)?;
            let reported = descriptor.matrix_sizes_bins[level];
            if computed != reported {
                log::warn!(
                    "Resolution {}: contigs cover {} bins but the matrix reports {}",
                    bin_resolution,
                    computed,
                    reported
                );
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            descriptor,
            table: Arc::new(table),
            holder: Arc::new(holder),
        })
    }

    /// Map-wide projection: the extent of the coarsest level
    pub fn global_projection(&self) -> Projection {
        let side = self.descriptor.matrix_sizes_bins[0] as f64 * self.descriptor.pixel_resolutions[0];
        Projection::new("hict-global", Extent::square_below_origin(side))
    }

    pub fn layers(&self) -> CliResult<Vec<HicTileLayer>> {
        Ok(build_hic_layers(&self.table, &self.descriptor.matrix_sizes_bins)?)
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_SESSION: &str = r#"{
    "status": "opened",
    "dtype": "uint8",
    "resolutions": [1000, 250, 50, 10],
    "pixelResolutions": [64.0, 16.0, 4.0, 1.0],
    "tileSize": 256,
    "matrixSizesBins": [101, 401, 2001, 10001],
    "assemblyInfo": {
        "contigDescriptors": [
            {"contigId": 0, "contigName": "chr1", "contigLengthBp": 60000,
             "contigDirection": 1, "scaffoldId": 1},
            {"contigId": 1, "contigName": "chr2", "contigLengthBp": 25555,
             "contigDirection": 0, "scaffoldId": 1},
            {"contigId": 2, "contigName": "chr3", "contigLengthBp": 14445,
             "contigDirection": 1, "scaffoldId": null}
        ],
        "scaffoldDescriptors": [
            {"scaffoldId": 1, "scaffoldName": "scaffold_1",
             "scaffoldBorders": {"startContigId": 0, "endContigId": 1},
             "scaffoldDirection": 1, "spacerLength": 1000}
        ]
    }
}"#;
