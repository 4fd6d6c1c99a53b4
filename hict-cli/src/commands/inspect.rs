//! Inspect command - summarise a session's resolution pyramid and assembly

use anyhow::{Context, Result};
use hict_core::DimensionHolder;
use serde::Serialize;
use std::path::Path;

use crate::session::Session;

#[derive(Debug, Serialize)]
pub struct LevelSummary {
    pub level: usize,
    pub pixel_resolution: f64,
    pub bin_resolution: u64,
    pub bins: u64,
    pub matrix_bins: u64,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub status: String,
    pub dtype: String,
    pub tile_size: u32,
    pub contigs: usize,
    pub scaffolds: usize,
    pub total_bp: u64,
    pub levels: Vec<LevelSummary>,
}

pub fn execute(session: &Path, json: bool) -> Result<()> {
    let session = Session::load(session)?;
    let report = build_report(&session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
        return Ok(());
    }

    println!("Session: {}", session.path.display());
    println!("Status: {} ({}), tile size {}", report.status, report.dtype, report.tile_size);
    println!(
        "Assembly: {} contigs, {} scaffolds, {} bp",
        report.contigs, report.scaffolds, report.total_bp
    );
    println!("{:>5}  {:>12}  {:>10}  {:>10}  {:>10}", "level", "px/bin", "bp/bin", "bins", "matrix");
    for level in &report.levels {
        println!(
            "{:>5}  {:>12}  {:>10}  {:>10}  {:>10}",
            level.level, level.pixel_resolution, level.bin_resolution, level.bins, level.matrix_bins
        );
    }
    Ok(())
}

pub fn build_report(session: &Session) -> Result<InspectReport> {
    let descriptor = &session.descriptor;
    let mut levels = Vec::with_capacity(session.table.len());
    for (level, pixel_resolution, bin_resolution) in session.table.iter() {
        levels.push(LevelSummary {
            level,
            pixel_resolution,
            bin_resolution,
            bins: session.holder.total_bins_at(bin_resolution)?,
            matrix_bins: descriptor.matrix_sizes_bins[level],
        });
    }

    Ok(InspectReport {
        status: descriptor.status.clone(),
        dtype: descriptor.dtype.clone(),
        tile_size: descriptor.tile_size,
        contigs: descriptor.assembly_info.contig_descriptors.len(),
        scaffolds: descriptor.assembly_info.scaffold_descriptors.len(),
        total_bp: session.holder.total_bp(),
        levels,
    })
}
