//! Bin <-> base-pair bookkeeping along the assembly axis
//!
//! The contact map axis is the concatenation of all contigs in assembly order.
//! At each bin resolution a contig contributes `ceil(length / resolution)` bins
//! (or whatever the backend reports), and nothing at all when hidden at that
//! resolution, so bins and base pairs advance at different rates per contig.

use crate::assembly::ContigDescriptor;
use crate::error::{CoreError, CoreResult};
use crate::types::*;
use std::collections::BTreeMap;

/// Conversions between bin and base-pair coordinates used by map interactions
pub trait DimensionHolder {
    /// Clamp each axis of `bins` into `[0, total_bins)` at the tier named by `key`
    fn clamp_bin_coordinates_at_resolution(&self, bins: [i64; 2], key: ResolutionKey) -> CoreResult<BinPair>;

    /// First base pair covered by `bin`; bins past the end map to the axis length
    fn start_bp_of_bin(&self, bin: BinIndex, resolution: BinResolution) -> CoreResult<BpPos>;

    /// Bin covering `bp`; positions past the end map to the last bin
    fn bin_containing_bp(&self, bp: BpPos, resolution: BinResolution) -> CoreResult<BinIndex>;

    fn total_bins_at(&self, resolution: BinResolution) -> CoreResult<BinIndex>;

    fn total_bp(&self) -> BpPos;
}

/// Prefix sums of contig extents in bins at one resolution
#[derive(Debug, Clone)]
struct ResolutionLayout {
    /// `prefix_bins[i]` is the first bin of contig `i`; the last entry is the total
    prefix_bins: Vec<BinIndex>,
}

/// Dimension holder backed by the ordered contig descriptors of an assembly
#[derive(Debug, Clone)]
pub struct ContigDimensionHolder {
    contig_ids: Vec<u32>,
    contig_lengths: Vec<BpPos>,
    /// `prefix_bp[i]` is the first base pair of contig `i`; the last entry is the total
    prefix_bp: Vec<BpPos>,
    layouts: BTreeMap<BinResolution, ResolutionLayout>,
}

impl ContigDimensionHolder {
    /// Build the holder for contigs in assembly order at each of `resolutions`
    pub fn new(contigs: &[ContigDescriptor], resolutions: &[BinResolution]) -> CoreResult<Self> {
        if resolutions.contains(&0) {
            return Err(CoreError::assembly("bin resolution 0 is not allowed"));
        }

        let mut prefix_bp = Vec::with_capacity(contigs.len() + 1);
        let mut acc: BpPos = 0;
        prefix_bp.push(acc);
        for contig in contigs {
            acc = acc.checked_add(contig.contig_length_bp).ok_or_else(|| {
                CoreError::assembly("total assembly length overflows u64")
            })?;
            prefix_bp.push(acc);
        }

        let mut layouts = BTreeMap::new();
        for &resolution in resolutions {
            let mut prefix_bins = Vec::with_capacity(contigs.len() + 1);
            let mut bins: BinIndex = 0;
            prefix_bins.push(bins);
            for contig in contigs {
                bins += contig.length_bins_at(resolution);
                prefix_bins.push(bins);
            }
            log::debug!("Resolution {}: {} bins over {} contigs", resolution, bins, contigs.len());
            layouts.insert(resolution, ResolutionLayout { prefix_bins });
        }

        Ok(Self {
            contig_ids: contigs.iter().map(|c| c.contig_id).collect(),
            contig_lengths: contigs.iter().map(|c| c.contig_length_bp).collect(),
            prefix_bp,
            layouts,
        })
    }

    pub fn resolutions(&self) -> impl Iterator<Item = BinResolution> + '_ {
        self.layouts.keys().copied()
    }

    pub fn contig_count(&self) -> usize {
        self.contig_ids.len()
    }

    fn layout(&self, resolution: BinResolution) -> CoreResult<&ResolutionLayout> {
        self.layouts
            .get(&resolution)
            .ok_or_else(|| CoreError::unknown_resolution(resolution))
    }

    /// Assembly-order index of the contig owning `bin`, if the bin is in range
    fn contig_index_at_bin(&self, layout: &ResolutionLayout, bin: BinIndex) -> Option<usize> {
        let total = *layout.prefix_bins.last()?;
        if bin >= total {
            return None;
        }
        // Hidden contigs share their prefix with the next shown one; take the last candidate.
        Some(layout.prefix_bins.partition_point(|&p| p <= bin) - 1)
    }

    fn contig_index_at_bp(&self, bp: BpPos) -> Option<usize> {
        if bp >= self.total_bp() {
            return None;
        }
        Some(self.prefix_bp.partition_point(|&p| p <= bp) - 1)
    }

    /// Identifier of the contig that owns `bin` at `resolution`
    pub fn contig_id_at_bin(&self, bin: BinIndex, resolution: BinResolution) -> CoreResult<Option<u32>> {
        let layout = self.layout(resolution)?;
        Ok(self.contig_index_at_bin(layout, bin).map(|i| self.contig_ids[i]))
    }

    /// Identifier of the contig that owns `bp`
    pub fn contig_id_at_bp(&self, bp: BpPos) -> Option<u32> {
        self.contig_index_at_bp(bp).map(|i| self.contig_ids[i])
    }

    /// Half-open bp range `[start, end)` covered by the bins `start_bin..=end_bin`
    pub fn bp_range_of_bins(
        &self,
        start_bin: BinIndex,
        end_bin: BinIndex,
        resolution: BinResolution,
    ) -> CoreResult<(BpPos, BpPos)> {
        let start = self.start_bp_of_bin(start_bin, resolution)?;
        let end = self.start_bp_of_bin(end_bin.saturating_add(1), resolution)?;
        Ok((start, end))
    }
}

impl DimensionHolder for ContigDimensionHolder {
    fn clamp_bin_coordinates_at_resolution(&self, bins: [i64; 2], key: ResolutionKey) -> CoreResult<BinPair> {
        let total = self.total_bins_at(key.resolution())?;
        let clamp = |value: i64| -> BinIndex {
            if value <= 0 || total == 0 {
                0
            } else {
                (value as BinIndex).min(total - 1)
            }
        };
        Ok([clamp(bins[0]), clamp(bins[1])])
    }

    fn start_bp_of_bin(&self, bin: BinIndex, resolution: BinResolution) -> CoreResult<BpPos> {
        let layout = self.layout(resolution)?;
        let Some(idx) = self.contig_index_at_bin(layout, bin) else {
            return Ok(self.total_bp());
        };
        let offset_bins = bin - layout.prefix_bins[idx];
        let offset_bp = offset_bins
            .saturating_mul(resolution)
            .min(self.contig_lengths[idx].saturating_sub(1));
        Ok(self.prefix_bp[idx] + offset_bp)
    }

    fn bin_containing_bp(&self, bp: BpPos, resolution: BinResolution) -> CoreResult<BinIndex> {
        let layout = self.layout(resolution)?;
        let total = *layout.prefix_bins.last().unwrap_or(&0);
        if total == 0 {
            return Ok(0);
        }
        let Some(idx) = self.contig_index_at_bp(bp) else {
            return Ok(total - 1);
        };
        let first = layout.prefix_bins[idx];
        let len_bins = layout.prefix_bins[idx + 1] - first;
        if len_bins == 0 {
            // Hidden here: snap to where the next shown contig begins.
            return Ok(first.min(total - 1));
        }
        let offset = (bp - self.prefix_bp[idx]) / resolution;
        Ok(first + offset.min(len_bins - 1))
    }

    fn total_bins_at(&self, resolution: BinResolution) -> CoreResult<BinIndex> {
        Ok(*self.layout(resolution)?.prefix_bins.last().unwrap_or(&0))
    }

    fn total_bp(&self) -> BpPos {
        *self.prefix_bp.last().unwrap_or(&0)
    }
}
