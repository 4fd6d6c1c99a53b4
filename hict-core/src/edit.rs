//! Structural edit requests against the assembly service
//!
//! Edits are expressed in base pairs along the assembly axis. The map works in
//! bins, so selections are converted through the dimension holder before a request
//! is formed. Only the request shape lives here; delivering it is up to the caller.

use crate::dimension::DimensionHolder;
use crate::error::{CoreError, CoreResult};
use crate::types::{BinIndex, BinResolution, BpPos};
use serde::Serialize;
use serde_json::{json, Value};

/// Half-open base-pair range `[start_bp, end_bp)` on the assembly axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BpSelection {
    pub start_bp: BpPos,
    pub end_bp: BpPos,
}

impl BpSelection {
    pub fn new(start_bp: BpPos, end_bp: BpPos, total_bp: BpPos) -> CoreResult<Self> {
        if start_bp >= end_bp {
            return Err(CoreError::selection(format!(
                "empty range {}..{}",
                start_bp, end_bp
            )));
        }
        if end_bp > total_bp {
            return Err(CoreError::selection(format!(
                "range end {} exceeds assembly length {}",
                end_bp, total_bp
            )));
        }
        Ok(Self { start_bp, end_bp })
    }

    /// Selection covering the inclusive bin range `start_bin..=end_bin` at `resolution`
    pub fn from_bins<D: DimensionHolder + ?Sized>(
        holder: &D,
        start_bin: BinIndex,
        end_bin: BinIndex,
        resolution: BinResolution,
    ) -> CoreResult<Self> {
        let (lo, hi) = if start_bin <= end_bin { (start_bin, end_bin) } else { (end_bin, start_bin) };
        let total_bins = holder.total_bins_at(resolution)?;
        if hi >= total_bins {
            return Err(CoreError::selection(format!(
                "bin {} is outside the {} bins at resolution {}",
                hi, total_bins, resolution
            )));
        }
        let start_bp = holder.start_bp_of_bin(lo, resolution)?;
        let end_bp = holder.start_bp_of_bin(hi + 1, resolution)?;
        Self::new(start_bp, end_bp, holder.total_bp())
    }

    pub fn len(&self) -> BpPos {
        self.end_bp - self.start_bp
    }

    pub fn is_empty(&self) -> bool {
        self.start_bp >= self.end_bp
    }

    pub fn contains(&self, bp: BpPos) -> bool {
        bp >= self.start_bp && bp < self.end_bp
    }
}

/// An assembly modification the backend can apply
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyEdit {
    GroupContigsIntoScaffold {
        selection: BpSelection,
        new_scaffold_name: Option<String>,
        spacer_length: Option<u64>,
    },
    UngroupContigsFromScaffold {
        selection: BpSelection,
    },
    ReverseSelectionRange {
        selection: BpSelection,
    },
    MoveSelectionRange {
        selection: BpSelection,
        target_start_bp: BpPos,
    },
    MoveSelectionToDebris {
        selection: BpSelection,
    },
    SplitContigAtBin {
        split_px: BinIndex,
        bp_resolution: BinResolution,
    },
}

/// Endpoint path and JSON body of an edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRequest {
    pub path: &'static str,
    pub body: Value,
}

impl AssemblyEdit {
    pub fn request_path(&self) -> &'static str {
        match self {
            AssemblyEdit::GroupContigsIntoScaffold { .. } => "/group_contigs_into_scaffold",
            AssemblyEdit::UngroupContigsFromScaffold { .. } => "/ungroup_contigs_from_scaffold",
            AssemblyEdit::ReverseSelectionRange { .. } => "/reverse_selection_range",
            AssemblyEdit::MoveSelectionRange { .. } => "/move_selection_range",
            AssemblyEdit::MoveSelectionToDebris { .. } => "/move_selection_to_debris",
            AssemblyEdit::SplitContigAtBin { .. } => "/split_contig_at_bin",
        }
    }

    /// Check the edit is meaningful for an assembly of `total_bp` base pairs
    pub fn validate(&self, total_bp: BpPos) -> CoreResult<()> {
        match self {
            AssemblyEdit::MoveSelectionRange { selection, target_start_bp } => {
                if *target_start_bp > total_bp.saturating_sub(selection.len()) {
                    return Err(CoreError::selection(format!(
                        "moving {} bp to {} runs past the assembly end {}",
                        selection.len(),
                        target_start_bp,
                        total_bp
                    )));
                }
                Ok(())
            }
            AssemblyEdit::SplitContigAtBin { bp_resolution, .. } if *bp_resolution == 0 => {
                Err(CoreError::selection("split resolution must be positive"))
            }
            _ => Ok(()),
        }
    }

    pub fn to_request(&self) -> EditRequest {
        let body = match self {
            AssemblyEdit::GroupContigsIntoScaffold {
                selection,
                new_scaffold_name,
                spacer_length,
            } => {
                let mut body = json!({
                    "startBP": selection.start_bp,
                    "endBP": selection.end_bp,
                });
                if let Some(name) = new_scaffold_name {
                    body["newScaffoldName"] = json!(name);
                }
                if let Some(spacer) = spacer_length {
                    body["spacerLength"] = json!(spacer);
                }
                body
            }
            AssemblyEdit::UngroupContigsFromScaffold { selection }
            | AssemblyEdit::ReverseSelectionRange { selection }
            | AssemblyEdit::MoveSelectionToDebris { selection } => json!({
                "startBP": selection.start_bp,
                "endBP": selection.end_bp,
            }),
            AssemblyEdit::MoveSelectionRange { selection, target_start_bp } => json!({
                "startBP": selection.start_bp,
                "endBP": selection.end_bp,
                "targetStartBP": target_start_bp,
            }),
            AssemblyEdit::SplitContigAtBin { split_px, bp_resolution } => json!({
                "splitPx": split_px,
                "bpResolution": bp_resolution,
            }),
        };
        EditRequest {
            path: self.request_path(),
            body,
        }
    }
}
