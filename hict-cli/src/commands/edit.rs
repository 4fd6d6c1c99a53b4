//! Edit command - form a structural edit request from a bin selection

use anyhow::{Context, Result};
use hict_core::{AssemblyEdit, BinIndex, BinResolution, BpSelection, DimensionHolder};
use std::path::Path;

use crate::error::{CliError, CliResult};
use crate::session::Session;
use crate::EditAction;

/// A selection made on the map, in bins at one resolution
#[derive(Debug, Clone)]
pub struct EditArgs {
    pub action: EditAction,
    pub start_bin: BinIndex,
    pub end_bin: Option<BinIndex>,
    pub resolution: BinResolution,
    pub target_bin: Option<BinIndex>,
    pub name: Option<String>,
    pub spacer: Option<u64>,
}

pub fn execute(session: &Path, args: EditArgs) -> Result<()> {
    let session = Session::load(session)?;
    let edit = build_edit(&session, &args)?;
    let request = edit.to_request();
    log::info!("Formed {} request", request.path);
    println!("{}", serde_json::to_string_pretty(&request).context("Failed to serialize request")?);
    Ok(())
}

pub fn build_edit(session: &Session, args: &EditArgs) -> CliResult<AssemblyEdit> {
    let holder = session.holder.as_ref();
    if session.table.level_of_bin_resolution(args.resolution).is_none() {
        return Err(CliError::edit(format!(
            "resolution {} is not one of {:?}",
            args.resolution,
            session.table.bin_resolutions()
        )));
    }

    let end_bin = args.end_bin.unwrap_or(args.start_bin);
    let selection = || -> CliResult<BpSelection> {
        let selection = BpSelection::from_bins(holder, args.start_bin, end_bin, args.resolution)?;
        log::debug!(
            "Bins {}..={} at {} cover bp {}..{}",
            args.start_bin, end_bin, args.resolution, selection.start_bp, selection.end_bp
        );
        Ok(selection)
    };

    let edit = match args.action {
        EditAction::Group => AssemblyEdit::GroupContigsIntoScaffold {
            selection: selection()?,
            new_scaffold_name: args.name.clone(),
            spacer_length: args.spacer,
        },
        EditAction::Ungroup => AssemblyEdit::UngroupContigsFromScaffold { selection: selection()? },
        EditAction::Reverse => AssemblyEdit::ReverseSelectionRange { selection: selection()? },
        EditAction::Debris => AssemblyEdit::MoveSelectionToDebris { selection: selection()? },
        EditAction::Move => {
            let target_bin = args
                .target_bin
                .ok_or_else(|| CliError::edit("move needs --target-bin"))?;
            AssemblyEdit::MoveSelectionRange {
                selection: selection()?,
                target_start_bp: holder.start_bp_of_bin(target_bin, args.resolution)?,
            }
        }
        EditAction::Split => {
            let total_bins = holder.total_bins_at(args.resolution)?;
            if args.start_bin >= total_bins {
                return Err(CliError::edit(format!(
                    "split bin {} is outside the {} bins at resolution {}",
                    args.start_bin, total_bins, args.resolution
                )));
            }
            AssemblyEdit::SplitContigAtBin {
                split_px: args.start_bin,
                bp_resolution: args.resolution,
            }
        }
    };
    edit.validate(holder.total_bp())?;
    Ok(edit)
}
