//! HiCT Core Library
//!
//! Resolution pyramid lookup, bin/bp dimension bookkeeping, assembly descriptors
//! and structural edit requests for Hi-C contact maps.

pub mod error;
pub mod types;
pub mod resolution;
pub mod dimension;
pub mod assembly;
pub mod edit;

// Re-export commonly used types and functions
pub use error::{CoreError, CoreResult};
pub use types::*;
pub use resolution::{search_descending, ResolutionTable, SearchResult};
pub use dimension::{ContigDimensionHolder, DimensionHolder};
pub use assembly::{AssemblyInfo, ContigDescriptor, MapDescriptor, ScaffoldDescriptor};
pub use edit::{AssemblyEdit, BpSelection, EditRequest};

/// Version information for the HiCT core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
