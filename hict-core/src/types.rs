use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base-pair offset along the assembly axis
pub type BpPos = u64;
/// Bin index along the assembly axis at some resolution
pub type BinIndex = u64;
/// Bin size in base pairs
pub type BinResolution = u64;
/// Index into the resolution pyramid, 0 being the coarsest level
pub type LevelIndex = usize;

/// A pair of bin indices (x, y) on the contact map
pub type BinPair = [BinIndex; 2];
/// A pair of base-pair offsets (x, y) on the contact map
pub type BpPair = [BpPos; 2];

/// String-encoded identity of a bin-resolution tier.
///
/// Layers carry their bin resolution as a string property; the key parses it once
/// so clamping and bp conversion resolve to the same numeric tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolutionKey(BinResolution);

impl ResolutionKey {
    pub fn new(resolution: BinResolution) -> Self {
        Self(resolution)
    }

    pub fn resolution(self) -> BinResolution {
        self.0
    }
}

impl FromStr for ResolutionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let value: BinResolution = trimmed
            .parse()
            .map_err(|_| CoreError::resolution_key(s))?;
        if value == 0 {
            return Err(CoreError::resolution_key(s));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for ResolutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BinResolution> for ResolutionKey {
    fn from(resolution: BinResolution) -> Self {
        Self(resolution)
    }
}

macro_rules! coded_enum {
    ($name:ident, $kind:literal, { $($variant:ident = $code:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($variant),+
        }

        impl TryFrom<u8> for $name {
            type Error = CoreError;

            fn try_from(code: u8) -> CoreResult<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(CoreError::UnknownCode { kind: $kind, code }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $code),+
                }
            }
        }
    };
}

coded_enum!(ContigDirection, "contig direction", {
    Reversed = 0,
    Forward = 1,
});

coded_enum!(ScaffoldDirection, "scaffold direction", {
    Reversed = 0,
    Forward = 1,
});

coded_enum!(ContigHideType, "contig hide type", {
    AutoHidden = 0,
    AutoShown = 1,
    ForcedHidden = 2,
    ForcedShown = 3,
});

coded_enum!(QueryLengthUnit, "query length unit", {
    BasePairs = 0,
    Bins = 1,
    Pixels = 2,
});

impl ContigHideType {
    /// Whether the contig occupies bins on the matrix at this resolution
    pub fn is_shown(self) -> bool {
        matches!(self, ContigHideType::AutoShown | ContigHideType::ForcedShown)
    }
}

impl Default for ContigHideType {
    fn default() -> Self {
        ContigHideType::AutoShown
    }
}
