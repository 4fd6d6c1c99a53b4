//! Command implementations for the HiCT CLI

pub mod edit;
pub mod inspect;
pub mod replay;
