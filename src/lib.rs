#![forbid(unsafe_code)]

//! Disassembler for the SMOL instruction set: a fixed-width encoding
//! whose decodable instructions are gated by a user-selected set of
//! versioned architectural extensions, and whose decoded stream is
//! segmented into variable-length parallel-execution bundles.

pub mod bitmap;
pub mod bundle;
pub mod cli;
pub mod decode;
pub mod driver;
pub mod error;
pub mod fields;
pub mod registry;
pub mod tables;
