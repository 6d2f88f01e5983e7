//! The universe of extensions and their version-dependent
//! dependencies (`spec.md` §3's "Extension descriptor").

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtId {
    Smol64,
    Smolm,
    Smolf,
    Smolv,
}

impl ExtId {
    pub fn name(self) -> &'static str {
        match self {
            ExtId::Smol64 => "smol64",
            ExtId::Smolm => "smolm",
            ExtId::Smolf => "smolf",
            ExtId::Smolv => "smolv",
        }
    }

    pub fn from_name(name: &str) -> Option<ExtId> {
        match name.to_ascii_lowercase().as_str() {
            "smol64" => Some(ExtId::Smol64),
            "smolm" => Some(ExtId::Smolm),
            "smolf" => Some(ExtId::Smolf),
            "smolv" => Some(ExtId::Smolv),
            _ => None,
        }
    }
}

impl fmt::Display for ExtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dependency: this (ext, major, minor) must also be present.
#[derive(Debug, Clone, Copy)]
pub struct Dep {
    pub ext: ExtId,
    pub major: u16,
    pub minor: u16,
}

const fn dep(ext: ExtId, major: u16, minor: u16) -> Dep {
    Dep { ext, major, minor }
}

/// One row of the extension table: a concrete (ext, major, minor)
/// version and the dependencies it pulls in.
pub struct ExtRow {
    pub ext: ExtId,
    pub major: u16,
    pub minor: u16,
    pub deps: &'static [Dep],
}

pub static EXTENSION_TABLE: &[ExtRow] = &[
    ExtRow {
        ext: ExtId::Smol64,
        major: 0,
        minor: 0,
        deps: &[],
    },
    ExtRow {
        ext: ExtId::Smol64,
        major: 0,
        minor: 1,
        deps: &[],
    },
    ExtRow {
        ext: ExtId::Smol64,
        major: 0,
        minor: 2,
        deps: &[],
    },
    ExtRow {
        ext: ExtId::Smolm,
        major: 1,
        minor: 0,
        deps: &[dep(ExtId::Smol64, 0, 1)],
    },
    ExtRow {
        ext: ExtId::Smolm,
        major: 1,
        minor: 1,
        deps: &[dep(ExtId::Smol64, 0, 1)],
    },
    ExtRow {
        ext: ExtId::Smolf,
        major: 1,
        minor: 0,
        deps: &[dep(ExtId::Smolm, 1, 0), dep(ExtId::Smol64, 0, 1)],
    },
    ExtRow {
        ext: ExtId::Smolf,
        major: 1,
        minor: 1,
        deps: &[dep(ExtId::Smolm, 1, 1)],
    },
    ExtRow {
        ext: ExtId::Smolv,
        major: 1,
        minor: 0,
        deps: &[dep(ExtId::Smolf, 1, 0)],
    },
];

/// The default extension enabled when no `-e` flag is given.
pub const DEFAULT_EXTENSION: Dep = dep(ExtId::Smol64, 0, 0);

/// Look up the row for an exact (ext, major, minor) triple.
pub fn find_row(ext: ExtId, major: u16, minor: u16) -> Option<&'static ExtRow> {
    EXTENSION_TABLE
        .iter()
        .find(|row| row.ext == ext && row.major == major && row.minor == minor)
}

/// The highest minor version defined for (ext, major), if any row
/// with that (ext, major) exists at all.
pub fn max_minor(ext: ExtId, major: u16) -> Option<u16> {
    EXTENSION_TABLE
        .iter()
        .filter(|row| row.ext == ext && row.major == major)
        .map(|row| row.minor)
        .max()
}

/// Whether any row at all exists for this extension name, at any
/// version (used to distinguish "unknown name" from "unknown major").
pub fn extension_known(ext: ExtId) -> bool {
    EXTENSION_TABLE.iter().any(|row| row.ext == ext)
}
