//! Command-line surface (`spec.md` §6): flags, the `-e` extension
//! spec grammar, and bundle marker configuration. Parsed with `clap`'s
//! derive API, matching the teacher's `elf2trace`/`emulate` binaries.

use crate::error::CliError;
use crate::registry::ExtensionRegistry;
use crate::tables::extensions::{extension_known, max_minor, ExtId, DEFAULT_EXTENSION};
use clap::Parser;

/// Disassemble a SMOL instruction stream into a bundle-annotated listing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the active extension set before decoding
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Use Unicode bundle markers (╭│╰) instead of the default ASCII ones
    #[arg(short = 'u')]
    pub unicode: bool,

    /// Use STR as the stop-bit marker for both short and tail
    /// positions, and clear the head/body markers
    #[arg(short = 's', value_name = "STR")]
    pub stop_marker: Option<String>,

    /// Enable an extension: NAME[-MAJOR[.MINOR]] (defaults MAJOR=1, MINOR=0)
    #[arg(short = 'e', value_name = "SPEC")]
    pub extensions: Vec<String>,

    /// Files to disassemble; a built-in demonstration buffer is used if none are given
    pub files: Vec<String>,
}

/// Bundle markers: one symbol per `BundlePosition` (`spec.md` §6).
#[derive(Debug, Clone)]
pub struct Markers {
    pub short: String,
    pub head: String,
    pub body: String,
    pub tail: String,
}

impl Markers {
    /// `SPEC_FULL.md` §4 resolution 3: the default markers are the
    /// ASCII set; `-u` switches to Unicode.
    pub fn ascii() -> Self {
        Markers {
            short: ">".to_string(),
            head: " ".to_string(),
            body: " ".to_string(),
            tail: ">".to_string(),
        }
    }

    pub fn unicode() -> Self {
        Markers {
            short: " ".to_string(),
            head: "╭".to_string(),
            body: "│".to_string(),
            tail: "╰".to_string(),
        }
    }

    /// `-s <str>` overrides short/tail and blanks head/body.
    pub fn with_stop_override(mut self, stop: &str) -> Self {
        self.short = stop.to_string();
        self.tail = stop.to_string();
        self.head.clear();
        self.body.clear();
        self
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let mut markers = if cli.unicode {
            Markers::unicode()
        } else {
            Markers::ascii()
        };
        if let Some(stop) = &cli.stop_marker {
            markers = markers.with_stop_override(stop);
        }
        markers
    }
}

/// Parse one `-e` spec (`NAME[-MAJOR[.MINOR]]`) and apply it to
/// `registry`, or report the CLI-fatal error `spec.md` §6 demands.
pub fn apply_extension_spec(registry: &mut ExtensionRegistry, spec: &str) -> Result<(), CliError> {
    let (name, version) = match spec.split_once('-') {
        Some((name, version)) => (name, Some(version)),
        None => (spec, None),
    };

    let ext =
        ExtId::from_name(name).ok_or_else(|| CliError::UnknownExtension(name.to_string()))?;

    let (major, minor) = match version {
        None => (1u16, 0u16),
        Some(version) => match version.split_once('.') {
            Some((major, minor)) => (
                parse_component(major, CliError::InvalidMajorSyntax)?,
                parse_component(minor, CliError::InvalidMinorSyntax)?,
            ),
            None => (parse_component(version, CliError::InvalidMajorSyntax)?, 0u16),
        },
    };

    if !extension_known(ext) {
        return Err(CliError::UnknownExtension(name.to_string()));
    }
    let Some(known_max) = max_minor(ext, major) else {
        return Err(CliError::InvalidMajor {
            name: name.to_string(),
            major,
        });
    };
    if minor > known_max {
        return Err(CliError::UnknownVersion {
            name: name.to_string(),
            major,
            minor,
        });
    }

    registry.add(ext, major, minor);
    Ok(())
}

fn parse_component(s: &str, err: fn(String) -> CliError) -> Result<u16, CliError> {
    s.parse::<u16>().map_err(|_| err(s.to_string()))
}

/// Build the registry for a session: apply every `-e` spec in order,
/// or the default extension if none were given.
pub fn build_registry(cli: &Cli) -> Result<ExtensionRegistry, CliError> {
    let mut registry = ExtensionRegistry::new();
    if cli.extensions.is_empty() {
        registry.add(DEFAULT_EXTENSION.ext, DEFAULT_EXTENSION.major, DEFAULT_EXTENSION.minor);
    } else {
        for spec in &cli.extensions {
            apply_extension_spec(&mut registry, spec)?;
        }
    }
    Ok(registry)
}
