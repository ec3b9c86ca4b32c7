//! Converts between the mapping dialects used by spigot,
//! and generates the mapping tiers that BuildData doesn't ship.
//!
//! Three naming systems are involved:
//! - `obf` - The obfuscated mojang names, emitted by the obfuscator
//! - `spigot` - Spigot's deobfuscated names, held in the `BuildData` git repo
//!   - Spigot's class mappings (`obf -> spigot`) are the basis of everything else
//! - `mojang` - Mojang's official names, shipped as a proguard file for newer versions
//!   - These are only used as a bridge to recover member names and signatures
//!
//! Every operation is a pure transformation over the supplied readers,
//! and nothing here holds any state between calls.
//! Names that can't be resolved are never an error,
//! they either pass through unchanged or are silently excluded.
extern crate failure;
extern crate failure_derive;
extern crate indexmap;
extern crate itertools;
extern crate scopeguard;
extern crate log;
#[cfg(dummy)]
extern crate spigot_mappings_core as mappings;

mod table;
mod resolve;
mod descriptor;
mod entry;
mod output;
pub mod proguard;
mod synthesize;
mod combined;
mod generator;

pub use self::table::{ClassMap, ClassMappings, Header, Inverse, SymbolTable};
pub use self::resolve::{lookup_class, resolve_class, resolve_chain};
pub use self::descriptor::{remap_descriptor, readable_descriptor, readable_type};
pub use self::entry::MappingEntry;
pub use self::output::MappingLines;
pub use self::synthesize::{synthesize, SynthesisMode};
pub use self::combined::combine;
pub use self::generator::{MappingsGenerator, GenerateError};

use std::io;

use failure_derive::Fail;

#[derive(Debug, Fail)]
pub enum MappingError {
    /// The input couldn't be read at all, as opposed to containing bad lines
    #[fail(display = "Malformed mapping input: {}", _0)]
    MalformedInput(#[cause] io::Error),
    #[fail(display = "Unable to write {}: {}", path, cause)]
    Io {
        path: String,
        #[cause]
        cause: io::Error
    },
}
impl MappingError {
    #[inline]
    pub(crate) fn io(path: &::std::path::Path, cause: io::Error) -> MappingError {
        MappingError::Io { path: path.display().to_string(), cause }
    }
}
