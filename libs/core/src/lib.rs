//! The data model shared by the mapping tiers,
//! and the collaborators that fetch spigot's BuildData.
//!
//! A spigot revision is described by a [`VersionInfo`],
//! which points at a commit of the BuildData repo.
//! The `info.json` in that commit ([`BuildDataInfo`]) declares the shipped mapping files,
//! and optionally the url of mojang's mappings.
//! Fetching anything over the network requires the `download` feature.
extern crate failure;
extern crate failure_derive;
extern crate serde;
extern crate serde_json;
extern crate serde_derive;
extern crate log;
#[cfg(feature = "download")]
extern crate curl;
#[cfg(feature = "download")]
extern crate git2;

pub mod mapping_file;
pub mod spigot;
#[cfg(feature = "download")]
mod utils;

pub use self::mapping_file::{MappingFile, MappingKind, MappingDialect, artifact_file_name};
pub use self::spigot::{BuildData, BuildDataInfo, VersionInfo, VersionRefs};
#[cfg(feature = "download")]
pub use self::utils::HttpNotFound;
