use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use indexmap::IndexMap;
use failure::{Error, format_err};
use failure_derive::Fail;
use log::info;
use mappings::{BuildData, MappingDialect, MappingFile, MappingKind, artifact_file_name};
use mappings::spigot::NoExternalMappings;

use crate::combined::combine;
use crate::synthesize::{synthesize, SynthesisMode};
use crate::table::ClassMappings;

/// The repo tag of every generated artifact
const REPO_TAG: &str = "spigot";

/// Generates the mapping tiers of a BuildData checkout,
/// reusing the shipped files where they exist.
///
/// Generated files are placed in the checkout directory,
/// and each tier is only generated once.
pub struct MappingsGenerator<'a> {
    build_data: &'a BuildData,
    spigot: ClassMappings,
    shipped: Vec<MappingFile>,
    external: Option<MappingFile>,
    generated: RefCell<IndexMap<MappingKind, MappingFile>>,
}
impl<'a> MappingsGenerator<'a> {
    /// Load the shipped class mappings, which everything else is based on
    pub fn new(
        build_data: &'a BuildData,
        shipped: Vec<MappingFile>,
        external: Option<MappingFile>
    ) -> Result<Self, Error> {
        let class_file = shipped.iter()
            .find(|file| file.kind == MappingKind::Class)
            .ok_or_else(|| format_err!("BuildData@{} has no class mappings", build_data.revision()))?;
        let spigot = ClassMappings::load(&class_file.path)?;
        info!("Loaded {} class mappings from {}", spigot.classes.len(), class_file.path.display());
        Ok(MappingsGenerator { build_data, spigot, shipped, external, generated: Default::default() })
    }
    #[inline]
    pub fn class_mappings(&self) -> &ClassMappings {
        &self.spigot
    }
    pub fn generate(&self, kind: MappingKind) -> Result<MappingFile, Error> {
        {
            let generated = self.generated.borrow();
            if let Some(file) = generated.get(&kind) {
                return Ok(file.clone())
            }
        }
        let file = self.fallback_generate(kind)
            .map_err(|cause| GenerateError { kind, cause })?;
        self.generated.borrow_mut().insert(kind, file.clone());
        Ok(file)
    }
    fn fallback_generate(&self, kind: MappingKind) -> Result<MappingFile, Error> {
        match kind {
            MappingKind::Class | MappingKind::Package => {
                self.shipped_file(kind)
                    .ok_or_else(|| format_err!("BuildData doesn't ship any {} mappings", kind))
            },
            MappingKind::Members => {
                // BuildData stopped shipping member mappings once mojang's became available
                if let Some(shipped) = self.shipped_file(MappingKind::Members) {
                    return Ok(shipped)
                }
                self.synthesize(MappingKind::Members, SynthesisMode::Members)
            },
            MappingKind::Fields => self.synthesize(MappingKind::Fields, SynthesisMode::Fields),
            MappingKind::Combined => {
                let members = self.generate(MappingKind::Members)?;
                if self.external.is_some() {
                    self.generate(MappingKind::Fields)?;
                }
                let reader = BufReader::new(File::open(&members.path)?);
                let combined = combine(&self.spigot, vec![reader])?;
                let location = self.artifact_path(MappingKind::Combined);
                combined.save(&location)?;
                Ok(MappingFile::with_dialect(MappingDialect::Csrg, MappingKind::Combined, location))
            },
        }
    }
    fn synthesize(&self, kind: MappingKind, mode: SynthesisMode) -> Result<MappingFile, Error> {
        let external = self.external.as_ref()
            .ok_or_else(|| NoExternalMappings(self.build_data.revision().into()))?;
        let lines = synthesize(File::open(&external.path)?, &self.spigot, mode)?;
        let location = self.artifact_path(kind);
        lines.save(&location)?;
        Ok(MappingFile::with_dialect(MappingDialect::Csrg, kind, location))
    }
    fn shipped_file(&self, kind: MappingKind) -> Option<MappingFile> {
        self.shipped.iter().find(|file| file.kind == kind).cloned()
    }
    fn artifact_path(&self, kind: MappingKind) -> PathBuf {
        self.build_data.directory().join(artifact_file_name(
            REPO_TAG,
            self.build_data.revision(),
            kind,
            MappingDialect::Csrg
        ))
    }
}
#[derive(Debug, Fail)]
#[fail(display = "Unable to generate {} mappings: {}", kind, cause)]
pub struct GenerateError {
    kind: MappingKind,
    cause: Error
}
impl GenerateError {
    #[inline]
    pub fn kind(&self) -> MappingKind {
        self.kind
    }
    #[inline]
    pub fn inner(&self) -> &Error {
        &self.cause
    }
}
