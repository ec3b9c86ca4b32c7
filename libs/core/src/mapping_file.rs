use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use failure_derive::Fail;

/// The on-disk syntax of a mapping file
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MappingDialect {
    Tiny,
    Srg,
    /// Compact srg, the space separated columns used by Spigot's BuildData
    Csrg,
    /// Mojang's mappings are shipped as proguard `txt` files
    Proguard,
}
impl MappingDialect {
    pub const ALL: [MappingDialect; 4] = [
        MappingDialect::Tiny,
        MappingDialect::Srg,
        MappingDialect::Csrg,
        MappingDialect::Proguard,
    ];
    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            MappingDialect::Tiny => "tiny",
            MappingDialect::Srg => "srg",
            MappingDialect::Csrg => "csrg",
            MappingDialect::Proguard => "txt",
        }
    }
    pub fn from_file_name(name: &str) -> Option<MappingDialect> {
        let (_, extension) = name.rsplit_once('.')?;
        MappingDialect::ALL.iter().cloned()
            .find(|dialect| dialect.extension() == extension)
    }
}
impl Display for MappingDialect {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            MappingDialect::Tiny => "tiny",
            MappingDialect::Srg => "srg",
            MappingDialect::Csrg => "csrg",
            MappingDialect::Proguard => "proguard",
        })
    }
}

/// The tier of a mapping file, describing which symbols it renames
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MappingKind {
    Class,
    Members,
    Fields,
    Package,
    Combined,
}
impl MappingKind {
    #[inline]
    fn id(self) -> &'static str {
        match self {
            MappingKind::Class => "class",
            MappingKind::Members => "members",
            MappingKind::Fields => "fields",
            MappingKind::Package => "package",
            MappingKind::Combined => "combined",
        }
    }
}
impl FromStr for MappingKind {
    type Err = InvalidMappingKind;

    fn from_str(s: &str) -> Result<Self, InvalidMappingKind> {
        Ok(match s {
            "class" => MappingKind::Class,
            "members" => MappingKind::Members,
            "fields" => MappingKind::Fields,
            "package" => MappingKind::Package,
            "combined" => MappingKind::Combined,
            _ => return Err(InvalidMappingKind(s.into()))
        })
    }
}
impl Display for MappingKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}
#[derive(Debug, Fail)]
#[fail(display = "Invalid mapping kind {:?}", _0)]
pub struct InvalidMappingKind(String);

/// A mapping artifact on disk, tagged with its dialect and tier.
///
/// The dialect is `None` when the file extension isn't recognized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappingFile {
    pub dialect: Option<MappingDialect>,
    pub kind: MappingKind,
    pub path: PathBuf,
}
impl MappingFile {
    /// Tag the file, guessing the dialect from its extension
    pub fn new(kind: MappingKind, path: PathBuf) -> MappingFile {
        let dialect = path.file_name()
            .and_then(|name| name.to_str())
            .and_then(MappingDialect::from_file_name);
        MappingFile { dialect, kind, path }
    }
    #[inline]
    pub fn with_dialect(dialect: MappingDialect, kind: MappingKind, path: PathBuf) -> MappingFile {
        MappingFile { dialect: Some(dialect), kind, path }
    }
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl Display for MappingFile {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.dialect {
            Some(dialect) => write!(f, "{} {}", dialect, self.kind)?,
            None => write!(f, "unknown {}", self.kind)?,
        }
        write!(f, " mappings at {}", self.path.display())
    }
}

/// The stable name of a generated artifact: `<repo_tag>-<revision>-<tier>.<ext>`
pub fn artifact_file_name(
    repo_tag: &str,
    revision: &str,
    kind: MappingKind,
    dialect: MappingDialect
) -> String {
    format!("{}-{}-{}.{}", repo_tag, revision, kind, dialect.extension())
}
