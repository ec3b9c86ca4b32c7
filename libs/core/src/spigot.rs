use std::io::Read;
use std::path::{Path, PathBuf};
use std::fs::{self, File};

use failure::Error;
use failure_derive::Fail;
use log::{debug, info};
use serde_derive::Deserialize;
#[cfg(feature = "download")]
use git2::{Repository, Oid, build::CheckoutBuilder};

use crate::mapping_file::{MappingFile, MappingKind, MappingDialect};

pub const VERSIONS_URL: &str = "https://hub.spigotmc.org/versions";
pub const BUILDDATA_REPO: &str = "https://hub.spigotmc.org/stash/scm/spigot/builddata.git";

/// The location of the version descriptor for the specified revision
#[inline]
pub fn version_info_url(revision: &str) -> String {
    format!("{}/{}.json", VERSIONS_URL, revision)
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionRefs {
    pub build_data: String,
    pub bukkit: String,
    pub craft_bukkit: String,
    pub spigot: String,
}
/// Spigot's description of a version, taken from `https://hub.spigotmc.org/versions/{rev}.json`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub refs: VersionRefs,
    #[serde(default)]
    pub tools_version: Option<u32>,
    #[serde(default)]
    pub java_versions: Vec<u32>,
}
impl VersionInfo {
    #[inline]
    pub fn read<R: Read>(input: R) -> Result<VersionInfo, Error> {
        Ok(::serde_json::from_reader(input)?)
    }
    /// Fetch the descriptor of the specified revision from spigot's version server
    #[cfg(feature = "download")]
    pub fn fetch(revision: &str) -> Result<VersionInfo, Error> {
        let buffer = match crate::utils::download_buffer(&version_info_url(revision)) {
            Err(ref e) if e.downcast_ref::<crate::utils::HttpNotFound>().is_some() => {
                // If it's a 404, then we know it's an unknown version
                return Err(UnknownVersion(revision.into()).into())
            },
            Err(e) => return Err(e),
            Ok(buffer) => buffer
        };
        VersionInfo::read(&*buffer)
    }
    /// Check if spigot knows about the specified revision
    #[cfg(feature = "download")]
    pub fn exists(revision: &str) -> Result<bool, Error> {
        match VersionInfo::fetch(revision) {
            Ok(_) => Ok(true),
            Err(ref e) if e.downcast_ref::<UnknownVersion>().is_some() => Ok(false),
            Err(e) => Err(e)
        }
    }
}

/// The `info.json` at the root of the BuildData repo.
///
/// The mapping paths are relative to the `mappings` directory.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildDataInfo {
    pub minecraft_version: Option<String>,
    pub server_url: Option<String>,
    pub mappings_url: Option<String>,
    pub minecraft_hash: Option<String>,
    pub access_transforms: Option<String>,
    pub class_mappings: Option<String>,
    pub member_mappings: Option<String>,
    pub package_mappings: Option<String>,
    pub class_map_command: Option<String>,
    pub member_map_command: Option<String>,
    pub final_map_command: Option<String>,
    pub decompile_command: Option<String>,
    pub tools_version: Option<u32>,
}
impl BuildDataInfo {
    #[inline]
    pub fn read<R: Read>(input: R) -> Result<BuildDataInfo, Error> {
        Ok(::serde_json::from_reader(input)?)
    }
    /// Whether mojang's external mappings are available for this version
    #[inline]
    pub fn has_external_mappings(&self) -> bool {
        self.mappings_url.is_some()
    }
    /// The mapping files declared by this info, resolved against the mappings directory
    pub fn mapping_files(&self, mappings_dir: &Path) -> Vec<MappingFile> {
        let declared = [
            (MappingKind::Class, &self.class_mappings),
            (MappingKind::Members, &self.member_mappings),
            (MappingKind::Package, &self.package_mappings),
        ];
        declared.iter()
            .filter_map(|&(kind, relative)| {
                relative.as_ref().map(|relative| MappingFile::new(kind, mappings_dir.join(relative)))
            })
            .collect()
    }
}

/// A local checkout of spigot's BuildData repo for a specific revision.
///
/// All files derived from this revision are placed inside the checkout directory.
#[derive(Clone, Debug)]
pub struct BuildData {
    directory: PathBuf,
    revision: String,
    repo_url: String,
}
impl BuildData {
    #[inline]
    pub fn new(directory: PathBuf, revision: String) -> BuildData {
        BuildData { directory, revision, repo_url: BUILDDATA_REPO.into() }
    }
    #[inline]
    pub fn with_repo(mut self, repo_url: String) -> BuildData {
        self.repo_url = repo_url;
        self
    }
    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
    #[inline]
    pub fn revision(&self) -> &str {
        &self.revision
    }
    #[inline]
    pub fn mappings_dir(&self) -> PathBuf {
        self.directory.join("mappings")
    }
    #[inline]
    pub fn info_file(&self) -> PathBuf {
        self.directory.join("info.json")
    }
    /// Mojang's mappings for this revision, which may share the directory with other revisions
    #[inline]
    pub fn external_mappings_file(&self) -> PathBuf {
        self.directory.join(format!("mojmaps-{}.txt", self.revision))
    }
    pub fn load_info(&self) -> Result<BuildDataInfo, Error> {
        let location = self.info_file();
        if !location.exists() {
            return Err(MissingBuildDataInfo(location.display().to_string()).into())
        }
        debug!("Loading {}", location.display());
        BuildDataInfo::read(File::open(&location)?)
    }
    /// Mojang's mappings, if they've already been downloaded into the checkout
    pub fn external_mappings(&self) -> Option<MappingFile> {
        let location = self.external_mappings_file();
        if location.is_file() {
            Some(MappingFile::with_dialect(MappingDialect::Proguard, MappingKind::Combined, location))
        } else {
            None
        }
    }
    pub fn mapping_files(&self) -> Result<Vec<MappingFile>, Error> {
        let info = self.load_info()?;
        Ok(info.mapping_files(&self.mappings_dir()))
    }
    /// Remove the checkout and everything generated inside it
    pub fn delete(&self) -> Result<(), Error> {
        if self.directory.is_dir() {
            info!("Deleting {}", self.directory.display());
            fs::remove_dir_all(&self.directory)?;
        }
        Ok(())
    }
    /// Clone BuildData if needed and check out the specified commit
    #[cfg(feature = "download")]
    pub fn checkout(&self, commit: &str) -> Result<(), Error> {
        let commit_id = Oid::from_str(commit)?;
        let repo = if !self.directory.join(".git").exists() {
            info!("Fetching BuildData@{}", commit);
            Repository::clone(&self.repo_url, &self.directory)?
        } else {
            Repository::open(&self.directory)?
        };
        if repo.find_commit(commit_id).is_err() {
            info!("Updating BuildData@{}", commit);
            // Update the repo if we don't have the commit we want
            let mut remote = repo.find_remote("origin")
                .or_else(|_| repo.remote_anonymous(&self.repo_url))?;
            remote.fetch(&["+refs/heads/*:refs/remotes/origin/*"], None, None)?;
        }
        let target = repo.find_commit(commit_id)?;
        repo.checkout_tree(target.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head_detached(commit_id)?;
        debug!("Checked out BuildData@{} into {}", commit, self.directory.display());
        Ok(())
    }
    /// Download mojang's mappings declared by the info, unless this revision already has them
    #[cfg(feature = "download")]
    pub fn download_external_mappings(&self, info: &BuildDataInfo) -> Result<MappingFile, Error> {
        let url = info.mappings_url.as_ref()
            .ok_or_else(|| NoExternalMappings(self.revision.clone()))?;
        if let Some(existing) = self.external_mappings() {
            return Ok(existing)
        }
        info!("Downloading mojang mappings for {}", self.revision);
        crate::utils::download_file(url, &self.external_mappings_file())?;
        Ok(MappingFile::with_dialect(
            MappingDialect::Proguard,
            MappingKind::Combined,
            self.external_mappings_file()
        ))
    }
}

#[derive(Debug, Fail)]
#[fail(display = "Unknown spigot version {:?}", _0)]
pub struct UnknownVersion(pub String);

#[derive(Debug, Fail)]
#[fail(display = "Missing BuildData info: {}", _0)]
pub struct MissingBuildDataInfo(pub String);

#[derive(Debug, Fail)]
#[fail(display = "Mojang mappings are not available for version {}", _0)]
pub struct NoExternalMappings(pub String);

#[cfg(test)]
mod test {
    use super::*;
    const VERSION_JSON: &str = r#"{
        "name": "3865",
        "description": "Jenkins build 3865",
        "refs": {
            "BuildData": "2ef4c6e5c1c4e5d0b1d7b23c7e3a9ff4e0e1c2b3",
            "Bukkit": "b2c3bc1ca1f5ee5fa1bf9ff3cbf1d3b5fd3c0f1a",
            "CraftBukkit": "a1a2a3a4a5a6a7a8a9a0b1b2b3b4b5b6b7b8b9b0",
            "Spigot": "c1c2c3c4c5c6c7c8c9c0d1d2d3d4d5d6d7d8d9d0"
        },
        "toolsVersion": 148,
        "javaVersions": [61, 65]
    }"#;
    const INFO_JSON: &str = r#"{
        "minecraftVersion": "1.20.1",
        "serverUrl": "https://example.invalid/server.jar",
        "mappingsUrl": "https://example.invalid/server.txt",
        "minecraftHash": "deadbeef",
        "accessTransforms": "bukkit-1.20.1.at",
        "classMappings": "bukkit-1.20.1-cl.csrg",
        "memberMappings": null,
        "packageMappings": "package.exclude",
        "toolsVersion": 148
    }"#;
    #[test]
    fn parse_version_info() {
        let info = VersionInfo::read(VERSION_JSON.as_bytes()).unwrap();
        assert_eq!(info.name, "3865");
        assert_eq!(info.refs.build_data, "2ef4c6e5c1c4e5d0b1d7b23c7e3a9ff4e0e1c2b3");
        assert_eq!(info.tools_version, Some(148));
        assert_eq!(info.java_versions, vec![61, 65]);
    }
    #[test]
    fn parse_build_data_info() {
        let info = BuildDataInfo::read(INFO_JSON.as_bytes()).unwrap();
        assert!(info.has_external_mappings());
        assert_eq!(info.member_mappings, None);
        assert_eq!(info.class_map_command, None);
        let files = info.mapping_files(Path::new("work/mappings"));
        assert_eq!(files, vec![
            MappingFile::new(MappingKind::Class, PathBuf::from("work/mappings/bukkit-1.20.1-cl.csrg")),
            MappingFile::new(MappingKind::Package, PathBuf::from("work/mappings/package.exclude")),
        ]);
        assert_eq!(files[0].dialect, Some(MappingDialect::Csrg));
    }
    #[test]
    fn missing_external_mappings() {
        let info = BuildDataInfo::read(&br#"{"classMappings": "bukkit-1.8.8-cl.csrg"}"#[..]).unwrap();
        assert!(!info.has_external_mappings());
    }
    #[test]
    fn missing_info_file() {
        let build_data = BuildData::new(
            ::std::env::temp_dir().join("spigot-mappings-missing-info"),
            "1.8.8".into()
        );
        let error = build_data.load_info().unwrap_err();
        let missing = error.downcast_ref::<MissingBuildDataInfo>().unwrap();
        assert!(missing.0.ends_with("info.json"));
        assert_eq!(error.to_string(), format!("Missing BuildData info: {}", missing.0));
    }
    #[test]
    fn external_mappings_per_revision() {
        let directory = ::std::env::temp_dir()
            .join(format!("spigot-mappings-shared-{}", ::std::process::id()));
        let _ = fs::remove_dir_all(&directory);
        fs::create_dir_all(&directory).unwrap();
        let old = BuildData::new(directory.clone(), "1.20.1".into());
        let new = BuildData::new(directory.clone(), "1.20.4".into());
        assert_ne!(old.external_mappings_file(), new.external_mappings_file());
        fs::write(old.external_mappings_file(), "a.b.C -> a:\n").unwrap();
        let existing = old.external_mappings().unwrap();
        assert_eq!(existing.dialect, Some(MappingDialect::Proguard));
        assert_eq!(existing.path, directory.join("mojmaps-1.20.1.txt"));
        // Another revision in the same directory never picks up the stale file
        assert!(new.external_mappings().is_none());
        fs::remove_dir_all(&directory).unwrap();
    }
}
