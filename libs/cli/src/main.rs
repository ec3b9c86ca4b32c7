#[cfg(dummy)] // Needed for IntelliJ autocomplete
extern crate spigot_mappings_core as mappings;
#[cfg(dummy)]
extern crate spigot_mappings_engine as engine;
#[macro_use]
extern crate clap;
extern crate failure;
extern crate log;
extern crate env_logger;

use std::path::PathBuf;
use std::process::exit;

use failure::Error;
use log::{info, error};

use mappings::{BuildData, MappingFile, MappingKind, VersionInfo};
use mappings::spigot::{NoExternalMappings, BUILDDATA_REPO};
use engine::{MappingsGenerator, GenerateError};

fn app() -> clap::App<'static, 'static> {
    clap_app!(spigot_mappings =>
        (version: crate_version!())
        (author: crate_authors!())
        (about: crate_description!())
        (@arg spigot: --spigot "Download the mappings shipped with spigot's BuildData")
        (@arg mojang: --mojang "Download mojang's mappings, failing if the version has none")
        (@arg members: --members "Generate the member mappings")
        (@arg fields: --fields "Generate the field mappings")
        (@arg generate_combined: --("generate-combined") "Generate the combined spigot mappings")
        (@arg fresh: --fresh "Delete the working directory before checking out BuildData")
        (@arg dir: --dir +takes_value "The working directory, where {rev} is replaced by the version (default: builddata-{rev})")
        (@arg repo: --repo +takes_value "An alternate BuildData git repository")
        (@arg version: +required "The version to download the mappings for")
    )
}

fn print_file(file: &MappingFile) {
    println!("{}", file);
}

/// Tell the user when mojang's mappings don't exist for the version, instead of failing obscurely
fn is_unavailable(error: &Error) -> bool {
    if error.downcast_ref::<NoExternalMappings>().is_some() {
        return true
    }
    match error.downcast_ref::<GenerateError>() {
        Some(generate) => generate.inner().downcast_ref::<NoExternalMappings>().is_some(),
        None => false
    }
}

fn run() -> Result<(), Error> {
    let matches = app().get_matches();
    let version = matches.value_of("version").unwrap();
    let directory = PathBuf::from(matches.value_of("dir")
        .unwrap_or("builddata-{rev}")
        .replace("{rev}", version));
    let repo = matches.value_of("repo").unwrap_or(BUILDDATA_REPO);
    let build_data = BuildData::new(directory, version.into()).with_repo(repo.into());
    let version_info = VersionInfo::fetch(version)?;
    info!("Resolved {} to BuildData@{}", version, version_info.refs.build_data);
    if matches.is_present("fresh") {
        build_data.delete()?;
    }
    build_data.checkout(&version_info.refs.build_data)?;
    let info = build_data.load_info()?;
    let shipped = build_data.mapping_files()?;
    if matches.is_present("spigot") {
        println!("Spigot mappings for version {}", version);
        for file in shipped.iter().filter(|file| file.path.exists()) {
            print_file(file);
        }
    }
    let mut targets = Vec::new();
    if matches.is_present("members") { targets.push(MappingKind::Members) }
    if matches.is_present("fields") { targets.push(MappingKind::Fields) }
    if matches.is_present("generate_combined") { targets.push(MappingKind::Combined) }
    let wants_external = matches.is_present("mojang") || !targets.is_empty();
    let external = if wants_external && info.has_external_mappings() {
        Some(build_data.download_external_mappings(&info)?)
    } else {
        None
    };
    if matches.is_present("mojang") {
        match external {
            Some(ref file) => print_file(file),
            None => return Err(NoExternalMappings(version.into()).into())
        }
    }
    if !targets.is_empty() {
        let generator = MappingsGenerator::new(&build_data, shipped, external)?;
        for &target in &targets {
            println!("Generating {} mappings for version {}", target, version);
            print_file(&generator.generate(target)?);
        }
    }
    Ok(())
}

fn main() {
    if ::std::env::var_os("RUST_LOG").is_none() {
        ::std::env::set_var("RUST_LOG", "info");
    }
    ::env_logger::init();
    if let Err(e) = run() {
        if is_unavailable(&e) {
            error!("Mojang mappings are not available for this version");
        } else {
            error!("{}", e);
            for cause in e.iter_causes() {
                error!("Caused by: {}", cause);
            }
        }
        exit(1);
    }
}
