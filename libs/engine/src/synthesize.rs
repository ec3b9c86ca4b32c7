use std::io::Read;

use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;

use crate::descriptor::readable_descriptor;
use crate::entry::MappingEntry;
use crate::output::MappingLines;
use crate::proguard::ProguardLine;
use crate::resolve::lookup_class;
use crate::table::{ClassMap, ClassMappings, SymbolTable};
use crate::MappingError;

/// Which members to recover from mojang's mappings
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SynthesisMode {
    /// Only fields, escaping names that collide with reserved words
    Fields,
    /// Both fields and methods, with their signatures in spigot's names
    Members,
}

/// Obfuscated field names that are keywords for the tools consuming field maps
const RESERVED_WORDS: &[&str] = &["if", "do"];

/// Recover spigot's member mappings by using mojang's names as a bridge.
///
/// Mojang's mappings are read in two passes.
/// The first pass collects every class header into the `mojang -> obf` bridge,
/// which is needed before any signature can be translated.
/// The second pass emits the members of every class that spigot maps,
/// skipping classes that can't be resolved (along with all their members).
/// Members whose mojang name is already the obfuscated name are no-ops and never emitted.
///
/// The input is buffered once and both passes walk the buffered text.
/// Members following a class header that can't be parsed are dropped along with it.
///
/// The resulting lines are deduplicated and sorted, after the class mappings' header.
pub fn synthesize<R: Read>(
    mut mojang: R,
    spigot: &ClassMappings,
    mode: SynthesisMode
) -> Result<MappingLines, MappingError> {
    let mut text = String::new();
    mojang.read_to_string(&mut text).map_err(MappingError::MalformedInput)?;
    let mut mojang2obf = SymbolTable::new();
    for line in text.lines() {
        if let Some(ProguardLine::Class { mojang, obfuscated }) = ProguardLine::parse(line) {
            mojang2obf.insert(mojang, obfuscated);
        }
    }
    debug!("Bridging {} mojang classes", mojang2obf.len());
    let chain: [&dyn ClassMap; 2] = [&mojang2obf, &spigot.classes];
    let mut entries = IndexSet::new();
    let mut current_class: Option<String> = None;
    let mut skipped_classes = 0usize;
    for line in text.lines() {
        match ProguardLine::parse(line) {
            Some(ProguardLine::Class { obfuscated, .. }) => {
                current_class = lookup_class(&obfuscated, &spigot.classes);
                if current_class.is_none() {
                    skipped_classes += 1;
                }
            },
            Some(ProguardLine::UnrecognizedClass) => {
                current_class = None;
                skipped_classes += 1;
            },
            Some(ProguardLine::Field { mojang, obfuscated, .. }) => {
                let class = match current_class {
                    Some(ref class) => class,
                    None => continue
                };
                if mojang == obfuscated || mojang.contains('$') { continue }
                let mut original = obfuscated.to_owned();
                if mode == SynthesisMode::Fields && RESERVED_WORDS.contains(&obfuscated) {
                    original.push('_');
                }
                entries.insert(MappingEntry::Field {
                    class: class.clone(),
                    original,
                    renamed: mojang.into(),
                }.to_string());
            },
            Some(ProguardLine::Method { return_type, mojang, parameters, obfuscated }) => {
                if mode != SynthesisMode::Members { continue }
                let class = match current_class {
                    Some(ref class) => class,
                    None => continue
                };
                if obfuscated == "<init>" || obfuscated == "<clinit>"
                    || mojang == obfuscated || mojang.contains('$') {
                    continue
                }
                entries.insert(MappingEntry::Method {
                    class: class.clone(),
                    original: obfuscated.into(),
                    descriptor: readable_descriptor(parameters, return_type, &chain),
                    renamed: mojang.into(),
                }.to_string());
            },
            None => {}
        }
    }
    debug!(
        "Synthesized {} {:?} mappings, skipping {} unmapped classes",
        entries.len(), mode, skipped_classes
    );
    Ok(MappingLines {
        header: spigot.header.clone(),
        lines: entries.into_iter().sorted().collect(),
    })
}
