use std::io::BufRead;

use log::debug;

use crate::descriptor::remap_descriptor;
use crate::entry::MappingEntry;
use crate::output::MappingLines;
use crate::resolve::resolve_class;
use crate::table::{ClassMap, ClassMappings};
use crate::MappingError;

/// Merge the class mappings with any number of member mappings.
///
/// The member files are keyed by spigot's class names,
/// so their classes and descriptors are translated back into the obfuscated names
/// to match the class mappings that come first.
/// Lines are emitted in their original order, and anything other than a field or method is dropped.
pub fn combine<I, R>(spigot: &ClassMappings, members: I) -> Result<MappingLines, MappingError>
    where I: IntoIterator<Item=R>, R: BufRead {
    let mut lines: Vec<String> = spigot.classes.iter()
        .map(|(obf, renamed)| MappingEntry::Class {
            original: obf.into(),
            renamed: renamed.into(),
        }.to_string())
        .collect();
    let spigot2obf = spigot.classes.inverse();
    let chain: [&dyn ClassMap; 1] = [&spigot2obf];
    for member_file in members {
        let start = lines.len();
        for line in member_file.lines() {
            let line = line.map_err(MappingError::MalformedInput)?;
            let entry = match MappingEntry::parse_csrg(&line) {
                Some(MappingEntry::Field { class, original, renamed }) => MappingEntry::Field {
                    class: resolve_class(&class, &spigot2obf),
                    original,
                    renamed,
                },
                Some(MappingEntry::Method { class, original, descriptor, renamed }) => MappingEntry::Method {
                    class: resolve_class(&class, &spigot2obf),
                    original,
                    descriptor: remap_descriptor(&descriptor, &chain),
                    renamed,
                },
                Some(MappingEntry::Class { .. }) | None => continue,
            };
            lines.push(entry.to_string());
        }
        debug!("Combined {} member mappings", lines.len() - start);
    }
    Ok(MappingLines { header: spigot.header.clone(), lines })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn spigot() -> ClassMappings {
        ClassMappings::parse_text("\
# BuildData class mappings
a net/minecraft/server/Block
b net/minecraft/server/World
")
    }
    #[test]
    fn combine_members() {
        let members = "\
# member mappings
net/minecraft/server/Block c getWorld
net/minecraft/server/Block d (Lnet/minecraft/server/World;I)Lnet/minecraft/server/Block; update
net/minecraft/server/Block$Inner e (Ljava/lang/String;)V inner
org/Unmapped f g
malformed line
a b c d e
";
        let result = combine(&spigot(), vec![Cursor::new(members)]).unwrap();
        assert_eq!(result.write_string(), "\
# BuildData class mappings
a net/minecraft/server/Block
b net/minecraft/server/World
a c getWorld
a d (Lb;I)La; update
a$Inner e (Ljava/lang/String;)V inner
org/Unmapped f g
");
    }
    #[test]
    fn multiple_member_files_in_order() {
        let first = Cursor::new("net/minecraft/server/World z zeta\n");
        let second = Cursor::new("net/minecraft/server/Block a alpha\n");
        let result = combine(&spigot(), vec![first, second]).unwrap();
        assert_eq!(result.lines[2..].to_vec(), vec!["b z zeta", "a a alpha"]);
    }
    #[test]
    fn class_entries_only() {
        let result = combine(&spigot(), Vec::<Cursor<&str>>::new()).unwrap();
        assert_eq!(result.lines, vec!["a net/minecraft/server/Block", "b net/minecraft/server/World"]);
    }
    #[test]
    fn unreadable_member_file() {
        let first = Cursor::new(b"net/minecraft/server/World z zeta\n".to_vec());
        let second = Cursor::new(vec![0xC3, 0x28]);
        match combine(&spigot(), vec![first, second]) {
            Err(MappingError::MalformedInput(_)) => {},
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
