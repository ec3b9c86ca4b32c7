use std::io::{BufRead, BufReader};
use std::fs::File;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;

use crate::MappingError;

/// Something that can rename a class
pub trait ClassMap {
    fn get_class(&self, name: &str) -> Option<&str>;
}
impl<'a, M: ClassMap + ?Sized> ClassMap for &'a M {
    #[inline]
    fn get_class(&self, name: &str) -> Option<&str> {
        (**self).get_class(name)
    }
}

/// A bijection between two naming systems, remembering insertion order.
///
/// Both the original and the renamed names are unique,
/// and can be looked up in constant time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
    forward: IndexMap<String, String>,
    reverse: IndexMap<String, String>,
}
impl SymbolTable {
    #[inline]
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
    /// Map the original name onto the renamed one.
    ///
    /// Any existing pair using either name is evicted first,
    /// so the latest insertion always wins.
    pub fn insert(&mut self, original: String, renamed: String) {
        if let Some(existing) = self.forward.get(&original) {
            if *existing == renamed { return }
            let existing = existing.clone();
            self.reverse.shift_remove(&existing);
        }
        if let Some(previous_original) = self.reverse.shift_remove(&renamed) {
            self.forward.shift_remove(&previous_original);
        }
        self.forward.insert(original.clone(), renamed.clone());
        self.reverse.insert(renamed, original);
    }
    #[inline]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.forward.get(original).map(String::as_str)
    }
    #[inline]
    pub fn get_original(&self, renamed: &str) -> Option<&str> {
        self.reverse.get(renamed).map(String::as_str)
    }
    /// View the table in the opposite direction, without copying it
    #[inline]
    pub fn inverse(&self) -> Inverse {
        Inverse(self)
    }
    pub fn inverted(&self) -> SymbolTable {
        SymbolTable { forward: self.reverse.clone(), reverse: self.forward.clone() }
    }
    #[inline]
    pub fn iter<'a>(&'a self) -> impl Iterator<Item=(&'a str, &'a str)> + 'a {
        self.forward.iter().map(|(original, renamed)| (original.as_str(), renamed.as_str()))
    }
}
impl ClassMap for SymbolTable {
    #[inline]
    fn get_class(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

/// A [SymbolTable] looked up from the renamed side
#[derive(Copy, Clone, Debug)]
pub struct Inverse<'a>(&'a SymbolTable);
impl<'a> ClassMap for Inverse<'a> {
    #[inline]
    fn get_class(&self, name: &str) -> Option<&str> {
        self.0.get_original(name)
    }
}

/// The comment lines of a mapping file, copied verbatim into everything derived from it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header(Vec<String>);
impl Header {
    #[inline]
    pub fn new() -> Header {
        Header::default()
    }
    #[inline]
    pub fn push(&mut self, line: String) {
        debug_assert!(line.starts_with('#'), "Invalid header line {:?}", line);
        self.0.push(line);
    }
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.0
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Spigot's class mappings, from the obfuscated names into spigot's names
#[derive(Clone, Debug, Default)]
pub struct ClassMappings {
    pub header: Header,
    pub classes: SymbolTable,
}
impl ClassMappings {
    /// Parse the two column dialect, silently dropping any malformed lines
    pub fn parse_stream<R: BufRead>(reader: R) -> Result<ClassMappings, MappingError> {
        let mut mappings = ClassMappings::default();
        for line in reader.lines() {
            let line = line.map_err(MappingError::MalformedInput)?;
            mappings.parse_line(line);
        }
        debug!("Parsed {} class mappings", mappings.classes.len());
        Ok(mappings)
    }
    pub fn parse_text(text: &str) -> ClassMappings {
        let mut mappings = ClassMappings::default();
        for line in text.lines() {
            mappings.parse_line(line.into());
        }
        mappings
    }
    #[inline]
    pub fn load(path: &Path) -> Result<ClassMappings, MappingError> {
        let file = File::open(path).map_err(MappingError::MalformedInput)?;
        ClassMappings::parse_stream(BufReader::new(file))
    }
    fn parse_line(&mut self, line: String) {
        if line.starts_with('#') {
            self.header.push(line);
            return
        }
        let mut parts = line.trim_end_matches(' ').split(' ');
        if let (Some(original), Some(renamed), None) = (parts.next(), parts.next(), parts.next()) {
            self.classes.insert(original.into(), renamed.into());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn bijection() {
        let mappings = ClassMappings::parse_text("a net/minecraft/server/Block\nb net/minecraft/server/World\nc$d Nested$Inner\n");
        assert_eq!(mappings.classes.len(), 3);
        for (original, renamed) in mappings.classes.iter() {
            assert_eq!(mappings.classes.get(original), Some(renamed));
            assert_eq!(mappings.classes.get_original(renamed), Some(original));
        }
        assert_eq!(mappings.classes.inverse().get_class("net/minecraft/server/World"), Some("b"));
        assert_eq!(mappings.classes.inverted().get("Nested$Inner"), Some("c$d"));
    }
    #[test]
    fn last_write_wins() {
        let mut table = SymbolTable::new();
        table.insert("a".into(), "First".into());
        table.insert("b".into(), "Second".into());
        // Duplicate value evicts the older key
        table.insert("c".into(), "First".into());
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("c"), Some("First"));
        assert_eq!(table.get_original("First"), Some("c"));
        // Duplicate key evicts the older value
        table.insert("b".into(), "Third".into());
        assert_eq!(table.get_original("Second"), None);
        assert_eq!(table.get("b"), Some("Third"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("b", "Third"), ("c", "First")]);
    }
    #[test]
    fn header_and_malformed_lines() {
        let text = "# Generated by BuildData\n# Do not edit\na Block\nmalformed\nb c d\n\nb World \n";
        let mappings = ClassMappings::parse_stream(Cursor::new(text)).unwrap();
        assert_eq!(mappings.header.lines(), &["# Generated by BuildData", "# Do not edit"]);
        assert_eq!(mappings.classes.iter().collect::<Vec<_>>(), vec![("a", "Block"), ("b", "World")]);
    }
    #[test]
    fn unreadable_input() {
        let error = ClassMappings::parse_stream(Cursor::new(vec![b'a', b' ', 0xFF, b'\n'])).unwrap_err();
        match error {
            MappingError::MalformedInput(_) => {},
            other => panic!("Unexpected error: {}", other),
        }
    }
}
