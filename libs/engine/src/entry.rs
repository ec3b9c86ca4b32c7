use std::fmt::{self, Display, Formatter};

/// A single line of the space separated (csrg) dialect
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MappingEntry {
    Class {
        original: String,
        renamed: String,
    },
    Field {
        class: String,
        original: String,
        renamed: String,
    },
    Method {
        class: String,
        original: String,
        descriptor: String,
        renamed: String,
    },
}
impl MappingEntry {
    /// Parse a line by counting its columns, giving `None` for comments and malformed lines
    pub fn parse_csrg(line: &str) -> Option<MappingEntry> {
        let line = line.trim();
        if line.starts_with('#') { return None }
        let parts: Vec<&str> = line.split(' ').collect();
        Some(match *parts.as_slice() {
            [original, renamed] if !original.is_empty() => MappingEntry::Class {
                original: original.into(),
                renamed: renamed.into(),
            },
            [class, original, renamed] => MappingEntry::Field {
                class: class.into(),
                original: original.into(),
                renamed: renamed.into(),
            },
            [class, original, descriptor, renamed] => MappingEntry::Method {
                class: class.into(),
                original: original.into(),
                descriptor: descriptor.into(),
                renamed: renamed.into(),
            },
            _ => return None
        })
    }
    #[inline]
    pub fn is_member(&self) -> bool {
        match *self {
            MappingEntry::Class { .. } => false,
            MappingEntry::Field { .. } | MappingEntry::Method { .. } => true,
        }
    }
}
impl Display for MappingEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            MappingEntry::Class { ref original, ref renamed } => {
                write!(f, "{} {}", original, renamed)
            },
            MappingEntry::Field { ref class, ref original, ref renamed } => {
                write!(f, "{} {} {}", class, original, renamed)
            },
            MappingEntry::Method { ref class, ref original, ref descriptor, ref renamed } => {
                write!(f, "{} {} {} {}", class, original, descriptor, renamed)
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn parse_columns() {
        assert_eq!(MappingEntry::parse_csrg("a net/minecraft/server/Block"), Some(MappingEntry::Class {
            original: "a".into(),
            renamed: "net/minecraft/server/Block".into(),
        }));
        assert_eq!(MappingEntry::parse_csrg("  net/minecraft/server/Block b tickRate  "), Some(MappingEntry::Field {
            class: "net/minecraft/server/Block".into(),
            original: "b".into(),
            renamed: "tickRate".into(),
        }));
        let method = MappingEntry::parse_csrg("net/minecraft/server/Block a (I)V setLightLevel").unwrap();
        assert!(method.is_member());
        assert_eq!(format!("{}", method), "net/minecraft/server/Block a (I)V setLightLevel");
    }
    #[test]
    fn reject_malformed() {
        assert_eq!(MappingEntry::parse_csrg(""), None);
        assert_eq!(MappingEntry::parse_csrg("# comment with four words"), None);
        assert_eq!(MappingEntry::parse_csrg("single"), None);
        assert_eq!(MappingEntry::parse_csrg("a b c d e"), None);
    }
}
