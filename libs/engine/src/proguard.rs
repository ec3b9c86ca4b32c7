//! Line parsing for mojang's proguard mappings.
//!
//! ```text
//! net.minecraft.world.level.Level -> cmm:
//!     int MAX_LEVEL_SIZE -> a
//!     12:15:void tick(java.util.function.BooleanSupplier):80:83 -> a
//! ```
//!
//! The mojang names are on the left, and the obfuscated names on the right.

/// A meaningful line in a proguard file
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProguardLine<'a> {
    /// A class header, with both names converted to internal (slash separated) form
    Class {
        mojang: String,
        obfuscated: String,
    },
    Field {
        field_type: &'a str,
        mojang: &'a str,
        obfuscated: &'a str,
    },
    Method {
        return_type: &'a str,
        mojang: &'a str,
        /// The comma separated parameter types, without the parentheses
        parameters: &'a str,
        obfuscated: &'a str,
    },
    /// A line that ends a class header, but isn't `<mojang> -> <obf>:`
    ///
    /// The members following it belong to no known class.
    UnrecognizedClass,
}
impl<'a> ProguardLine<'a> {
    /// Parse the line, giving `None` for comments, blank lines and anything unrecognized
    pub fn parse(line: &'a str) -> Option<ProguardLine<'a>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { return None }
        if line.ends_with(':') {
            let mut parts = line[..line.len() - 1].split(" -> ");
            return match (parts.next(), parts.next(), parts.next()) {
                (Some(mojang), Some(obfuscated), None) => Some(ProguardLine::Class {
                    mojang: mojang.replace('.', "/"),
                    obfuscated: obfuscated.replace('.', "/"),
                }),
                _ => Some(ProguardLine::UnrecognizedClass)
            }
        }
        let line = strip_line_numbers(line);
        let (left, obfuscated) = split_once(line, " -> ")?;
        let (member_type, name) = split_once(left, " ")?;
        match name.find('(') {
            None => Some(ProguardLine::Field { field_type: member_type, mojang: name, obfuscated }),
            Some(open) => {
                let close = open + name[open..].find(')')?;
                Some(ProguardLine::Method {
                    return_type: member_type,
                    mojang: &name[..open],
                    parameters: &name[open + 1..close],
                    obfuscated,
                })
            }
        }
    }
}

#[inline]
fn split_once<'a>(s: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    s.find(separator).map(|index| (&s[..index], &s[index + separator.len()..]))
}

/// Strip the leading `start:end:` line range of a method
fn strip_line_numbers(line: &str) -> &str {
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let mut parts = line.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), Some(remaining)) if is_number(start) && is_number(end) => remaining,
        _ => line
    }
}
