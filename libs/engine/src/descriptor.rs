//! Transcoding of JVM type descriptors between naming systems.
//!
//! Both forms are total: every input produces output,
//! and classes that aren't mapped keep their original names.
use crate::table::ClassMap;
use crate::resolve::resolve_chain;

/// Remap the classes referenced by a field or method descriptor
pub fn remap_descriptor(descriptor: &str, chain: &[&dyn ClassMap]) -> String {
    let mut result = String::with_capacity(descriptor.len());
    let mut remaining = descriptor;
    while let Some(first) = remaining.chars().next() {
        remaining = match first {
            'L' => match remaining.find(';') {
                Some(end) => {
                    result.push('L');
                    result.push_str(&resolve_chain(&remaining[1..end], chain));
                    result.push(';');
                    &remaining[end + 1..]
                },
                None => {
                    // Unterminated, so there's no class name to remap
                    result.push_str(remaining);
                    ""
                }
            },
            // Primitives, array markers, parentheses and anything unexpected pass through
            _ => {
                result.push(first);
                &remaining[first.len_utf8()..]
            }
        };
    }
    result
}

/// The descriptor code of a java primitive type, including `void`
fn primitive_code(name: &str) -> Option<char> {
    Some(match name {
        "byte" => 'B',
        "char" => 'C',
        "double" => 'D',
        "float" => 'F',
        "int" => 'I',
        "long" => 'J',
        "short" => 'S',
        "boolean" => 'Z',
        "void" => 'V',
        _ => return None
    })
}

/// Convert a java source type like `java.lang.String[]` into a descriptor,
/// remapping the class through the chain.
pub fn readable_type(name: &str, chain: &[&dyn ClassMap]) -> String {
    let mut result = String::new();
    push_readable_type(name, chain, &mut result);
    result
}
fn push_readable_type(name: &str, chain: &[&dyn ClassMap], result: &mut String) {
    let mut element = name.trim();
    while element.ends_with("[]") {
        result.push('[');
        element = &element[..element.len() - 2];
    }
    match primitive_code(element) {
        Some(code) => result.push(code),
        None => {
            result.push('L');
            result.push_str(&resolve_chain(&element.replace('.', "/"), chain));
            result.push(';');
        }
    }
}

/// Build a method descriptor from a comma separated parameter list and a return type,
/// both written as java source types.
pub fn readable_descriptor(parameters: &str, return_type: &str, chain: &[&dyn ClassMap]) -> String {
    let mut result = String::from("(");
    for parameter in parameters.split(',') {
        if parameter.trim().is_empty() { continue }
        push_readable_type(parameter, chain, &mut result);
    }
    result.push(')');
    push_readable_type(return_type, chain, &mut result);
    result
}
