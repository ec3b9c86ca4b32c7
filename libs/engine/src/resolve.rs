use crate::table::ClassMap;

/// Lookup the renamed class, falling back to the enclosing classes of inner classes.
///
/// If only an enclosing class is mapped,
/// the stripped inner class suffixes are appended to its new name,
/// so `a$b$c` becomes `Renamed$b$c` when only `a` is mapped.
pub fn lookup_class<M: ClassMap + ?Sized>(name: &str, classes: &M) -> Option<String> {
    if let Some(renamed) = classes.get_class(name) {
        return Some(renamed.into())
    }
    let mut enclosing = name;
    while let Some(index) = enclosing.rfind('$') {
        enclosing = &enclosing[..index];
        if let Some(renamed) = classes.get_class(enclosing) {
            let suffix = &name[index..];
            let mut result = String::with_capacity(renamed.len() + suffix.len());
            result.push_str(renamed);
            result.push_str(suffix);
            return Some(result)
        }
    }
    None
}

/// Rename the class, leaving it unchanged if it isn't mapped
#[inline]
pub fn resolve_class<M: ClassMap + ?Sized>(name: &str, classes: &M) -> String {
    lookup_class(name, classes).unwrap_or_else(|| name.into())
}

/// Rename the class through each of the mappings in turn
pub fn resolve_chain(name: &str, chain: &[&dyn ClassMap]) -> String {
    let mut result = name.to_owned();
    for classes in chain {
        result = resolve_class(&result, *classes);
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::SymbolTable;

    fn table(entries: &[(&str, &str)]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for &(original, renamed) in entries {
            table.insert(original.into(), renamed.into());
        }
        table
    }
    #[test]
    fn exact_match() {
        let classes = table(&[("a/B", "x/Y"), ("a/B$Inner", "x/Explicit")]);
        assert_eq!(resolve_class("a/B", &classes), "x/Y");
        assert_eq!(resolve_class("a/B$Inner", &classes), "x/Explicit");
    }
    #[test]
    fn inner_class_fallback() {
        let classes = table(&[("a/B", "x/Y")]);
        assert_eq!(resolve_class("a/B$Inner", &classes), "x/Y$Inner");
        assert_eq!(resolve_class("a/B$Inner$Deep", &classes), "x/Y$Inner$Deep");
        assert_eq!(lookup_class("a/B$1", &classes), Some("x/Y$1".into()));
    }
    #[test]
    fn partial_inner_mapping() {
        let classes = table(&[("a", "Outer"), ("a$b", "Outer$Middle")]);
        assert_eq!(resolve_class("a$b$c", &classes), "Outer$Middle$c");
    }
    #[test]
    fn identity_fallback() {
        let classes = table(&[("a/B", "x/Y")]);
        for &name in &["java/lang/String", "a/C", "", "a/Bb"] {
            assert_eq!(lookup_class(name, &classes), None);
            assert_eq!(resolve_class(name, &classes), name);
        }
        assert_eq!(resolve_class("q$r$s", &classes), "q$r$s");
    }
    #[test]
    fn chained_resolution() {
        let mojang2obf = table(&[("net/minecraft/world/level/Level", "cmm")]);
        let obf2spigot = table(&[("cmm", "net/minecraft/world/level/World")]);
        let chain: [&dyn ClassMap; 2] = [&mojang2obf, &obf2spigot];
        assert_eq!(
            resolve_chain("net/minecraft/world/level/Level$Explosion", &chain),
            "net/minecraft/world/level/World$Explosion"
        );
        assert_eq!(resolve_chain("java/util/List", &chain), "java/util/List");
        assert_eq!(resolve_chain("cmm", &chain[1..]), "net/minecraft/world/level/World");
    }
}
