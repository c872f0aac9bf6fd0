//! Maps structured JVM types onto Python stub type syntax.

use crate::sig::Type;

/// Well-known reference types, keyed by dotted name. Generic parameters are
/// deliberately not modeled: `java.util.List<String>` erases to `List`.
fn well_known(name: &str) -> Option<&'static str> {
    Some(match name {
        "java.lang.Object" => "Any",
        "java.lang.String" => "str",
        "java.util.Collection" => "Collection",
        "java.util.List" => "List",
        "java.util.Map" => "Map",
        "java.util.Set" => "Set",
        "java.util.Iterator" => "Iterator",
        "java.util.Iterable" => "Iterable",
        "java.util.function.Function" => "Callable",
        "java.util.function.BiFunction" => "Callable",
        "java.util.function.BiConsumer" => "Callable",
        _ => return None,
    })
}

/// Renders a type as Python stub syntax.
///
/// Priority order: the fixed well-known table, then recursive `List[...]`
/// wrapping for arrays, then the dotted class name as-is. Pure and total;
/// unrecognized class types always take the fallback.
pub fn map_type(ty: &Type) -> String {
    match *ty {
        Type::Void => "None".to_owned(),
        Type::Boolean => "bool".to_owned(),
        Type::Byte | Type::Char | Type::Short | Type::Int | Type::Long => "int".to_owned(),
        Type::Float | Type::Double => "float".to_owned(),
        Type::Array(ref element) => format!("List[{}]", map_type(element)),
        Type::Class(ref name) => match well_known(name) {
            Some(mapped) => mapped.to_owned(),
            None => name.clone(),
        },
    }
}
