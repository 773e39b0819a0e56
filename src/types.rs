//! GIR type references → LuaLS type expressions.
//!
//! Resolution order:
//! 1. an `<array>` child wins over a `<type>` child (element type + `[]`)
//! 2. ordered collections (`GLib.Array`, `GLib.List`, `GLib.SList`) → element type + `[]`
//! 3. `GLib.HashTable` → `table<K, V>`
//! 4. primitive table
//! 5. bare names are qualified with the enclosing namespace; dotted names pass through
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ir::TypeRef;
use crate::tree::Element;

/// Namespace used for bare names when no enclosing namespace is known.
pub const DEFAULT_NAMESPACE: &str = "GLib";

const ORDERED_COLLECTIONS: &[&str] = &["Array", "List", "SList"];
const KEY_VALUE_TABLE: &str = "HashTable";

static PRIMITIVES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    const INTEGERS: &[&str] = &[
        "short", "int", "long", "ushort", "uint", "ulong",
        "gint", "guint", "gshort", "gushort", "glong", "gulong",
        "gint8", "guint8", "gint16", "guint16", "gint32", "guint32", "gint64", "guint64",
        "gunichar", "gsize", "gssize", "goffset", "gchar", "guchar",
    ];
    const NUMBERS: &[&str] = &["long double", "gfloat", "gdouble"];
    const STRINGS: &[&str] = &["gchar*", "gstring", "utf8", "filename"];
    const POINTERS: &[&str] = &["gpointer", "gconstpointer"];

    let mut m = HashMap::new();
    m.insert("none", "nil");
    m.insert("None", "nil");
    m.insert("any", "any");
    m.insert("unknown", "unknown");
    m.insert("gboolean", "(boolean|nil)");
    m.extend(INTEGERS.iter().map(|k| (*k, "integer")));
    m.extend(NUMBERS.iter().map(|k| (*k, "number")));
    m.extend(STRINGS.iter().map(|k| (*k, "string")));
    m.extend(POINTERS.iter().map(|k| (*k, "userdata")));
    m
});

/// Primitive mapping, if `name` is one. Exact spelling only.
pub fn primitive(name: &str) -> Option<&'static str> {
    PRIMITIVES.get(name).copied()
}

/// Resolve a bare or qualified type *name* (no container handling).
pub fn resolve_name(name: &str, ns: Option<&str>) -> TypeRef {
    if let Some(prim) = primitive(name) {
        return TypeRef::new(prim);
    }
    if name.contains('.') {
        return TypeRef::new(name);
    }
    let ns = ns.filter(|ns| !ns.is_empty()).unwrap_or(DEFAULT_NAMESPACE);
    TypeRef::new(format!("{ns}.{name}"))
}

/// Resolve the type carried by a holder node (parameter, field, return value,
/// alias, or an `<array>` itself).
pub fn resolve(holder: Option<&Element>, ns: Option<&str>) -> TypeRef {
    let Some(holder) = holder else {
        return TypeRef::unknown();
    };
    let resolved = if let Some(array) = holder.find("array") {
        resolve(Some(array), ns).array_of()
    } else if let Some(ty) = holder.find("type") {
        resolve_type_node(ty, ns)
    } else {
        TypeRef::unknown()
    };
    log::trace!("resolved <{}> to `{resolved}`", holder.tag);
    resolved
}

/// Resolve a `<type>` node itself, recursing into its parameter types.
pub fn resolve_type_node(ty: &Element, ns: Option<&str>) -> TypeRef {
    let Some(name) = ty.attr("name") else {
        return TypeRef::unknown();
    };

    match container_kind(name) {
        Some(Container::Ordered) => {
            let item = ty.find("type").map_or_else(TypeRef::unknown, |t| resolve_type_node(t, ns));
            item.array_of()
        }
        Some(Container::Table) => {
            let mut params = ty.findall("type");
            let key = params.next().map_or_else(TypeRef::unknown, |t| resolve_type_node(t, ns));
            let value = params.next().map_or_else(TypeRef::unknown, |t| resolve_type_node(t, ns));
            TypeRef::table_of(&key, &value)
        }
        None => resolve_name(name, ns),
    }
}

enum Container {
    Ordered,
    Table,
}

/// Only the qualified `GLib.` spellings are containers.
fn container_kind(name: &str) -> Option<Container> {
    let local = name.strip_prefix(DEFAULT_NAMESPACE)?.strip_prefix('.')?;
    if ORDERED_COLLECTIONS.contains(&local) {
        Some(Container::Ordered)
    } else if local == KEY_VALUE_TABLE {
        Some(Container::Table)
    } else {
        None
    }
}
