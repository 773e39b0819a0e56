use indexmap::IndexSet;

use crate::codegen::safe_identifier;
use crate::ir::{Field, Function, Record, RecordField, RecordKind, TypeRef};
use crate::tree::Element;
use crate::types;

use super::{build_callback, build_function, is_hidden, name_of};

/// `<record>`, `<class>`, `<union>` or `<interface>`.
pub fn build_record(el: &Element, kind: RecordKind, ns: &str) -> Option<Record> {
    let name = name_of(el)?;

    let fields = el
        .findall("field")
        .filter(|f| !is_hidden(f))
        .filter_map(|f| build_field(f, ns))
        .collect::<Vec<_>>();

    let functions = members(el, "function", ns, name, true)
        .chain(members(el, "constructor", ns, name, true))
        .collect::<Vec<_>>();
    let methods = members(el, "method", ns, name, false).collect::<Vec<_>>();

    let construct_on_call = functions.iter().any(|f| f.name == "new");

    Some(Record {
        name: name.to_string(),
        kind,
        fields,
        doc: el.doc().to_string(),
        construct_on_call,
        functions,
        methods,
        parents: parents(el, ns),
        namespace: ns.to_string(),
    })
}

fn members<'a>(
    el: &'a Element,
    tag: &'a str,
    ns: &'a str,
    owner: &'a str,
    is_static: bool,
) -> impl Iterator<Item = Function> + 'a {
    el.findall(tag)
        .filter_map(move |m| build_function(m, ns, Some(owner), is_static))
}

fn build_field(field: &Element, ns: &str) -> Option<Field> {
    if let Some(cb) = field.find("callback") {
        // Function pointers keep the callback's own name, falling back to the field's.
        let cb = build_callback(cb, ns).or_else(|| {
            let renamed = cb.clone().with_attr("name", name_of(field)?);
            build_callback(&renamed, ns)
        })?;
        return Some(Field::Callback(cb));
    }
    let name = name_of(field)?;
    Some(Field::Value(RecordField {
        name: safe_identifier(name),
        ty: types::resolve(Some(field), Some(ns)),
        doc: field.doc().to_string(),
    }))
}

/// Superclass, then implemented interfaces; qualified and deduplicated.
fn parents(el: &Element, ns: &str) -> Vec<TypeRef> {
    let declared = el
        .attr("parent")
        .into_iter()
        .chain(el.findall("implements").filter_map(name_of))
        .filter(|p| !p.is_empty());

    let mut seen: IndexSet<String> = IndexSet::new();
    for parent in declared {
        let qualified = if parent.contains('.') {
            parent.to_string()
        } else {
            format!("{ns}.{parent}")
        };
        seen.insert(qualified);
    }
    seen.into_iter().map(TypeRef::new).collect()
}
