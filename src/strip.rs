//! Namespace stripping: every tag and attribute label reduced to its local name.
use indexmap::IndexMap;

use crate::tree::Element;

/// Local part of a label. Handles both the prefixed form (`c:type`) and the
/// expanded Clark form (`{http://...}type`).
pub fn local_name(label: &str) -> &str {
    let label = match label.split_once('}') {
        Some((_, rest)) => rest,
        None => label,
    };
    match label.rsplit_once(':') {
        Some((_, local)) => local,
        None => label,
    }
}

/// Return an equivalent tree with all labels namespace-free.
///
/// Two attributes collapsing onto the same local name keep the position of
/// the first and the value of the last.
pub fn strip_namespaces(el: Element) -> Element {
    let Element { tag, attrib, children, text } = el;

    let mut stripped: IndexMap<String, String> = IndexMap::with_capacity(attrib.len());
    for (key, value) in attrib {
        stripped.insert(local_name(&key).to_string(), value);
    }

    Element {
        tag: local_name(&tag).to_string(),
        attrib: stripped,
        children: children.into_iter().map(strip_namespaces).collect(),
        text,
    }
}
