use crate::ir::{Alias, EnumKind, Enumeration};
use crate::tree::Element;
use crate::types;

use super::name_of;

/// `<enumeration>` / `<bitfield>`. Members are not collected.
pub fn build_enumeration(el: &Element, kind: EnumKind, ns: &str) -> Option<Enumeration> {
    Some(Enumeration {
        name: name_of(el)?.to_string(),
        kind,
        namespace: ns.to_string(),
    })
}

/// `<alias>`. `ns` declares the alias; `type_ns` qualifies its target.
pub fn build_alias(el: &Element, ns: &str, type_ns: &str) -> Option<Alias> {
    Some(Alias {
        name: name_of(el)?.to_string(),
        target: types::resolve(Some(el), Some(type_ns)),
        namespace: ns.to_string(),
    })
}
