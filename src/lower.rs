//! Declaration builders: stripped GIR elements → `ir` declarations.
//!
//! Builders return `None` for anything that must not appear in the output
//! (non-introspectable, shadowed, or nameless elements). They never fail.
pub mod callable;
pub mod record;
pub mod simple;

pub use callable::{build_callback, build_function, build_parameters};
pub use record::build_record;
pub use simple::{build_alias, build_enumeration};

use crate::tree::Element;

/// `introspectable="0"`: the element has no binding-visible surface.
pub fn is_hidden(el: &Element) -> bool {
    el.attr("introspectable") == Some("0")
}

/// `shadowed-by="..."`: another function replaces this one publicly.
pub fn is_shadowed(el: &Element) -> bool {
    el.attr("shadowed-by").is_some_and(|s| !s.is_empty())
}

/// Common skip rule for function-like elements.
pub fn is_skipped(el: &Element) -> bool {
    is_hidden(el) || is_shadowed(el)
}

/// Non-empty `name` attribute.
pub(crate) fn name_of(el: &Element) -> Option<&str> {
    el.attr("name").filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_rules() {
        let f = Element::new("function").with_attr("name", "f");
        assert!(!is_skipped(&f));
        assert!(is_skipped(&f.clone().with_attr("introspectable", "0")));
        assert!(!is_skipped(&f.clone().with_attr("introspectable", "1")));
        assert!(is_skipped(&f.clone().with_attr("shadowed-by", "f_full")));
        assert!(!is_skipped(&f.with_attr("shadowed-by", "")));
    }

    #[test]
    fn empty_names_are_absent() {
        assert_eq!(name_of(&Element::new("field").with_attr("name", "")), None);
        assert_eq!(name_of(&Element::new("field")), None);
        assert_eq!(name_of(&Element::new("field").with_attr("name", "x")), Some("x"));
    }
}
