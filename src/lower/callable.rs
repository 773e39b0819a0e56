use crate::codegen::safe_identifier;
use crate::ir::{Callback, Function, Parameter, ReturnValue, RECEIVER};
use crate::tree::Element;
use crate::types;

use super::{is_skipped, name_of};

/// One `Parameter` per child of `<parameters>`, in declaration order.
/// The instance parameter, when present, comes first.
pub fn build_parameters(el: &Element, ns: &str) -> Vec<Parameter> {
    let Some(params) = el.find("parameters") else {
        return Vec::new();
    };
    params
        .children
        .iter()
        .filter(|p| matches!(p.tag.as_str(), "parameter" | "instance-parameter"))
        .map(|p| Parameter {
            name: safe_identifier(p.attr("name").unwrap_or("_")),
            ty: types::resolve(Some(p), Some(ns)),
            nilable: p.flag("nullable") || p.flag("allow-none"),
            doc: p.doc().to_string(),
        })
        .collect()
}

/// `None` when there is no `<return-value>` or it is `none` (void).
fn build_return_value(el: &Element, ns: &str) -> Option<ReturnValue> {
    let ret = el.find("return-value")?;
    let ty = types::resolve(Some(ret), Some(ns));
    if ty.is_nil() {
        return None;
    }
    Some(ReturnValue { ty, doc: ret.doc().to_string() })
}

/// Function, constructor or method.
///
/// `owner` is the record name for members (`Gio` + `AppInfo` → `Gio.AppInfo`),
/// `None` for free functions.
pub fn build_function(el: &Element, ns: &str, owner: Option<&str>, is_static: bool) -> Option<Function> {
    if is_skipped(el) {
        log::debug!("skipping {} {:?}", el.tag, el.attr("name"));
        return None;
    }
    let name = el
        .attr("shadows")
        .filter(|s| !s.is_empty())
        .or_else(|| name_of(el))?;

    let mut parameters = build_parameters(el, ns);
    if !is_static {
        if let Some(receiver) = parameters.first_mut() {
            receiver.name = RECEIVER.to_string();
        }
    }

    let namespace = match owner {
        Some(owner) => format!("{ns}.{owner}"),
        None => ns.to_string(),
    };

    // Record members carry the Lua-safe name everywhere; free functions only
    // sanitize the declaration line.
    let name = match owner {
        Some(_) => safe_identifier(name),
        None => name.to_string(),
    };

    Some(Function {
        name,
        doc: el.doc().to_string(),
        parameters,
        return_value: build_return_value(el, ns),
        namespace: Some(namespace),
        is_static,
    })
}

/// Top-level `<callback>` or the `<callback>` inside a function-pointer field.
pub fn build_callback(el: &Element, ns: &str) -> Option<Callback> {
    let name = name_of(el)?;
    Some(Callback {
        name: name.to_string(),
        parameters: build_parameters(el, ns),
        return_type: build_return_value(el, ns).map(|r| r.ty),
        namespace: ns.to_string(),
    })
}
