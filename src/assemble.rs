//! Module assembly: walk a `<namespace>`, build every declaration, render.
use crate::codegen::Codegen;
use crate::config::{AliasNamespace, Options};
use crate::error::{Error, Result};
use crate::ir::{Decl, EnumKind, Module, RecordKind};
use crate::lower;
use crate::strip::strip_namespaces;
use crate::tree::{self, Element};

/// Top-level namespace children that produce output. Anything else
/// (`constant`, `docsection`, `glib:boxed`, ...) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Alias,
    Enum(EnumKind),
    Callback,
    Function,
    Record(RecordKind),
}

impl DeclKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "alias" => DeclKind::Alias,
            "enumeration" => DeclKind::Enum(EnumKind::Enumeration),
            "bitfield" => DeclKind::Enum(EnumKind::Bitfield),
            "callback" => DeclKind::Callback,
            "function" => DeclKind::Function,
            "record" => DeclKind::Record(RecordKind::Record),
            "class" => DeclKind::Record(RecordKind::Class),
            "union" => DeclKind::Record(RecordKind::Union),
            "interface" => DeclKind::Record(RecordKind::Interface),
            _ => return None,
        })
    }
}

/// Build one top-level declaration. `None` means it contributes nothing.
pub fn lower_decl(el: &Element, ns: &str, options: &Options) -> Option<Decl> {
    if lower::is_hidden(el) {
        log::debug!("skipping non-introspectable <{}> {:?}", el.tag, el.attr("name"));
        return None;
    }
    let kind = DeclKind::from_tag(&el.tag)?;
    log::debug!("lowering <{}> {:?}", el.tag, el.attr("name"));
    match kind {
        DeclKind::Alias => {
            let type_ns = match options.alias_namespace {
                AliasNamespace::Target => options.target_namespace.as_str(),
                AliasNamespace::Enclosing => ns,
            };
            lower::build_alias(el, ns, type_ns).map(Decl::Alias)
        }
        DeclKind::Enum(kind) => lower::build_enumeration(el, kind, ns).map(Decl::Enumeration),
        DeclKind::Callback => lower::build_callback(el, ns).map(Decl::Callback),
        DeclKind::Function => lower::build_function(el, ns, None, true).map(Decl::Function),
        DeclKind::Record(kind) => lower::build_record(el, kind, ns).map(Decl::Record),
    }
}

/// All declarations of a stripped `<namespace>`, in document order.
pub fn lower_namespace(namespace: &Element, options: &Options) -> Module {
    let ns = namespace
        .attr("name")
        .filter(|n| !n.is_empty())
        .unwrap_or(options.target_namespace.as_str());
    let decls = namespace
        .children
        .iter()
        .filter_map(|el| lower_decl(el, ns, options))
        .collect::<Vec<_>>();
    log::info!("{} declarations in namespace {ns}", decls.len());
    Module { namespace: options.target_namespace.clone(), decls }
}

/// Parse, strip and lower a whole GIR document.
pub fn build_module(xml: &str, options: &Options) -> Result<Module> {
    let root = strip_namespaces(tree::parse(xml)?);
    let namespace = if root.tag == "namespace" {
        &root
    } else {
        root.find("namespace").ok_or(Error::MissingNamespace)?
    };
    Ok(lower_namespace(namespace, options))
}

/// The complete stub module text for a GIR document.
pub fn generate(xml: &str, options: &Options) -> Result<String> {
    let module = build_module(xml, options)?;
    let mut cg = Codegen::new();
    cg.emit(&module);
    Ok(cg.into_string())
}
