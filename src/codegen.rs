//! LuaLS annotation codegen.
//!
//! Every declaration renders to a self-contained block with no trailing
//! newline; blocks are joined with one blank line.
use crate::doc::{format_inline, format_multiline};
use crate::ir::{Alias, Callback, Decl, Enumeration, Field, Function, Module, Parameter, Record};

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Closes the long-form doc block of functions and records.
const DOC_TRAILER: &str = "---\n--- ---\n---";

/// Make `name` usable as a Lua identifier: keywords get a `__` suffix,
/// leading digits a `__` prefix.
pub fn safe_identifier(name: &str) -> String {
    if LUA_KEYWORDS.contains(&name) {
        return format!("{name}__");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("__{name}");
    }
    name.to_string()
}

/// How a callback is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackForm {
    /// `---@alias NS.Name fun(...)`
    Alias,
    /// `Name fun(...)`, the tail of a `---@field` line.
    Field,
}

// ————————————————————————————————————————————————————————————————————————————
// MODULE
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn emit(&mut self, module: &Module) {
        let ns = &module.namespace;
        self.out.push_str(&format!("---@meta {ns}\n\n---@class {ns}\nlocal {ns} = {{}}\n\n"));
        let blocks = module.decls.iter().map(decl).collect::<Vec<_>>();
        self.out.push_str(&blocks.join("\n\n"));
        self.out.push_str(&format!("\n\nreturn {ns}\n"));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

pub fn decl(d: &Decl) -> String {
    match d {
        Decl::Alias(a) => alias(a),
        Decl::Enumeration(e) => enumeration(e),
        Decl::Callback(cb) => callback(cb, CallbackForm::Alias),
        Decl::Function(f) => function(f),
        Decl::Record(r) => record(r),
    }
}

pub fn parameter(p: &Parameter) -> String {
    let opt = if p.nilable { "?" } else { "" };
    format!("---@param {}{opt} {}{}", p.name, p.ty, format_inline(&p.doc))
}

pub fn function(f: &Function) -> String {
    let (kind, sep) = if f.is_static { ("function", ".") } else { ("method", ":") };
    let prefix = f
        .namespace
        .as_deref()
        .map(|ns| format!("{ns}{sep}"))
        .unwrap_or_default();

    let mut lines = vec![format!("--- # {kind} {prefix}{}()", f.name), "---".to_string()];
    if !f.doc.is_empty() {
        lines.push(format_multiline(&f.doc));
        lines.push(DOC_TRAILER.to_string());
    }
    lines.extend(f.parameters.iter().map(parameter));
    if let Some(ret) = &f.return_value {
        lines.push(format!("---@return {}{}", ret.ty, format_inline(&ret.doc)));
    }
    let args = f.arguments().iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
    lines.push(format!(
        "function {prefix}{}({}) end",
        safe_identifier(&f.name),
        args.join(", ")
    ));
    lines.join("\n")
}

pub fn record(r: &Record) -> String {
    let full_name = r.full_name();

    let mut lines = vec![format!("--- # {} {full_name}", r.kind.as_str()), "---".to_string()];
    if !r.doc.is_empty() {
        lines.push(format_multiline(&r.doc));
        lines.push(DOC_TRAILER.to_string());
    }
    if r.parents.is_empty() {
        lines.push(format!("---@class {full_name}"));
    } else {
        let parents = r.parents.iter().map(|p| p.as_str()).collect::<Vec<_>>();
        lines.push(format!("---@class {full_name} : {}", parents.join(", ")));
    }
    lines.extend(r.fields.iter().map(field));
    if r.construct_on_call {
        lines.push(format!("---@operator call: {full_name}"));
    }
    lines.push(format!("{full_name} = {{}}"));

    let mut out = lines.join("\n");
    for member in r.methods.iter().chain(&r.functions) {
        out.push_str("\n\n");
        out.push_str(&function(member));
    }
    out
}

pub fn field(f: &Field) -> String {
    match f {
        Field::Value(v) => format!("---@field {} {}{}", v.name, v.ty, format_inline(&v.doc)),
        Field::Callback(cb) => format!("---@field {}", callback(cb, CallbackForm::Field)),
    }
}

pub fn callback(cb: &Callback, form: CallbackForm) -> String {
    let params = cb
        .parameters
        .iter()
        .map(|p| format!("{}{}: {}", p.name, if p.nilable { "?" } else { "" }, p.ty))
        .collect::<Vec<_>>();
    let ret = cb
        .return_type
        .as_ref()
        .map(|t| format!(": {t}"))
        .unwrap_or_default();
    let signature = format!("fun({}){ret}", params.join(", "));
    match form {
        CallbackForm::Alias => format!("---@alias {}.{} {signature}", cb.namespace, cb.name),
        CallbackForm::Field => format!("{} {signature}", safe_identifier(&cb.name)),
    }
}

pub fn enumeration(e: &Enumeration) -> String {
    let full_name = format!("{}.{}", e.namespace, e.name);
    format!("---@enum {full_name}\n{full_name} = {{}}")
}

pub fn alias(a: &Alias) -> String {
    format!("---@alias {}.{} {}", a.namespace, a.name, a.target)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EnumKind, RecordField, RecordKind, ReturnValue, TypeRef, RECEIVER};

    fn p(name: &str, ty: &str) -> Parameter {
        Parameter { name: name.into(), ty: TypeRef::new(ty), nilable: false, doc: String::new() }
    }

    fn func(name: &str, parameters: Vec<Parameter>, is_static: bool) -> Function {
        Function {
            name: name.into(),
            doc: String::new(),
            parameters,
            return_value: None,
            namespace: Some("Gio.AppInfo".into()),
            is_static,
        }
    }

    #[test]
    fn identifiers() {
        assert_eq!(safe_identifier("end"), "end__");
        assert_eq!(safe_identifier("function"), "function__");
        assert_eq!(safe_identifier("3d"), "__3d");
        assert_eq!(safe_identifier("ending"), "ending");
        assert_eq!(safe_identifier("End"), "End");
    }

    #[test]
    fn static_function() {
        let mut f = func("create_from_commandline", vec![p("commandline", "string")], true);
        f.parameters[0].nilable = true;
        f.parameters[0].doc = "the command\n  line".into();
        f.return_value = Some(ReturnValue { ty: TypeRef::new("Gio.AppInfo"), doc: "new #GAppInfo".into() });
        assert_eq!(
            function(&f),
            "--- # function Gio.AppInfo.create_from_commandline()\n\
             ---\n\
             ---@param commandline? string # the command line\n\
             ---@return Gio.AppInfo # new `GAppInfo`\n\
             function Gio.AppInfo.create_from_commandline(commandline) end"
        );
    }

    #[test]
    fn method_excludes_receiver_from_arguments() {
        let f = func("launch", vec![p(RECEIVER, "Gio.AppInfo"), p("files", "Gio.File[]")], false);
        assert_eq!(
            function(&f),
            "--- # method Gio.AppInfo:launch()\n\
             ---\n\
             ---@param self Gio.AppInfo\n\
             ---@param files Gio.File[]\n\
             function Gio.AppInfo:launch(files) end"
        );
    }

    #[test]
    fn documented_function_has_doc_block() {
        let mut f = func("new", Vec::new(), true);
        f.namespace = Some("GLib".into());
        f.doc = "Creates a thing.\nReturns %NULL on failure.".into();
        assert_eq!(
            function(&f),
            "--- # function GLib.new()\n\
             ---\n\
             --- Creates a thing.\n\
             --- Returns `nil` on failure.\n\
             ---\n\
             --- ---\n\
             ---\n\
             function GLib.new() end"
        );
    }

    #[test]
    fn keyword_function_name_is_sanitized_in_declaration_only() {
        let mut f = func("end", Vec::new(), true);
        f.namespace = None;
        assert_eq!(function(&f), "--- # function end()\n---\nfunction end__() end");
    }

    #[test]
    fn record_with_parents_fields_and_members() {
        let r = Record {
            name: "ListStore".into(),
            kind: RecordKind::Class,
            fields: vec![Field::Value(RecordField {
                name: "n_items".into(),
                ty: TypeRef::new("integer"),
                doc: "count".into(),
            })],
            doc: String::new(),
            construct_on_call: true,
            functions: vec![Function { namespace: Some("Gio.ListStore".into()), ..func("new", Vec::new(), true) }],
            methods: vec![Function {
                namespace: Some("Gio.ListStore".into()),
                ..func("append", vec![p(RECEIVER, "Gio.ListStore")], false)
            }],
            parents: vec![TypeRef::new("GObject.Object"), TypeRef::new("Gio.ListModel")],
            namespace: "Gio".into(),
        };
        assert_eq!(
            record(&r),
            "--- # class Gio.ListStore\n\
             ---\n\
             ---@class Gio.ListStore : GObject.Object, Gio.ListModel\n\
             ---@field n_items integer # count\n\
             ---@operator call: Gio.ListStore\n\
             Gio.ListStore = {}\n\
             \n\
             --- # method Gio.ListStore:append()\n\
             ---\n\
             ---@param self Gio.ListStore\n\
             function Gio.ListStore:append() end\n\
             \n\
             --- # function Gio.ListStore.new()\n\
             ---\n\
             function Gio.ListStore.new() end"
        );
    }

    #[test]
    fn callback_forms() {
        let mut cb = Callback {
            name: "SourceFunc".into(),
            parameters: vec![p("user_data", "userdata")],
            return_type: Some(TypeRef::new("(boolean|nil)")),
            namespace: "GLib".into(),
        };
        assert_eq!(
            callback(&cb, CallbackForm::Alias),
            "---@alias GLib.SourceFunc fun(user_data: userdata): (boolean|nil)"
        );
        cb.return_type = None;
        cb.parameters[0].nilable = true;
        assert_eq!(callback(&cb, CallbackForm::Field), "SourceFunc fun(user_data?: userdata)");
        assert_eq!(field(&Field::Callback(cb)), "---@field SourceFunc fun(user_data?: userdata)");
    }

    #[test]
    fn enumeration_and_alias() {
        let e = Enumeration { name: "IOCondition".into(), kind: EnumKind::Bitfield, namespace: "GLib".into() };
        assert_eq!(enumeration(&e), "---@enum GLib.IOCondition\nGLib.IOCondition = {}");
        let a = Alias { name: "Pid".into(), target: TypeRef::new("integer"), namespace: "GLib".into() };
        assert_eq!(alias(&a), "---@alias GLib.Pid integer");
    }

    #[test]
    fn empty_module() {
        let mut cg = Codegen::new();
        cg.emit(&Module { namespace: "Empty".into(), decls: Vec::new() });
        assert_eq!(cg.into_string(), "---@meta Empty\n\n---@class Empty\nlocal Empty = {}\n\n\n\nreturn Empty\n");
    }
}
