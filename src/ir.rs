// Declaration model for codegen. Built once from the stripped tree, never mutated.
use std::fmt;

use serde::Serialize;

/// Identifier every instance method's receiver is renamed to.
pub const RECEIVER: &str = "self";

/// A LuaLS type expression. Never empty: anything unresolvable is `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(expr: impl Into<String>) -> Self {
        let expr = expr.into();
        if expr.is_empty() { Self::unknown() } else { Self(expr) }
    }

    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == "nil"
    }

    pub fn array_of(self) -> Self {
        Self(format!("{}[]", self.0))
    }

    pub fn table_of(key: &TypeRef, value: &TypeRef) -> Self {
        Self(format!("table<{key}, {value}>"))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Already safe to use as a Lua identifier.
    pub name: String,
    pub ty: TypeRef,
    pub nilable: bool,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnValue {
    pub ty: TypeRef,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Public name (`shadows` wins over `name`), unsanitized.
    pub name: String,
    pub doc: String,
    /// For methods the first entry is the receiver, already named [`RECEIVER`].
    pub parameters: Vec<Parameter>,
    pub return_value: Option<ReturnValue>,
    /// `GLib` for free functions, `Gio.AppInfo` for record members.
    pub namespace: Option<String>,
    pub is_static: bool,
}

impl Function {
    /// Parameters that appear in the Lua argument list.
    pub fn arguments(&self) -> &[Parameter] {
        if self.is_static || self.parameters.is_empty() {
            &self.parameters
        } else {
            &self.parameters[1..]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Record,
    Class,
    Union,
    Interface,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Record => "record",
            RecordKind::Class => "class",
            RecordKind::Union => "union",
            RecordKind::Interface => "interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordField {
    pub name: String,
    pub ty: TypeRef,
    pub doc: String,
}

/// A record member as listed in `---@field` lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field", rename_all = "lowercase")]
pub enum Field {
    Value(RecordField),
    /// Function-pointer field, rendered as an inline `fun(...)` type.
    Callback(Callback),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub kind: RecordKind,
    pub fields: Vec<Field>,
    pub doc: String,
    /// Some static function or constructor is literally named `new`.
    pub construct_on_call: bool,
    /// Static functions followed by constructors.
    pub functions: Vec<Function>,
    pub methods: Vec<Function>,
    /// Superclass then implemented interfaces, qualified, deduplicated.
    pub parents: Vec<TypeRef>,
    pub namespace: String,
}

impl Record {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Callback {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub namespace: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumKind {
    Enumeration,
    Bitfield,
}

/// Members are deliberately not listed; the enum is an opaque table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumeration {
    pub name: String,
    pub kind: EnumKind,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub name: String,
    pub target: TypeRef,
    pub namespace: String,
}

/// One top-level namespace child, by declaration kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "declaration", rename_all = "lowercase")]
pub enum Decl {
    Alias(Alias),
    Enumeration(Enumeration),
    Callback(Callback),
    Function(Function),
    Record(Record),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    /// Name of the module table (`local GLib = {}`).
    pub namespace: String,
    pub decls: Vec<Decl>,
}
