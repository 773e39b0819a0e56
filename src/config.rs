//! Generation options shared by the library and the CLI.

/// Which namespace qualifies bare type names on `<alias>` targets.
///
/// Every other declaration resolves types against the enclosing
/// `<namespace name>`; aliases historically used the namespace taken from the
/// command-line identifier. The two only differ when the file's namespace
/// name does not match the identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AliasNamespace {
    /// Namespace from the `Namespace-Version` identifier.
    #[default]
    Target,
    /// The `<namespace name>` attribute of the document.
    Enclosing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Module table name and fallback enclosing namespace (`GLib` for `GLib-2.0`).
    pub target_namespace: String,
    pub alias_namespace: AliasNamespace,
}

impl Options {
    pub fn new(target_namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: target_namespace.into(),
            alias_namespace: AliasNamespace::default(),
        }
    }

    pub fn with_alias_namespace(mut self, alias_namespace: AliasNamespace) -> Self {
        self.alias_namespace = alias_namespace;
        self
    }
}
