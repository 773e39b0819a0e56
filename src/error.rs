//! Error types for stub generation.
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a run before any output is produced.
///
/// Lookups below the document level (attributes, children, type names) never
/// fail; they fall back to `unknown` or skip the declaration instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier did not look like `Namespace-Version`.
    #[error("invalid GIR identifier `{0}` (expected `Namespace-Version`, e.g. `GLib-2.0`)")]
    InvalidIdentifier(String),

    /// The GIR file could not be read.
    #[error("failed to read GIR file {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The GIR document is not well-formed XML.
    #[error("failed to parse GIR document at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// The document parsed but has no `<namespace>` element.
    #[error("GIR document has no <namespace> element")]
    MissingNamespace,
}
