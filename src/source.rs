//! Locating and reading GIR files.
use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Where distributions install `.gir` files.
pub const DEFAULT_GIR_DIR: &str = "/usr/share/gir-1.0";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)-([\d.]+)$").unwrap());

/// `GLib-2.0` split into namespace and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GirIdentifier {
    pub namespace: String,
    pub version: String,
}

impl GirIdentifier {
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = IDENTIFIER
            .captures(raw)
            .ok_or_else(|| Error::InvalidIdentifier(raw.to_string()))?;
        Ok(Self {
            namespace: caps[1].to_string(),
            version: caps[2].to_string(),
        })
    }

    /// `<dir>/<Namespace>-<Version>.gir`
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{self}.gir"))
    }
}

impl fmt::Display for GirIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.namespace, self.version)
    }
}

/// Read a GIR file in full.
pub fn read_gir(path: &Path) -> Result<String> {
    log::info!("reading {}", path.display());
    std::fs::read_to_string(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespace_and_version() {
        let id = GirIdentifier::parse("GLib-2.0").unwrap();
        assert_eq!(id.namespace, "GLib");
        assert_eq!(id.version, "2.0");
        assert_eq!(id.to_string(), "GLib-2.0");
        let id = GirIdentifier::parse("Gtk-4.0").unwrap();
        assert_eq!(id.path_in(Path::new("/usr/share/gir-1.0")), PathBuf::from("/usr/share/gir-1.0/Gtk-4.0.gir"));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for raw in ["GLib", "GLib-", "-2.0", "GLib-two", "", "../GLib-2.0"] {
            assert!(
                matches!(GirIdentifier::parse(raw), Err(Error::InvalidIdentifier(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_gir(&dir.path().join("Nope-1.0.gir")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let id = GirIdentifier::parse("Demo-1.0").unwrap();
        let path = id.path_in(dir.path());
        std::fs::write(&path, "<repository/>").unwrap();
        assert_eq!(read_gir(&path).unwrap(), "<repository/>");
    }
}
