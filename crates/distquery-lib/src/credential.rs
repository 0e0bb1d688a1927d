//! API key resolution.
//!
//! The key is looked up per invocation through an ordered list of
//! [`CredentialSource`] providers; the first non-empty value wins. The
//! default order is the `GOOGLE_MAPS_KEY` environment variable, then the
//! `maps.key` entry of the platform runtime configuration.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable holding the Distance Matrix API key.
pub const CREDENTIAL_ENV: &str = "GOOGLE_MAPS_KEY";

/// Environment variable locating the platform runtime configuration.
pub const RUNTIME_CONFIG_ENV: &str = "CLOUD_RUNTIME_CONFIG";

/// Runtime configuration file read when `CLOUD_RUNTIME_CONFIG` is unset.
pub const RUNTIME_CONFIG_FILE: &str = ".runtimeconfig.json";

/// Dotted path of the key inside the runtime configuration.
pub const RUNTIME_CONFIG_KEY: &str = "maps.key";

/// Opaque API key.
///
/// Deliberately has no `Display` impl, and `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw value, returning `None` when it is blank.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Expose the raw key for the outbound request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A single place an API key may come from.
pub trait CredentialSource: Send + Sync {
    /// Short provider name, safe to log.
    fn name(&self) -> &'static str;

    /// Look up the key, returning `None` when this source has no usable value.
    fn credential(&self) -> Option<Credential>;
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    var: String,
}

impl EnvCredentialSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new(CREDENTIAL_ENV)
    }
}

impl CredentialSource for EnvCredentialSource {
    fn name(&self) -> &'static str {
        "env"
    }

    fn credential(&self) -> Option<Credential> {
        env::var(&self.var).ok().and_then(Credential::new)
    }
}

/// Where the runtime configuration document is loaded from.
#[derive(Debug, Clone)]
enum ConfigLocation {
    /// Resolve from `CLOUD_RUNTIME_CONFIG` or the working directory at lookup time.
    Platform,
    File(PathBuf),
    Document(Value),
}

/// Reads the key from the platform runtime configuration document.
///
/// `CLOUD_RUNTIME_CONFIG` holds either inline JSON (value starts with `{`)
/// or a path to a JSON file. Without it, `.runtimeconfig.json` in the
/// working directory is used. The document is re-read on every lookup.
#[derive(Debug, Clone)]
pub struct RuntimeConfigSource {
    location: ConfigLocation,
    key_path: String,
}

impl RuntimeConfigSource {
    /// Use the platform's configuration document.
    pub fn platform() -> Self {
        Self {
            location: ConfigLocation::Platform,
            key_path: RUNTIME_CONFIG_KEY.to_string(),
        }
    }

    /// Use a specific JSON file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: ConfigLocation::File(path.into()),
            key_path: RUNTIME_CONFIG_KEY.to_string(),
        }
    }

    /// Use an already-parsed document.
    pub fn from_document(document: Value) -> Self {
        Self {
            location: ConfigLocation::Document(document),
            key_path: RUNTIME_CONFIG_KEY.to_string(),
        }
    }

    /// Override the dotted key path (default `maps.key`).
    pub fn with_key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = key_path.into();
        self
    }

    fn load_document(&self) -> Option<Value> {
        match &self.location {
            ConfigLocation::Document(doc) => Some(doc.clone()),
            ConfigLocation::File(path) => read_document(path),
            ConfigLocation::Platform => match env::var(RUNTIME_CONFIG_ENV) {
                Ok(raw) if raw.trim_start().starts_with('{') => {
                    parse_document(&raw, RUNTIME_CONFIG_ENV)
                }
                Ok(raw) if !raw.trim().is_empty() => read_document(Path::new(raw.trim())),
                _ => read_document(Path::new(RUNTIME_CONFIG_FILE)),
            },
        }
    }
}

impl CredentialSource for RuntimeConfigSource {
    fn name(&self) -> &'static str {
        "runtime-config"
    }

    fn credential(&self) -> Option<Credential> {
        let document = self.load_document()?;
        let value = self
            .key_path
            .split('.')
            .try_fold(&document, |node, segment| node.get(segment))?;
        value.as_str().and_then(Credential::new)
    }
}

fn read_document(path: &Path) -> Option<Value> {
    let contents = fs::read_to_string(path).ok()?;
    parse_document(&contents, &path.display().to_string())
}

fn parse_document(contents: &str, origin: &str) -> Option<Value> {
    match serde_json::from_str(contents) {
        Ok(doc) => Some(doc),
        Err(err) => {
            warn!(origin = %origin, error = %err, "ignoring malformed runtime configuration");
            None
        }
    }
}

/// Ordered list of credential providers.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Environment variable first, then the platform runtime configuration.
    pub fn from_platform() -> Self {
        Self::new(vec![
            Box::new(EnvCredentialSource::default()),
            Box::new(RuntimeConfigSource::platform()),
        ])
    }

    /// Append a lower-priority source.
    pub fn with_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Resolve the key, failing with [`Error::MissingCredential`] if no source has one.
    pub fn resolve(&self) -> Result<Credential> {
        for source in &self.sources {
            if let Some(credential) = source.credential() {
                debug!(source = source.name(), "resolved API credential");
                return Ok(credential);
            }
        }
        Err(Error::MissingCredential)
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::from_platform()
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.name()))
            .finish()
    }
}
