//! Tree listing conversion service
//!
//! Loads bytes from a source, decodes and normalizes them, and parses the
//! result into a `Tree`.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::application::decode::{decode, EncodingChoice};
use crate::application::normalize::normalize_decorations;
use crate::application::source::Source;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DuplicatePolicy, Tree, TreeTextParser};
use crate::infrastructure::traits::{FileSystem, HttpClient};

/// Per-run conversion options, seeded from `Settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub encoding: EncodingChoice,
    /// Rewrite Windows ASCII art before parsing
    pub normalize: bool,
    pub duplicates: DuplicatePolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            encoding: EncodingChoice::default(),
            normalize: true,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl From<&Settings> for ConvertOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            encoding: EncodingChoice::new(&settings.encoding, &settings.fallback_encoding),
            normalize: settings.normalize,
            duplicates: settings.duplicates,
        }
    }
}

/// Result of converting one listing.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: Tree,
    /// Encoding the input was decoded with
    pub encoding: &'static str,
    /// Input contained undecodable bytes
    pub lossy: bool,
}

/// Service turning tree listings into trees and JSON.
pub struct ConvertService {
    fs: Arc<dyn FileSystem>,
    http: Arc<dyn HttpClient>,
    settings: Arc<Settings>,
}

impl ConvertService {
    pub fn new(fs: Arc<dyn FileSystem>, http: Arc<dyn HttpClient>, settings: Arc<Settings>) -> Self {
        Self { fs, http, settings }
    }

    /// Options from the loaded settings.
    pub fn default_options(&self) -> ConvertOptions {
        ConvertOptions::from(self.settings.as_ref())
    }

    /// Read raw bytes from a file or URL.
    ///
    /// Stdin is owned by the caller; pass its bytes to `convert_bytes`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, source: &Source) -> ApplicationResult<Vec<u8>> {
        match source {
            Source::File(path) => {
                if !self.fs.is_file(path) {
                    return Err(ApplicationError::OperationFailed {
                        context: format!("file not found: {}", path.display()),
                        source: Box::new(std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "file does not exist",
                        )),
                    });
                }
                self.fs.read(path).with_path_context("read tree listing", path)
            }
            Source::Url(url) => self.http.get(url.as_str()).map_err(|e| ApplicationError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Source::Stdin => Err(ApplicationError::InvalidSource(
                "stdin must be read by the caller".into(),
            )),
        }
    }

    /// Decode, normalize and parse a listing.
    #[instrument(level = "debug", skip(self, bytes), fields(len = bytes.len()))]
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
    ) -> ApplicationResult<Conversion> {
        let decoded = decode(bytes, &options.encoding)?;
        debug!("decoded {} bytes as {}", bytes.len(), decoded.encoding);

        let text = if options.normalize {
            normalize_decorations(&decoded.text)
        } else {
            decoded.text
        };

        let tree = TreeTextParser::new()
            .with_duplicates(options.duplicates)
            .try_parse(&text)?;
        info!(
            "parsed {} nodes under {} root(s)",
            tree.node_count(),
            tree.len()
        );

        Ok(Conversion {
            tree,
            encoding: decoded.encoding,
            lossy: decoded.lossy,
        })
    }

    /// Load and convert a file or URL source.
    pub fn convert(
        &self,
        source: &Source,
        options: &ConvertOptions,
    ) -> ApplicationResult<Conversion> {
        let bytes = self.load(source)?;
        self.convert_bytes(&bytes, options)
    }

    /// Serialize a tree as JSON; non-ASCII names stay unescaped.
    pub fn to_json(&self, tree: &Tree, pretty: bool) -> ApplicationResult<String> {
        let out = if pretty {
            serde_json::to_string_pretty(tree)?
        } else {
            serde_json::to_string(tree)?
        };
        Ok(out)
    }

    /// Write rendered output, creating parent directories.
    pub fn write_output(&self, path: &Path, content: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create output directory", path)?;
        self.fs
            .write(path, content)
            .with_path_context("write output", path)
    }
}

/// `{"error": "<message>"}` payload for failed conversions.
pub fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}
