//! Byte decoding for tree listings produced under legacy codepages.
//!
//! Windows `tree` writes in the console codepage (CP950 on Traditional Chinese
//! systems), so input is only sometimes UTF-8.

use std::fmt;

use encoding_rs::{Encoding, BIG5, UTF_8};
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Codepage names Windows uses that are not WHATWG labels.
fn codepage_alias(label: &str) -> Option<&'static Encoding> {
    match label {
        "cp950" | "ms950" | "windows-950" => Some(BIG5),
        _ => None,
    }
}

/// How to pick the source encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingChoice {
    /// UTF-8 if the bytes are valid UTF-8, otherwise `fallback`.
    Auto { fallback: String },
    /// Always decode with this label.
    Label(String),
}

impl EncodingChoice {
    /// `"auto"` (any case) selects detection, anything else is a label.
    pub fn new(encoding: &str, fallback: &str) -> Self {
        if encoding.trim().eq_ignore_ascii_case("auto") {
            EncodingChoice::Auto {
                fallback: fallback.to_string(),
            }
        } else {
            EncodingChoice::Label(encoding.to_string())
        }
    }
}

impl Default for EncodingChoice {
    fn default() -> Self {
        EncodingChoice::Auto {
            fallback: "big5".into(),
        }
    }
}

impl fmt::Display for EncodingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingChoice::Auto { fallback } => write!(f, "auto (fallback {fallback})"),
            EncodingChoice::Label(label) => f.write_str(label),
        }
    }
}

/// Decoded text and the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static str,
    /// Malformed sequences were replaced with U+FFFD
    pub lossy: bool,
}

/// Resolve a WHATWG label or Windows codepage name.
pub fn lookup_encoding(label: &str) -> ApplicationResult<&'static Encoding> {
    let wanted = label.trim().to_ascii_lowercase();
    codepage_alias(&wanted)
        .or_else(|| Encoding::for_label(wanted.as_bytes()))
        .ok_or_else(|| ApplicationError::UnknownEncoding(label.to_string()))
}

#[instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8], choice: &EncodingChoice) -> ApplicationResult<Decoded> {
    match choice {
        EncodingChoice::Auto { fallback } => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            if let Ok(text) = std::str::from_utf8(body) {
                return Ok(Decoded {
                    text: text.to_string(),
                    encoding: UTF_8.name(),
                    lossy: false,
                });
            }

            let encoding = lookup_encoding(fallback)?;
            let (text, had_errors) = encoding.decode_without_bom_handling(body);
            if had_errors {
                warn!(
                    "input is neither UTF-8 nor {}, decoding as UTF-8 with replacements",
                    encoding.name()
                );
                return Ok(Decoded {
                    text: String::from_utf8_lossy(body).into_owned(),
                    encoding: UTF_8.name(),
                    lossy: true,
                });
            }
            debug!("decoded as {}", encoding.name());
            Ok(Decoded {
                text: text.into_owned(),
                encoding: encoding.name(),
                lossy: false,
            })
        }
        EncodingChoice::Label(label) => {
            let encoding = lookup_encoding(label)?;
            let (text, used, had_errors) = encoding.decode(bytes);
            if had_errors {
                warn!("malformed {} sequences replaced", used.name());
            }
            Ok(Decoded {
                text: text.into_owned(),
                encoding: used.name(),
                lossy: had_errors,
            })
        }
    }
}
