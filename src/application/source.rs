//! Where tree listing bytes come from.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::application::{ApplicationError, ApplicationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Url(Url),
}

impl Source {
    /// Interpret a command-line or config value.
    ///
    /// `-` is stdin, `http://` and `https://` are URLs, anything else is a
    /// path with `~` and `$VAR` expanded.
    pub fn from_arg(arg: &str) -> ApplicationResult<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(ApplicationError::InvalidSource("empty source".into()));
        }
        if arg == "-" {
            return Ok(Source::Stdin);
        }
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(arg)
                .map_err(|e| ApplicationError::InvalidSource(format!("{arg}: {e}")))?;
            return Ok(Source::Url(url));
        }
        let expanded = shellexpand::full(arg)
            .map_err(|e| ApplicationError::InvalidSource(format!("{arg}: {e}")))?;
        Ok(Source::File(PathBuf::from(expanded.as_ref())))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}
