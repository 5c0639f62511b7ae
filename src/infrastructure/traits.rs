//! I/O boundary traits for testability
//!
//! These traits abstract reading tree listings from disk or the network,
//! allowing services to be tested with fake implementations.

use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::infrastructure::{InfraError, InfraResult};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents as raw bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// HTTP GET abstraction.
pub trait HttpClient: Send + Sync {
    /// Fetch the response body. Non-2xx responses are errors.
    fn get(&self, url: &str) -> io::Result<Vec<u8>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Blocking HTTP client backed by `ureq`.
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        Self { agent }
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str) -> io::Result<Vec<u8>> {
        debug!("GET {}", url);
        match self.agent.get(url).call() {
            Ok(response) => {
                let mut body = Vec::new();
                response.into_reader().read_to_end(&mut body)?;
                debug!("received {} bytes", body.len());
                Ok(body)
            }
            Err(ureq::Error::Status(code, response)) => Err(io::Error::other(format!(
                "HTTP {} {}",
                code,
                response.status_text()
            ))),
            Err(ureq::Error::Transport(transport)) => Err(io::Error::other(transport.to_string())),
        }
    }
}

/// Drain a listing piped on stdin (or any reader standing in for it).
pub fn read_piped<R: Read>(mut reader: R) -> InfraResult<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| InfraError::io("read stdin", e))?;
    debug!("read {} bytes from stdin", bytes.len());
    Ok(bytes)
}
