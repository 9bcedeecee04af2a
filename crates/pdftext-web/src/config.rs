use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_MAX_PAYLOAD_MB: usize = 50;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerSection>,
    pub extraction: Option<ExtractionSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub max_payload_mb: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSection {
    /// Try the lopdf parser when MuPDF cannot open a document.
    pub fallback: Option<bool>,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_payload_bytes: usize,
    pub fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_payload_bytes: megabytes(DEFAULT_MAX_PAYLOAD_MB),
            fallback: true,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// The file is `$PDFTEXT_CONFIG` if set, otherwise `./.pdftext.toml`.
    pub fn load() -> Self {
        let path = std::env::var_os("PDFTEXT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".pdftext.toml"));

        let mut config = Config::default();
        if let Some(file) = load_from_path(&path) {
            config.apply_file(&file);
        }
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Overlay values present in `file`.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(server) = &file.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if let Some(mb) = server.max_payload_mb {
                self.max_payload_bytes = megabytes(mb);
            }
        }
        if let Some(fallback) = file.extraction.as_ref().and_then(|e| e.fallback) {
            self.fallback = fallback;
        }
    }

    /// Overlay environment variables. Unparsable values are logged and ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = parse_var(&lookup, "HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT") {
            self.port = port;
        }
        if let Some(mb) = parse_var::<usize>(&lookup, "MAX_PAYLOAD_MB") {
            self.max_payload_bytes = megabytes(mb);
        }
        if let Some(fallback) = parse_var(&lookup, "PDF_FALLBACK") {
            self.fallback = fallback;
        }
    }
}

fn megabytes(mb: usize) -> usize {
    mb.saturating_mul(1024 * 1024)
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}
