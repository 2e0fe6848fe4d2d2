use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use wortkarten_algo::DEFAULT_PAGE_SIZE;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/vocabulary.db?mode=rwc";
const DEFAULT_MAX_PAGE_SIZE: u32 = 200;
const DEFAULT_HEALTHCHECK_ENDPOINT: &str = "/health";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub database_url: String,
    pub page_size: u32,
    pub max_page_size: u32,
    pub seed_path: Option<PathBuf>,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<PathBuf>,
    /// Mount point of the health routes, besides `/api/health`
    pub healthcheck_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_page_size = env_u32("VOCABULARY_MAX_PAGE_SIZE")
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_MAX_PAGE_SIZE);

        let page_size = env_u32("VOCABULARY_PAGE_SIZE")
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(max_page_size);

        let seed_path = std::env::var("VOCABULARY_SEED_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = env_flag("ENABLE_FILE_LOGS").then(|| {
            std::env::var("LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./logs"))
        });

        let healthcheck_endpoint = normalize_healthcheck_endpoint(
            std::env::var("HEALTHCHECK_ENDPOINT")
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_HEALTHCHECK_ENDPOINT),
        );

        Self {
            host,
            port,
            log_level,
            database_url,
            page_size,
            max_page_size,
            seed_path,
            log_dir,
            healthcheck_endpoint,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Clamp a requested page size into `[1, max_page_size]`
    pub fn page_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.page_size)
            .clamp(1, self.max_page_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
            log_level: "info".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            seed_path: None,
            log_dir: None,
            healthcheck_endpoint: DEFAULT_HEALTHCHECK_ENDPOINT.to_string(),
        }
    }
}

/// Leading slash, no trailing slash; the root path is not allowed
pub fn normalize_healthcheck_endpoint(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return DEFAULT_HEALTHCHECK_ENDPOINT.to_string();
    }

    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    with_slash.trim_end_matches('/').to_string()
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok()?.trim().parse::<u32>().ok()
}
