//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RESUMATCH_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBED_CACHE_CAPACITY, DEFAULT_EMBED_TIMEOUT_MS, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_SEQ_LEN, DEFAULT_MODERATE_FIT_THRESHOLD, DEFAULT_PORT,
    DEFAULT_STRONG_FIT_THRESHOLD, MAX_SCORE,
};
use crate::normalize::PrefixStyle;
use crate::ranking::RankerConfig;
use crate::scoring::TierThresholds;

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RESUMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8050`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// General-purpose embedding model directory.
    pub model_path: Option<PathBuf>,

    /// Domain fine-tuned model directory. Preferred over `model_path` when set.
    pub fine_tuned_model_path: Option<PathBuf>,

    /// Query/passage framing expected by the model. Default: symmetric.
    pub prefix_style: PrefixStyle,

    /// Lower bound of the StrongFit tier. Default: `75`.
    pub strong_fit_threshold: f64,

    /// Lower bound of the ModerateFit tier. Default: `50`.
    pub moderate_fit_threshold: f64,

    /// Concurrent document embeddings per batch. Default: `4`.
    pub max_concurrency: usize,

    /// Per-document embedding timeout in milliseconds. Default: `30000`.
    pub embed_timeout_ms: u64,

    /// Embedding cache capacity, `0` disables caching. Default: `0`.
    pub embed_cache_capacity: u64,

    /// Token limit enforced by the embedder. Default: `512`.
    pub max_seq_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            fine_tuned_model_path: None,
            prefix_style: PrefixStyle::Symmetric,
            strong_fit_threshold: DEFAULT_STRONG_FIT_THRESHOLD,
            moderate_fit_threshold: DEFAULT_MODERATE_FIT_THRESHOLD,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            embed_timeout_ms: DEFAULT_EMBED_TIMEOUT_MS,
            embed_cache_capacity: DEFAULT_EMBED_CACHE_CAPACITY,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "RESUMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "RESUMATCH_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "RESUMATCH_MODEL_PATH";
    const ENV_FINETUNED_MODEL_PATH: &'static str = "RESUMATCH_FINETUNED_MODEL_PATH";
    const ENV_PREFIX_STYLE: &'static str = "RESUMATCH_PREFIX_STYLE";
    const ENV_STRONG_FIT_THRESHOLD: &'static str = "RESUMATCH_STRONG_FIT_THRESHOLD";
    const ENV_MODERATE_FIT_THRESHOLD: &'static str = "RESUMATCH_MODERATE_FIT_THRESHOLD";
    const ENV_MAX_CONCURRENCY: &'static str = "RESUMATCH_MAX_CONCURRENCY";
    const ENV_EMBED_TIMEOUT_MS: &'static str = "RESUMATCH_EMBED_TIMEOUT_MS";
    const ENV_EMBED_CACHE_CAPACITY: &'static str = "RESUMATCH_EMBED_CACHE_CAPACITY";
    const ENV_MAX_SEQ_LEN: &'static str = "RESUMATCH_MAX_SEQ_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let fine_tuned_model_path =
            Self::parse_optional_path_from_env(Self::ENV_FINETUNED_MODEL_PATH);
        let prefix_style = Self::parse_prefix_style_from_env(defaults.prefix_style)?;
        let strong_fit_threshold = Self::parse_threshold_from_env(
            Self::ENV_STRONG_FIT_THRESHOLD,
            defaults.strong_fit_threshold,
        )?;
        let moderate_fit_threshold = Self::parse_threshold_from_env(
            Self::ENV_MODERATE_FIT_THRESHOLD,
            defaults.moderate_fit_threshold,
        )?;
        let max_concurrency =
            Self::parse_u64_from_env(Self::ENV_MAX_CONCURRENCY, defaults.max_concurrency as u64)
                as usize;
        let embed_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_EMBED_TIMEOUT_MS, defaults.embed_timeout_ms);
        let embed_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_EMBED_CACHE_CAPACITY,
            defaults.embed_cache_capacity,
        );
        let max_seq_len =
            Self::parse_u64_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len as u64) as usize;

        Ok(Self {
            port,
            bind_addr,
            model_path,
            fine_tuned_model_path,
            prefix_style,
            strong_fit_threshold,
            moderate_fit_threshold,
            max_concurrency,
            embed_timeout_ms,
            embed_cache_capacity,
            max_seq_len,
        })
    }

    /// Validates paths and basic invariants (does not load models).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.model_path, &self.fine_tuned_model_path]
            .into_iter()
            .flatten()
        {
            Self::validate_model_dir(path)?;
        }

        let (moderate, strong) = (self.moderate_fit_threshold, self.strong_fit_threshold);
        if !(0.0..=MAX_SCORE).contains(&moderate)
            || !(0.0..=MAX_SCORE).contains(&strong)
            || moderate > strong
        {
            return Err(ConfigError::ThresholdOrder { moderate, strong });
        }

        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_MAX_CONCURRENCY,
            });
        }
        if self.embed_timeout_ms == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_EMBED_TIMEOUT_MS,
            });
        }
        if self.max_seq_len == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_MAX_SEQ_LEN,
            });
        }

        Ok(())
    }

    /// Model directory to load: the fine-tuned variant wins over the base.
    ///
    /// `None` means no model is configured and the embedder runs in stub mode.
    pub fn selected_model_path(&self) -> Option<&Path> {
        self.fine_tuned_model_path
            .as_deref()
            .or(self.model_path.as_deref())
    }

    /// Tier boundaries for the classifier.
    pub fn tier_thresholds(&self) -> TierThresholds {
        TierThresholds {
            strong: self.strong_fit_threshold,
            moderate: self.moderate_fit_threshold,
        }
    }

    /// Batch execution limits for the ranker.
    pub fn ranker_config(&self) -> RankerConfig {
        RankerConfig {
            max_concurrency: self.max_concurrency,
            embed_timeout: Duration::from_millis(self.embed_timeout_ms),
        }
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn validate_model_dir(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_prefix_style_from_env(default: PrefixStyle) -> Result<PrefixStyle, ConfigError> {
        match env::var(Self::ENV_PREFIX_STYLE) {
            Ok(value) => PrefixStyle::parse(&value)
                .ok_or(ConfigError::InvalidPrefixStyle { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ConfigError::InvalidThreshold { name, value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
