use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// 签名参数为空、产品ID为空，或者凭证无法放入请求头
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// base64 密钥或 JSON 响应无法解码
    #[error("failed to decode {what}")]
    Decode {
        what: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("no http executor has been configured")]
    NotConfigured,

    #[error("failed to {action}")]
    Transport {
        action: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to load settings")]
    Config(#[from] config::ConfigError),

    #[error("settings have not been changed from their defaults, edit {}", path.display())]
    Unconfigured { path: PathBuf },

    #[error("failed to write settings file {}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn decode(what: &'static str, source: impl Into<BoxError>) -> Self {
        Error::Decode {
            what,
            source: source.into(),
        }
    }

    pub(crate) fn transport(action: &'static str, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            action,
            source: source.into(),
        }
    }
}
