use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported duration {0}s, choose one of 15, 30, 60, 120 or 300")]
    InvalidDuration(u32),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TextError {
    #[error("text table '{0}' is not valid utf-8")]
    Encoding(String),

    #[error("cannot parse text table '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}
