use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} failed with HTTP {status}: {body}")]
    Transport {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported question type: {0}")]
    UnsupportedType(String),

    #[error("Version control error: {0}")]
    Vcs(String),

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl CatalogError {
    /// Whether this error only invalidates the template being processed.
    ///
    /// Transport failures abort the whole run because later steps depend on
    /// identifiers returned by earlier calls.
    pub fn is_template_scoped(&self) -> bool {
        matches!(
            self,
            CatalogError::Config(_)
                | CatalogError::UnsupportedType(_)
                | CatalogError::Yaml(_)
                | CatalogError::Io(_)
        )
    }

    /// Whether this error came from the remote API.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport { .. } | CatalogError::Http(_))
    }
}
