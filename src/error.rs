use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("invalid sort field '{0}', expected 'id' or 'name'")]
    InvalidSortField(String),

    #[error("invalid sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidSortDirection(String),

    #[error("unknown type '{0}'")]
    InvalidType(String),

    #[error("invalid generation '{0}', expected 1-9")]
    InvalidGeneration(String),

    #[error("unknown game '{0}'")]
    InvalidGame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl PokedexError {
    /// Upstream reported that the requested id or name does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::NotFound(_))
    }

    /// Network, decode, or unexpected-status failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PokedexError::Http(_) | PokedexError::Json(_) | PokedexError::Api(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_transport() {
        let err = PokedexError::NotFound("missingno".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "'missingno' not found");
    }

    #[test]
    fn test_api_error_is_transport() {
        let err = PokedexError::Api("status 500".to_string());
        assert!(err.is_transport());
        assert!(!err.is_not_found());
    }
}
