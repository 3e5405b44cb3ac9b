use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog service rejected request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("no food with id {0} in the local collection")]
    UnknownFood(i64),
    #[error("invalid catalog base url: {0}")]
    InvalidBaseUrl(String),
}

impl CatalogError {
    /// Transient failures are worth retrying: transport-level problems and
    /// server-side 5xx responses. A 4xx means the request itself is wrong
    /// and will keep failing, as does a malformed response body.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Transport(err) => !err.is_decode(),
            CatalogError::Api { status, .. } => *status >= 500,
            CatalogError::UnknownFood(_) | CatalogError::InvalidBaseUrl(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_failures_are_transient() {
        let err = CatalogError::Api {
            status: 503,
            message: "upstream unavailable".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn client_failures_are_permanent() {
        let not_found = CatalogError::Api {
            status: 404,
            message: "food not found".into(),
        };
        let validation = CatalogError::Api {
            status: 422,
            message: "price must be decimal-formatted".into(),
        };
        assert!(!not_found.is_transient());
        assert!(!validation.is_transient());
        assert!(!CatalogError::UnknownFood(9).is_transient());
    }
}
