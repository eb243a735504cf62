//! Error taxonomy for a single weather search.

use thiserror::Error;

const GENERIC_FAILURE: &str = "An unexpected error occurred";

/// Coarse classification of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    CityNotFound,
    Service,
}

/// Why a search did not produce a snapshot.
///
/// `Display` is the message shown to the user in place of the weather card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No API credential is configured. Fixed only by editing configuration.
    #[error("Weather API key not found. Please check your environment configuration.")]
    Configuration,

    /// The provider answered 404 for the requested city.
    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,

    /// Any other non-success status, transport failure or unreadable body.
    #[error("{message}")]
    Service { message: String },
}

impl SearchError {
    /// Failure for a non-success HTTP status other than 404.
    pub fn bad_status() -> Self {
        Self::Service {
            message: "Failed to fetch weather data. Please try again later.".to_string(),
        }
    }

    /// Failure that carries an underlying error message, surfaced verbatim.
    pub fn service<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Service {
                message: GENERIC_FAILURE.to_string(),
            }
        } else {
            Self::Service { message }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Configuration => ErrorKind::Configuration,
            SearchError::CityNotFound => ErrorKind::CityNotFound,
            SearchError::Service { .. } => ErrorKind::Service,
        }
    }

    /// Whether retrying without touching configuration can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SearchError::Configuration)
    }
}

/// The message never includes the request URL: its query carries the API key.
impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::service(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(SearchError::Configuration.kind(), ErrorKind::Configuration);
        assert_eq!(SearchError::CityNotFound.kind(), ErrorKind::CityNotFound);
        assert_eq!(SearchError::bad_status().kind(), ErrorKind::Service);
    }

    #[test]
    fn service_message_is_kept_verbatim() {
        let err = SearchError::service("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn empty_service_message_falls_back_to_generic() {
        let err = SearchError::service("  ");
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn transport_message_omits_request_url() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/weather?q=Lima&appid=SECRET_KEY")
            .send()
            .await
            .unwrap_err();

        let message = SearchError::from(err).to_string();
        assert!(!message.is_empty());
        assert!(!message.contains("SECRET_KEY"), "key leaked: {message}");
        assert!(!message.contains("127.0.0.1"), "url leaked: {message}");
    }

    #[test]
    fn only_configuration_is_unrecoverable() {
        assert!(!SearchError::Configuration.is_recoverable());
        assert!(SearchError::CityNotFound.is_recoverable());
        assert!(SearchError::bad_status().is_recoverable());
    }
}
