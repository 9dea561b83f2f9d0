use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum KaggleError {
    #[error(
        "Could not find kaggle.json. Make sure it's located in {}. Or use the environment method.",
        config_dir.display()
    )]
    MissingCredentials { config_dir: PathBuf },

    #[error("Unable to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid {option} specified. Valid options are [{valid}]")]
    InvalidOption {
        option: &'static str,
        valid: String,
    },

    #[error("API endpoint {0} cannot be used as a base url")]
    InvalidEndpoint(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("({status}) {message}")]
    Status { status: StatusCode, message: String },

    #[error("Unable to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unable to encode query: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("Invalid credential header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl KaggleError {
    pub(crate) fn invalid_option(option: &'static str, valid: &[&str]) -> KaggleError {
        KaggleError::InvalidOption {
            option,
            valid: valid
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Builds a status error from a failed response body. Kaggle answers most
    /// failures with `{"code": .., "message": ..}`; anything else is kept raw.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> KaggleError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.to_string());

        let message = match single_line(&message) {
            m if m.is_empty() => status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
            m => m,
        };

        KaggleError::Status { status, message }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_kaggle_message() {
        let err = KaggleError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"code":401,"message":"Unauthenticated"}"#,
        );
        assert_eq!(err.to_string(), "(401 Unauthorized) Unauthenticated");
    }

    #[test]
    fn status_error_flattens_raw_body() {
        let err = KaggleError::from_response(
            StatusCode::BAD_GATEWAY,
            "<html>\n  <body>upstream\n down</body>\n</html>",
        );
        let msg = err.to_string();
        assert!(!msg.contains('\n'));
        assert!(msg.ends_with("<html> <body>upstream down</body> </html>"));
    }

    #[test]
    fn status_error_falls_back_to_reason() {
        let err = KaggleError::from_response(StatusCode::FORBIDDEN, "  ");
        assert_eq!(err.to_string(), "(403 Forbidden) Forbidden");
    }

    #[test]
    fn missing_credentials_names_directory() {
        let err = KaggleError::MissingCredentials {
            config_dir: PathBuf::from("/home/someone/.kaggle"),
        };
        assert_eq!(
            err.to_string(),
            "Could not find kaggle.json. Make sure it's located in /home/someone/.kaggle. Or use the environment method."
        );
    }
}
