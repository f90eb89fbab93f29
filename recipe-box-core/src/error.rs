use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Non-success status. The message is what the user sees.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Server-side validation failure on create/update.
    #[error("{}", .errors.join(", "))]
    Validation { status: u16, errors: Vec<String> },

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Validation { status, .. } => Some(*status),
            ApiError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl(_) | ApiError::InvalidResponse(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),

    #[error("Invalid recipe id in route: {0}")]
    InvalidId(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str },

    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_join_with_comma() {
        let err = ApiError::Validation {
            status: 422,
            errors: vec![
                "Title can't be blank".to_string(),
                "Servings must be greater than 0".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Title can't be blank, Servings must be greater than 0"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_status_error_shows_message_only() {
        let err = ApiError::Status {
            status: 500,
            message: "Failed to fetch recipes".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch recipes");
    }

    #[test]
    fn test_form_error_message() {
        let err = FormError::NotANumber { field: "Servings" };
        assert_eq!(err.to_string(), "Servings must be a whole number");

        let err = FormError::TooSmall {
            field: "Servings",
            min: 1,
        };
        assert_eq!(err.to_string(), "Servings must be at least 1");
        assert_eq!(
            FormError::Required { field: "Title" }.to_string(),
            "Title is required"
        );
    }
}
