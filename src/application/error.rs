use thiserror::Error;

use crate::{domain::error::DomainError, infra::error::InfraError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    /// Short, user-facing summary printed by the binary.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::InvalidLocale { .. }) => "Unsupported locale",
            AppError::Domain(DomainError::ContentNotFoundForLocale { .. }) => {
                "Content not available in this language"
            }
            AppError::Infra(InfraError::Storage(_)) => "Locale preference storage unavailable",
            AppError::Infra(InfraError::Content(_)) => "Site content could not be loaded",
            AppError::Infra(InfraError::Configuration { .. }) => "Service misconfigured",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
        }
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Domain(_) => 2,
            AppError::Infra(InfraError::Configuration { .. }) => 78,
            AppError::Infra(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repos::StorageError;
    use crate::domain::locale::Locale;

    #[test]
    fn domain_errors_are_caller_errors() {
        let err = AppError::from(DomainError::invalid_locale("fr"));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.presentation_message(), "Unsupported locale");
        assert_eq!(err.to_string(), "unsupported locale `fr`");

        let err = AppError::from(DomainError::content_not_found(Locale::Zh));
        assert_eq!(err.to_string(), "no content available for locale `zh`");
    }

    #[test]
    fn infra_errors_are_transparent() {
        let err = AppError::from(InfraError::from(StorageError::unavailable("disk full")));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "preference storage unavailable: disk full"
        );

        let err = AppError::from(InfraError::configuration("bad namespace"));
        assert_eq!(err.exit_code(), 78);
        assert_eq!(err.presentation_message(), "Service misconfigured");
    }
}
