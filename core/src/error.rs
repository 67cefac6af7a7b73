//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Document generation itself never fails; these errors come from the
//! surrounding layers (source parsing, manifests, XML text I/O).

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Invalid base URL.
    #[display("URL Error: {_0}")]
    Url(url::ParseError),

    /// XML writer or reader failures.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("XML Error: {_0}")]
    Xml(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String must land in General, not Xml
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_url_conversion() {
        let err = url::Url::parse("not a url").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Url(_)));
        assert!(app_err.to_string().starts_with("URL Error:"));
    }

    #[test]
    fn test_xml_manual_creation() {
        let app_err = AppError::Xml("unexpected end".into());
        assert_eq!(format!("{}", app_err), "XML Error: unexpected end");
    }
}
