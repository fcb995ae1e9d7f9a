//! Binary-boundary error type.
//!
//! Library modules use their own typed errors (see `data::store`); this type
//! exists so `main` can print one message and exit with a meaningful code.

use crate::data::catalog::CatalogUnavailable;
use crate::data::store::StoreError;

/// Exit code for configuration problems (missing env, bad arguments).
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for data problems (store unreachable, bad responses).
pub const EXIT_DATA: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::Config(_) => EXIT_CONFIG,
            _ => EXIT_DATA,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<CatalogUnavailable> for AppError {
    fn from(err: CatalogUnavailable) -> Self {
        AppError::new(EXIT_DATA, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
