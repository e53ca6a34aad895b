use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractErrorCategory {
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl ExtractErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Failure surfaced to the user as a single diagnostic line.
///
/// `code` is a stable dotted identifier (`IO.REPORT_READ`, `INPUT.NO_DATA`, ...)
/// that scripts can match on; `message` is free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractError {
    category: ExtractErrorCategory,
    code: &'static str,
    message: String,
}

impl ExtractError {
    pub fn new(
        category: ExtractErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> ExtractErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for ExtractError {}
