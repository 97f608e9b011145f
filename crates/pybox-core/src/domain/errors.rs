use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PyboxResult<T> = Result<T, PyboxError>;
pub type ValidationResult<T> = PyboxResult<T>;
pub type CollectResult<T> = PyboxResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PyboxErrorCategory {
    InputValidationError,
    IoSystemError,
    ParseError,
    InternalError,
}

impl PyboxErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ParseError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn rust_category(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ParseError => "ParseError",
            Self::InternalError => "InternalError",
        }
    }

    /// Failures the execution framework reports back to the caller as a
    /// client error rather than a server fault.
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::InputValidationError)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyboxError {
    category: PyboxErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl PyboxError {
    pub fn new(
        category: PyboxErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            PyboxErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PyboxErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn parse(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PyboxErrorCategory::ParseError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PyboxErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> PyboxErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub const fn is_client_error(&self) -> bool {
        self.category.is_client_error()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for PyboxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.rust_category(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for PyboxError {}
