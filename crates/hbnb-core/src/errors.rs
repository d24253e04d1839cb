use hbnb_core_types::RequestId;
use thiserror::Error;

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// A stable classification of every error the storage layer and the
/// interpreter can produce. Each kind maps to a stable code used in log
/// lines and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // User input (interpreter)
    InvalidInput,
    UnknownClass,
    MalformedLiteral,

    // Lookup
    NotFound,

    // Entity model
    InvalidAttribute,

    // Storage integrity
    CorruptStore,
    Transaction,
    NoActiveSession,
    UnsupportedClass,

    // Integration/IO
    Io,
    Serialization,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownClass => "ERR_UNKNOWN_CLASS",
            ExErrorKind::MalformedLiteral => "ERR_MALFORMED_LITERAL",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidAttribute => "ERR_INVALID_ATTRIBUTE",
            ExErrorKind::CorruptStore => "ERR_CORRUPT_STORE",
            ExErrorKind::Transaction => "ERR_TRANSACTION",
            ExErrorKind::NoActiveSession => "ERR_NO_ACTIVE_SESSION",
            ExErrorKind::UnsupportedClass => "ERR_UNSUPPORTED_CLASS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context for debugging and
/// log correlation.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_key: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_key: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add composite key (`Class.id`) context
    pub fn with_entity_key(mut self, key: impl Into<String>) -> Self {
        self.entity_key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the composite key context, if any
    pub fn entity_key(&self) -> Option<&str> {
        self.entity_key.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.entity_key {
            write!(f, " (entity: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the entity model and the storage engines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbnbError {
    // ===== Model Errors =====
    /// Class name is not one of the known entity kinds
    #[error("Unknown class: {class_name}")]
    UnknownClass { class_name: String },

    /// Attribute value does not fit the field's declared type
    #[error("Invalid attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// Timestamp text could not be parsed
    #[error("Invalid timestamp for {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    // ===== Storage Errors =====
    /// Persisted document is unparsable or references an unknown class
    #[error("Corrupt store at {location}: {reason}")]
    CorruptStore { location: String, reason: String },

    /// Relational insert/flush/commit/delete failed (the scope was rolled back)
    #[error("Backend transaction failed in {op}: {message}")]
    BackendTransaction { op: String, message: String },

    /// A relational operation was attempted outside a session scope
    #[error("No active session for {op}: call reload() first")]
    NoActiveSession { op: String },

    /// The backend has no place to store this class
    #[error("Class {class_name} cannot be persisted by the {backend} backend")]
    UnsupportedClass { class_name: String, backend: String },

    // ===== Generic Errors =====
    /// Filesystem failure
    #[error("IO error in {op}: {message}")]
    Io { op: String, message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl HbnbError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            HbnbError::UnknownClass { .. } => ExErrorKind::UnknownClass,
            HbnbError::InvalidAttribute { .. } | HbnbError::InvalidTimestamp { .. } => {
                ExErrorKind::InvalidAttribute
            }
            HbnbError::CorruptStore { .. } => ExErrorKind::CorruptStore,
            HbnbError::BackendTransaction { .. } => ExErrorKind::Transaction,
            HbnbError::NoActiveSession { .. } => ExErrorKind::NoActiveSession,
            HbnbError::UnsupportedClass { .. } => ExErrorKind::UnsupportedClass,
            HbnbError::Io { .. } => ExErrorKind::Io,
            HbnbError::Serialization { .. } => ExErrorKind::Serialization,
            HbnbError::InvalidConfig { .. } => ExErrorKind::Config,
        }
    }
}

/// Conversion from HbnbError to the canonical ExError
impl From<HbnbError> for ExError {
    fn from(err: HbnbError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let ex = ExError::new(kind).with_message(message);
        match err {
            HbnbError::BackendTransaction { op, .. }
            | HbnbError::NoActiveSession { op }
            | HbnbError::Io { op, .. } => ex.with_op(op),
            HbnbError::CorruptStore { .. } => ex.with_op("reload"),
            _ => ex,
        }
    }
}

impl From<serde_json::Error> for HbnbError {
    fn from(err: serde_json::Error) -> Self {
        HbnbError::Serialization {
            message: err.to_string(),
        }
    }
}
