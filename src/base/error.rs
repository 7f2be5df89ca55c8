use thiserror::Error;

/// Errors produced by the cookie codec, header protocol, and body decoders.
///
/// The secure cookie codec never surfaces *why* an envelope was rejected:
/// tampering, expiry, and malformed input all collapse into
/// [`CodecError::InvalidSecureCookie`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CodecError {
    // Secure cookie errors
    #[error("Secure cookie is invalid")]
    InvalidSecureCookie,
    #[error("Cipher operation failed: {message}")]
    Cipher { message: String },
    #[error("Ciphertext length {len} is not a multiple of block size {block_size}")]
    InvalidCiphertextLength { len: usize, block_size: usize },
    #[error("Invalid keyed hash key")]
    InvalidHashKey,
    #[error("Invalid base64 payload")]
    InvalidBase64,
    #[error("Invalid UTF-8")]
    InvalidUtf8,

    // Cookie directive errors
    #[error("Invalid cookie expiry: {input:?}")]
    InvalidExpiry { input: String },
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Invalid {directive} directive: {value:?}")]
    InvalidDirective {
        directive: &'static str,
        value: String,
    },

    // Body decoding errors
    #[error("{media_type} body parse failed: {reason}")]
    BodyParse {
        media_type: &'static str,
        reason: String,
    },

    // Configuration errors
    #[error("Invalid cookie settings: {reason}")]
    InvalidSettings { reason: String },
}

impl CodecError {
    /// Create a cipher error with a message.
    pub fn cipher(message: impl Into<String>) -> Self {
        Self::Cipher {
            message: message.into(),
        }
    }

    /// Create an expiry error for input that could not be resolved.
    pub fn invalid_expiry(input: impl Into<String>) -> Self {
        Self::InvalidExpiry {
            input: input.into(),
        }
    }

    /// Create an error for a cookie directive that would break the header line.
    pub fn invalid_directive(directive: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidDirective {
            directive,
            value: value.into(),
        }
    }

    /// Create a body parse error for the given decoder family.
    pub fn body_parse(media_type: &'static str, reason: impl ToString) -> Self {
        Self::BodyParse {
            media_type,
            reason: reason.to_string(),
        }
    }

    /// Create a settings error.
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// True for errors raised while decoding a request body.
    pub fn is_body_error(&self) -> bool {
        matches!(self, CodecError::BodyParse { .. })
    }
}

impl From<boring::error::ErrorStack> for CodecError {
    fn from(err: boring::error::ErrorStack) -> Self {
        CodecError::cipher(err.to_string())
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(_: base64::DecodeError) -> Self {
        CodecError::InvalidBase64
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        CodecError::InvalidUtf8
    }
}

impl From<http::header::InvalidHeaderName> for CodecError {
    fn from(_: http::header::InvalidHeaderName) -> Self {
        CodecError::InvalidHeader
    }
}

impl From<http::header::InvalidHeaderValue> for CodecError {
    fn from(_: http::header::InvalidHeaderValue) -> Self {
        CodecError::InvalidHeader
    }
}

impl From<time::error::ComponentRange> for CodecError {
    fn from(err: time::error::ComponentRange) -> Self {
        CodecError::invalid_expiry(err.to_string())
    }
}
