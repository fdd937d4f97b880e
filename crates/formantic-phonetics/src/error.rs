//! Error types for phone parsing and dictionary loading.

use thiserror::Error;

/// Result type for phonetics operations.
pub type PhoneticsResult<T> = Result<T, PhoneticsError>;

/// Errors that can occur while parsing phones or loading dictionaries.
#[derive(Debug, Error)]
pub enum PhoneticsError {
    /// The symbol is not part of the ARPAbet inventory.
    #[error("unknown phoneme: {symbol}")]
    UnknownPhoneme {
        /// The offending symbol.
        symbol: String,
    },

    /// A stress digit was attached to a phone that cannot carry stress.
    #[error("invalid stress marker on '{symbol}'")]
    InvalidStress {
        /// The offending symbol, including its digit.
        symbol: String,
    },

    /// I/O error while reading a dictionary.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PhoneticsError {
    /// Creates an unknown phoneme error.
    pub fn unknown_phoneme(symbol: impl Into<String>) -> Self {
        Self::UnknownPhoneme {
            symbol: symbol.into(),
        }
    }

    /// Returns a stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            PhoneticsError::UnknownPhoneme { .. } => "PHON_001",
            PhoneticsError::InvalidStress { .. } => "PHON_002",
            PhoneticsError::Io(_) => "PHON_003",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_phoneme_helper() {
        let err = PhoneticsError::unknown_phoneme("XX");
        assert!(err.to_string().contains("XX"));
        assert_eq!(err.code(), "PHON_001");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PhoneticsError = io.into();
        assert_eq!(err.code(), "PHON_003");
    }
}
