use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CodecError {
    InvalidArgument(&'static str),
    Storage { name: String, source: io::Error },
    UnsupportedVersion { name: String, version: u8 },
    CorruptFormat { name: String, reason: &'static str },
    CodeTooLong { unit: u16, length: usize },
}

impl CodecError {
    pub fn storage(name: &str, source: io::Error) -> Self {
        CodecError::Storage { name: name.to_string(), source }
    }

    pub fn corrupt(name: &str, reason: &'static str) -> Self {
        CodecError::CorruptFormat { name: name.to_string(), reason }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, CodecError::CorruptFormat { .. })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidArgument(msg) =>
                write!(f, "invalid argument: {}", msg),
            CodecError::Storage { name, source } =>
                write!(f, "storage error on '{}': {}", name, source),
            CodecError::UnsupportedVersion { name, version } =>
                write!(f, "file '{}' has a newer format (file format version {:02})", name, version),
            CodecError::CorruptFormat { name, reason } =>
                write!(f, "file '{}' is invalid or corrupted: {}", name, reason),
            CodecError::CodeTooLong { unit, length } =>
                write!(f, "code for unit {:#06x} is {} bits long", unit, length),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_file() {
        let err = CodecError::corrupt("out.huff", "tree overruns its region");
        assert_eq!(
            err.to_string(),
            "file 'out.huff' is invalid or corrupted: tree overruns its region"
        );
        assert!(err.is_corrupt());
    }

    #[test]
    fn storage_keeps_source() {
        use std::error::Error;
        let err = CodecError::storage("x", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(!err.is_corrupt());
    }
}
