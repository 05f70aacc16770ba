//! Error kinds for taxon operations

use std::fmt;

/// The kind of failure raised by taxon itself.
///
/// These describe misuse of the factory, never the application errors the
/// factory produces. Match on them to tell a malformed definition apart from
/// a construction request for a code the variant never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An argument had the wrong type or an unusable value
    InvalidArgument,

    /// A code outside the variant's declared set was requested
    UnknownCode,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::UnknownCode => "UnknownCode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
