use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A field's size or alignment failed basic validity. Raised when the
    /// descriptor is constructed, never at layout time.
    InvalidDescriptor {
        field: String,
        size: u64,
        alignment: u64,
    },
    /// A parametric field names a type parameter the substitution lacks.
    UnresolvedParameter {
        record: String,
        field: String,
        param: String,
    },
    /// The record's byte size does not fit in a u64.
    LayoutOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDescriptor {
                field,
                size,
                alignment,
            } => write!(
                f,
                "invalid descriptor for field `{}`: size {} with alignment {} \
                 (size must be positive and alignment a positive power of two)",
                field, size, alignment
            ),
            Error::UnresolvedParameter {
                record,
                field,
                param,
            } => write!(
                f,
                "field `{}` of record `{}` uses type parameter `{}`, \
                 which the substitution does not provide",
                field, record, param
            ),
            Error::LayoutOverflow => write!(f, "record layout size overflows u64"),
        }
    }
}

impl std::error::Error for Error {}
