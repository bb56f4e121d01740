use thiserror::Error;

/// Why two keys could not be ordered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// The user-supplied comparator itself failed.
    #[error("comparator failed: {0}")]
    Comparator(String),
    /// The comparator returned something that is not an integer.
    #[error("comparator must return an integer, got {0}")]
    NonInteger(String),
    /// Natural ordering is undefined between the two keys.
    #[error("'{op}' is not defined between {left} and {right}")]
    Unorderable {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortedMapError {
    #[error("invalid sorted map configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("sorted map is full at {0} nodes")]
    CapacityExceeded(usize),
}
