use thiserror::Error;

/// Result type for operations that can fail on an empty table.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by [`BstMap`](crate::BstMap) and
/// [`SortedArrayMap`](crate::SortedArrayMap).
///
/// Lookups that may simply find nothing return [`Option`] instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The operation needs at least one entry.
    #[error("`{operation}()` called on an empty table")]
    EmptyTable {
        /// Name of the operation that was called.
        operation: &'static str,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn message_names_the_operation() {
        let error = Error::EmptyTable { operation: "min" };
        assert_eq!(error.to_string(), "`min()` called on an empty table");
    }
}
