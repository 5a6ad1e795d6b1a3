//! Row-limiting strategies.

/// How a dialect expresses `skip`/`take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `TOP n`, or a `ROW_NUMBER() OVER (..)` wrapper when rows are skipped.
    RowNumber,
    /// `ROWNUM` pseudo-column wrappers.
    RowNum,
    /// `LIMIT skip,take`; `unbounded` stands in for a missing take.
    LimitComma {
        /// Literal used as the row count when only `skip` is set.
        unbounded: &'static str,
    },
    /// `LIMIT take OFFSET skip`.
    LimitOffset,
}

impl Pagination {
    /// Renders the trailing clause for the limit-based strategies.
    ///
    /// Returns `None` for the wrapper-based strategies, which restructure the
    /// whole statement instead.
    #[must_use]
    pub fn trailing_clause(self, skip: Option<u64>, take: Option<u64>) -> Option<String> {
        match self {
            Self::RowNumber | Self::RowNum => None,
            Self::LimitComma { unbounded } => match (skip, take) {
                (Some(skip), Some(take)) => Some(format!(" LIMIT {skip},{take}")),
                (None, Some(take)) => Some(format!(" LIMIT {take}")),
                (Some(skip), None) => Some(format!(" LIMIT {skip},{unbounded}")),
                (None, None) => Some(String::new()),
            },
            Self::LimitOffset => match (skip, take) {
                (Some(skip), Some(take)) => Some(format!(" LIMIT {take} OFFSET {skip}")),
                (None, Some(take)) => Some(format!(" LIMIT {take}")),
                (Some(skip), None) => Some(format!(" OFFSET {skip}")),
                (None, None) => Some(String::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_comma() {
        let mysql = Pagination::LimitComma {
            unbounded: "18446744073709551615",
        };
        assert_eq!(
            mysql.trailing_clause(Some(10), Some(5)).as_deref(),
            Some(" LIMIT 10,5")
        );
        assert_eq!(mysql.trailing_clause(None, Some(5)).as_deref(), Some(" LIMIT 5"));
        assert_eq!(
            mysql.trailing_clause(Some(10), None).as_deref(),
            Some(" LIMIT 10,18446744073709551615")
        );
    }

    #[test]
    fn test_limit_offset() {
        let pg = Pagination::LimitOffset;
        assert_eq!(
            pg.trailing_clause(Some(10), Some(5)).as_deref(),
            Some(" LIMIT 5 OFFSET 10")
        );
        assert_eq!(pg.trailing_clause(Some(10), None).as_deref(), Some(" OFFSET 10"));
        assert_eq!(pg.trailing_clause(None, None).as_deref(), Some(""));
    }

    #[test]
    fn test_wrapper_strategies_have_no_trailing_clause() {
        assert!(Pagination::RowNumber.trailing_clause(Some(1), Some(1)).is_none());
        assert!(Pagination::RowNum.trailing_clause(None, Some(1)).is_none());
    }
}
