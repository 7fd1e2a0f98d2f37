use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by the data pipeline.
///
/// `Connection` is terminal for the render cycle: nothing downstream of the
/// loader runs when the remote source cannot be reached. `UnknownColumn`
/// indicates schema drift between the source sheet and the configured
/// dashboard schema and is never swallowed — a silently missing chart or
/// filter would mask a config bug.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Remote source unreachable or credentials rejected. Not retried.
    #[error("could not reach the contact sheet: {0}")]
    Connection(String),

    /// A filter or aggregate referenced a column the loaded table does not have.
    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    /// Local file could not be read or parsed into a record table.
    #[error("malformed data: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_names_the_offender() {
        let err = DashboardError::UnknownColumn("Sector o industria".to_string());
        assert_eq!(err.to_string(), "unknown column \"Sector o industria\"");
    }
}
