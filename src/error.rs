use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Errors produced by the inventory core and the surface operations.
///
/// Every variant is recoverable: the UI turns it into a status message and
/// the inventory is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Empty name, or a quantity/price that does not parse or is negative.
    #[error("{0}")]
    InvalidField(String),
    #[error("no item selected")]
    NoSelection,
    #[error("index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("failed to export to {}: {source}", .path.display())]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }

    /// How the surface should classify this error in the status bar.
    pub fn severity(&self) -> Severity {
        match self {
            Self::ExportFailed { .. } => Severity::Error,
            Self::InvalidField(_) | Self::NoSelection | Self::OutOfRange { .. } => {
                Severity::Warning
            }
        }
    }
}

/// Status message classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_splits_input_errors_from_io_errors() {
        assert_eq!(InventoryError::NoSelection.severity(), Severity::Warning);
        assert_eq!(
            InventoryError::OutOfRange { index: 3, len: 1 }.severity(),
            Severity::Warning
        );
        let io = std::io::Error::other("disk full");
        let err = InventoryError::ExportFailed { path: "x.csv".into(), source: io };
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.to_string().contains("x.csv"));
    }

    #[test]
    fn out_of_range_message_reports_length() {
        let err = InventoryError::OutOfRange { index: 5, len: 1 };
        assert_eq!(err.to_string(), "index 5 out of range (length 1)");
    }

    #[test]
    fn with_ctx_prefixes_message() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = res.with_ctx(|| "init terminal".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "init terminal: boom");
    }
}
