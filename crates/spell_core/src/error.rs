pub trait Severity {
    fn severity(&self) -> SeverityLevel;

    /// Returns `true` if the severity level is [`RecoverableError`].
    ///
    /// [`RecoverableError`]: SeverityLevel::RecoverableError
    #[must_use]
    fn is_recoverable_error(&self) -> bool {
        matches!(self.severity(), SeverityLevel::RecoverableError)
    }

    /// Returns `true` if the severity level is [`UnrecoverableError`].
    ///
    /// [`UnrecoverableError`]: SeverityLevel::UnrecoverableError
    #[must_use]
    fn is_unrecoverable_error(&self) -> bool {
        matches!(self.severity(), SeverityLevel::UnrecoverableError)
    }
}

/// An unrecoverable error aborts the whole compile; a recoverable one only
/// costs the output of the file it occurred in.
#[derive(Debug, PartialEq, Eq)]
pub enum SeverityLevel {
    UnrecoverableError,
    RecoverableError,
}
