use std::fmt;

use crate::error::TransferError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Download skipped: the local file is never overwritten.
    AlreadyPresentLocally,
    /// Download skipped: nothing has been published under the key yet.
    NotFoundRemotely,
    /// Upload skipped: published objects are never overwritten.
    AlreadyPresentRemotely,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::AlreadyPresentLocally => "file already present locally",
            SkipReason::NotFoundRemotely => "object not found in bucket",
            SkipReason::AlreadyPresentRemotely => "object already present in bucket",
        };
        f.write_str(msg)
    }
}

/// Terminal result of a single download or upload.
#[must_use]
#[derive(Debug)]
pub enum TransferOutcome {
    Skipped(SkipReason),
    Completed,
    Failed(TransferError),
}

impl TransferOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, TransferOutcome::Skipped(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            TransferOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Turns `Failed` into `Err` so callers can propagate it with `?`.
    pub fn into_result(self) -> Result<TransferOutcome, TransferError> {
        match self {
            TransferOutcome::Failed(e) => Err(e),
            other => Ok(other),
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Skipped(reason) => write!(f, "skipped ({reason})"),
            TransferOutcome::Completed => f.write_str("completed"),
            TransferOutcome::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}
