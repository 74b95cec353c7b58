//! Inline status reporting for the create workflow

use crate::view::StatusLine;

/// Receives status lines as a submission progresses
pub trait StatusSink: Send + Sync {
    fn show(&self, status: StatusLine);

    fn clear(&self);
}

#[cfg(test)]
pub(crate) use recording::RecordingStatus;

#[cfg(test)]
mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Sink that keeps every line; `None` marks a clear
    #[derive(Debug, Default)]
    pub(crate) struct RecordingStatus {
        lines: Mutex<Vec<Option<StatusLine>>>,
    }

    impl RecordingStatus {
        pub(crate) fn lines(&self) -> Vec<Option<StatusLine>> {
            self.lines.lock().unwrap().clone()
        }

        pub(crate) fn last(&self) -> Option<StatusLine> {
            self.lines.lock().unwrap().last().cloned().flatten()
        }
    }

    impl StatusSink for RecordingStatus {
        fn show(&self, status: StatusLine) {
            self.lines.lock().unwrap().push(Some(status));
        }

        fn clear(&self) {
            self.lines.lock().unwrap().push(None);
        }
    }
}
