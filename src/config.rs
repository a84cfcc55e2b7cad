use std::time::Duration;

/// Per-screen editor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Capacity of the request and progress channels.
    pub buffer_size: usize,
    /// Upper bound for one backend call; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Drop previous validation errors as soon as any field is edited, so they
    /// are only recomputed on the next submit.
    pub clear_errors_on_edit: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            request_timeout: Some(Duration::from_secs(15)),
            clear_errors_on_edit: true,
        }
    }
}

impl EditorConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn keep_errors_on_edit(mut self) -> Self {
        self.clear_errors_on_edit = false;
        self
    }
}
