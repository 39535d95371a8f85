//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{Verbosity, init_subscriber};
pub use types::{Log, TaskEntry, TaskStatus};

/// Target used for stage headers so the console formatter can render them
/// as `==>` lines.
pub const STAGE_TARGET: &str = "ignition_unpack::stage";

/// Run `f` under a thread-local subscriber that renders with the console
/// formatter into a buffer, and return what was written.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn capture_output(verbosity: Verbosity, f: impl FnOnce()) -> String {
    use std::sync::{Arc, Mutex};

    let buf = Arc::new(Mutex::new(Vec::new()));
    let dispatch = subscriber::console_dispatch(verbosity, {
        let buf = Arc::clone(&buf);
        move || SharedBuf(Arc::clone(&buf))
    });
    tracing::dispatcher::with_default(&dispatch, f);

    let bytes = buf.lock().expect("capture buffer poisoned").clone();
    String::from_utf8(bytes).expect("console output is UTF-8")
}

/// Writer appending into a shared buffer.
#[cfg(test)]
#[derive(Debug)]
struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
