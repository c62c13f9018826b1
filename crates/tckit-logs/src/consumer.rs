//! Selective container log consumer

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::sync::Arc;
use testcontainers::Image;
use testcontainers::core::logs::LogFrame;
use testcontainers::core::logs::consumer::LogConsumer;

use crate::{LogSink, OutputStream, TracingSink, Verbosity};

/// Routes container output to a [`LogSink`] according to a [`Verbosity`].
///
/// Clones share the verbosity, so a test can keep one handle and give
/// another to the container:
///
/// ```ignore
/// let logs = SelectiveLogConsumer::new("postgres");
/// let container = Postgres::default()
///     .with_log_consumer(logs.clone())
///     .start()
///     .await?;
/// // container is up, stop forwarding its output
/// logs.set_verbosity(Verbosity::None);
/// ```
pub struct SelectiveLogConsumer<S = TracingSink> {
    name: Arc<str>,
    verbosity: Arc<RwLock<Verbosity>>,
    sink: Arc<S>,
}

impl SelectiveLogConsumer<TracingSink> {
    /// Consumer for the named container, starting at `Verbosity::Partial`
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::with_verbosity(name, Verbosity::Partial)
    }

    pub fn with_verbosity(name: impl AsRef<str>, verbosity: Verbosity) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            verbosity: Arc::new(RwLock::new(verbosity)),
            sink: Arc::new(TracingSink),
        }
    }

    /// Consumer named after an image reference (`name:tag`)
    pub fn for_image<I: Image>(image: &I, verbosity: Verbosity) -> Self {
        Self::with_verbosity(format!("{}:{}", image.name(), image.tag()), verbosity)
    }
}

impl<S: LogSink> SelectiveLogConsumer<S> {
    /// Replace the sink, keeping name and verbosity
    pub fn with_sink<T: LogSink>(self, sink: T) -> SelectiveLogConsumer<T> {
        SelectiveLogConsumer {
            name: self.name,
            verbosity: self.verbosity,
            sink: Arc::new(sink),
        }
    }

    /// Container name attached to every forwarded line
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verbosity(&self) -> Verbosity {
        *self.verbosity.read()
    }

    /// Change the verbosity; takes effect for the next line, on every clone
    pub fn set_verbosity(&self, verbosity: Verbosity) {
        let previous = std::mem::replace(&mut *self.verbosity.write(), verbosity);
        if previous != verbosity {
            tracing::debug!(
                container = %self.name,
                from = %previous,
                to = %verbosity,
                "container log verbosity changed"
            );
        }
    }

    /// Route one raw line of output
    pub fn accept_line(&self, stream: OutputStream, bytes: &[u8]) {
        let verbosity = self.verbosity();
        if verbosity == Verbosity::None {
            return;
        }

        let text = String::from_utf8_lossy(bytes);
        let line = strip_line_ending(&text);
        if let Some(severity) = verbosity.classify(stream, line) {
            self.sink.emit(severity, &self.name, line);
        }
    }

    /// Route one `testcontainers` log frame
    pub fn accept_frame(&self, frame: &LogFrame) {
        match frame {
            LogFrame::StdOut(bytes) => self.accept_line(OutputStream::StdOut, bytes),
            LogFrame::StdErr(bytes) => self.accept_line(OutputStream::StdErr, bytes),
        }
    }
}

impl<S> Clone for SelectiveLogConsumer<S> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            verbosity: Arc::clone(&self.verbosity),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S> std::fmt::Debug for SelectiveLogConsumer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectiveLogConsumer")
            .field("name", &self.name)
            .field("verbosity", &*self.verbosity.read())
            .finish()
    }
}

impl<S: LogSink + 'static> LogConsumer for SelectiveLogConsumer<S> {
    fn accept<'a>(&'a self, record: &'a LogFrame) -> BoxFuture<'a, ()> {
        async move { self.accept_frame(record) }.boxed()
    }
}

/// Drop a single trailing `\n`, `\r\n` or `\r`
fn strip_line_ending(text: &str) -> &str {
    if let Some(stripped) = text.strip_suffix('\n') {
        stripped.strip_suffix('\r').unwrap_or(stripped)
    } else {
        text.strip_suffix('\r').unwrap_or(text)
    }
}
