// src/utils/logging.rs
use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up the logging framework using tracing_subscriber.
/// Reads log level filters from the `RUST_LOG` environment variable.
/// Defaults to "info" if `RUST_LOG` is not set.
///
/// Log lines are written while the bars of `multi` are suspended, so they
/// never land in the middle of a bar redraw.
pub fn setup_logging(debug: bool, multi: &MultiProgress) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(ProgressAwareWriter::new(multi.clone(), io::stderr))
        .init();

    tracing::debug!("Logging setup complete.");
}

/// `MakeWriter` that hands each formatted event to `inner` with the
/// progress bars cleared.
#[derive(Clone)]
pub struct ProgressAwareWriter<M> {
    multi: MultiProgress,
    inner: M,
}

impl<M> ProgressAwareWriter<M> {
    pub fn new(multi: MultiProgress, inner: M) -> Self {
        Self { multi, inner }
    }
}

impl<'a, M> MakeWriter<'a> for ProgressAwareWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SuspendedWriter<'a, M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedWriter {
            multi: &self.multi,
            inner: self.inner.make_writer(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one event; the buffer is written out on flush or drop.
pub struct SuspendedWriter<'a, W: Write> {
    multi: &'a MultiProgress,
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> Write for SuspendedWriter<'_, W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        let inner = &mut self.inner;
        self.multi.suspend(|| {
            inner.write_all(&buf)?;
            inner.flush()
        })
    }
}

impl<W: Write> Drop for SuspendedWriter<'_, W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{ProgressBar, ProgressDrawTarget};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_event_is_written_once_complete() {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = multi.add(ProgressBar::new(3));
        bar.set_position(1);

        let captured = Captured::default();
        let sink = captured.clone();
        let make = ProgressAwareWriter::new(multi.clone(), move || sink.clone());

        {
            let mut writer = make.make_writer();
            write!(writer, "Elaborazione ").unwrap();
            writeln!(writer, "a.pdf").unwrap();
            assert_eq!(captured.contents(), "");
        }

        assert_eq!(captured.contents(), "Elaborazione a.pdf\n");
        assert_eq!(bar.position(), 1);
    }

    #[test]
    fn test_tracing_events_go_through_writer() {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let _bar = multi.add(ProgressBar::new(2));

        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = fmt()
            .with_writer(ProgressAwareWriter::new(multi, move || sink.clone()))
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("1 PDF selezionati.");
            tracing::warn!("Skipped b.pdf");
        });

        let out = captured.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("1 PDF selezionati."));
        assert!(lines[1].contains("WARN") && lines[1].ends_with("Skipped b.pdf"));
    }
}
