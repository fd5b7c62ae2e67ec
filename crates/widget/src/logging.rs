use std::str::FromStr;

use tracing::Level;

/// Install the global `tracing` subscriber. In the browser every event is
/// written to the devtools console; elsewhere it goes to stderr. Later calls
/// are no-ops.
pub fn init_tracing(level: &str) {
    let level = parse_level(level);
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(true)
        .with_max_level(level);

    #[cfg(target_arch = "wasm32")]
    let subscriber = builder
        .without_time()
        .with_writer(console::ConsoleWriter::default)
        .finish();

    #[cfg(not(target_arch = "wasm32"))]
    let subscriber = builder.with_writer(std::io::stderr).finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Unknown names fall back to `INFO`.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io::{self, Write};

    /// Buffers one formatted event and hands it to `console.log` on drop.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&line.trim_end().into());
        }
    }
}
