use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Buffers one formatted event and hands it to the browser console on drop.
pub struct ConsoleWriter {
    buffer: Vec<u8>,
    level: Level,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let line = JsValue::from_str(line);
        match self.level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::DEBUG | Level::TRACE => console::debug_1(&line),
            _ => console::log_1(&line),
        }
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buffer: Vec::new(), level: Level::INFO }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { buffer: Vec::new(), level: *meta.level() }
    }
}

pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::DEBUG)
        .try_init();

    if installed.is_err() {
        console::warn_1(&JsValue::from_str("tracing subscriber already installed"));
    }
}
