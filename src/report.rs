use std::fmt::Display;
use std::io::Write;

/// Severity of a status line. `Quiet` sits above `Info` so that lines
/// logged at it survive `--quiet`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Quiet,
    Warn,
}

/// User-facing status output with a level threshold.
pub struct Reporter<W> {
    threshold: Level,
    sink: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(threshold: Level, sink: W) -> Self { Self { threshold, sink } }

    pub fn enabled(&self, level: Level) -> bool { level >= self.threshold }

    pub fn log(&mut self, level: Level, message: impl Display) {
        if self.enabled(level) {
            // status output is best effort, a closed stream must not abort a deletion
            let _ = writeln!(self.sink, "{}", message);
        }
    }

    pub fn debug(&mut self, message: impl Display) { self.log(Level::Debug, message) }

    pub fn info(&mut self, message: impl Display) { self.log(Level::Info, message) }

    pub fn quiet(&mut self, message: impl Display) { self.log(Level::Quiet, message) }

    pub fn warn(&mut self, message: impl Display) { self.log(Level::Warn, message) }

    pub fn into_inner(self) -> W { self.sink }
}

#[cfg(test)]
mod tests {
    use super::{Level, Reporter};

    fn emit_all(threshold: Level) -> String {
        let mut reporter = Reporter::new(threshold, Vec::new());
        reporter.debug("debug");
        reporter.info("info");
        reporter.quiet("quiet");
        reporter.warn("warn");
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn info_threshold_hides_debug() {
        assert_eq!(emit_all(Level::Info), "info\nquiet\nwarn\n");
    }

    #[test]
    fn quiet_threshold_keeps_listing_and_warnings() {
        assert_eq!(emit_all(Level::Quiet), "quiet\nwarn\n");
    }

    #[test]
    fn debug_threshold_shows_everything() {
        assert_eq!(emit_all(Level::Debug), "debug\ninfo\nquiet\nwarn\n");
    }
}
