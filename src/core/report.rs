use std::sync::Mutex;

/// Severity of a conversion report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Sink for user-visible conversion output.
///
/// Conversion logic never prints directly; the caller decides where report
/// lines go (the console for the CLI, a buffer in tests).
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }
}

/// Prints info lines to stdout and warnings to stderr.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Info => println!("{}", message),
            Level::Warn => eprintln!("warning: {}", message),
        }
    }
}

/// Collects report lines in memory so callers can inspect them.
#[derive(Default)]
pub struct CollectingReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_keeps_order() {
        let reporter = CollectingReporter::new();
        reporter.info("first");
        reporter.warn("second");

        let lines = reporter.lines();
        assert_eq!(lines[0], (Level::Info, "first".to_string()));
        assert_eq!(lines[1], (Level::Warn, "second".to_string()));
        assert_eq!(reporter.warnings(), vec!["second".to_string()]);
    }
}
