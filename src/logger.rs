use std::sync::Mutex;

/// Narrow logging seam for the installer.
///
/// The installer only ever reports progress and misses, so two levels are
/// enough. [`Facade`] forwards to the `log` crate; [`Recorder`] keeps lines
/// in memory for inspection.
pub trait Logger: Send + Sync {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
}

/// Forwards to whatever `log` backend the process installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Facade;

impl Logger for Facade {
    fn info(&self, msg: &str) {
        log::info!("{}", msg);
    }
    fn warn(&self, msg: &str) {
        log::warn!("{}", msg);
    }
}

/// Captures every line with its level.
#[derive(Debug, Default)]
pub struct Recorder(Mutex<Vec<(log::Level, String)>>);

impl Recorder {
    /// Snapshot of recorded lines, oldest first.
    pub fn lines(&self) -> Vec<(log::Level, String)> {
        self.0.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
    /// Recorded messages at a single level.
    pub fn at(&self, level: log::Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
    fn push(&self, level: log::Level, msg: &str) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}

impl Logger for Recorder {
    fn info(&self, msg: &str) {
        self.push(log::Level::Info, msg);
    }
    fn warn(&self, msg: &str) {
        self.push(log::Level::Warn, msg);
    }
}
