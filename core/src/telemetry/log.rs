use log::{info, trace, warn};

/// Thin wrapper over the `log` facade used for scan notices.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            target: "geolife",
        }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn anomaly(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }

    pub fn detail(&self, message: &str) {
        trace!(target: self.target, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
