use crate::domain::ports::ViewPort;
use crate::domain::view::{Alert, AlertId, FlowSnapshot};
use std::sync::{Arc, Mutex, MutexGuard};

/// What a headless view has been asked to show.
#[derive(Debug, Default)]
pub struct ViewLog {
    pub frames: Vec<FlowSnapshot>,
    pub shown: Vec<Alert>,
    pub hidden: Vec<AlertId>,
}

impl ViewLog {
    pub fn last_frame(&self) -> Option<&FlowSnapshot> {
        self.frames.last()
    }

    /// Alerts shown and not yet hidden.
    pub fn visible_alerts(&self) -> Vec<&Alert> {
        self.shown
            .iter()
            .filter(|a| !self.hidden.contains(&a.id))
            .collect()
    }
}

/// A view that draws nothing and records every call.
///
/// Clones share the same log, so one clone can be boxed into the controller
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    log: Arc<Mutex<ViewLog>>,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> MutexGuard<'_, ViewLog> {
        // A poisoned log is still a readable log.
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ViewPort for HeadlessView {
    fn render(&mut self, snapshot: &FlowSnapshot) {
        self.log().frames.push(snapshot.clone());
    }

    fn show_alert(&mut self, alert: &Alert) {
        self.log().shown.push(alert.clone());
    }

    fn hide_alert(&mut self, id: AlertId) {
        self.log().hidden.push(id);
    }
}
