//! Recording test doubles for the host collaborators.

use crate::constants::RoutePath;
use crate::services::logging::{ErrorReport, ErrorReporter};
use crate::services::navigation::{Navigator, Notifier};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<RoutePath>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<RoutePath> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn on_navigate(&self, route: RoutePath) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<ErrorReport>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, report: ErrorReport) {
        self.reports.lock().unwrap().push(report);
    }
}
