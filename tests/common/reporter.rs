//! Problem reporter that keeps reports in memory.

use async_trait::async_trait;
use ocf_ircbot::error::ReportError;
use ocf_ircbot::report::{ProblemReport, ProblemReporter};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<ProblemReport>>,
}

#[allow(dead_code)]
impl CollectingReporter {
    pub fn reports(&self) -> Vec<ProblemReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProblemReporter for CollectingReporter {
    async fn report(&self, report: &ProblemReport) -> Result<(), ReportError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}
