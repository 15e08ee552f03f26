//! Notification collaborator seam. The page never delivers anything; the
//! shipped implementation records the intent in the log and drops it.
use crate::model::InterestAlertRequest;
use tracing::info;

pub trait AlertSink {
    /// Called once per successful alert signup, with the story the visitor
    /// asked about. The request is not retained anywhere after this call.
    fn alert_requested(&self, story_id: i64, request: &InterestAlertRequest);
}

/// Log-only sink. A real deployment would swap in an email/SMS dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert_requested(&self, story_id: i64, request: &InterestAlertRequest) {
        info!(
            story_id,
            method = request.contact_method.as_str(),
            contact = %request.contact,
            "alert signup requested"
        );
    }
}
