use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use decora_domain::BookingPayload;

/// Outcome of a notification attempt. Failures are data, never errors;
/// a booking is complete whether or not anyone was notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub success: bool,
    pub operator_sent: bool,
    pub customer_sent: bool,
    pub detail: Option<String>,
}

impl DispatchReport {
    pub fn delivered() -> Self {
        Self {
            success: true,
            operator_sent: true,
            customer_sent: true,
            detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            operator_sent: false,
            customer_sent: false,
            detail: Some(detail.into()),
        }
    }
}

/// Delivery channel for booking confirmations. Implementations must not
/// panic; anything that goes wrong belongs in the report.
pub trait NotificationDispatcher: Send + Sync {
    fn send_booking(&self, payload: &BookingPayload) -> DispatchReport;
}

/// Stand-in used when no delivery channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDispatcher;

impl NotificationDispatcher for NullDispatcher {
    fn send_booking(&self, payload: &BookingPayload) -> DispatchReport {
        warn!(
            "notification dispatcher not configured; skipping send for `{}`",
            payload.reference
        );
        DispatchReport::failed("dispatcher not configured")
    }
}

/// Sends the booking on a detached thread and logs the outcome. The caller
/// never waits on delivery; the returned handle is only joined by tests.
pub fn dispatch_detached(
    dispatcher: Arc<dyn NotificationDispatcher>,
    payload: BookingPayload,
) -> JoinHandle<DispatchReport> {
    thread::spawn(move || {
        let report = dispatcher.send_booking(&payload);
        if report.success {
            info!("booking notification delivered for `{}`", payload.reference);
        } else {
            warn!(
                "booking notification failed for `{}`: {}",
                payload.reference,
                report.detail.as_deref().unwrap_or("no detail")
            );
        }
        report
    })
}

/// Plain-text bodies for the two booking messages. Real dispatchers reuse
/// these; the review screen can show them as a preview.
pub mod messages {
    use decora_domain::{BookingPayload, BookingTerms, VisitTerms};

    /// Internal summary sent to the styling team.
    pub fn operator_summary(payload: &BookingPayload) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "New {} request {}",
            payload.service_label, payload.reference
        ));
        lines.push(String::new());
        lines.push(format!("Client: {}", payload.contact.full_name));
        lines.push(format!("Email: {}", payload.contact.email));
        lines.push(format!("Phone: {}", payload.contact.phone));
        lines.push(format!("Address: {}", payload.contact.address));
        lines.push(String::new());

        for area in &payload.areas {
            let mut header = format!("{} ({} space(s))", area.label, area.entries.len());
            if !area.description.is_empty() {
                header.push_str(&format!(" - {}", area.description));
            }
            lines.push(header);
            for entry in &area.entries {
                lines.push(format!(
                    "  {}: {} / {}, {} photo(s)",
                    entry.name, entry.style_preference, entry.budget_range, entry.media_count
                ));
            }
        }
        lines.push(String::new());
        lines.push(terms_line(&payload.terms));
        lines.push(format!(
            "Subtotal ${:.2}, deposit due ${:.2}",
            payload.subtotal, payload.deposit
        ));
        lines.join("\n")
    }

    /// Confirmation sent to the client.
    pub fn customer_confirmation(payload: &BookingPayload) -> String {
        let first_name = payload
            .contact
            .full_name
            .split_whitespace()
            .next()
            .unwrap_or("there");
        let mut lines = Vec::new();
        lines.push(format!("Hi {},", first_name));
        lines.push(String::new());
        lines.push(format!(
            "Thanks for booking {} with Decora. Your reference is {}.",
            payload.service_label, payload.reference
        ));
        lines.push(format!(
            "We received {} space(s) across {} area(s).",
            payload.entry_count(),
            payload.areas.len()
        ));
        lines.push(format!(
            "Estimated total ${:.2}; a ${:.2} deposit is due to confirm your slot.",
            payload.subtotal, payload.deposit
        ));
        lines.push(String::new());
        lines.push("We'll reach out within one business day with next steps.".into());
        lines.join("\n")
    }

    fn terms_line(terms: &BookingTerms) -> String {
        match terms {
            BookingTerms::Styling { timeline, .. } => {
                format!("Timeline: {}", timeline.label())
            }
            BookingTerms::Shopping {
                mode,
                measurement_visit,
            } => format!(
                "Mode: {:?}, measurement visit: {}",
                mode,
                if *measurement_visit { "yes" } else { "no" }
            ),
            BookingTerms::Installation {
                install_days,
                visit,
                ..
            } => {
                let visit_label = match visit {
                    VisitTerms::InPerson { fee, .. } => format!("in-person visit (${:.0})", fee),
                    VisitTerms::Remote { .. } => "working from client assets".to_string(),
                };
                format!("Installation days: {}, {}", install_days, visit_label)
            }
        }
    }
}
