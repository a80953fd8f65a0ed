//! Submission payloads appended to the durable booking log.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contact::ContactCard;
use crate::entry::Dimensions;
use crate::service::{
    DeliveryOption, PurchaseMethod, ServiceDetails, ServiceKind, ShoppingMode, TimelineChoice,
    VisitPreference,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Everything recorded for one submitted booking. Media never travels here;
/// attachments are reduced to per-entry counts.
pub struct BookingPayload {
    pub service: ServiceKind,
    pub service_label: String,
    pub reference: String,
    pub contact: ContactCard,
    pub areas: Vec<AreaReport>,
    pub terms: BookingTerms,
    pub subtotal: f64,
    pub deposit: f64,
    pub submitted_at: DateTime<Utc>,
}

impl BookingPayload {
    pub fn entry_count(&self) -> usize {
        self.areas.iter().map(|area| area.entries.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One selected area with its description and space entries.
pub struct AreaReport {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Flattened copy of a space entry; `name` is the resolved display label.
pub struct EntryReport {
    pub entry_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nickname: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keep_notes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remove_notes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unsure_notes: String,
    pub media_count: usize,
    pub style_preference: String,
    pub budget_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Service-specific terms captured at submission time.
pub enum BookingTerms {
    Styling {
        timeline: TimelineChoice,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kickoff_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kickoff_time: Option<NaiveTime>,
    },
    Shopping {
        mode: ShoppingMode,
        measurement_visit: bool,
    },
    Installation {
        install_days: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        desired_date: Option<NaiveDate>,
        delivery: DeliveryOption,
        purchase: PurchaseMethod,
        visit: VisitTerms,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Recorded site-visit arrangement, with the fee actually charged.
pub enum VisitTerms {
    InPerson {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<NaiveTime>,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        note: String,
        fee: f64,
    },
    Remote {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        note: String,
    },
}

impl BookingTerms {
    /// Freezes live service details into recorded terms. `site_visit_fee`
    /// is what an in-person measurement visit costs for this service.
    pub fn from_details(details: &ServiceDetails, site_visit_fee: f64) -> Self {
        match details {
            ServiceDetails::Styling {
                timeline,
                kickoff_date,
                kickoff_time,
            } => BookingTerms::Styling {
                timeline: *timeline,
                kickoff_date: *kickoff_date,
                kickoff_time: *kickoff_time,
            },
            ServiceDetails::Shopping {
                mode,
                measurement_visit,
            } => BookingTerms::Shopping {
                mode: *mode,
                measurement_visit: *measurement_visit,
            },
            ServiceDetails::Installation {
                install_days,
                desired_date,
                delivery,
                purchase,
                visit,
            } => BookingTerms::Installation {
                install_days: *install_days,
                desired_date: *desired_date,
                delivery: *delivery,
                purchase: *purchase,
                visit: match visit {
                    VisitPreference::InPerson { date, time, note } => VisitTerms::InPerson {
                        date: *date,
                        time: *time,
                        note: note.clone(),
                        fee: site_visit_fee,
                    },
                    VisitPreference::Remote { note } => VisitTerms::Remote { note: note.clone() },
                },
            },
        }
    }
}
