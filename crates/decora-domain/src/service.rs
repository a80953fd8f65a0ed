//! Service kinds, wizard steps, and per-service booking details.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Enumerates the three bookable design services.
pub enum ServiceKind {
    VirtualStyling,
    ShoppingStyling,
    DecoratingInstallation,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::VirtualStyling,
        ServiceKind::ShoppingStyling,
        ServiceKind::DecoratingInstallation,
    ];
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceKind::VirtualStyling => "Virtual Styling",
            ServiceKind::ShoppingStyling => "Shopping & Styling",
            ServiceKind::DecoratingInstallation => "Decorating + Installation",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Screens a booking wizard can show; each service uses a subset in order.
pub enum WizardStep {
    Contact,
    Areas,
    SpaceDetails,
    Schedule,
    Logistics,
    VisitChoice,
    Review,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Contact => "Contact",
            WizardStep::Areas => "Areas",
            WizardStep::SpaceDetails => "Space Details",
            WizardStep::Schedule => "Schedule",
            WizardStep::Logistics => "Logistics",
            WizardStep::VisitChoice => "Site Visit",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Turnaround the shopper picks for virtual styling.
pub enum TimelineChoice {
    #[default]
    Standard,
    Rush,
    Flexible,
}

impl TimelineChoice {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineChoice::Standard => "4-6 Business Days",
            TimelineChoice::Rush => "2-3 Business Days",
            TimelineChoice::Flexible => "Flexible",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// How the shopping service purchases on the client's behalf.
pub enum ShoppingMode {
    #[default]
    FullService,
    ApprovalPerItem,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Where purchased pieces end up before installation.
pub enum DeliveryOption {
    #[default]
    DeliverToHome,
    ClientPickup,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Spending authority granted for the installation budget.
pub enum PurchaseMethod {
    #[default]
    FullBudget,
    PerItemApproval,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Whether the team measures on site or works from client-sent assets.
pub enum VisitPreference {
    InPerson {
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
        note: String,
    },
    Remote {
        note: String,
    },
}

impl VisitPreference {
    pub fn is_in_person(&self) -> bool {
        matches!(self, VisitPreference::InPerson { .. })
    }

    pub fn note(&self) -> &str {
        match self {
            VisitPreference::InPerson { note, .. } => note,
            VisitPreference::Remote { note } => note,
        }
    }
}

impl Default for VisitPreference {
    fn default() -> Self {
        VisitPreference::InPerson {
            date: None,
            time: None,
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Service-specific answers gathered outside the per-space questionnaire.
pub enum ServiceDetails {
    Styling {
        timeline: TimelineChoice,
        kickoff_date: Option<NaiveDate>,
        kickoff_time: Option<NaiveTime>,
    },
    Shopping {
        mode: ShoppingMode,
        measurement_visit: bool,
    },
    Installation {
        install_days: u32,
        desired_date: Option<NaiveDate>,
        delivery: DeliveryOption,
        purchase: PurchaseMethod,
        visit: VisitPreference,
    },
}

impl ServiceDetails {
    /// Blank details matching what each service's form shows initially.
    pub fn default_for(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::VirtualStyling => ServiceDetails::Styling {
                timeline: TimelineChoice::default(),
                kickoff_date: None,
                kickoff_time: None,
            },
            ServiceKind::ShoppingStyling => ServiceDetails::Shopping {
                mode: ShoppingMode::default(),
                measurement_visit: false,
            },
            ServiceKind::DecoratingInstallation => ServiceDetails::Installation {
                install_days: 1,
                desired_date: None,
                delivery: DeliveryOption::default(),
                purchase: PurchaseMethod::default(),
                visit: VisitPreference::default(),
            },
        }
    }

    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceDetails::Styling { .. } => ServiceKind::VirtualStyling,
            ServiceDetails::Shopping { .. } => ServiceKind::ShoppingStyling,
            ServiceDetails::Installation { .. } => ServiceKind::DecoratingInstallation,
        }
    }
}
