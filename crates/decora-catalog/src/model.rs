use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use decora_domain::{AreaDefinition, ServiceKind, WizardStep};

use crate::CatalogError;

static BUILT_IN: Lazy<Catalog> = Lazy::new(built_in_catalog);

/// Everything the booking wizard reads as data rather than code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub areas: Vec<AreaDefinition>,
    #[serde(default = "default_style_options")]
    pub style_options: Vec<String>,
    #[serde(default = "default_budget_options")]
    pub budget_options: Vec<String>,
    pub profiles: Vec<ServiceProfile>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn built_in() -> &'static Catalog {
        &BUILT_IN
    }

    pub fn area(&self, id: &str) -> Option<&AreaDefinition> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn custom_area(&self) -> Option<&AreaDefinition> {
        self.areas.iter().find(|area| area.is_custom)
    }

    pub fn profile(&self, kind: ServiceKind) -> Option<&ServiceProfile> {
        self.profiles.iter().find(|profile| profile.kind == kind)
    }

    /// Checks the structural rules the wizard relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.areas.is_empty() {
            return Err(CatalogError::Invalid("no areas defined".into()));
        }
        let mut seen = HashSet::new();
        for area in &self.areas {
            if area.id.trim().is_empty() {
                return Err(CatalogError::Invalid("area with empty id".into()));
            }
            if !seen.insert(area.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate area id `{}`",
                    area.id
                )));
            }
            if !area.base_price.is_finite() || area.base_price < 0.0 {
                return Err(CatalogError::Invalid(format!(
                    "area `{}` has invalid price",
                    area.id
                )));
            }
        }
        let custom_count = self.areas.iter().filter(|area| area.is_custom).count();
        if custom_count != 1 {
            return Err(CatalogError::Invalid(format!(
                "expected exactly one custom area, found {}",
                custom_count
            )));
        }
        if self.style_options.is_empty() {
            return Err(CatalogError::Invalid("no style options".into()));
        }
        if self.budget_options.is_empty() {
            return Err(CatalogError::Invalid("no budget options".into()));
        }
        for kind in ServiceKind::ALL {
            let count = self
                .profiles
                .iter()
                .filter(|profile| profile.kind == kind)
                .count();
            if count != 1 {
                return Err(CatalogError::Invalid(format!(
                    "expected exactly one profile for {}, found {}",
                    kind, count
                )));
            }
        }
        for profile in &self.profiles {
            profile.validate()?;
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::built_in().clone()
    }
}

/// Per-service wizard configuration: labeling, step order, and fees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceProfile {
    pub kind: ServiceKind,
    pub label: String,
    pub reference_prefix: String,
    pub steps: Vec<WizardStep>,
    #[serde(default)]
    pub surcharges: SurchargeSchedule,
    #[serde(default)]
    pub requires_install_days: bool,
    #[serde(default)]
    pub requires_remote_assets: bool,
}

impl ServiceProfile {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.label.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "profile for {} has no label",
                self.kind
            )));
        }
        if self.reference_prefix.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "profile for {} has no reference prefix",
                self.kind
            )));
        }
        if self.steps.first() != Some(&WizardStep::Contact) {
            return Err(CatalogError::Invalid(format!(
                "profile for {} must start at the contact step",
                self.kind
            )));
        }
        if self.steps.last() != Some(&WizardStep::Review) {
            return Err(CatalogError::Invalid(format!(
                "profile for {} must end at the review step",
                self.kind
            )));
        }
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.title()) {
                return Err(CatalogError::Invalid(format!(
                    "profile for {} repeats step {}",
                    self.kind, step
                )));
            }
        }
        if !self.surcharges.is_valid() {
            return Err(CatalogError::Invalid(format!(
                "profile for {} has a negative or non-finite fee",
                self.kind
            )));
        }
        Ok(())
    }
}

/// Flat fees and rates a service can add on top of area prices.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SurchargeSchedule {
    #[serde(default)]
    pub rush_fee: f64,
    #[serde(default)]
    pub measurement_visit_fee: f64,
    #[serde(default)]
    pub install_day_rate: f64,
    #[serde(default)]
    pub site_visit_fee: f64,
}

impl SurchargeSchedule {
    fn is_valid(&self) -> bool {
        [
            self.rush_fee,
            self.measurement_visit_fee,
            self.install_day_rate,
            self.site_visit_fee,
        ]
        .iter()
        .all(|fee| fee.is_finite() && *fee >= 0.0)
    }
}

fn default_style_options() -> Vec<String> {
    [
        "Modern",
        "Boho",
        "Minimalist",
        "Farmhouse",
        "Eclectic",
        "Coastal",
        "Scandinavian",
        "Traditional",
        "Transitional",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_budget_options() -> Vec<String> {
    [
        "Under $500",
        "$500 - $1,000",
        "$1,000 - $2,000",
        "$2,000 - $4,000",
        "$4,000+",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn built_in_catalog() -> Catalog {
    Catalog {
        areas: vec![
            AreaDefinition::new("kitchen", "Kitchen", 220.0, "Cabinet fronts, counters, open shelving"),
            AreaDefinition::new("living-room", "Living Room", 250.0, "Seating, layout, lighting, textiles"),
            AreaDefinition::new("bathroom", "Bathroom", 180.0, "Vanity styling, storage, linens"),
            AreaDefinition::new("dining-room", "Dining Room", 200.0, "Table setting, seating, statement pieces"),
            AreaDefinition::new("bedroom", "Bedroom", 200.0, "Bedding, nightstands, calm palettes"),
            AreaDefinition::new("patio", "Patio", 150.0, "Outdoor-safe furniture and greenery"),
            AreaDefinition::new("office", "Office", 180.0, "Desk setup, shelving, focus-friendly decor"),
            AreaDefinition::new("playroom", "Playroom", 160.0, "Durable, kid-safe, easy to tidy"),
            AreaDefinition::custom("other", "Other", 120.0, "Tell us about the space"),
        ],
        style_options: default_style_options(),
        budget_options: default_budget_options(),
        profiles: vec![
            ServiceProfile {
                kind: ServiceKind::VirtualStyling,
                label: "Virtual Styling".into(),
                reference_prefix: "VS".into(),
                steps: vec![
                    WizardStep::Contact,
                    WizardStep::SpaceDetails,
                    WizardStep::Schedule,
                    WizardStep::Review,
                ],
                // Rush turnaround is advertised but not billed today; flip
                // rush_fee here to start charging it.
                surcharges: SurchargeSchedule::default(),
                requires_install_days: false,
                requires_remote_assets: false,
            },
            ServiceProfile {
                kind: ServiceKind::ShoppingStyling,
                label: "Shopping & Styling".into(),
                reference_prefix: "SS".into(),
                steps: vec![
                    WizardStep::Contact,
                    WizardStep::Areas,
                    WizardStep::SpaceDetails,
                    WizardStep::Review,
                ],
                surcharges: SurchargeSchedule {
                    measurement_visit_fee: 75.0,
                    ..SurchargeSchedule::default()
                },
                requires_install_days: false,
                requires_remote_assets: false,
            },
            ServiceProfile {
                kind: ServiceKind::DecoratingInstallation,
                label: "Decorating + Installation".into(),
                reference_prefix: "DI".into(),
                steps: vec![
                    WizardStep::Contact,
                    WizardStep::SpaceDetails,
                    WizardStep::Logistics,
                    WizardStep::VisitChoice,
                    WizardStep::Review,
                ],
                surcharges: SurchargeSchedule {
                    install_day_rate: 250.0,
                    site_visit_fee: 75.0,
                    ..SurchargeSchedule::default()
                },
                requires_install_days: true,
                requires_remote_assets: true,
            },
        ],
    }
}
