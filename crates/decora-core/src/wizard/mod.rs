//! Parametrized booking wizard. One engine drives all three services from
//! catalog data: the profile supplies the step order, surcharge schedule,
//! and intake requirements, so service differences live in data rather
//! than in three copies of this module.

pub mod pricing;
pub mod selection;

pub use pricing::{PriceLine, Quote};
pub use selection::{AreaSelection, SelectionState};

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use decora_catalog::{Catalog, ServiceProfile};
use decora_domain::{
    entry_label, missing_remote_assets, AreaReport, BookingPayload, BookingTerms, ContactInfo,
    EntryReport, EntryUpdate, MediaAttachment, MediaUpload, ServiceDetails, ServiceKind,
    SpaceEntry, VisitPreference, WizardStep,
};

use crate::{
    booking_service::BookingService,
    contact_service::SavedContactService,
    notify::{dispatch_detached, NotificationDispatcher},
    reference::booking_reference,
    storage::KeyValueStore,
    time::Clock,
    CoreError, Result,
};

/// Result of stepping backwards from the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBack {
    Moved(WizardStep),
    /// Backing out of the first step; the host should close the wizard.
    Cancelled,
}

/// What a completed submission left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub reference: String,
    pub payload: BookingPayload,
}

/// Live state of one booking flow, from the contact screen to submission.
pub struct BookingWizard {
    profile: ServiceProfile,
    style_options: Vec<String>,
    budget_options: Vec<String>,
    contact: ContactInfo,
    selection: SelectionState,
    details: ServiceDetails,
    step_index: usize,
    submission: Option<Submission>,
    saved_contacts: SavedContactService,
    bookings: BookingService,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl BookingWizard {
    /// Starts a wizard for one service. A contact card remembered from an
    /// earlier booking pre-fills the first step with the opt-in switched on.
    pub fn new(
        catalog: &Catalog,
        kind: ServiceKind,
        store: Arc<dyn KeyValueStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let profile = catalog
            .profile(kind)
            .ok_or_else(|| CoreError::InvalidOperation(format!("no profile for {kind}")))?
            .clone();
        let saved_contacts = SavedContactService::new(store.clone());
        let contact = saved_contacts
            .load()
            .map(ContactInfo::from)
            .unwrap_or_default();
        Ok(Self {
            profile,
            style_options: catalog.style_options.clone(),
            budget_options: catalog.budget_options.clone(),
            contact,
            selection: SelectionState::new(&catalog.areas),
            details: ServiceDetails::default_for(kind),
            step_index: 0,
            submission: None,
            saved_contacts,
            bookings: BookingService::new(store),
            dispatcher,
            clock,
        })
    }

    pub fn kind(&self) -> ServiceKind {
        self.profile.kind
    }

    pub fn service_label(&self) -> &str {
        &self.profile.label
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.profile.steps
    }

    pub fn current_step(&self) -> WizardStep {
        self.profile.steps[self.step_index]
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn details(&self) -> &ServiceDetails {
        &self.details
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn style_options(&self) -> &[String] {
        &self.style_options
    }

    pub fn budget_options(&self) -> &[String] {
        &self.budget_options
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    /// Replaces the contact details. Nothing is persisted until submission.
    pub fn set_contact(&mut self, contact: ContactInfo) -> Result<()> {
        self.ensure_open()?;
        self.contact = contact;
        Ok(())
    }

    /// Replaces the service details; the variant must match this wizard's
    /// service.
    pub fn set_details(&mut self, details: ServiceDetails) -> Result<()> {
        self.ensure_open()?;
        if details.kind() != self.profile.kind {
            return Err(CoreError::Validation(format!(
                "details for {} cannot be applied to a {} booking",
                details.kind(),
                self.profile.kind
            )));
        }
        self.details = details;
        Ok(())
    }

    pub fn set_quantity(&mut self, area_id: &str, desired: i64) -> Result<Vec<SpaceEntry>> {
        self.ensure_open()?;
        self.selection.set_quantity(area_id, desired)
    }

    pub fn set_area_description(&mut self, area_id: &str, text: &str) -> Result<()> {
        self.ensure_open()?;
        self.selection.set_description(area_id, text)
    }

    pub fn update_entry(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        update: &EntryUpdate,
    ) -> Result<()> {
        self.ensure_open()?;
        self.selection.update_entry(area_id, entry_id, update)
    }

    pub fn attach_media(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        uploads: Vec<MediaUpload>,
    ) -> Result<Vec<Uuid>> {
        self.ensure_open()?;
        self.selection.attach_media(area_id, entry_id, uploads)
    }

    pub fn remove_media(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        media_id: Uuid,
    ) -> Result<MediaAttachment> {
        self.ensure_open()?;
        self.selection.remove_media(area_id, entry_id, media_id)
    }

    pub fn subtotal(&self) -> f64 {
        pricing::subtotal(&self.selection, &self.profile.surcharges, &self.details)
    }

    pub fn deposit_due(&self) -> f64 {
        pricing::deposit(self.subtotal())
    }

    pub fn quote(&self) -> Quote {
        pricing::quote(&self.selection, &self.profile.surcharges, &self.details)
    }

    /// Why the current step refuses to advance, if it does. The host shows
    /// nothing and disables its continue control; the text is for logs and
    /// the submission-time block.
    pub fn blocking_reason(&self) -> Option<String> {
        self.step_block(self.current_step())
    }

    pub fn can_advance(&self) -> bool {
        self.submission.is_none()
            && self.step_index + 1 < self.profile.steps.len()
            && self.blocking_reason().is_none()
    }

    /// Moves to the next step once the current gate is satisfied.
    pub fn advance(&mut self) -> Result<WizardStep> {
        self.ensure_open()?;
        if self.step_index + 1 >= self.profile.steps.len() {
            return Err(CoreError::InvalidOperation(
                "already at the review step".into(),
            ));
        }
        if let Some(reason) = self.blocking_reason() {
            return Err(CoreError::Validation(reason));
        }
        self.step_index += 1;
        Ok(self.current_step())
    }

    /// Moves back one step; from the first step this reports a cancel
    /// instead, leaving state untouched so the host decides what to do.
    pub fn retreat(&mut self) -> StepBack {
        if self.submission.is_some() || self.step_index == 0 {
            return StepBack::Cancelled;
        }
        self.step_index -= 1;
        StepBack::Moved(self.current_step())
    }

    /// Submits the booking from the review step.
    ///
    /// The remote-design completeness check runs again here and aborts with
    /// a user-facing validation message when it fails. The payload is
    /// appended to the durable booking log before any notification leaves;
    /// a storage failure aborts the submission, while notification delivery
    /// happens on a detached thread and can never unwind it.
    pub fn submit(&mut self) -> Result<Submission> {
        self.ensure_open()?;
        if self.current_step() != WizardStep::Review {
            return Err(CoreError::InvalidOperation(
                "submission is only available from the review step".into(),
            ));
        }
        if self.remote_assets_required() {
            if let Some(reason) = self.remote_assets_block() {
                return Err(CoreError::Validation(reason));
            }
        }

        let reference = booking_reference(&self.profile.reference_prefix, self.clock.as_ref());
        let payload = self.build_payload(reference.clone());

        if self.contact.save_info {
            if let Err(err) = self.saved_contacts.save(&self.contact.card()) {
                warn!("unable to remember contact details: {}", err);
            }
        } else if let Err(err) = self.saved_contacts.clear() {
            warn!("unable to clear remembered contact details: {}", err);
        }

        self.bookings.append(&payload)?;
        info!(
            "booking `{}` submitted for {} (subtotal ${:.2})",
            reference, self.profile.label, payload.subtotal
        );
        dispatch_detached(self.dispatcher.clone(), payload.clone());

        let submission = Submission { reference, payload };
        self.submission = Some(submission.clone());
        Ok(submission)
    }

    /// Abandons the wizard, releasing every media preview it still holds.
    /// Returns the attachments so the host can drop its preview resources.
    pub fn discard(mut self) -> Vec<MediaAttachment> {
        self.selection.release_all()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.submission.is_some() {
            return Err(CoreError::InvalidOperation(
                "booking already submitted".into(),
            ));
        }
        Ok(())
    }

    fn step_block(&self, step: WizardStep) -> Option<String> {
        match step {
            WizardStep::Contact => {
                if self.contact.is_complete() {
                    None
                } else {
                    Some("full name, email, phone, and address are required".into())
                }
            }
            WizardStep::Areas => {
                if self.selection.selected_count() == 0 {
                    Some("select at least one area".into())
                } else {
                    None
                }
            }
            WizardStep::SpaceDetails => self.space_details_block(),
            WizardStep::VisitChoice => self.visit_choice_block(),
            WizardStep::Schedule | WizardStep::Logistics | WizardStep::Review => None,
        }
    }

    fn space_details_block(&self) -> Option<String> {
        if self.selection.selected_count() == 0 {
            return Some("select at least one area".into());
        }
        for area in self.selection.selected() {
            if area
                .entries
                .iter()
                .any(|entry| !entry.has_style_and_budget())
            {
                return Some(format!(
                    "pick a style and budget for every {} space",
                    area.area.label
                ));
            }
        }
        if self.profile.requires_install_days {
            if let ServiceDetails::Installation { install_days, .. } = &self.details {
                if *install_days == 0 {
                    return Some("set at least one installation day".into());
                }
            }
        }
        if self.remote_assets_required() {
            if let Some(reason) = self.remote_assets_block() {
                return Some(reason);
            }
        }
        None
    }

    fn visit_choice_block(&self) -> Option<String> {
        if let ServiceDetails::Installation {
            visit: VisitPreference::InPerson { date, time, .. },
            ..
        } = &self.details
        {
            if date.is_none() || time.is_none() {
                return Some("pick a date and time for the site visit".into());
            }
        }
        None
    }

    /// Remote bookings must ship complete specs in lieu of the visit.
    fn remote_assets_required(&self) -> bool {
        self.profile.requires_remote_assets
            && matches!(
                &self.details,
                ServiceDetails::Installation {
                    visit: VisitPreference::Remote { .. },
                    ..
                }
            )
    }

    fn remote_assets_block(&self) -> Option<String> {
        let mut incomplete = Vec::new();
        for area in self.selection.selected() {
            let count = area.quantity();
            for (index, entry) in area.entries.iter().enumerate() {
                if missing_remote_assets(entry) {
                    incomplete.push(entry_label(&area.area.label, count, entry, index));
                }
            }
        }
        if incomplete.is_empty() {
            None
        } else {
            Some(format!(
                "measurements and at least one photo are required for: {}",
                incomplete.join(", ")
            ))
        }
    }

    fn build_payload(&self, reference: String) -> BookingPayload {
        let areas = self
            .selection
            .selected()
            .map(|selection| {
                let count = selection.quantity();
                AreaReport {
                    id: selection.area.id.clone(),
                    label: selection.area.label.clone(),
                    description: if selection.area.is_custom {
                        selection.description.clone()
                    } else {
                        String::new()
                    },
                    entries: selection
                        .entries
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| EntryReport {
                            entry_id: entry.id,
                            name: entry_label(&selection.area.label, count, entry, index),
                            nickname: entry.nickname.trim().to_string(),
                            dimensions: entry.dimensions.clone(),
                            keep_notes: entry.keep_notes.clone(),
                            remove_notes: entry.remove_notes.clone(),
                            unsure_notes: entry.unsure_notes.clone(),
                            media_count: entry.media_count(),
                            style_preference: entry.style_preference.clone(),
                            budget_range: entry.budget_range.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        let subtotal = self.subtotal();
        BookingPayload {
            service: self.profile.kind,
            service_label: self.profile.label.clone(),
            reference,
            contact: self.contact.card(),
            areas,
            terms: BookingTerms::from_details(&self.details, self.profile.surcharges.site_visit_fee),
            subtotal,
            deposit: pricing::deposit(subtotal),
            submitted_at: self.clock.now(),
        }
    }
}
