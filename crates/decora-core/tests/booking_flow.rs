use std::sync::{mpsc, Arc};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use decora_catalog::Catalog;
use decora_core::{
    BookingWizard, CoreError, DispatchReport, FixedClock, KeyValueStore, MemoryStore,
    NotificationDispatcher, NullDispatcher, Result, StepBack, SystemClock,
};
use decora_core::storage::keys;
use decora_domain::{
    BookingPayload, BookingTerms, ContactInfo, DeliveryOption, EntryUpdate, MediaUpload,
    PurchaseMethod, ServiceDetails, ServiceKind, VisitPreference, VisitTerms, WizardStep,
};

fn contact() -> ContactInfo {
    ContactInfo {
        full_name: "Ana Rivera".into(),
        email: "ana@example.com".into(),
        phone: "787-555-0101".into(),
        address: "12 Calle Sol, San Juan".into(),
        save_info: false,
    }
}

fn upload(name: &str) -> MediaUpload {
    MediaUpload {
        file_name: name.into(),
        size_bytes: 4096,
        mime_type: "image/jpeg".into(),
        source_key: format!("uploads/{name}"),
    }
}

fn wizard_with(
    kind: ServiceKind,
    store: Arc<dyn KeyValueStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
) -> BookingWizard {
    BookingWizard::new(Catalog::built_in(), kind, store, dispatcher, Arc::new(SystemClock))
        .expect("wizard")
}

fn style_entries(wizard: &mut BookingWizard, area_id: &str, style: &str, budget: &str) {
    let ids: Vec<_> = wizard
        .selection()
        .selection(area_id)
        .unwrap()
        .entries
        .iter()
        .map(|entry| entry.id)
        .collect();
    for id in ids {
        wizard
            .update_entry(
                area_id,
                id,
                &EntryUpdate {
                    style_preference: Some(style.into()),
                    budget_range: Some(budget.into()),
                    ..EntryUpdate::default()
                },
            )
            .unwrap();
    }
}

fn advance_to_review(wizard: &mut BookingWizard) {
    while wizard.current_step() != WizardStep::Review {
        wizard.advance().unwrap();
    }
}

#[test]
fn virtual_styling_books_two_kitchens_end_to_end() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut wizard = wizard_with(
        ServiceKind::VirtualStyling,
        store.clone(),
        Arc::new(NullDispatcher),
    );

    wizard.set_contact(contact()).unwrap();
    wizard.advance().unwrap();

    wizard.set_quantity("kitchen", 2).unwrap();
    style_entries(&mut wizard, "kitchen", "Modern", "$1,000 - $2,000");
    let first_entry = wizard.selection().selection("kitchen").unwrap().entries[0].id;
    wizard
        .update_entry(
            "kitchen",
            first_entry,
            &EntryUpdate {
                nickname: Some("Chef's kitchen".into()),
                ..EntryUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(wizard.subtotal(), 440.0);
    assert_eq!(wizard.deposit_due(), 220.0);

    // The quote labels are the same names the payload will carry.
    let quote = wizard.quote();
    let quoted: Vec<&str> = quote.lines.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(quoted, vec!["Chef's kitchen", "Kitchen 2"]);

    advance_to_review(&mut wizard);
    let submission = wizard.submit().unwrap();

    assert!(Regex::new(r"^VS-\d{6}$").unwrap().is_match(&submission.reference));
    let payload = &submission.payload;
    assert_eq!(payload.subtotal, 440.0);
    assert_eq!(payload.deposit, 220.0);
    assert_eq!(payload.areas.len(), 1);
    let names: Vec<&str> = payload.areas[0]
        .entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["Chef's kitchen", "Kitchen 2"]);
    assert!(matches!(payload.terms, BookingTerms::Styling { .. }));

    let booked = decora_core::BookingService::new(store).list().unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].reference, submission.reference);
}

#[test]
fn installation_with_visit_prices_bathroom_at_755() {
    let mut wizard = wizard_with(
        ServiceKind::DecoratingInstallation,
        Arc::new(MemoryStore::new()),
        Arc::new(NullDispatcher),
    );

    wizard.set_contact(contact()).unwrap();
    wizard.advance().unwrap();
    wizard.set_quantity("bathroom", 1).unwrap();
    style_entries(&mut wizard, "bathroom", "Coastal", "$2,000 - $4,000");
    wizard
        .set_details(ServiceDetails::Installation {
            install_days: 2,
            desired_date: NaiveDate::from_ymd_opt(2025, 4, 2),
            delivery: DeliveryOption::DeliverToHome,
            purchase: PurchaseMethod::FullBudget,
            visit: VisitPreference::InPerson {
                date: NaiveDate::from_ymd_opt(2025, 3, 14),
                time: NaiveTime::from_hms_opt(10, 0, 0),
                note: "Gate code 4411".into(),
            },
        })
        .unwrap();

    assert_eq!(wizard.subtotal(), 755.0);
    assert_eq!(wizard.deposit_due(), 378.0);

    advance_to_review(&mut wizard);
    let submission = wizard.submit().unwrap();
    assert!(Regex::new(r"^DI-\d{6}$").unwrap().is_match(&submission.reference));
    match &submission.payload.terms {
        BookingTerms::Installation {
            install_days,
            visit,
            ..
        } => {
            assert_eq!(*install_days, 2);
            match visit {
                VisitTerms::InPerson { fee, note, .. } => {
                    assert_eq!(*fee, 75.0);
                    assert_eq!(note, "Gate code 4411");
                }
                VisitTerms::Remote { .. } => panic!("expected in-person visit"),
            }
        }
        other => panic!("unexpected terms: {other:?}"),
    }
}

#[test]
fn remote_installation_blocks_submission_until_assets_are_complete() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut wizard = wizard_with(
        ServiceKind::DecoratingInstallation,
        store.clone(),
        Arc::new(NullDispatcher),
    );

    wizard.set_contact(contact()).unwrap();
    wizard.advance().unwrap();
    wizard.set_quantity("bathroom", 1).unwrap();
    style_entries(&mut wizard, "bathroom", "Minimalist", "Under $500");
    let entry_id = wizard.selection().selection("bathroom").unwrap().entries[0].id;
    wizard
        .update_entry(
            "bathroom",
            entry_id,
            &EntryUpdate {
                dimensions: Some(decora_domain::Dimensions {
                    length: "8 ft".into(),
                    width: "6 ft".into(),
                    height: "9 ft".into(),
                }),
                ..EntryUpdate::default()
            },
        )
        .unwrap();

    // The in-person default passes the gates; the shopper switches to
    // remote at the visit step, after the space screen was cleared.
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard
        .set_details(ServiceDetails::Installation {
            install_days: 1,
            desired_date: None,
            delivery: DeliveryOption::DeliverToHome,
            purchase: PurchaseMethod::FullBudget,
            visit: VisitPreference::Remote {
                note: "Second-floor walk-up".into(),
            },
        })
        .unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.current_step(), WizardStep::Review);

    let blocked = wizard.submit();
    assert!(matches!(blocked, Err(CoreError::Validation(_))));
    assert!(!wizard.is_submitted());
    assert!(decora_core::BookingService::new(store.clone())
        .is_empty()
        .unwrap());

    // Supplying the missing photo unblocks the same wizard.
    wizard
        .attach_media("bathroom", entry_id, vec![upload("bathroom.jpg")])
        .unwrap();
    let submission = wizard.submit().unwrap();
    assert_eq!(submission.payload.areas[0].entries[0].media_count, 1);
    assert_eq!(
        decora_core::BookingService::new(store).len().unwrap(),
        1
    );
}

struct FailingDispatcher {
    sent: mpsc::Sender<String>,
}

impl NotificationDispatcher for FailingDispatcher {
    fn send_booking(&self, payload: &BookingPayload) -> DispatchReport {
        let _ = self.sent.send(payload.reference.clone());
        DispatchReport::failed("smtp unreachable")
    }
}

#[test]
fn notification_failure_never_unwinds_a_submission() {
    let (sender, receiver) = mpsc::channel();
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut wizard = wizard_with(
        ServiceKind::VirtualStyling,
        store.clone(),
        Arc::new(FailingDispatcher { sent: sender }),
    );

    wizard.set_contact(contact()).unwrap();
    wizard.advance().unwrap();
    wizard.set_quantity("office", 1).unwrap();
    style_entries(&mut wizard, "office", "Scandinavian", "Under $500");
    advance_to_review(&mut wizard);

    let submission = wizard.submit().unwrap();
    assert!(wizard.is_submitted());

    // The dispatcher did run, and its failure changed nothing durable.
    let notified = receiver
        .recv_timeout(Duration::from_secs(5))
        .expect("dispatcher invoked");
    assert_eq!(notified, submission.reference);
    let booked = decora_core::BookingService::new(store).list().unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].reference, submission.reference);
}

/// Store that accepts everything except writes to the booking log.
struct QuotaStore {
    inner: MemoryStore,
}

impl KeyValueStore for QuotaStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key == keys::SERVICE_REQUESTS {
            return Err(CoreError::Storage("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

#[test]
fn storage_failure_aborts_the_submission() {
    let store: Arc<dyn KeyValueStore> = Arc::new(QuotaStore {
        inner: MemoryStore::new(),
    });
    let mut wizard = wizard_with(
        ServiceKind::VirtualStyling,
        store,
        Arc::new(NullDispatcher),
    );

    wizard.set_contact(contact()).unwrap();
    wizard.advance().unwrap();
    wizard.set_quantity("patio", 1).unwrap();
    style_entries(&mut wizard, "patio", "Coastal", "Under $500");
    advance_to_review(&mut wizard);

    assert!(matches!(wizard.submit(), Err(CoreError::Storage(_))));
    assert!(!wizard.is_submitted());
    // The wizard stays on review so the host can offer a retry.
    assert_eq!(wizard.current_step(), WizardStep::Review);
}

#[test]
fn saved_contact_round_trips_between_bookings() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let mut first = wizard_with(
        ServiceKind::VirtualStyling,
        store.clone(),
        Arc::new(NullDispatcher),
    );
    let mut opted_in = contact();
    opted_in.save_info = true;
    first.set_contact(opted_in).unwrap();
    first.advance().unwrap();
    first.set_quantity("bedroom", 1).unwrap();
    style_entries(&mut first, "bedroom", "Boho", "Under $500");
    advance_to_review(&mut first);
    first.submit().unwrap();

    // A later wizard starts pre-filled, with the opt-in still on.
    let second = wizard_with(
        ServiceKind::ShoppingStyling,
        store.clone(),
        Arc::new(NullDispatcher),
    );
    assert_eq!(second.contact().full_name, "Ana Rivera");
    assert!(second.contact().save_info);

    // Submitting with the opt-in off forgets the card.
    let mut third = wizard_with(
        ServiceKind::VirtualStyling,
        store.clone(),
        Arc::new(NullDispatcher),
    );
    let mut opted_out = contact();
    opted_out.save_info = false;
    third.set_contact(opted_out).unwrap();
    third.advance().unwrap();
    third.set_quantity("office", 1).unwrap();
    style_entries(&mut third, "office", "Modern", "Under $500");
    advance_to_review(&mut third);
    third.submit().unwrap();

    assert_eq!(store.get(keys::SAVED_CONTACT).unwrap(), None);
}

#[test]
fn references_are_prefixed_per_service() {
    let clock = Arc::new(FixedClock::at_millis(1_724_563_412_345));
    let pattern = Regex::new(r"^(VS|SS|DI)-\d{6}$").unwrap();

    for (kind, prefix) in [
        (ServiceKind::VirtualStyling, "VS"),
        (ServiceKind::ShoppingStyling, "SS"),
        (ServiceKind::DecoratingInstallation, "DI"),
    ] {
        let mut wizard = BookingWizard::new(
            Catalog::built_in(),
            kind,
            Arc::new(MemoryStore::new()),
            Arc::new(NullDispatcher),
            clock.clone(),
        )
        .unwrap();

        wizard.set_contact(contact()).unwrap();
        wizard.advance().unwrap();
        if wizard.current_step() == WizardStep::Areas {
            wizard.set_quantity("kitchen", 1).unwrap();
            wizard.advance().unwrap();
        } else {
            wizard.set_quantity("kitchen", 1).unwrap();
        }
        style_entries(&mut wizard, "kitchen", "Modern", "Under $500");
        if kind == ServiceKind::DecoratingInstallation {
            wizard
                .set_details(ServiceDetails::Installation {
                    install_days: 1,
                    desired_date: None,
                    delivery: DeliveryOption::DeliverToHome,
                    purchase: PurchaseMethod::FullBudget,
                    visit: VisitPreference::InPerson {
                        date: NaiveDate::from_ymd_opt(2025, 5, 1),
                        time: NaiveTime::from_hms_opt(9, 30, 0),
                        note: String::new(),
                    },
                })
                .unwrap();
        }
        advance_to_review(&mut wizard);

        let submission = wizard.submit().unwrap();
        assert!(pattern.is_match(&submission.reference));
        assert!(submission.reference.starts_with(prefix));
        assert_eq!(submission.reference, format!("{prefix}-412345"));
    }
}

#[test]
fn back_from_the_first_step_reports_a_cancel() {
    let mut wizard = wizard_with(
        ServiceKind::ShoppingStyling,
        Arc::new(MemoryStore::new()),
        Arc::new(NullDispatcher),
    );
    assert_eq!(wizard.retreat(), StepBack::Cancelled);
}
