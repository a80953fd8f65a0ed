use decora_catalog::SurchargeSchedule;
use decora_domain::{entry_label, ServiceDetails, TimelineChoice};

use super::selection::SelectionState;

/// One line of the running quote shown beside the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    pub label: String,
    pub amount: f64,
}

/// Itemized price breakdown. Recomputed from scratch on every call; the
/// wizard keeps no cached totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<PriceLine>,
    pub subtotal: f64,
    pub deposit: f64,
}

/// Sum of per-space area prices plus whatever surcharges the service
/// details switch on.
pub fn subtotal(
    selection: &SelectionState,
    schedule: &SurchargeSchedule,
    details: &ServiceDetails,
) -> f64 {
    let base: f64 = selection
        .selected()
        .map(|area| area.area.base_price * area.quantity() as f64)
        .sum();
    base + surcharge_total(schedule, details)
}

/// Half the subtotal, rounded to the nearest dollar (halves round away
/// from zero).
pub fn deposit(subtotal: f64) -> f64 {
    (subtotal * 0.5).round().max(0.0)
}

pub fn quote(
    selection: &SelectionState,
    schedule: &SurchargeSchedule,
    details: &ServiceDetails,
) -> Quote {
    let mut lines = Vec::new();
    for area in selection.selected() {
        let count = area.quantity();
        for (index, entry) in area.entries.iter().enumerate() {
            lines.push(PriceLine {
                label: entry_label(&area.area.label, count, entry, index),
                amount: area.area.base_price,
            });
        }
    }
    lines.extend(surcharge_lines(schedule, details));

    let subtotal = lines.iter().map(|line| line.amount).sum();
    Quote {
        lines,
        subtotal,
        deposit: deposit(subtotal),
    }
}

fn surcharge_total(schedule: &SurchargeSchedule, details: &ServiceDetails) -> f64 {
    surcharge_lines(schedule, details)
        .iter()
        .map(|line| line.amount)
        .sum()
}

fn surcharge_lines(schedule: &SurchargeSchedule, details: &ServiceDetails) -> Vec<PriceLine> {
    let mut lines = Vec::new();
    match details {
        ServiceDetails::Styling { timeline, .. } => {
            if *timeline == TimelineChoice::Rush && schedule.rush_fee > 0.0 {
                lines.push(PriceLine {
                    label: "Rush turnaround".into(),
                    amount: schedule.rush_fee,
                });
            }
        }
        ServiceDetails::Shopping {
            measurement_visit, ..
        } => {
            if *measurement_visit && schedule.measurement_visit_fee > 0.0 {
                lines.push(PriceLine {
                    label: "Measurement visit".into(),
                    amount: schedule.measurement_visit_fee,
                });
            }
        }
        ServiceDetails::Installation {
            install_days,
            visit,
            ..
        } => {
            if *install_days > 0 && schedule.install_day_rate > 0.0 {
                lines.push(PriceLine {
                    label: format!("Installation ({} day(s))", install_days),
                    amount: schedule.install_day_rate * *install_days as f64,
                });
            }
            if visit.is_in_person() && schedule.site_visit_fee > 0.0 {
                lines.push(PriceLine {
                    label: "In-person site visit".into(),
                    amount: schedule.site_visit_fee,
                });
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use decora_catalog::Catalog;
    use decora_domain::{
        DeliveryOption, PurchaseMethod, ServiceKind, VisitPreference,
    };

    fn schedule_for(kind: ServiceKind) -> SurchargeSchedule {
        Catalog::built_in()
            .profile(kind)
            .map(|profile| profile.surcharges)
            .unwrap_or_default()
    }

    fn selection_with(entries: &[(&str, i64)]) -> SelectionState {
        let mut state = SelectionState::new(&Catalog::built_in().areas);
        for (area, quantity) in entries {
            state.set_quantity(area, *quantity).unwrap();
        }
        state
    }

    #[test]
    fn two_kitchens_cost_double_the_base() {
        let state = selection_with(&[("kitchen", 2)]);
        let details = ServiceDetails::default_for(ServiceKind::VirtualStyling);
        let schedule = schedule_for(ServiceKind::VirtualStyling);

        let first = subtotal(&state, &schedule, &details);
        assert_eq!(first, 440.0);
        assert_eq!(subtotal(&state, &schedule, &details), first);
        assert_eq!(deposit(first), 220.0);
    }

    #[test]
    fn installation_adds_day_rate_and_visit_fee() {
        // bathroom 180 + 2 install days at 250 + in-person visit 75 = 755
        let state = selection_with(&[("bathroom", 1)]);
        let details = ServiceDetails::Installation {
            install_days: 2,
            desired_date: None,
            delivery: DeliveryOption::DeliverToHome,
            purchase: PurchaseMethod::FullBudget,
            visit: VisitPreference::default(),
        };
        let schedule = schedule_for(ServiceKind::DecoratingInstallation);

        let subtotal = subtotal(&state, &schedule, &details);
        assert_eq!(subtotal, 755.0);
        assert_eq!(deposit(subtotal), 378.0);
    }

    #[test]
    fn declining_the_visit_drops_its_fee() {
        let state = selection_with(&[("bathroom", 1)]);
        let schedule = schedule_for(ServiceKind::DecoratingInstallation);
        let details = ServiceDetails::Installation {
            install_days: 2,
            desired_date: None,
            delivery: DeliveryOption::DeliverToHome,
            purchase: PurchaseMethod::FullBudget,
            visit: VisitPreference::Remote {
                note: String::new(),
            },
        };

        assert_eq!(subtotal(&state, &schedule, &details), 680.0);
    }

    #[test]
    fn rush_is_free_until_the_catalog_prices_it() {
        let state = selection_with(&[("kitchen", 1)]);
        let details = ServiceDetails::Styling {
            timeline: TimelineChoice::Rush,
            kickoff_date: None,
            kickoff_time: None,
        };

        let free = schedule_for(ServiceKind::VirtualStyling);
        assert_eq!(subtotal(&state, &free, &details), 220.0);

        let priced = SurchargeSchedule {
            rush_fee: 80.0,
            ..free
        };
        assert_eq!(subtotal(&state, &priced, &details), 300.0);
    }

    #[test]
    fn measurement_visit_fee_applies_only_when_requested() {
        let state = selection_with(&[("kitchen", 1)]);
        let schedule = schedule_for(ServiceKind::ShoppingStyling);

        let without = ServiceDetails::Shopping {
            mode: Default::default(),
            measurement_visit: false,
        };
        assert_eq!(subtotal(&state, &schedule, &without), 220.0);

        let with = ServiceDetails::Shopping {
            mode: Default::default(),
            measurement_visit: true,
        };
        assert_eq!(subtotal(&state, &schedule, &with), 295.0);
    }

    #[test]
    fn quote_lines_use_resolved_entry_labels() {
        let mut state = selection_with(&[("bedroom", 2)]);
        let entry_id = state.selection("bedroom").unwrap().entries[0].id;
        state
            .update_entry(
                "bedroom",
                entry_id,
                &decora_domain::EntryUpdate {
                    nickname: Some("Guest room".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let details = ServiceDetails::default_for(ServiceKind::VirtualStyling);
        let quote = quote(
            &state,
            &schedule_for(ServiceKind::VirtualStyling),
            &details,
        );
        let labels: Vec<&str> = quote.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Guest room", "Bedroom 2"]);
        assert_eq!(quote.subtotal, 400.0);
        assert_eq!(quote.deposit, 200.0);
    }

    #[test]
    fn deposit_rounds_half_away_from_zero() {
        assert_eq!(deposit(755.0), 378.0);
        assert_eq!(deposit(225.0), 113.0);
        assert_eq!(deposit(0.0), 0.0);
    }
}
