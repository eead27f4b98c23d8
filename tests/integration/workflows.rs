//! Rental and damage workflows across the services

use assetum::{
    models::{
        Assessment, AssetStatus, CreateRental, IncidentStatus, NotificationFilter, PaymentPlan,
        RentalStatus, ReportDamage, Severity,
    },
    AppError,
};
use chrono::NaiveDate;

use crate::open_services;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn assessment(parts_cost: i64, labor_cost: i64) -> Assessment {
    Assessment {
        parts_cost,
        labor_cost,
        admin_fee: 5000,
        findings: "Boom cylinder scored".to_string(),
    }
}

#[test]
fn test_assessment_within_threshold_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());
    let decision = services
        .incidents
        .assess(&mut services.state, "CON-7782", assessment(200000, 40000))
        .unwrap();
    assert_eq!(decision.total, 245000);
    assert_eq!(decision.status, IncidentStatus::Approved);
    drop(services);

    let services = open_services(dir.path());
    let incident = services.state.find_incident("CON-7782").unwrap();
    assert_eq!(incident.status, IncidentStatus::Approved);
    assert_eq!(incident.total_cost, 245000);
    assert_eq!(
        services.state.find_asset("E-7721").unwrap().status,
        AssetStatus::Maintenance
    );
}

#[test]
fn test_assessment_above_threshold_leaves_asset() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());
    let decision = services
        .incidents
        .assess(&mut services.state, "CON-7782", assessment(220000, 40000))
        .unwrap();
    assert_eq!(decision.total, 265000);
    assert!(decision.requires_escalation);
    drop(services);

    let services = open_services(dir.path());
    assert_eq!(
        services.state.find_incident("CON-7782").unwrap().status,
        IncidentStatus::PendingApproval
    );
    assert_eq!(
        services.state.find_asset("E-7721").unwrap().status,
        AssetStatus::OnLease
    );
}

#[test]
fn test_rental_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());

    let rental = services
        .rentals
        .create_agreement(
            &mut services.state,
            CreateRental {
                renter_name: "Nordbau GmbH".to_string(),
                renter_email: "dispatch@nordbau.de".to_string(),
                renter_phone: "+49 40 5555".to_string(),
                asset_id: "V-10294".to_string(),
                start_date: date("2023-11-01"),
                end_date: date("2023-11-10"),
                base_rate: None,
                payment_plan: PaymentPlan::Partial,
                paid_now: 50000,
                draft: false,
            },
        )
        .unwrap();
    assert_eq!(rental.total, 45000 * 9 + 5000);

    let overview = services
        .rentals
        .overview(&services.state, date("2023-11-20"), Some(RentalStatus::Overdue), "");
    assert_eq!(overview.rentals.len(), 2);
    assert_eq!(overview.metrics.overdue_count, 2);

    services.rentals.complete(&mut services.state, &rental.id).unwrap();
    drop(services);

    let services = open_services(dir.path());
    let stored = services.state.find_rental(&rental.id).unwrap();
    assert_eq!(stored.status, RentalStatus::Completed);
    assert_eq!(stored.paid, stored.total);
    assert_eq!(
        services.state.find_asset("V-10294").unwrap().status,
        AssetStatus::Available
    );
    let metrics = services.state.rental_metrics(date("2023-11-20"));
    assert_eq!(metrics.realized_revenue, stored.total);
}

#[test]
fn test_damage_report_to_repair() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());
    let incident = services
        .incidents
        .report_damage(
            &mut services.state,
            ReportDamage {
                asset_id: "F-4412".to_string(),
                severity: Severity::Major,
                description: "Mast chain worn".to_string(),
                initial_estimate: 80000,
                images: Vec::new(),
            },
            date("2023-11-02"),
        )
        .unwrap();
    assert_eq!(
        services.state.find_asset("F-4412").unwrap().status,
        AssetStatus::NeedsReview
    );

    let suggestion = services.incidents.suggested_assessment(&incident);
    assert_eq!((suggestion.parts_cost, suggestion.labor_cost), (48000, 32000));
    services
        .incidents
        .assess(&mut services.state, &incident.id, suggestion)
        .unwrap();
    services
        .incidents
        .mark_fixed(&mut services.state, &incident.id)
        .unwrap();

    assert_eq!(
        services.state.find_asset("F-4412").unwrap().status,
        AssetStatus::Available
    );
    assert_eq!(services.incidents.open_count(&services.state), 1);
}

#[test]
fn test_deleted_asset_leaves_dangling_references() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());
    services.assets.remove(&mut services.state, "E-7721").unwrap();

    let rental = services.state.find_rental("RA-2201").unwrap();
    assert!(services.state.rental_asset(rental).is_none());
    assert_eq!(rental.asset_name, "CAT 320D Excavator");
    assert!(matches!(
        services.assets.remove(&mut services.state, "E-7721"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_notifications_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut services = open_services(dir.path());
    assert_eq!(services.notifications.mark_all_read(&mut services.state), 2);
    drop(services);

    let services = open_services(dir.path());
    assert!(services
        .notifications
        .list(&services.state, NotificationFilter::Unread)
        .is_empty());
    let summary = services
        .stats
        .fleet_summary(&services.state, date("2023-10-05"));
    assert_eq!(summary.unread_notifications, 0);
    assert_eq!(summary.rentals.active_count, 1);
    assert_eq!(summary.rentals.overdue_count, 0);
}
