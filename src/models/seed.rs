//! Seed dataset used when a collection has never been stored

use chrono::NaiveDate;

use super::{
    asset::{Asset, DEFAULT_ASSET_IMAGE},
    enums::*,
    incident::Incident,
    notification::Notification,
    rental::Rental,
    user::{User, DEFAULT_AVATAR},
};

pub fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "V-10294".to_string(),
            name: "Volvo FH16".to_string(),
            asset_type: AssetType::Vehicle,
            status: AssetStatus::Available,
            location: "Berlin Depot".to_string(),
            img: DEFAULT_ASSET_IMAGE.to_string(),
            serial: "VOL-FH-991".to_string(),
            vin: Some("4V1NC234567890".to_string()),
            health: 92,
            custodian: Some("Logistics Pro AG".to_string()),
            description: None,
        },
        Asset {
            id: "E-7721".to_string(),
            name: "CAT 320D Excavator".to_string(),
            asset_type: AssetType::Equipment,
            status: AssetStatus::OnLease,
            location: "Munich Site A".to_string(),
            img: "https://images.unsplash.com/photo-1579338559194-a162d19bf842?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            serial: "CAT-320-X".to_string(),
            vin: None,
            health: 88,
            custodian: Some("Constructo Inc.".to_string()),
            description: None,
        },
        Asset {
            id: "F-4412".to_string(),
            name: "Toyota 5t Forklift".to_string(),
            asset_type: AssetType::Equipment,
            status: AssetStatus::Maintenance,
            location: "Hamburg Warehouse".to_string(),
            img: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            serial: "TOY-5T-001".to_string(),
            vin: None,
            health: 65,
            custodian: None,
            description: None,
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Sarah Connor".to_string(),
            email: "sarah.c@assetum.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            last_login: "Oct 24, 2023".to_string(),
            ip: "192.168.1.1".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        },
        User {
            id: "2".to_string(),
            name: "Marcus Wright".to_string(),
            email: "m.wright@assetum.com".to_string(),
            role: UserRole::Staff,
            status: UserStatus::Active,
            last_login: "Oct 23, 2023".to_string(),
            ip: "104.22.4.12".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        },
    ]
}

pub fn rentals() -> Vec<Rental> {
    vec![Rental {
        id: "RA-2201".to_string(),
        renter_name: "Constructo Inc.".to_string(),
        renter_email: "billing@constructo.io".to_string(),
        renter_phone: "+49 123 456".to_string(),
        asset_id: "E-7721".to_string(),
        asset_name: "CAT 320D Excavator".to_string(),
        start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2023, 10, 14).unwrap_or_default(),
        base_rate: 450000,
        admin_fee: 5000,
        total: 6305000,
        paid: 6305000,
        status: RentalStatus::Active,
        payment_plan: PaymentPlan::Full,
    }]
}

pub fn incidents() -> Vec<Incident> {
    vec![Incident {
        id: "CON-7782".to_string(),
        asset_id: "E-7721".to_string(),
        asset_name: "CAT 320D Excavator".to_string(),
        severity: Severity::Critical,
        status: IncidentStatus::NeedsReview,
        date_reported: "Oct 24, 2023".to_string(),
        description: "Heavy hydraulic leakage discovered after site shift.".to_string(),
        initial_estimate: 125000,
        parts_cost: 0,
        labor_cost: 0,
        admin_fee: 2500,
        total_cost: 127500,
        client: "Constructo Inc.".to_string(),
        images: Vec::new(),
        findings: None,
    }]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "Overdue Rental".to_string(),
            message: "Excavator CAT 320D is past return date.".to_string(),
            time: "10m ago".to_string(),
            urgent: true,
            category: NotificationCategory::Lease,
            link: "/rentals/RA-2201".to_string(),
            read: false,
        },
        Notification {
            id: 2,
            title: "New Incident".to_string(),
            message: "V-10294 reported minor damage.".to_string(),
            time: "1h ago".to_string(),
            urgent: false,
            category: NotificationCategory::Incident,
            link: "/incidents/CON-7782".to_string(),
            read: false,
        },
    ]
}
