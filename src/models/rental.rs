//! Rental agreement model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{PaymentPlan, RentalStatus};

/// Rental agreement record.
///
/// `asset_name` is a snapshot taken when the agreement was signed and is not
/// kept in sync with the asset. `total` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[validate(length(min = 1, message = "Rental id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Renter name is required"))]
    pub renter_name: String,
    pub renter_email: String,
    pub renter_phone: String,
    #[validate(length(min = 1, message = "Asset reference is required"))]
    pub asset_id: String,
    pub asset_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0, message = "Base rate cannot be negative"))]
    pub base_rate: i64,
    #[validate(range(min = 0, message = "Admin fee cannot be negative"))]
    pub admin_fee: i64,
    pub total: i64,
    #[validate(range(min = 0, message = "Paid amount cannot be negative"))]
    pub paid: i64,
    pub status: RentalStatus,
    pub payment_plan: PaymentPlan,
}

/// Rental agreement creation request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRental {
    #[validate(length(min = 1, message = "Renter name is required"))]
    pub renter_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub renter_email: String,
    #[serde(default)]
    pub renter_phone: String,
    #[validate(length(min = 1, message = "An asset must be selected"))]
    pub asset_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0, message = "Base rate cannot be negative"))]
    pub base_rate: Option<i64>,
    pub payment_plan: PaymentPlan,
    /// Upfront amount for a partial plan; ignored for full payment
    #[validate(range(min = 0, message = "Paid amount cannot be negative"))]
    #[serde(default)]
    pub paid_now: i64,
    /// Save as a draft without taking the asset
    #[serde(default)]
    pub draft: bool,
}

/// Partial rental update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRental {
    #[validate(length(min = 1, message = "Renter name cannot be empty"))]
    pub renter_name: Option<String>,
    pub renter_email: Option<String>,
    pub renter_phone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Paid amount cannot be negative"))]
    pub paid: Option<i64>,
    pub status: Option<RentalStatus>,
    pub payment_plan: Option<PaymentPlan>,
}

impl UpdateRental {
    pub fn status(status: RentalStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Rental {
    pub fn apply(&mut self, update: UpdateRental) {
        if let Some(renter_name) = update.renter_name {
            self.renter_name = renter_name;
        }
        if let Some(renter_email) = update.renter_email {
            self.renter_email = renter_email;
        }
        if let Some(renter_phone) = update.renter_phone {
            self.renter_phone = renter_phone;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(paid) = update.paid {
            self.paid = paid;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(payment_plan) = update.payment_plan {
            self.payment_plan = payment_plan;
        }
    }

    /// Amount still owed
    pub fn balance(&self) -> i64 {
        self.total - self.paid
    }
}

/// Billable days between two dates, never less than one
pub fn billable_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days();
    if days <= 0 {
        1
    } else {
        days
    }
}

/// Rental with its read-time status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalView<'a> {
    #[serde(flatten)]
    pub rental: &'a Rental,
    pub display_status: RentalStatus,
}
