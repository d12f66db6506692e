//! Row types of the marketplace tables.
//!
//! Each struct mirrors one table's `select *` shape. Nullable columns are
//! `Option`s and default to `None` when the column is omitted.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BookingStatus, ImageType, PetSize, ProviderStatus};
use crate::domain::foundation::{Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
    #[serde(default)]
    pub convenience_fee: Option<f64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub decline_reason: Option<String>,
    #[serde(default)]
    pub payment_proof_url: Option<String>,
    #[serde(default)]
    pub payment_verified: Option<bool>,
    pub pet_id: Uuid,
    pub pet_owner_id: UserId,
    pub service_id: Uuid,
    pub service_provider_id: Uuid,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub status: BookingStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAddon {
    pub id: Uuid,
    pub addon_id: Uuid,
    pub booking_id: Uuid,
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// Post-booking rating, one per booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub pet_owner_id: UserId,
    pub service_provider_id: Uuid,
    pub cleanliness_rating: i16,
    pub pet_care_rating: i16,
    pub punctuality_rating: i16,
    pub service_quality_rating: i16,
    pub value_rating: i16,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Feedback {
    /// Mean of the five rating categories.
    pub fn average_rating(&self) -> f64 {
        let total = self.cleanliness_rating
            + self.pet_care_rating
            + self.punctuality_rating
            + self.service_quality_rating
            + self.value_rating;
        f64::from(total) / 5.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub read: Option<bool>,
    #[serde(default)]
    pub related_booking_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        !self.read.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: UserId,
    pub name: String,
    pub breed: String,
    pub size: PetSize,
    pub weight: f64,
    pub date_of_birth: NaiveDate,
    pub behavior_notes: String,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub emergency_consent: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAddon {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub addon_name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Opening hours for one weekday (`day_of_week` 0 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHours {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub day_of_week: i16,
    #[serde(default)]
    pub is_closed: Option<bool>,
    #[serde(default)]
    pub open_time: Option<NaiveTime>,
    #[serde(default)]
    pub close_time: Option<NaiveTime>,
}

impl ProviderHours {
    /// True when `time` falls inside the opening window of an open day.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.is_closed.unwrap_or(false) {
            return false;
        }
        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) => open <= time && time < close,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderImage {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub image_type: ImageType,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderService {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub service_name: String,
    pub service_type: String,
    pub base_price: f64,
    pub duration_minutes: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStaff {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub full_name: String,
    pub years_experience: i32,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Business registered by a profile with the `service_provider` role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub user_id: UserId,
    pub business_name: String,
    pub description: String,
    pub address: String,
    pub status: ProviderStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}
