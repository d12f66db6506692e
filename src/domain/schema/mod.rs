//! Typed mirror of the hosted backend's `public` schema.
//!
//! `profiles` and `user_sessions` live with the code that uses them
//! (`domain::profile`, `domain::session_log`); the remaining marketplace
//! tables are described here. Types only: booking transitions, payment
//! verification and row-level security are enforced by the backend.

mod enums;
mod rows;

use std::fmt;

pub use enums::{BookingStatus, ImageType, PetSize, ProviderStatus};
pub use rows::{
    Booking, BookingAddon, Feedback, Notification, Pet, ProviderAddon, ProviderHours,
    ProviderImage, ProviderService, ProviderStaff, ServiceProvider,
};

/// Every table in the backend's `public` schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    BookingAddons,
    Bookings,
    Feedback,
    Notifications,
    Pets,
    Profiles,
    ProviderAddons,
    ProviderHours,
    ProviderImages,
    ProviderServices,
    ProviderStaff,
    ServiceProviders,
    UserSessions,
}

impl Table {
    pub const ALL: [Table; 13] = [
        Table::BookingAddons,
        Table::Bookings,
        Table::Feedback,
        Table::Notifications,
        Table::Pets,
        Table::Profiles,
        Table::ProviderAddons,
        Table::ProviderHours,
        Table::ProviderImages,
        Table::ProviderServices,
        Table::ProviderStaff,
        Table::ServiceProviders,
        Table::UserSessions,
    ];

    /// Table name as used in REST paths.
    pub fn name(&self) -> &'static str {
        match self {
            Table::BookingAddons => "booking_addons",
            Table::Bookings => "bookings",
            Table::Feedback => "feedback",
            Table::Notifications => "notifications",
            Table::Pets => "pets",
            Table::Profiles => "profiles",
            Table::ProviderAddons => "provider_addons",
            Table::ProviderHours => "provider_hours",
            Table::ProviderImages => "provider_images",
            Table::ProviderServices => "provider_services",
            Table::ProviderStaff => "provider_staff",
            Table::ServiceProviders => "service_providers",
            Table::UserSessions => "user_sessions",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
