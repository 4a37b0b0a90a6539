pub mod bookings;
pub mod masters;
pub mod notes;
pub mod ratings;
pub mod schedules;
pub mod services;
pub mod settings;
pub mod users;
