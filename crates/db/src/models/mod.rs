pub mod booking;
pub mod master;
pub mod schedule;
pub mod service;
pub mod setting;
pub mod user;

pub use booking::{Booking, BookingItem, BookingRating, BookingStatusHistoryRow, MasterClientNote};
pub use master::{Master, MasterService};
pub use schedule::{MasterScheduleExceptionRow, MasterScheduleRow, Window};
pub use service::Service;
pub use setting::SettingRow;
pub use user::User;
