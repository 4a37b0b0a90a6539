pub mod api;
pub mod enums;
pub mod errors;
pub mod money;
pub mod settings;
pub mod validation;

pub use enums::{BookingListMode, BookingStatus, NotificationEvent, PaymentMethod, Role};
pub use errors::{AppError, Result};
pub use settings::SettingValue;
