use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Booking lifecycle states. Transition legality lives in
/// `salon_core::state_machine`, not here — this is the static vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Reserved,
    PendingPayment,
    Confirmed,
    Paid,
    Cancelled,
    Done,
    NoShow,
    Expired,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
            Self::Done => "done",
            Self::NoShow => "no_show",
            Self::Expired => "expired",
        }
    }

    /// Terminal statuses never transition out.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Done | Self::NoShow | Self::Expired)
    }

    /// Holds a slot and blocks conflicting bookings.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Reserved | Self::PendingPayment | Self::Confirmed | Self::Paid)
    }

    /// Has a live cash/payment hold that must expire.
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Reserved | Self::PendingPayment)
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved" => Ok(Self::Reserved),
            "pending_payment" => Ok(Self::PendingPayment),
            "confirmed" => Ok(Self::Confirmed),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            "done" => Ok(Self::Done),
            "no_show" => Ok(Self::NoShow),
            "expired" => Ok(Self::Expired),
            _ => Err(()),
        }
    }
}

/// How a client intends to settle a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "cash" => Ok(Self::Cash),
            _ => Err(()),
        }
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

/// Booking-list façade filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingListMode {
    #[default]
    Upcoming,
    Completed,
    Cancelled,
    NoShow,
    All,
}

impl FromStr for BookingListMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            "all" => Ok(Self::All),
            _ => Err(()),
        }
    }
}

/// Notification event kinds fanned out by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    Reserved,
    Confirmed,
    Paid,
    CashConfirmed,
    Cancelled,
    RescheduledByClient,
    RescheduledByMaster,
    NoShow,
    Reminder,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::CashConfirmed => "cash_confirmed",
            Self::Cancelled => "cancelled",
            Self::RescheduledByClient => "rescheduled_by_client",
            Self::RescheduledByMaster => "rescheduled_by_master",
            Self::NoShow => "no_show",
            Self::Reminder => "reminder",
        }
    }
}

/// Resolved caller role. Distinct from the `User.is_admin`
/// flag or `Masters` table presence, which are the raw facts it is
/// derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Client,
    Master,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Done.is_terminal());
        assert!(BookingStatus::NoShow.is_terminal());
        assert!(BookingStatus::Expired.is_terminal());
        assert!(!BookingStatus::Reserved.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn active_statuses_block_slots() {
        assert!(BookingStatus::Reserved.is_active());
        assert!(BookingStatus::PendingPayment.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::Paid.is_active());
        assert!(!BookingStatus::Done.is_active());
    }

    #[test]
    fn roundtrip_from_str() {
        assert_eq!(BookingStatus::from_str("pending_payment"), Ok(BookingStatus::PendingPayment));
        assert_eq!(PaymentMethod::from_str("online"), Ok(PaymentMethod::Online));
        assert_eq!(BookingListMode::from_str("no_show"), Ok(BookingListMode::NoShow));
    }
}
