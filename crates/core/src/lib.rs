//! The booking lifecycle engine: every module here is a pure
//! decision function or a thin wrapper around `salon_db`, wired together by
//! [`orchestrator::Orchestrator`] — the only type `salon-api` and
//! `salon-jobs` talk to for anything business-logic-shaped.

pub mod auth;
pub mod availability;
pub mod config;
pub mod notify;
pub mod orchestrator;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod settings;
pub mod slots;
pub mod state_machine;
pub mod time;

pub use auth::Caller;
pub use config::CoreConfig;
pub use notify::{NotifyError, Notifier};
pub use orchestrator::Orchestrator;
pub use payment::{Invoice, PaymentCollaborator, PaymentError};
pub use settings::{SharedStore, Store};
