//! The lifecycle orchestrator: every public booking
//! operation lives here, wiring the pure decision modules (schedule,
//! slots, availability, pricing, state machine) to the repository,
//! notifier, and payment collaborator. Nothing in `salon-api` contains
//! business logic beyond extracting a request and calling one of these
//! methods.

use crate::auth::Caller;
use crate::config::CoreConfig;
use crate::notify::{self, Notifier};
use crate::payment::PaymentCollaborator;
use crate::settings::SharedStore;
use crate::{availability, pricing, state_machine, time};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use salon_db::queries::{bookings, masters, notes, ratings, schedules, services};
use salon_db::retry::retry_once_transient;
use salon_types::api::{
    AggregateResponse, BookingItemResponse, BookingResponse, CreateInvoiceResponse, MasterResponse,
    PaginatedBookings, PriceQuoteResponse, ServiceResponse,
};
use salon_types::errors::codes;
use salon_types::settings::keys;
use salon_types::{AppError, BookingListMode, BookingStatus, NotificationEvent, PaymentMethod, Result as AppResult};
use sqlx::PgPool;
use std::sync::Arc;

pub struct Orchestrator {
    pool: PgPool,
    settings: SharedStore,
    config: CoreConfig,
    notifier: Arc<dyn Notifier>,
    payment: Arc<dyn PaymentCollaborator>,
}

impl Orchestrator {
    pub fn new(
        pool: PgPool,
        settings: SharedStore,
        config: CoreConfig,
        notifier: Arc<dyn Notifier>,
        payment: Arc<dyn PaymentCollaborator>,
    ) -> Self {
        Self { pool, settings, config, notifier, payment }
    }

    async fn get_int(&self, key: (&str, i64)) -> i64 {
        self.settings.get_int(key.0, key.1).await
    }

    async fn get_bool(&self, key: (&str, bool)) -> bool {
        self.settings.get_bool(key.0, key.1).await
    }

    // ---- Catalog -------------------------------------------------------

    pub async fn list_services(&self) -> AppResult<Vec<ServiceResponse>> {
        let rows = services::list_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|s| ServiceResponse {
                id: s.id,
                name: s.name,
                category: s.category,
                description: s.description,
                duration_minutes: s.duration_minutes,
                price_cents: s.price_cents,
            })
            .collect())
    }

    pub async fn list_masters_for_services(&self, service_ids: &[String]) -> AppResult<Vec<MasterResponse>> {
        let rows = masters::list_offering_all(&self.pool, service_ids).await?;
        Ok(rows
            .into_iter()
            .map(|m| MasterResponse { id: m.id, display_name: m.display_name, bio: m.bio, is_active: m.is_active })
            .collect())
    }

    // ---- Pricing ---------------------------------------------------------

    async fn load_services_and_overrides(
        &self,
        service_ids: &[String],
        master_id: Option<i64>,
    ) -> AppResult<(Vec<salon_db::models::Service>, Vec<salon_db::models::MasterService>)> {
        if service_ids.is_empty() {
            return Err(AppError::BadRequest(codes::SERVICE_REQUIRED.to_string()));
        }
        let found = services::find_many(&self.pool, service_ids).await?;
        if found.len() != service_ids.len() {
            return Err(AppError::NotFound("one or more services".to_string()));
        }
        let overrides = match master_id {
            Some(id) => masters::list_services_for_master(&self.pool, id).await?,
            None => Vec::new(),
        };
        Ok((found, overrides))
    }

    pub async fn aggregate(&self, service_ids: &[String], master_id: Option<i64>) -> AppResult<AggregateResponse> {
        let (svc, overrides) = self.load_services_and_overrides(service_ids, master_id).await?;
        let fallback = self.get_int(keys::SLOT_DURATION_MINUTES).await as i32;
        Ok(pricing::aggregate(&svc, &overrides, fallback, &self.config.default_currency))
    }

    pub async fn price_quote(
        &self,
        service_ids: &[String],
        payment_method: PaymentMethod,
        master_id: Option<i64>,
    ) -> AppResult<PriceQuoteResponse> {
        let (svc, overrides) = self.load_services_and_overrides(service_ids, master_id).await?;
        let fallback = self.get_int(keys::SLOT_DURATION_MINUTES).await as i32;
        let discount_percent = self.get_int(keys::ONLINE_PAYMENT_DISCOUNT_PERCENT).await;
        Ok(pricing::quote(
            &svc,
            &overrides,
            fallback,
            &self.config.default_currency,
            payment_method,
            discount_percent,
        ))
    }

    // ---- Availability ------------------------------------------------------

    /// Synthesizes a generic business-day schedule: masters without any
    /// configured `WeeklySchedule` still report a fallback window instead
    /// of "closed every day".
    async fn fallback_weekly_rows(&self, master_id: i64) -> Vec<salon_db::models::MasterScheduleRow> {
        let start_hour = self.get_int(keys::DEFAULT_DAY_START_HOUR).await as u32;
        let end_hour = self.get_int(keys::DEFAULT_DAY_END_HOUR).await as u32;
        let start_time = chrono::NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap_or(chrono::NaiveTime::MIN);
        let end_time = chrono::NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap_or(chrono::NaiveTime::MIN);
        (0..7)
            .map(|weekday| salon_db::models::MasterScheduleRow { master_id, weekday, start_time, end_time })
            .collect()
    }

    pub async fn available_days(
        &self,
        master_id: i64,
        year: i32,
        month: u32,
        service_ids: &[String],
    ) -> AppResult<Vec<u32>> {
        let agg = self.aggregate(service_ids, Some(master_id)).await?;
        let hold_minutes = self.get_int(keys::RESERVATION_HOLD_MINUTES).await;
        let same_day_lead = self.get_int(keys::SAME_DAY_LEAD_MINUTES).await;
        let tz = self.config.business_timezone;
        let now = Utc::now();

        let mut weekly = schedules::all_weekly_windows(&self.pool, master_id).await?;
        if weekly.is_empty() {
            weekly = self.fallback_weekly_rows(master_id).await;
        }
        let month_start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| AppError::BadRequest("invalid month".into()))?;
        let next_month_start =
            if month == 12 { NaiveDate::from_ymd_opt(year + 1, 1, 1) } else { NaiveDate::from_ymd_opt(year, month + 1, 1) }
                .expect("valid next month");
        let exceptions = schedules::exceptions_in_range(&self.pool, master_id, month_start, next_month_start).await?;

        let from_utc = time::local_midnight_to_utc(month_start, tz);
        let to_utc = time::local_midnight_to_utc(next_month_start, tz);
        let month_bookings = bookings::list_for_range(&self.pool, master_id, from_utc, to_utc).await?;

        Ok(availability::available_days(
            year,
            month,
            &weekly,
            &exceptions,
            &month_bookings,
            agg.total_minutes as i64,
            hold_minutes,
            same_day_lead,
            tz,
            now,
        ))
    }

    pub async fn available_slots(
        &self,
        master_id: i64,
        date: NaiveDate,
        service_ids: &[String],
    ) -> AppResult<Vec<String>> {
        let agg = self.aggregate(service_ids, Some(master_id)).await?;
        let hold_minutes = self.get_int(keys::RESERVATION_HOLD_MINUTES).await;
        let same_day_lead = self.get_int(keys::SAME_DAY_LEAD_MINUTES).await;
        let tz = self.config.business_timezone;
        let now = Utc::now();

        let weekday = time::iso_weekday(date);
        let mut weekly = schedules::weekly_windows(&self.pool, master_id, weekday).await?;
        if weekly.is_empty() && schedules::all_weekly_windows(&self.pool, master_id).await?.is_empty() {
            weekly = self
                .fallback_weekly_rows(master_id)
                .await
                .into_iter()
                .filter(|r| r.weekday == weekday)
                .map(|r| salon_db::models::Window { start: r.start_time, end: r.end_time })
                .collect();
        }
        let exception = schedules::exception_windows(&self.pool, master_id, date).await?;

        let next_date = date.succ_opt().ok_or_else(|| AppError::BadRequest("date out of range".into()))?;
        let from_utc = time::local_midnight_to_utc(date, tz);
        let to_utc = time::local_midnight_to_utc(next_date, tz);
        let day_bookings = bookings::list_for_range(&self.pool, master_id, from_utc, to_utc).await?;

        let instants = availability::available_slots(
            date,
            &weekly,
            exception,
            &day_bookings,
            agg.total_minutes as i64,
            hold_minutes,
            same_day_lead,
            tz,
            now,
        );
        Ok(instants
            .into_iter()
            .map(|instant| instant.with_timezone(&tz).format("%H:%M").to_string())
            .collect())
    }

    // ---- Booking mutations -----------------------------------------------

    fn to_response(
        booking: salon_db::models::Booking,
        items: Vec<salon_db::models::BookingItem>,
        invoice_url: Option<String>,
    ) -> BookingResponse {
        BookingResponse {
            id: booking.id,
            user_id: booking.user_id,
            master_id: booking.master_id,
            status: booking.status,
            starts_at: booking.starts_at,
            ends_at: booking.ends_at,
            original_price_cents: booking.original_price_cents,
            final_price_cents: booking.final_price_cents,
            discount_applied: booking.discount_applied,
            cash_hold_expires_at: booking.cash_hold_expires_at,
            paid_at: booking.paid_at,
            items: items
                .into_iter()
                .map(|i| BookingItemResponse {
                    service_id: i.service_id,
                    position: i.position,
                    price_cents_snapshot: i.price_cents_snapshot,
                })
                .collect(),
            invoice_url,
        }
    }

    async fn load_response(&self, booking_id: i64, invoice_url: Option<String>) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        let items = bookings::list_items(&self.pool, booking_id).await?;
        Ok(Self::to_response(booking, items, invoice_url))
    }

    /// Recipients for a booking event are the client, the assigned master,
    /// and every boot-time admin; [`notify::notify`] deduplicates.
    async fn notify_recipients(&self, event: NotificationEvent, booking_id: i64, user_id: i64, master_id: i64) {
        let recipients = notify::recipients_for_booking(&self.pool, &self.config.admin_external_ids, user_id, master_id).await;
        notify::notify(&self.pool, &self.notifier, event, booking_id, &recipients).await;
    }

    /// Validates and places a hold: the client's service
    /// selection and slot become a RESERVED booking with a live hold
    /// deadline, subject to the exclusion constraint.
    pub async fn hold(
        &self,
        user_id: i64,
        service_ids: &[String],
        starts_at: DateTime<Utc>,
        master_id: i64,
        payment_method: PaymentMethod,
    ) -> AppResult<BookingResponse> {
        if master_id <= 0 {
            return Err(AppError::BadRequest(codes::MASTER_REQUIRED.to_string()));
        }
        if service_ids.is_empty() {
            return Err(AppError::BadRequest(codes::SERVICE_REQUIRED.to_string()));
        }
        if starts_at <= Utc::now() {
            return Err(AppError::Policy(codes::SLOT_IN_PAST.to_string()));
        }
        if payment_method == PaymentMethod::Online && !self.get_bool(keys::ONLINE_PAYMENTS_ENABLED).await {
            return Err(AppError::Policy(codes::ONLINE_PAYMENTS_UNAVAILABLE.to_string()));
        }

        let quote = self.price_quote(service_ids, payment_method, Some(master_id)).await?;
        let ends_at = starts_at + Duration::minutes(quote.duration_minutes as i64);

        if bookings::find_conflicting_booking(&self.pool, master_id, starts_at, ends_at, None)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(codes::SLOT_UNAVAILABLE.to_string()));
        }

        let svc = services::find_many(&self.pool, service_ids).await?;
        let items: Vec<bookings::NewBookingItem> = svc
            .iter()
            .map(|s| bookings::NewBookingItem {
                service_id: s.id.clone(),
                price_cents_snapshot: s.price_cents.unwrap_or(0),
            })
            .collect();

        let discount_applied = if quote.discount_percent_applied > 0 {
            Some(format!("online_{}pct", quote.discount_percent_applied))
        } else {
            None
        };
        let hold_minutes = self.get_int(keys::RESERVATION_HOLD_MINUTES).await;

        let booking = retry_once_transient(|| {
            bookings::create_hold(
                &self.pool,
                user_id,
                master_id,
                &items,
                starts_at,
                ends_at,
                hold_minutes,
                quote.original_price_cents,
                quote.final_price_cents,
                discount_applied.as_deref(),
            )
        })
        .await
        .map_err(|e| translate_repo_error(e, codes::SLOT_UNAVAILABLE))?;

        self.notify_recipients(NotificationEvent::Reserved, booking.id, user_id, master_id).await;

        self.load_response(booking.id, None).await
    }

    /// From RESERVED, transitions to CONFIRMED (cash) or PENDING_PAYMENT
    /// plus an invoice (online).
    pub async fn finalize(&self, booking_id: i64, payment_method: PaymentMethod) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if booking.status != BookingStatus::Reserved {
            return Err(AppError::StateTransition(codes::BOOKING_NOT_ACTIVE.to_string()));
        }

        match payment_method {
            PaymentMethod::Cash => {
                retry_once_transient(|| bookings::confirm_cash(&self.pool, booking_id))
                    .await
                    .map_err(|e| translate_repo_error_with_conflict(e, codes::CONFLICT, codes::BOOKING_NOT_ACTIVE))?;
                self.notify_recipients(NotificationEvent::CashConfirmed, booking_id, booking.user_id, booking.master_id).await;
                self.load_response(booking_id, None).await
            }
            PaymentMethod::Online => {
                if !self.get_bool(keys::ONLINE_PAYMENTS_ENABLED).await {
                    return Err(AppError::Policy(codes::ONLINE_PAYMENTS_UNAVAILABLE.to_string()));
                }
                let invoice_url = self.create_invoice(booking_id).await?.invoice_url;
                retry_once_transient(|| bookings::set_pending_payment(&self.pool, booking_id))
                    .await
                    .map_err(|e| translate_repo_error(e, codes::BOOKING_NOT_ACTIVE))?;
                self.load_response(booking_id, Some(invoice_url)).await
            }
        }
    }

    /// Shorthand: hold then immediately finalize.
    pub async fn create_booking(
        &self,
        user_id: i64,
        service_ids: &[String],
        starts_at: DateTime<Utc>,
        master_id: i64,
        payment_method: PaymentMethod,
    ) -> AppResult<BookingResponse> {
        let held = self.hold(user_id, service_ids, starts_at, master_id, payment_method).await?;
        self.finalize(held.id, payment_method).await
    }

    /// Records a payment provider's confirmation against a booking,
    /// driving RESERVED/PENDING_PAYMENT/CONFIRMED to PAID. Callable
    /// regardless of which of those three states the booking is
    /// currently in, since an immediate-payment flow can settle before
    /// `finalize` ever moves it to PENDING_PAYMENT.
    pub async fn confirm_payment(&self, booking_id: i64, payment_provider: &str, payment_id: &str) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;

        retry_once_transient(|| bookings::mark_paid(&self.pool, booking_id, payment_provider, payment_id))
            .await
            .map_err(|e| translate_repo_error(e, codes::BOOKING_NOT_ACTIVE))?;

        self.notify_recipients(NotificationEvent::Paid, booking_id, booking.user_id, booking.master_id).await;
        self.load_response(booking_id, None).await
    }

    pub async fn create_invoice(&self, booking_id: i64) -> AppResult<CreateInvoiceResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if booking.final_price_cents <= 0 {
            return Err(AppError::BadRequest(codes::INVOICE_MISSING_PRICE.to_string()));
        }
        let invoice = self
            .payment
            .create_invoice(booking_id, booking.final_price_cents, &self.config.default_currency)
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;
        Ok(CreateInvoiceResponse { invoice_url: invoice.invoice_url })
    }

    /// Ownership-checked cancel, rejecting within the client lock window.
    pub async fn cancel(&self, user_id: i64, booking_id: i64) -> AppResult<()> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if booking.user_id != user_id {
            return Err(AppError::Unauthorized);
        }
        if booking.status.is_terminal() {
            return Err(AppError::StateTransition(codes::BOOKING_NOT_ACTIVE.to_string()));
        }
        let lock_hours = self.get_int(keys::CLIENT_CANCEL_LOCK_HOURS).await;
        if booking.starts_at - Utc::now() < Duration::hours(lock_hours) {
            return Err(AppError::Policy(codes::CANCEL_TOO_CLOSE.to_string()));
        }

        retry_once_transient(|| bookings::set_cancelled(&self.pool, booking_id))
            .await
            .map_err(|e| translate_repo_error(e, codes::BOOKING_NOT_ACTIVE))?;
        self.notify_recipients(NotificationEvent::Cancelled, booking_id, booking.user_id, booking.master_id).await;
        Ok(())
    }

    /// Ownership-checked reschedule, rejecting within the reschedule lock
    /// window.
    pub async fn reschedule(&self, user_id: i64, booking_id: i64, new_starts_at: DateTime<Utc>) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if booking.user_id != user_id {
            return Err(AppError::Unauthorized);
        }
        if booking.status.is_terminal() {
            return Err(AppError::StateTransition(codes::BOOKING_NOT_ACTIVE.to_string()));
        }
        let lock_hours = self.get_int(keys::CLIENT_RESCHEDULE_LOCK_HOURS).await;
        if booking.starts_at - Utc::now() < Duration::hours(lock_hours) {
            return Err(AppError::Policy(codes::RESCHEDULE_TOO_CLOSE.to_string()));
        }
        if new_starts_at <= Utc::now() {
            return Err(AppError::Policy(codes::SLOT_IN_PAST.to_string()));
        }

        let items = bookings::list_items(&self.pool, booking_id).await?;
        let service_ids: Vec<String> = items.iter().map(|i| i.service_id.clone()).collect();
        let agg = self.aggregate(&service_ids, Some(booking.master_id)).await?;
        let new_ends_at = new_starts_at + Duration::minutes(agg.total_minutes as i64);

        if bookings::find_conflicting_booking(&self.pool, booking.master_id, new_starts_at, new_ends_at, Some(booking_id))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(codes::SLOT_UNAVAILABLE.to_string()));
        }

        retry_once_transient(|| bookings::reschedule(&self.pool, booking_id, new_starts_at, agg.total_minutes as i64))
            .await
            .map_err(|e| translate_repo_error(e, codes::SLOT_UNAVAILABLE))?;
        self.notify_recipients(NotificationEvent::RescheduledByClient, booking_id, booking.user_id, booking.master_id).await;
        self.load_response(booking_id, None).await
    }

    /// Rates a DONE booking exactly once.
    pub async fn rate(&self, user_id: i64, booking_id: i64, rating: i16, comment: Option<String>) -> AppResult<()> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if booking.user_id != user_id {
            return Err(AppError::Unauthorized);
        }
        if booking.status != BookingStatus::Done {
            return Err(AppError::Policy(codes::RATING_ONLY_AFTER_DONE.to_string()));
        }
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(codes::RATING_INVALID_VALUE.to_string()));
        }
        if ratings::find_by_booking(&self.pool, booking_id).await?.is_some() {
            return Err(AppError::Conflict(codes::ALREADY_RATED.to_string()));
        }
        ratings::create(&self.pool, booking_id, rating, comment.as_deref()).await?;
        Ok(())
    }

    /// Master-or-admin operation ahead of the cleanup worker.
    pub async fn mark_done(&self, caller: &Caller, booking_id: i64) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if !caller.can_act_as_master_of(booking.master_id) {
            return Err(AppError::Forbidden);
        }
        if !state_machine::is_legal_transition(booking.status, BookingStatus::Done) {
            return Err(AppError::StateTransition(codes::BOOKING_NOT_ACTIVE.to_string()));
        }
        bookings::update_status(&self.pool, booking_id, BookingStatus::Done)
            .await
            .map_err(|e| translate_repo_error(e, codes::BOOKING_NOT_ACTIVE))?;
        self.load_response(booking_id, None).await
    }

    /// Master-or-admin operation ahead of the cleanup worker.
    pub async fn mark_no_show(&self, caller: &Caller, booking_id: i64) -> AppResult<BookingResponse> {
        let booking = bookings::get(&self.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()))?;
        if !caller.can_act_as_master_of(booking.master_id) {
            return Err(AppError::Forbidden);
        }
        if !state_machine::is_legal_transition(booking.status, BookingStatus::NoShow) {
            return Err(AppError::StateTransition(codes::BOOKING_NOT_ACTIVE.to_string()));
        }
        bookings::update_status(&self.pool, booking_id, BookingStatus::NoShow)
            .await
            .map_err(|e| translate_repo_error(e, codes::BOOKING_NOT_ACTIVE))?;
        self.notify_recipients(NotificationEvent::NoShow, booking_id, booking.user_id, booking.master_id).await;
        self.load_response(booking_id, None).await
    }

    pub async fn list_bookings(&self, user_id: i64, mode: BookingListMode, page: i64) -> AppResult<PaginatedBookings> {
        let page_size = self.get_int(keys::DEFAULT_PAGE_SIZE).await;
        let (items, total) = bookings::get_paginated_list(&self.pool, Some(user_id), None, mode, page, page_size).await?;
        let mut responses = Vec::with_capacity(items.len());
        for booking in items {
            let booking_items = bookings::list_items(&self.pool, booking.id).await?;
            responses.push(Self::to_response(booking, booking_items, None));
        }
        Ok(PaginatedBookings { items: responses, page: page.max(1), page_size, total })
    }

    /// Master-or-admin read of a client's full history.
    pub async fn list_client_history(&self, caller: &Caller, target_user_id: i64, limit: i64) -> AppResult<Vec<BookingResponse>> {
        if !caller.is_admin && caller.master_id.is_none() {
            return Err(AppError::Forbidden);
        }
        let history = bookings::list_history_by_user(&self.pool, target_user_id, limit).await?;
        let mut responses = Vec::with_capacity(history.len());
        for booking in history {
            let items = bookings::list_items(&self.pool, booking.id).await?;
            responses.push(Self::to_response(booking, items, None));
        }
        Ok(responses)
    }

    /// Write restricted to the assigned master or an admin.
    pub async fn add_client_note(&self, caller: &Caller, master_id: i64, user_id: i64, note: &str) -> AppResult<()> {
        if !caller.can_act_as_master_of(master_id) {
            return Err(AppError::Forbidden);
        }
        notes::upsert(&self.pool, master_id, user_id, note).await?;
        Ok(())
    }

    pub async fn get_client_note(&self, caller: &Caller, master_id: i64, user_id: i64) -> AppResult<Option<String>> {
        if !caller.can_act_as_master_of(master_id) {
            return Err(AppError::Forbidden);
        }
        Ok(notes::find(&self.pool, master_id, user_id).await?.map(|n| n.note))
    }
}

fn translate_repo_error(err: salon_db::BookingRepoError, invalid_state_code: &str) -> AppError {
    translate_repo_error_with_conflict(err, codes::SLOT_UNAVAILABLE, invalid_state_code)
}

/// Same translation, but with an explicit conflict code — `confirm_cash`
/// re-checks the exclusion constraint against holds that could have been
/// confirmed concurrently, which is a general conflict rather than the
/// caller's own slot choice going stale.
fn translate_repo_error_with_conflict(
    err: salon_db::BookingRepoError,
    conflict_code: &str,
    invalid_state_code: &str,
) -> AppError {
    use salon_db::BookingRepoError::*;
    match err {
        Conflict => AppError::Conflict(conflict_code.to_string()),
        NotFound(_) => AppError::NotFound(codes::BOOKING_NOT_FOUND.to_string()),
        InvalidState(_) => AppError::StateTransition(invalid_state_code.to_string()),
        Db(e) => AppError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_act_as_master_of_admits_admin_or_matching_master() {
        let caller = Caller { user_id: 1, is_admin: false, master_id: Some(7) };
        assert!(caller.can_act_as_master_of(7));
        assert!(!caller.can_act_as_master_of(8));

        let admin = Caller { user_id: 2, is_admin: true, master_id: None };
        assert!(admin.can_act_as_master_of(99));
    }
}
