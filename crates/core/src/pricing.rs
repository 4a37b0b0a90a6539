//! The pricing engine: pure aggregation/discount arithmetic
//! over services and overrides the caller already loaded — no DB access
//! here, matching the rest of this crate's pure-function modules.

use salon_db::models::{MasterService, Service};
use salon_types::api::pricing::{AggregateResponse, PerServicePrice, PriceQuoteResponse};
use salon_types::enums::PaymentMethod;
use salon_types::money::apply_discount_percent;

/// Resolves one service's duration: a per-master override (if present and
/// positive) wins, then the service's own duration, then the process-wide
/// fallback.
fn resolve_duration(service: &Service, overrides: &[MasterService], fallback_minutes: i32) -> i32 {
    let override_minutes = overrides
        .iter()
        .find(|o| o.service_id == service.id)
        .and_then(|o| o.duration_minutes_override)
        .filter(|&m| m > 0);

    override_minutes
        .or(service.duration_minutes)
        .unwrap_or(fallback_minutes)
}

/// Aggregates duration and price across a multi-service booking.
/// `overrides` is the requested master's
/// `MasterService` rows, or empty when no master is selected yet.
pub fn aggregate(
    services: &[Service],
    overrides: &[MasterService],
    fallback_minutes: i32,
    currency: &str,
) -> AggregateResponse {
    let mut per_service = Vec::with_capacity(services.len());
    let mut total_minutes = 0i32;
    let mut total_price_cents = 0i64;

    for service in services {
        let minutes = resolve_duration(service, overrides, fallback_minutes);
        let price_cents = service.price_cents.unwrap_or(0);
        total_minutes += minutes;
        total_price_cents += price_cents;
        per_service.push(PerServicePrice {
            service_id: service.id.clone(),
            minutes,
            price_cents,
        });
    }

    AggregateResponse {
        total_minutes,
        total_price_cents,
        currency: currency.to_string(),
        per_service,
    }
}

/// Quotes the final price for a payment method: the
/// online-payment discount only ever applies for [`PaymentMethod::Online`],
/// and a zero percent is a no-op either way.
pub fn quote(
    services: &[Service],
    overrides: &[MasterService],
    fallback_minutes: i32,
    currency: &str,
    payment_method: PaymentMethod,
    discount_percent: i64,
) -> PriceQuoteResponse {
    let agg = aggregate(services, overrides, fallback_minutes, currency);
    let original_price_cents = agg.total_price_cents;

    let (final_price_cents, discount_amount_cents, discount_percent_applied) = match payment_method {
        PaymentMethod::Online if discount_percent > 0 => {
            let (final_cents, discount) = apply_discount_percent(original_price_cents, discount_percent);
            (final_cents, discount, discount_percent)
        }
        _ => (original_price_cents, 0, 0),
    };

    PriceQuoteResponse {
        original_price_cents,
        final_price_cents,
        discount_amount_cents,
        discount_percent_applied,
        currency: currency.to_string(),
        duration_minutes: agg.total_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, price_cents: Option<i64>, duration_minutes: Option<i32>) -> Service {
        Service {
            id: id.to_string(),
            name: id.to_string(),
            category: None,
            description: None,
            price_cents,
            duration_minutes,
        }
    }

    #[test]
    fn master_override_wins_over_service_duration() {
        let services = vec![service("haircut", Some(5000), Some(30))];
        let overrides = vec![MasterService {
            master_id: 1,
            service_id: "haircut".to_string(),
            duration_minutes_override: Some(45),
        }];
        let agg = aggregate(&services, &overrides, 60, "USD");
        assert_eq!(agg.per_service[0].minutes, 45);
    }

    #[test]
    fn falls_back_to_slot_duration_when_unset() {
        let services = vec![service("consult", None, None)];
        let agg = aggregate(&services, &[], 60, "USD");
        assert_eq!(agg.per_service[0].minutes, 60);
        assert_eq!(agg.per_service[0].price_cents, 0);
    }

    #[test]
    fn multi_service_totals_sum_correctly() {
        let services = vec![
            service("a", Some(1000), Some(20)),
            service("b", Some(2000), Some(40)),
        ];
        let agg = aggregate(&services, &[], 60, "USD");
        assert_eq!(agg.total_minutes, 60);
        assert_eq!(agg.total_price_cents, 3000);
    }

    #[test]
    fn online_quote_applies_half_up_discount() {
        let services = vec![service("a", Some(12345), Some(30))];
        let q = quote(&services, &[], 60, "USD", PaymentMethod::Online, 5);
        assert_eq!(q.original_price_cents, 12345);
        assert_eq!(q.final_price_cents, 11728);
        assert_eq!(q.discount_amount_cents, 617);
        assert_eq!(q.discount_percent_applied, 5);
    }

    #[test]
    fn cash_quote_never_discounts() {
        let services = vec![service("a", Some(12345), Some(30))];
        let q = quote(&services, &[], 60, "USD", PaymentMethod::Cash, 5);
        assert_eq!(q.final_price_cents, 12345);
        assert_eq!(q.discount_amount_cents, 0);
        assert_eq!(q.discount_percent_applied, 0);
    }

    #[test]
    fn zero_percent_is_a_noop_even_online() {
        let services = vec![service("a", Some(10000), Some(30))];
        let q = quote(&services, &[], 60, "USD", PaymentMethod::Online, 0);
        assert_eq!(q.final_price_cents, 10000);
        assert_eq!(q.discount_amount_cents, 0);
    }
}
