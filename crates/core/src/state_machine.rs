//! Static definition of legal booking status transitions and terminality.
//! A pure, non-async `match` — the canonical source of
//! truth the lifecycle orchestrator consults before any repository call;
//! `salon_db`'s repository keeps its own copy of this table for the
//! narrow set of transitions it validates inside a transaction, since the
//! `db` crate cannot depend on `core` without a cycle. Both tables are
//! generated from the same matrix below and must be kept in sync.
use salon_types::BookingStatus;

/// Terminal statuses never transition out.
pub const TERMINAL: &[BookingStatus] = &[
    BookingStatus::Cancelled,
    BookingStatus::Done,
    BookingStatus::NoShow,
    BookingStatus::Expired,
];

pub fn is_terminal(status: BookingStatus) -> bool {
    TERMINAL.contains(&status)
}

/// Whether `from -> to` is a legal transition.
pub fn is_legal_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Reserved, PendingPayment)
            | (Reserved, Confirmed)
            | (Reserved, Paid)
            | (Reserved, Cancelled)
            | (Reserved, Expired)
            | (PendingPayment, Paid)
            | (PendingPayment, Cancelled)
            | (PendingPayment, Expired)
            | (Confirmed, Paid)
            | (Confirmed, Done)
            | (Confirmed, NoShow)
            | (Confirmed, Cancelled)
            | (Paid, Done)
            | (Paid, NoShow)
            | (Paid, Cancelled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn terminal_statuses_never_transition_out() {
        for &status in TERMINAL {
            for candidate in [Reserved, PendingPayment, Confirmed, Paid, Cancelled, Done, NoShow, Expired] {
                assert!(!is_legal_transition(status, candidate), "{status:?} -> {candidate:?}");
            }
        }
    }

    #[test]
    fn reserved_can_reach_every_direct_successor() {
        assert!(is_legal_transition(Reserved, PendingPayment));
        assert!(is_legal_transition(Reserved, Confirmed));
        assert!(is_legal_transition(Reserved, Paid));
        assert!(is_legal_transition(Reserved, Cancelled));
        assert!(is_legal_transition(Reserved, Expired));
        assert!(!is_legal_transition(Reserved, Done));
        assert!(!is_legal_transition(Reserved, NoShow));
    }

    #[test]
    fn no_show_only_from_confirmed_or_paid() {
        assert!(is_legal_transition(Confirmed, NoShow));
        assert!(is_legal_transition(Paid, NoShow));
        assert!(!is_legal_transition(Reserved, NoShow));
        assert!(!is_legal_transition(PendingPayment, NoShow));
    }
}
