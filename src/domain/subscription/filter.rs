//! Cost aggregation filter

use uuid::Uuid;

use crate::domain::month::Month;
use crate::domain::subscription::Subscription;

/// Optional constraints for the cost aggregation query.
///
/// Absent fields leave the corresponding dimension unconstrained. The
/// window [`active_from`, `active_to`] matches any record whose own
/// [start, end-or-open) range overlaps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostFilter {
    pub service_name: Option<String>,
    pub user_id: Option<Uuid>,
    pub active_from: Option<Month>,
    pub active_to: Option<Month>,
}

impl CostFilter {
    /// The overlap predicate both storage backends implement.
    ///
    /// A record matches when every constrained dimension agrees:
    /// service and user by equality, the window by
    /// `record.start <= active_to` and, unless the record is open-ended,
    /// `record.end >= active_from`.
    pub fn matches(&self, record: &Subscription) -> bool {
        if let Some(service_name) = &self.service_name {
            if record.service_name != *service_name {
                return false;
            }
        }

        if let Some(user_id) = self.user_id {
            if record.user_id != user_id {
                return false;
            }
        }

        if let Some(active_to) = self.active_to {
            if record.start > active_to {
                return false;
            }
        }

        if let Some(active_from) = self.active_from {
            if let Some(end) = record.end {
                if end < active_from {
                    return false;
                }
            }
        }

        true
    }

    pub fn is_unconstrained(&self) -> bool {
        self.service_name.is_none()
            && self.user_id.is_none()
            && self.active_from.is_none()
            && self.active_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::SubscriptionId;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap().unwrap()
    }

    fn record(service: &str, user: Uuid, start: &str, end: Option<&str>) -> Subscription {
        Subscription {
            id: SubscriptionId::new(1),
            service_name: service.to_string(),
            price: 100,
            user_id: user,
            start: month(start),
            end: end.map(|s| month(s)),
        }
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let filter = CostFilter::default();
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&record("Netflix", Uuid::new_v4(), "07-2025", None)));
    }

    #[test]
    fn test_service_name_is_exact_match() {
        let filter = CostFilter {
            service_name: Some("Netflix".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&record("Netflix", Uuid::new_v4(), "07-2025", None)));
        assert!(!filter.matches(&record("Spotify", Uuid::new_v4(), "07-2025", None)));
    }

    #[test]
    fn test_user_constraint_ignores_other_dimensions() {
        let user = Uuid::new_v4();
        let filter = CostFilter {
            user_id: Some(user),
            ..Default::default()
        };

        assert!(filter.matches(&record("Netflix", user, "01-2001", Some("02-2001"))));
        assert!(!filter.matches(&record("Netflix", Uuid::new_v4(), "07-2025", None)));
    }

    #[test]
    fn test_window_excludes_records_starting_after_it() {
        let filter = CostFilter {
            active_to: Some(month("06-2025")),
            ..Default::default()
        };

        assert!(!filter.matches(&record("Netflix", Uuid::new_v4(), "07-2025", None)));
        assert!(filter.matches(&record("Netflix", Uuid::new_v4(), "06-2025", None)));
    }

    #[test]
    fn test_window_excludes_records_ending_before_it() {
        let filter = CostFilter {
            active_from: Some(month("06-2025")),
            ..Default::default()
        };

        assert!(!filter.matches(&record(
            "Netflix",
            Uuid::new_v4(),
            "01-2025",
            Some("05-2025")
        )));
        assert!(filter.matches(&record(
            "Netflix",
            Uuid::new_v4(),
            "01-2025",
            Some("06-2025")
        )));
    }

    #[test]
    fn test_open_ended_records_overlap_any_later_window() {
        let filter = CostFilter {
            active_from: Some(month("01-2030")),
            active_to: Some(month("12-2030")),
            ..Default::default()
        };

        assert!(filter.matches(&record("Netflix", Uuid::new_v4(), "07-2025", None)));
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let filter = CostFilter {
            active_from: Some(month("07-2025")),
            active_to: Some(month("07-2025")),
            ..Default::default()
        };

        assert!(filter.matches(&record(
            "Netflix",
            Uuid::new_v4(),
            "07-2025",
            Some("07-2025")
        )));
    }
}
