//! Urgency classification of signed day offsets

use flock_api::Urgency;
use flock_util::Locale;

/// Last day offset (inclusive) still classified as `Soon`
pub const SOON_WINDOW_DAYS: i64 = 7;

/// Map a signed day offset to its urgency tier.
///
/// `< 0` overdue, `0` due today, `1..=7` soon, `> 7` later.
pub fn classify_urgency(day_offset: i64) -> Urgency {
    match day_offset {
        d if d < 0 => Urgency::Overdue,
        0 => Urgency::DueToday,
        d if d <= SOON_WINDOW_DAYS => Urgency::Soon,
        _ => Urgency::Later,
    }
}

/// Localized phrase for a tier at a given offset
pub fn urgency_label(urgency: Urgency, day_offset: i64, locale: Locale) -> String {
    urgency.label(day_offset, locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_urgency(i64::MIN), Urgency::Overdue);
        assert_eq!(classify_urgency(-1), Urgency::Overdue);
        assert_eq!(classify_urgency(0), Urgency::DueToday);
        assert_eq!(classify_urgency(1), Urgency::Soon);
        assert_eq!(classify_urgency(7), Urgency::Soon);
        assert_eq!(classify_urgency(8), Urgency::Later);
        assert_eq!(classify_urgency(i64::MAX), Urgency::Later);
    }

    #[test]
    fn test_step_function_is_monotonic() {
        let mut previous = classify_urgency(-30);
        for offset in -29..=30 {
            let current = classify_urgency(offset);
            assert!(current >= previous, "tier went backwards at {}", offset);
            previous = current;
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(urgency_label(classify_urgency(-4), -4, Locale::En), "4 days late");
        assert_eq!(urgency_label(classify_urgency(0), 0, Locale::Ar), "اليوم");
        assert_eq!(urgency_label(classify_urgency(3), 3, Locale::Ar), "بعد 3 يوم");
    }
}
