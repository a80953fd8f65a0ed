use crate::time::Clock;

/// Builds a short human-readable booking reference like `DI-483920`: the
/// service prefix plus the last six digits of the current epoch millis.
/// Uniqueness is best-effort, matching what a confirmation code needs.
pub fn booking_reference(prefix: &str, clock: &dyn Clock) -> String {
    let suffix = clock.now().timestamp_millis().rem_euclid(1_000_000);
    format!("{}-{:06}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;

    #[test]
    fn reference_keeps_the_last_six_digits() {
        let clock = FixedClock::at_millis(1_724_563_412_345);
        assert_eq!(booking_reference("VS", &clock), "VS-412345");
    }

    #[test]
    fn short_timestamps_are_zero_padded() {
        let clock = FixedClock::at_millis(42);
        assert_eq!(booking_reference("DI", &clock), "DI-000042");
    }
}
