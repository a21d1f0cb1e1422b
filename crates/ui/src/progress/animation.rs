use instant::Instant;
use std::time::Duration;

/// How a [`TimedValue`] moves toward its target.
#[derive(Clone, Copy)]
pub struct Timing {
    pub duration: Duration,
    /// Maps linear time in `0..=1` to progress in `0..=1`.
    pub easing: fn(f32) -> f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: gpui::ease_in_out,
        }
    }
}

impl std::fmt::Debug for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timing")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl Timing {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    pub fn with_easing(mut self, easing: fn(f32) -> f32) -> Self {
        self.easing = easing;
        self
    }
}

/// A number that moves from one value to another over time.
#[derive(Debug, Clone, Copy)]
pub struct TimedValue {
    from: f32,
    to: f32,
    started_at: Instant,
    timing: Timing,
}

impl TimedValue {
    /// A value at rest, no transition.
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started_at: now,
            timing: Timing::default(),
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress of the transition in `0..=1`.
    fn delta(&self, now: Instant) -> f32 {
        let duration = self.timing.duration.as_secs_f32();
        if duration <= 0. {
            return 1.;
        }

        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        (elapsed / duration).min(1.)
    }

    /// The value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let delta = self.delta(now);
        if delta >= 1. {
            return self.to;
        }

        self.from + (self.to - self.from) * (self.timing.easing)(delta)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.from == self.to || self.delta(now) >= 1.
    }

    /// Start moving toward `to`, beginning from wherever the value is at `now`.
    pub fn retarget(&mut self, to: f32, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.started_at = now;
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }
}

/// A value computed from a key, recomputed only when the key changes.
#[derive(Debug, Clone)]
pub struct Derived<K, V> {
    key: K,
    value: V,
}

impl<K: PartialEq, V> Derived<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Update the key, calling `recompute` if it differs from the current one.
    ///
    /// Returns true if the value was recomputed.
    pub fn update(&mut self, key: K, recompute: impl FnOnce(&K, &mut V)) -> bool {
        if self.key == key {
            return false;
        }

        recompute(&key, &mut self.value);
        self.key = key;
        true
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn get(&self) -> &V {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(t: f32) -> f32 {
        t
    }

    #[test]
    fn test_settled() {
        let now = Instant::now();
        let value = TimedValue::settled(42., now);
        assert_eq!(value.value_at(now), 42.);
        assert_eq!(value.value_at(now + Duration::from_secs(10)), 42.);
        assert!(value.is_finished(now));
    }

    #[test]
    fn test_transition() {
        let now = Instant::now();
        let mut value = TimedValue::settled(20., now)
            .with_timing(Timing::new(Duration::from_millis(100)).with_easing(linear));
        value.retarget(80., now);

        assert_eq!(value.target(), 80.);
        assert_eq!(value.value_at(now), 20.);
        assert!(!value.is_finished(now));
        let half = value.value_at(now + Duration::from_millis(50));
        assert!((half - 50.).abs() < 0.01);
        assert_eq!(value.value_at(now + Duration::from_millis(100)), 80.);
        assert!(value.is_finished(now + Duration::from_millis(100)));
        assert_eq!(value.value_at(now + Duration::from_secs(1)), 80.);
    }

    #[test]
    fn test_retarget_from_current_value() {
        let now = Instant::now();
        let mut value = TimedValue::settled(0., now)
            .with_timing(Timing::new(Duration::from_millis(100)).with_easing(linear));
        value.retarget(100., now);

        let mid = now + Duration::from_millis(50);
        value.retarget(0., mid);
        assert!((value.value_at(mid) - 50.).abs() < 0.01);
        let later = value.value_at(mid + Duration::from_millis(50));
        assert!((later - 25.).abs() < 0.01);
        assert_eq!(value.value_at(mid + Duration::from_millis(100)), 0.);
    }

    #[test]
    fn test_default_timing_eases() {
        let now = Instant::now();
        let mut value = TimedValue::settled(0., now);
        value.retarget(100., now);

        let quarter = value.value_at(now + Duration::from_millis(75));
        let half = value.value_at(now + Duration::from_millis(150));
        assert!(quarter < 25.);
        assert!((half - 50.).abs() < 1.);
        assert_eq!(value.value_at(now + Duration::from_millis(300)), 100.);
    }

    #[test]
    fn test_zero_duration() {
        let now = Instant::now();
        let mut value = TimedValue::settled(0., now).with_timing(Timing::new(Duration::ZERO));
        value.retarget(60., now);
        assert_eq!(value.value_at(now), 60.);
        assert!(value.is_finished(now));
    }

    #[test]
    fn test_derived_recomputes_on_change() {
        let mut calls = 0;
        let mut derived = Derived::new(10., 1);

        assert!(!derived.update(10., |_, _| calls += 1));
        assert_eq!(calls, 0);

        assert!(derived.update(20., |key, value| {
            calls += 1;
            *value = *key as i32 * 2;
        }));
        assert_eq!(calls, 1);
        assert_eq!(*derived.get(), 40);
        assert_eq!(*derived.key(), 20.);

        assert!(!derived.update(20., |_, _| calls += 1));
        assert_eq!(calls, 1);
    }
}
