// Replaceable pseudo-random source for simulated telemetry
use rand::Rng;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`.
    fn between(&self, low: i64, high: i64) -> i64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn between(&self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Replays a fixed sequence of values, clamped into the requested range.
/// Once exhausted it keeps returning `low`.
#[cfg(test)]
pub struct ScriptedRandom {
    values: std::sync::Mutex<std::collections::VecDeque<i64>>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: std::sync::Mutex::new(values.into_iter().collect()),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn between(&self, low: i64, high: i64) -> i64 {
        let next = self.values.lock().unwrap().pop_front();
        next.map(|v| v.clamp(low, high)).unwrap_or(low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let random = ThreadRandom;
        for _ in 0..500 {
            let v = random.between(-1, 1);
            assert!((-1..=1).contains(&v));
        }
        assert_eq!(random.between(4, 4), 4);
    }

    #[test]
    fn test_scripted_random_replays_and_clamps() {
        let random = ScriptedRandom::new([3, 9, -7]);
        assert_eq!(random.between(0, 4), 3);
        assert_eq!(random.between(0, 4), 4);
        assert_eq!(random.between(-1, 1), -1);
        assert_eq!(random.between(-1, 1), -1);
    }
}
