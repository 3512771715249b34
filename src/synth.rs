//! Generated record fields: identifier, expiry date and creation timestamp.

use crate::options::ImportOptions;
use chrono::{Local, NaiveDateTime, TimeDelta};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::ops::RangeInclusive;

/// Length of a generated record id.
pub const ID_LENGTH: usize = 20;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Widest day offset a window may reach, in either direction.
pub const MAX_WINDOW_DAYS: i64 = 365 * 100;

/// Source of the fields a sheet row does not carry.
///
/// All dates are relative to one `now`, fixed when the synthesizer is made.
#[derive(Debug)]
pub struct Synthesizer<R> {
    rng: R,
    now: NaiveDateTime,
    expiry_days: RangeInclusive<i64>,
    created_days: RangeInclusive<i64>,
}

impl Synthesizer<ThreadRng> {
    /// Synthesizer using the thread RNG and the local wall clock.
    pub fn from_clock(options: &ImportOptions) -> Self {
        Self::new(rand::rng(), Local::now().naive_local(), options)
    }
}

impl<R: Rng> Synthesizer<R> {
    /// Synthesizer with an explicit RNG and reference time.
    pub fn new(rng: R, now: NaiveDateTime, options: &ImportOptions) -> Self {
        Self {
            rng,
            now,
            expiry_days: window(&options.expiry_days),
            created_days: window(&options.created_days),
        }
    }

    /// Reference time of this run.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// A fresh lowercase alphanumeric id.
    pub fn id(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[self.rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }

    /// Expiry date somewhere in the expiry window, as `YYYY-MM-DD`.
    pub fn expiry_date(&mut self) -> String {
        let days = self.rng.random_range(self.expiry_days.clone());
        self.shifted(days).format("%Y-%m-%d").to_string()
    }

    /// Creation timestamp somewhere in the creation window, as
    /// `YYYY-MM-DDTHH:MM:SS`.
    pub fn created_at(&mut self) -> String {
        let days = self.rng.random_range(self.created_days.clone());
        self.shifted(-days)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    fn shifted(&self, days: i64) -> NaiveDateTime {
        TimeDelta::try_days(days)
            .and_then(|delta| self.now.checked_add_signed(delta))
            .unwrap_or(self.now)
    }
}

/// A non-empty day window: bounds ordered and clamped to `MAX_WINDOW_DAYS`.
fn window(days: &RangeInclusive<i64>) -> RangeInclusive<i64> {
    let a = (*days.start()).clamp(-MAX_WINDOW_DAYS, MAX_WINDOW_DAYS);
    let b = (*days.end()).clamp(-MAX_WINDOW_DAYS, MAX_WINDOW_DAYS);
    a.min(b)..=a.max(b)
}
