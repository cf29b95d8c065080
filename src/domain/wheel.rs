//! Promotional spin wheel.
//!
//! Eight fixed segments with integer weights summing to 100. A visitor may
//! spin once per calendar day, after leaving an email address. The outcome
//! (spin date plus awarded code, if any) is persisted and gates further
//! spins until the local date rolls over.
//!
//! State machine: `Idle -> EmailPending -> Ready -> Spinning -> Result`,
//! back to `Idle` the next day. `spin` outside `Ready`, or on a day that
//! already has an outcome, is a no-op rather than an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::storage::{keys, Storage};

/// One wheel segment. An empty `code` marks a non-winning "try again"
/// segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Prize {
    pub label: &'static str,
    /// Segment fill and text colors for the rendered wheel.
    pub colors: (&'static str, &'static str),
    pub code: &'static str,
    pub blurb: &'static str,
    pub weight: u32,
}

impl Prize {
    pub fn is_winning(&self) -> bool {
        !self.code.is_empty()
    }
}

/// Fixed segment table. Weights sum to exactly 100; the two "try again"
/// segments carry 25 points combined.
pub static PRIZES: [Prize; 8] = [
    Prize { label: "5% Off", colors: ("#f9d5e5", "#1f1f1f"), code: "GLOW5", blurb: "5% off your whole order", weight: 25 },
    Prize { label: "Try Again", colors: ("#1f1f1f", "#f9d5e5"), code: "", blurb: "Better luck tomorrow", weight: 15 },
    Prize { label: "10% Off", colors: ("#e8b4bc", "#1f1f1f"), code: "GLOW10", blurb: "10% off your whole order", weight: 15 },
    Prize { label: "Free Shipping", colors: ("#d4a5a5", "#1f1f1f"), code: "SHIPFREE", blurb: "Free shipping on any order", weight: 15 },
    Prize { label: "20% Off", colors: ("#b76e79", "#ffffff"), code: "GLOW20", blurb: "20% off your whole order", weight: 5 },
    Prize { label: "Try Again", colors: ("#1f1f1f", "#e8b4bc"), code: "", blurb: "Better luck tomorrow", weight: 10 },
    Prize { label: "Free Lip Liner", colors: ("#9c4150", "#ffffff"), code: "LINERGIFT", blurb: "Free lip liner with your order", weight: 5 },
    Prize { label: "15% Off", colors: ("#f0e1e6", "#1f1f1f"), code: "GLOW15", blurb: "15% off your whole order", weight: 10 },
];

/// Walk the cumulative weight table and return the first segment whose
/// upper bound exceeds the draw. `draw` must be in `[0, 100)`.
pub fn select_prize(draw: f64) -> &'static Prize {
    let mut upper = 0.0;
    for prize in &PRIZES {
        upper += prize.weight as f64;
        if draw < upper {
            return prize;
        }
    }
    // draw == 100.0 can only happen with a misbehaving source; land on the
    // last segment instead of panicking
    &PRIZES[PRIZES.len() - 1]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub label: String,
    /// `None` for the non-winning segments.
    pub code: Option<String>,
}

impl SpinResult {
    pub fn won(&self) -> bool {
        self.code.is_some()
    }
}

/// Persisted record of the last spin. Superseded by the next day's spin,
/// never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelOutcome {
    pub date: NaiveDate,
    pub code: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WheelState {
    Idle,
    EmailPending,
    Ready,
    Spinning,
    Result(SpinResult),
}

pub struct PromoWheel {
    state: WheelState,
    storage: Arc<dyn Storage>,
    rng: Box<dyn RngCore + Send>,
    settle: Duration,
}

impl PromoWheel {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        use rand::SeedableRng;
        Self::with_rng(storage, Box::new(rand::rngs::StdRng::from_entropy()))
    }

    /// Inject the random source; tests pass a seeded rng for reproducible
    /// selection.
    pub fn with_rng(storage: Arc<dyn Storage>, rng: Box<dyn RngCore + Send>) -> Self {
        Self { state: WheelState::Idle, storage, rng, settle: Duration::from_secs(4) }
    }

    /// Visual settle time between the draw and the committed result.
    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn last_outcome(&self) -> Option<WheelOutcome> {
        self.storage
            .get(keys::WHEEL_OUTCOME)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// True iff no outcome is recorded for the calendar date of `today`.
    pub fn can_spin(&self, today: NaiveDate) -> bool {
        self.last_outcome().map_or(true, |o| o.date != today)
    }

    /// Open the wheel dialog. Only leaves `Idle` when today's spin is still
    /// available.
    pub fn open(&mut self, today: NaiveDate) -> bool {
        if self.state == WheelState::Idle && self.can_spin(today) {
            self.state = WheelState::EmailPending;
            true
        } else {
            false
        }
    }

    /// Capture the visitor's email and arm the wheel.
    pub fn submit_email(&mut self, email: &str) -> bool {
        let email = email.trim();
        if self.state != WheelState::EmailPending || !email.contains('@') {
            return false;
        }
        self.storage.put(keys::PROMO_EMAIL, email);
        self.state = WheelState::Ready;
        true
    }

    /// Draw a prize, wait out the settle delay, then commit today's outcome.
    /// A no-op (`None`) outside `Ready` or when today already has an
    /// outcome.
    pub async fn spin(&mut self, today: NaiveDate) -> Option<SpinResult> {
        if self.state != WheelState::Ready || !self.can_spin(today) {
            return None;
        }
        self.state = WheelState::Spinning;
        let draw = self.rng.gen_range(0.0..100.0);
        let prize = select_prize(draw);
        tokio::time::sleep(self.settle).await;

        let code = prize.is_winning().then(|| prize.code.to_string());
        let outcome = WheelOutcome { date: today, code: code.clone() };
        match serde_json::to_string(&outcome) {
            Ok(raw) => self.storage.put(keys::WHEEL_OUTCOME, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize wheel outcome"),
        }
        tracing::info!(label = prize.label, won = prize.is_winning(), "wheel spin settled");

        let result = SpinResult { label: prize.label.to_string(), code };
        self.state = WheelState::Result(result.clone());
        Some(result)
    }

    /// Close the dialog. The recorded outcome keeps gating `can_spin`.
    pub fn reset(&mut self) {
        self.state = WheelState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel() -> PromoWheel {
        PromoWheel::with_rng(Arc::new(MemoryStorage::new()), Box::new(StdRng::seed_from_u64(7)))
            .with_settle_delay(Duration::ZERO)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        assert_eq!(PRIZES.iter().map(|p| p.weight).sum::<u32>(), 100);
    }

    #[test]
    fn test_select_prize_boundaries() {
        assert_eq!(select_prize(0.0).label, "5% Off");
        assert_eq!(select_prize(24.999).label, "5% Off");
        assert_eq!(select_prize(25.0).label, "Try Again");
        assert_eq!(select_prize(99.999).label, "15% Off");
    }

    #[test]
    fn test_empirical_frequencies_match_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; PRIZES.len()];
        let draws = 100_000;
        for _ in 0..draws {
            let draw: f64 = rng.gen_range(0.0..100.0);
            let prize = select_prize(draw);
            let idx = PRIZES.iter().position(|p| std::ptr::eq(p, prize)).unwrap();
            counts[idx] += 1;
        }
        for (prize, count) in PRIZES.iter().zip(counts) {
            let freq = count as f64 * 100.0 / draws as f64;
            assert!(
                (freq - prize.weight as f64).abs() < 1.5,
                "{}: expected ~{}, got {freq:.2}",
                prize.label,
                prize.weight
            );
        }
    }

    #[tokio::test]
    async fn test_full_spin_flow_records_outcome() {
        let mut w = wheel();
        assert!(w.open(day(1)));
        assert!(!w.submit_email("not-an-email"));
        assert!(w.submit_email("mua@example.com"));
        let result = w.spin(day(1)).await.unwrap();
        match w.state() {
            WheelState::Result(r) => assert_eq!(r, &result),
            other => panic!("expected Result state, got {other:?}"),
        }
        let outcome = w.last_outcome().unwrap();
        assert_eq!(outcome.date, day(1));
        assert_eq!(outcome.code.is_some(), result.won());
    }

    #[tokio::test]
    async fn test_daily_gate_blocks_until_next_day() {
        let mut w = wheel();
        w.open(day(1));
        w.submit_email("mua@example.com");
        w.spin(day(1)).await.unwrap();

        assert!(!w.can_spin(day(1)));
        w.reset();
        assert!(!w.open(day(1)));
        assert!(w.can_spin(day(2)));
        assert!(w.open(day(2)));
    }

    #[tokio::test]
    async fn test_spin_outside_ready_is_noop() {
        let mut w = wheel();
        assert_eq!(w.spin(day(1)).await, None); // Idle
        w.open(day(1));
        assert_eq!(w.spin(day(1)).await, None); // EmailPending
        assert_eq!(*w.state(), WheelState::EmailPending);
    }

    #[tokio::test]
    async fn test_spin_with_existing_outcome_is_noop() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let outcome = WheelOutcome { date: day(1), code: Some("GLOW10".into()) };
        storage.put(keys::WHEEL_OUTCOME, &serde_json::to_string(&outcome).unwrap());

        let mut w = PromoWheel::with_rng(storage, Box::new(StdRng::seed_from_u64(7)))
            .with_settle_delay(Duration::ZERO);
        assert!(!w.open(day(1)));
        // force the state machine past the gate; spin still refuses
        w.state = WheelState::Ready;
        assert_eq!(w.spin(day(1)).await, None);
    }
}
