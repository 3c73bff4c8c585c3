use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::debug;

/// Number of stars seeded whenever the field is (re)initialized.
pub const STAR_COUNT: usize = 100;

/// Interval between two animation steps (~30 fps).
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

pub const DEFAULT_SPEED: f64 = 0.5;

/// A single decorative point, in cell coordinates of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
}

/// Recurring deadline polled by the host loop. Dropping it cancels it.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Returns true once per elapsed interval and re-arms the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.interval;
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

/// Animated background: a field of stars falling straight down.
///
/// All state is private; the host drives it through `enable`, `set_speed`,
/// `resize` and `poll`, and draws it through the renderer in
/// `ui::starfield`.
pub struct Starfield {
    stars: Vec<Star>,
    speed: f64,
    enabled: bool,
    width: f64,
    height: f64,
    ticker: Option<Ticker>,
    redraw: bool,
    rng: StdRng,
}

impl Starfield {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic field, used where reproducible positions matter.
    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            stars: Vec::new(),
            speed: DEFAULT_SPEED,
            enabled: false,
            width: 0.0,
            height: 0.0,
            ticker: None,
            redraw: false,
            rng,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[cfg(test)]
    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Turn the animation on or off.
    ///
    /// Enabling always re-seeds, even when already enabled. Disabling stops
    /// the ticker immediately and clears the field.
    pub fn enable(&mut self, on: bool) {
        self.enabled = on;
        if on {
            self.seed_stars();
            self.ticker = Some(Ticker::start(TICK_INTERVAL, Instant::now()));
            debug!(width = self.width, height = self.height, "starfield enabled");
        } else {
            self.ticker = None;
            self.stars.clear();
            debug!("starfield disabled");
        }
        self.redraw = true;
    }

    /// Per-tick vertical displacement. Not validated; applies from the next tick.
    pub fn set_speed(&mut self, value: f64) {
        self.speed = value;
    }

    /// The hosting surface changed size. Re-seeds when enabled.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = f64::from(width);
        self.height = f64::from(height);
        if self.enabled {
            self.seed_stars();
            self.redraw = true;
        }
    }

    /// Run one animation step if the ticker is due. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.fire(now),
            None => false,
        };
        if due {
            self.advance();
        }
        due
    }

    /// Time until the next animation step, or `None` while disabled.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.remaining(now))
    }

    /// One animation step: every star falls by `speed`, wrapping to the top
    /// once it passes the bottom edge. Stars above the top edge stay there.
    pub fn advance(&mut self) {
        let height = self.height;
        for star in &mut self.stars {
            let y = star.y + self.speed;
            star.y = if y > height { 0.0 } else { y };
        }
        self.redraw = true;
    }

    /// Consume a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    #[cfg(test)]
    pub(crate) fn replace_stars(&mut self, stars: Vec<Star>) {
        self.stars = stars;
    }

    fn seed_stars(&mut self) {
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
            })
            .collect();
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}
