//! Header clock and navigation highlight.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Timelike};
use shared_types::format::format_clock;
use shared_types::surface::Surface;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::layout::slots;
use crate::toast::spawn;

/// Clock refresh period.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(30);

type ClockFn = Arc<dyn Fn() -> String + Send + Sync>;

pub struct CoreUi {
    clock: ClockFn,
}

impl CoreUi {
    /// Clock reading local wall time.
    pub fn new() -> Self {
        Self::with_clock(|| {
            let now = Local::now();
            format_clock(now.hour(), now.minute())
        })
    }

    pub fn with_clock(clock: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for CoreUi {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoreUi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreUi").finish_non_exhaustive()
    }
}

fn tick(surface: &Surface, clock: &ClockFn) {
    surface.set_text(slots::CLOCK, clock());
}

impl Feature for CoreUi {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("core-ui")
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        tick(&ctx.surface, &self.clock);

        let active = ctx.page.nav_index();
        for (i, dot) in slots::NAV_DOTS.iter().enumerate() {
            ctx.surface.toggle_class(dot, "active", i == active);
        }

        let surface = Arc::clone(&ctx.surface);
        let clock = Arc::clone(&self.clock);
        let timer = spawn(async move {
            let mut ticker = interval_at(Instant::now() + CLOCK_PERIOD, CLOCK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick(&surface, &clock);
                debug!("Clock refreshed");
            }
        });

        let handle = MountHandle::new();
        Ok(match timer {
            Some(timer) => handle.with_task(timer),
            None => handle,
        })
    }
}
