//! Home page summary: total, month-over-month delta, comparison bars,
//! per-category prices and donut shares.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::{names, DashboardEvent};
use shared_types::entities::{DashboardState, Page, Totals};
use shared_types::format::format_won;
use shared_types::surface::Surface;
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::layout::slots;
use crate::projection::SummaryView;

const LOADING_TEXT: &str = "Loading usage...";
const FAILED_TEXT: &str = "Could not load usage data.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DashboardRender;

fn render(surface: &Surface, state: &DashboardState, status: &LoadStatus) {
    let view = SummaryView::of(state);
    let waiting = *status == LoadStatus::Pending && state.totals == Totals::default();

    if waiting {
        surface.set_text(slots::TOTAL_PRICE, LOADING_TEXT);
    } else {
        surface.set_text(slots::TOTAL_PRICE, &view.total_text);
    }
    if *status == LoadStatus::Failed {
        surface.set_text(slots::DELTA_TEXT, FAILED_TEXT);
    } else if !waiting {
        surface.set_text(slots::DELTA_TEXT, &view.delta_text);
        surface.set_attr(slots::DELTA_TEXT, "direction", view.direction.symbol());
    }

    surface.set_width(slots::BAR_LAST, view.bar_last);
    surface.set_width(slots::BAR_NOW, view.bar_now);

    surface.set_text(slots::ELEC_PRICE, format_won(view.electricity as f64));
    // The second card shows whichever category the source supplied.
    surface.set_text(slots::WATER_PRICE, format_won(view.secondary as f64));
    surface.set_attr(slots::WATER_PRICE, "category", view.secondary_category);

    for (slot, label, percent) in [
        (slots::DONUT_ELEC, "Electricity", view.electricity_share),
        (slots::DONUT_WATER, view.secondary_label, view.secondary_share),
    ] {
        let title = format!("{label} share {percent}%");
        surface.set_width(slot, percent);
        surface.set_attr(slot, "--percent", percent.to_string());
        surface.set_attr(slot, "aria-label", &title);
        surface.set_attr(slot, "title", title);
    }
}

impl Feature for DashboardRender {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("dashboard-render").on_pages([Page::Home])
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        ctx.has_any(&[slots::TOTAL_PRICE, slots::DONUT_ELEC, slots::DONUT_WATER])
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        let status = Arc::new(Mutex::new(LoadStatus::Pending));
        render(&ctx.surface, &ctx.store.get(), &status.lock());

        let on_change = {
            let surface = Arc::clone(&ctx.surface);
            let status = Arc::clone(&status);
            ctx.bus.on_fn(names::STATE_CHANGED, move |event: &DashboardEvent| {
                if let Some(state) = event.state() {
                    render(&surface, state, &status.lock());
                }
                Ok(())
            })
        };

        let on_ready = {
            let surface = Arc::clone(&ctx.surface);
            let status = Arc::clone(&status);
            ctx.bus.on_fn(names::DATA_READY, move |event: &DashboardEvent| {
                *status.lock() = LoadStatus::Ready;
                if let Some(state) = event.state() {
                    render(&surface, state, &LoadStatus::Ready);
                }
                Ok(())
            })
        };

        let on_error = {
            let surface = Arc::clone(&ctx.surface);
            let store = Arc::clone(&ctx.store);
            ctx.bus.on_fn(names::DATA_ERROR, move |_: &DashboardEvent| {
                *status.lock() = LoadStatus::Failed;
                render(&surface, &store.get(), &LoadStatus::Failed);
                Ok(())
            })
        };

        Ok(MountHandle::new()
            .with_subscription(on_change)
            .with_subscription(on_ready)
            .with_subscription(on_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface_for;
    use shared_bus::EventPublisher;
    use shared_types::entities::{category, Breakdown, StatePatch};
    use ud_02_feature_registry::{FeatureRegistry, SkipReason};

    fn mounted(page: Page) -> (FeatureContext, FeatureRegistry) {
        let ctx = FeatureContext::in_memory(page, surface_for(page));
        let mut registry = FeatureRegistry::new();
        registry.register(DashboardRender).unwrap();
        registry.init(ctx.clone()).unwrap();
        (ctx, registry)
    }

    #[test]
    fn test_loading_notice_until_data() {
        let (ctx, _registry) = mounted(Page::Home);
        assert_eq!(ctx.surface.text(slots::TOTAL_PRICE).as_deref(), Some(LOADING_TEXT));
        assert_eq!(ctx.surface.text(slots::DELTA_TEXT).as_deref(), Some(""));
    }

    #[test]
    fn test_renders_summary_on_state_change() {
        let (ctx, _registry) = mounted(Page::Home);
        ctx.store.patch(
            StatePatch::new()
                .totals(Totals::new(32_600, 37_000))
                .breakdown(
                    Breakdown::new()
                        .with(category::ELECTRICITY, 13_830)
                        .with(category::WATER, 7_820),
                ),
        );

        let surface = &ctx.surface;
        assert_eq!(surface.text(slots::TOTAL_PRICE).as_deref(), Some("32,600 won"));
        assert_eq!(
            surface.text(slots::DELTA_TEXT).as_deref(),
            Some("12% lower than last month! ▼")
        );
        assert_eq!(surface.attr(slots::DELTA_TEXT, "direction").as_deref(), Some("▼"));
        assert_eq!(surface.width(slots::BAR_LAST), Some(100));
        assert_eq!(surface.width(slots::BAR_NOW), Some(88));
        assert_eq!(surface.text(slots::ELEC_PRICE).as_deref(), Some("13,830 won"));
        assert_eq!(surface.width(slots::DONUT_ELEC), Some(42));
        assert_eq!(
            surface.attr(slots::DONUT_WATER, "title").as_deref(),
            Some("Water share 24%")
        );
    }

    #[test]
    fn test_gas_breakdown_fills_second_card() {
        let (ctx, _registry) = mounted(Page::Home);
        ctx.store.patch(
            StatePatch::new()
                .totals(Totals::new(21_650, 37_000))
                .breakdown(
                    Breakdown::new()
                        .with(category::ELECTRICITY, 13_830)
                        .with(category::GAS, 7_820),
                ),
        );

        let surface = &ctx.surface;
        assert_eq!(surface.text(slots::WATER_PRICE).as_deref(), Some("7,820 won"));
        assert_eq!(
            surface.attr(slots::WATER_PRICE, "category").as_deref(),
            Some("gas")
        );
        assert_eq!(surface.width(slots::DONUT_WATER), Some(36));
        assert_eq!(
            surface.attr(slots::DONUT_WATER, "title").as_deref(),
            Some("Gas share 36%")
        );
    }

    #[test]
    fn test_data_error_shows_failure_notice() {
        let (ctx, _registry) = mounted(Page::Home);
        ctx.bus.publish(DashboardEvent::DataError("502: Bad Gateway".into()));
        assert_eq!(ctx.surface.text(slots::DELTA_TEXT).as_deref(), Some(FAILED_TEXT));

        // Later changes keep the notice.
        ctx.store.set_goal(1000.0);
        assert_eq!(ctx.surface.text(slots::DELTA_TEXT).as_deref(), Some(FAILED_TEXT));
        assert_eq!(ctx.surface.text(slots::TOTAL_PRICE).as_deref(), Some("0 won"));
    }

    #[test]
    fn test_skipped_without_summary_slots() {
        let ctx = FeatureContext::in_memory(Page::Home, Surface::with_slots(["goalForm"]));
        let mut registry = FeatureRegistry::new();
        registry.register(DashboardRender).unwrap();
        let report = registry.init(ctx).unwrap();
        assert_eq!(report.skipped[0].1, SkipReason::PredicateFalse);
    }

    #[test]
    fn test_unmount_stops_rendering() {
        let (ctx, mut registry) = mounted(Page::Home);
        registry.teardown();
        ctx.store.patch(StatePatch::new().totals(Totals::new(1_000, 2_000)));
        assert_eq!(ctx.surface.text(slots::TOTAL_PRICE).as_deref(), Some(LOADING_TEXT));
    }
}
