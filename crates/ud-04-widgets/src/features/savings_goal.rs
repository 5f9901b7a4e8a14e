//! Monthly savings goal: progress against last month, goal form input.

use std::sync::Arc;

use shared_bus::{names, DashboardEvent, UserInput};
use shared_types::entities::DashboardState;
use shared_types::surface::Surface;
use tracing::debug;
use ud_01_state_store::parse_goal_input;
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::layout::slots;
use crate::projection::GoalView;
use crate::toast::{AfterFlash, Flash};

#[derive(Debug, Default, Clone, Copy)]
pub struct SavingsGoal;

fn render(surface: &Surface, state: &DashboardState) {
    let view = GoalView::of(state);
    surface.set_text(slots::SAVED_NOW, &view.saved_text);
    surface.set_text(slots::GOAL_PCT, format!("{}%", view.percent));
    surface.set_width(slots::GOAL_FILL, view.percent);
    surface.set_text(slots::GOAL_HINT, &view.hint);
    surface.set_visible(slots::GOAL_SUCCESS, view.reached);
    if view.goal > 0 {
        surface.set_text(slots::GOAL_INPUT, view.goal.to_string());
    }
}

impl Feature for SavingsGoal {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("savings-goal")
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        ctx.surface.has(slots::GOAL_FORM)
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        ctx.surface.set_visible(slots::GOAL_TOAST, false);
        render(&ctx.surface, &ctx.store.get());

        let on_change = {
            let surface = Arc::clone(&ctx.surface);
            ctx.bus.on_fn(names::STATE_CHANGED, move |event: &DashboardEvent| {
                if let Some(state) = event.state() {
                    render(&surface, state);
                }
                Ok(())
            })
        };

        let on_input = {
            let store = Arc::clone(&ctx.store);
            let flash = Flash::new(Arc::clone(&ctx.surface), slots::GOAL_TOAST);
            ctx.bus.on_fn(names::USER_INPUT, move |event: &DashboardEvent| {
                match event {
                    DashboardEvent::Input(UserInput::GoalSubmit(raw)) => {
                        let amount = parse_goal_input(raw);
                        debug!(raw = raw.as_str(), amount, "Goal form submitted");
                        store.set_goal(amount);
                        flash.show("Goal saved", AfterFlash::Hide);
                    }
                    DashboardEvent::Input(UserInput::GoalClear) => {
                        store.clear_goal();
                        flash.show("Goal cleared", AfterFlash::Hide);
                    }
                    _ => {}
                }
                Ok(())
            })
        };

        Ok(MountHandle::new()
            .with_subscription(on_change)
            .with_subscription(on_input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface_for;
    use crate::toast::FLASH_DURATION;
    use shared_bus::EventPublisher;
    use shared_types::entities::{Page, StatePatch, Totals};
    use shared_types::preferences::keys;
    use std::time::Duration;
    use ud_02_feature_registry::FeatureRegistry;

    fn mounted(page: Page) -> (FeatureContext, FeatureRegistry) {
        let ctx = FeatureContext::in_memory(page, surface_for(page));
        ctx.store
            .patch(StatePatch::new().totals(Totals::new(32_600, 37_000)));
        let mut registry = FeatureRegistry::new();
        registry.register(SavingsGoal).unwrap();
        registry.init(ctx.clone()).unwrap();
        (ctx, registry)
    }

    #[test]
    fn test_prompt_without_goal() {
        let (ctx, _registry) = mounted(Page::Cost);
        let surface = &ctx.surface;
        assert_eq!(
            surface.text(slots::SAVED_NOW).as_deref(),
            Some("Saved this month: 4,400 won")
        );
        assert_eq!(surface.text(slots::GOAL_PCT).as_deref(), Some("0%"));
        assert_eq!(
            surface.text(slots::GOAL_HINT).as_deref(),
            Some("Set a goal to track your progress")
        );
        assert_eq!(surface.is_visible(slots::GOAL_SUCCESS), Some(false));
        assert_eq!(surface.is_visible(slots::GOAL_TOAST), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_sets_goal_and_flashes() {
        let (ctx, _registry) = mounted(Page::Goals);
        let report = ctx
            .bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit(" 10000 ".into())));
        assert!(report.is_clean());

        let surface = &ctx.surface;
        assert_eq!(ctx.store.get().goal_won, 10_000);
        assert_eq!(
            ctx.preferences.get(keys::SAVING_GOAL_WON).as_deref(),
            Some("10000")
        );
        assert_eq!(surface.text(slots::GOAL_PCT).as_deref(), Some("44%"));
        assert_eq!(surface.width(slots::GOAL_FILL), Some(44));
        assert_eq!(surface.text(slots::GOAL_INPUT).as_deref(), Some("10000"));
        assert_eq!(surface.text(slots::GOAL_TOAST).as_deref(), Some("Goal saved"));
        assert_eq!(surface.is_visible(slots::GOAL_TOAST), Some(true));

        tokio::time::sleep(FLASH_DURATION + Duration::from_millis(10)).await;
        assert_eq!(surface.is_visible(slots::GOAL_TOAST), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reached_goal_shows_success() {
        let (ctx, _registry) = mounted(Page::Cost);
        ctx.bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit("4000".into())));
        assert_eq!(ctx.surface.text(slots::GOAL_PCT).as_deref(), Some("100%"));
        assert_eq!(ctx.surface.is_visible(slots::GOAL_SUCCESS), Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_resets_goal() {
        let (ctx, _registry) = mounted(Page::Cost);
        ctx.bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit("10000".into())));
        ctx.bus.publish(DashboardEvent::Input(UserInput::GoalClear));

        assert_eq!(ctx.store.get().goal_won, 0);
        assert_eq!(ctx.preferences.get(keys::SAVING_GOAL_WON), None);
        assert_eq!(
            ctx.surface.text(slots::GOAL_TOAST).as_deref(),
            Some("Goal cleared")
        );
        assert_eq!(ctx.surface.text(slots::GOAL_PCT).as_deref(), Some("0%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_numeric_submit_reads_as_zero() {
        let (ctx, _registry) = mounted(Page::Cost);
        ctx.bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit("lots".into())));
        assert_eq!(ctx.store.get().goal_won, 0);
        assert_eq!(
            ctx.surface.text(slots::GOAL_HINT).as_deref(),
            Some("Set a goal to track your progress")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmounted_ignores_input() {
        let (ctx, mut registry) = mounted(Page::Cost);
        registry.teardown();
        ctx.bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit("10000".into())));
        assert_eq!(ctx.store.get().goal_won, 0);
    }

    #[test]
    fn test_skipped_without_goal_form() {
        let ctx = FeatureContext::in_memory(Page::Search, surface_for(Page::Search));
        assert!(!SavingsGoal.when(&ctx));
    }
}
