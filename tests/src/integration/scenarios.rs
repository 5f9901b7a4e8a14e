//! # End-to-End Scenarios
//!
//! Fixed figures pushed through the store, the projections and the mounted
//! widgets, checked on the render surface:
//!
//! 1. 32,600 won now vs 37,000 won last month renders as 12% lower
//! 2. 13,830 won of electricity in a 21,650 won total is a 64% share
//! 3. A 10,000 won goal with 4,400 won saved is 44% and not yet reached
//! 4. Saving a goal for period `2025-13` is rejected locally with a 400

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;
    use std::net::TcpListener;
    use std::sync::Arc;

    use shared_bus::{DashboardEvent, EventPublisher, UserInput};
    use shared_types::entities::{category, Breakdown, Page, StatePatch, Totals};
    use shared_types::preferences::keys;
    use ud_02_feature_registry::{Feature, FeatureContext, FeatureRegistry};
    use ud_03_api_client::{ApiClient, ClientError};
    use ud_04_widgets::features::{DashboardRender, SavingsGoal};
    use ud_04_widgets::projection::{percent_change, share, Direction, GoalView};
    use ud_04_widgets::{slots, surface_for};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Mount a single feature on a freshly laid out page.
    fn mounted<F: Feature + 'static>(page: Page, feature: F) -> (FeatureContext, FeatureRegistry) {
        let ctx = FeatureContext::in_memory(page, surface_for(page));
        let mut registry = FeatureRegistry::new();
        registry.register(feature).unwrap();
        let report = registry.init(ctx.clone()).unwrap();
        assert_eq!(report.mounted.len(), 1);
        (ctx, registry)
    }

    // =============================================================================
    // SCENARIO 1: MONTH-OVER-MONTH CHANGE
    // =============================================================================

    #[test]
    fn test_scenario_lower_than_last_month() {
        let totals = Totals::new(32_600, 37_000);
        assert_eq!(percent_change(totals), -12);
        assert_eq!(Direction::from_percent(-12), Direction::Lower);

        let (ctx, _registry) = mounted(Page::Home, DashboardRender);
        ctx.store.patch(StatePatch::new().totals(totals));

        let surface = &ctx.surface;
        assert_eq!(
            surface.text(slots::TOTAL_PRICE).as_deref(),
            Some("32,600 won")
        );
        assert_eq!(
            surface.text(slots::DELTA_TEXT).as_deref(),
            Some("12% lower than last month! ▼")
        );
        assert_eq!(
            surface.attr(slots::DELTA_TEXT, "direction").as_deref(),
            Some("▼")
        );
    }

    // =============================================================================
    // SCENARIO 2: CATEGORY SHARE
    // =============================================================================

    #[test]
    fn test_scenario_electricity_share() {
        assert_eq!(share(13_830, 21_650), 64);

        let (ctx, _registry) = mounted(Page::Home, DashboardRender);
        ctx.store.patch(
            StatePatch::new()
                .totals(Totals::new(21_650, 37_000))
                .breakdown(Breakdown::new().with(category::ELECTRICITY, 13_830)),
        );

        assert_eq!(ctx.surface.width(slots::DONUT_ELEC), Some(64));
        assert_eq!(
            ctx.surface.attr(slots::DONUT_ELEC, "--percent").as_deref(),
            Some("64")
        );
        assert_eq!(
            ctx.surface.text(slots::ELEC_PRICE).as_deref(),
            Some("13,830 won")
        );
    }

    // =============================================================================
    // SCENARIO 3: SAVINGS GOAL PROGRESS
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_scenario_goal_progress() {
        let (ctx, _registry) = mounted(Page::Cost, SavingsGoal);
        ctx.store
            .patch(StatePatch::new().totals(Totals::new(32_600, 37_000)));

        let report = ctx
            .bus
            .publish(DashboardEvent::Input(UserInput::GoalSubmit("10000".into())));
        assert!(report.is_clean());

        let state = ctx.store.get();
        assert_eq!(state.goal_won, 10_000);
        let view = GoalView::of(&state);
        assert_eq!(view.saved, 4_400);
        assert_eq!(view.percent, 44);
        assert!(!view.reached);

        let surface = &ctx.surface;
        assert_eq!(surface.text(slots::GOAL_PCT).as_deref(), Some("44%"));
        assert_eq!(surface.width(slots::GOAL_FILL), Some(44));
        assert_eq!(surface.is_visible(slots::GOAL_SUCCESS), Some(false));
        assert_eq!(
            surface.text(slots::GOAL_HINT).as_deref(),
            Some("Goal: 10,000 won · Remaining 5,600 won")
        );
        assert_eq!(ctx.preferences.get(keys::SAVING_GOAL_WON).as_deref(), Some("10000"));
    }

    // =============================================================================
    // SCENARIO 4: PERIOD VALIDATION BEFORE THE NETWORK
    // =============================================================================

    #[tokio::test]
    async fn test_scenario_invalid_period_never_reaches_network() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let api = ApiClient::new(origin).unwrap();

        let err = api.save_goal(1, "2025-13", 10_000).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(err.is_validation());
        assert_eq!(err.status(), Some(400));

        let err = api.save_goal(1, "2025-08", -5).await.unwrap_err();
        assert!(err.is_validation());

        let accepted = listener.accept();
        assert!(matches!(accepted, Err(e) if e.kind() == ErrorKind::WouldBlock));
    }
}
