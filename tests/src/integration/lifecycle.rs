//! # Page Lifecycle
//!
//! Whole pages wired by `dashboard-runtime`: boot, initial load, user
//! input, unload, and a second page load reading what the first persisted.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use dashboard_runtime::{Dashboard, DashboardConfig};
    use shared_bus::{names, UserInput};
    use shared_types::entities::{Page, Period, Totals};
    use shared_types::preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use ud_02_feature_registry::{FeatureState, SkipReason};
    use ud_04_widgets::slots;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn config(page: Page) -> DashboardConfig {
        DashboardConfig {
            page,
            prefs_path: None,
            ..DashboardConfig::default()
        }
    }

    fn booted(page: Page, preferences: Arc<dyn PreferenceStore>) -> Dashboard {
        let mut dashboard = Dashboard::build(config(page), preferences).unwrap();
        let report = dashboard.boot();
        assert!(report.is_clean(), "boot failures: {:?}", report.failures);
        dashboard
    }

    /// Minimal backend answering `/api/donut` for August and July 2025.
    async fn donut_backend() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = [0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let body = if request.contains("periodYm=2025-08") {
                    r#"{"periodYm":"2025-08","elec":13830,"gas":7820,"total":21650,"elecRatio":0.64,"gasRatio":0.36}"#
                } else {
                    r#"{"periodYm":"2025-07","elec":20000,"gas":17000,"total":37000,"elecRatio":0.54,"gasRatio":0.46}"#
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}")
    }

    // =============================================================================
    // HOME PAGE
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_home_page_skips_other_pages_widgets() {
        let mut dashboard = booted(Page::Home, Arc::new(MemoryPreferences::new()));
        let registry = dashboard.registry();

        assert_eq!(
            registry.state("savings-goal"),
            Some(FeatureState::Skipped(SkipReason::PredicateFalse))
        );
        assert_eq!(
            registry.state("search-logic"),
            Some(FeatureState::Skipped(SkipReason::PageMismatch))
        );
        assert_eq!(
            registry.state("alerts-feed"),
            Some(FeatureState::Skipped(SkipReason::PageMismatch))
        );
        assert_eq!(
            dashboard.surface().text(slots::TOTAL_PRICE).as_deref(),
            Some("Loading usage...")
        );

        assert!(dashboard.settle().await.is_empty());
        assert_eq!(
            dashboard.surface().text(slots::DELTA_TEXT).as_deref(),
            Some("12% lower than last month! ▼")
        );
        assert_eq!(
            dashboard.surface().text(slots::ADDR).as_deref(),
            Some("http://192.168.219.100:5500")
        );
        dashboard.unload();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unload_before_load_leaves_state_untouched() {
        let mut dashboard = booted(Page::Home, Arc::new(MemoryPreferences::new()));
        let report = dashboard.unload();
        assert_eq!(report.cancelled_mounts, vec!["data-loader"]);
        assert!(report.is_clean());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(dashboard.state().totals, Totals::default());
        assert_eq!(dashboard.bus().handler_count(&names::STATE_CHANGED), 0);
    }

    #[tokio::test]
    async fn test_home_page_against_backend() {
        let origin = donut_backend().await;
        let config = DashboardConfig {
            api_origin: origin,
            period: Some(Period::parse("2025-08").unwrap()),
            ..config(Page::Home)
        };
        let mut dashboard = Dashboard::build(config, Arc::new(MemoryPreferences::new())).unwrap();
        dashboard.boot();

        let failures = tokio::time::timeout(Duration::from_secs(5), dashboard.settle())
            .await
            .unwrap();
        assert!(failures.is_empty(), "load failures: {failures:?}");

        assert_eq!(dashboard.state().totals, Totals::new(21_650, 37_000));
        assert_eq!(dashboard.surface().width(slots::DONUT_ELEC), Some(64));
        assert_eq!(
            dashboard.surface().text(slots::TOTAL_PRICE).as_deref(),
            Some("21,650 won")
        );
        assert_eq!(
            dashboard.surface().text(slots::WATER_PRICE).as_deref(),
            Some("7,820 won")
        );
        assert_eq!(dashboard.surface().width(slots::DONUT_WATER), Some(36));
        assert_eq!(
            dashboard.surface().attr(slots::DONUT_WATER, "title").as_deref(),
            Some("Gas share 36%")
        );
        dashboard.unload();
    }

    // =============================================================================
    // GOAL PERSISTENCE ACROSS PAGE LOADS
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_goal_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let prefs: Arc<dyn PreferenceStore> = Arc::new(FilePreferences::open(&path).unwrap());
        let mut first = booted(Page::Cost, prefs);
        first.settle().await;
        assert!(first.send(UserInput::GoalSubmit("10000".into())).is_clean());
        assert!(first.render().contains("goalPct: 44%"));
        first.unload();

        let prefs: Arc<dyn PreferenceStore> = Arc::new(FilePreferences::open(&path).unwrap());
        let mut second = booted(Page::Cost, prefs);
        assert_eq!(second.state().goal_won, 10_000);
        second.settle().await;
        assert_eq!(second.surface().text(slots::GOAL_PCT).as_deref(), Some("44%"));

        second.send(UserInput::GoalClear);
        assert_eq!(second.state().goal_won, 0);
        second.unload();

        let prefs = FilePreferences::open(&path).unwrap();
        assert_eq!(prefs.get("saving-goal-won"), None);
    }

    // =============================================================================
    // SEARCH PAGE
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_search_then_unload_stops_reacting() {
        let mut dashboard = booted(Page::Search, Arc::new(MemoryPreferences::new()));

        dashboard.send(UserInput::Search("  electricity ".into()));
        assert_eq!(dashboard.surface().items(slots::RESULTS).len(), 4);
        assert_eq!(dashboard.state().recent_keywords, vec!["electricity"]);

        dashboard.send(UserInput::ChipClicked("Water".into()));
        assert_eq!(dashboard.surface().text(slots::QUERY).as_deref(), Some("electricity"));
        assert_eq!(dashboard.state().recent_keywords, vec!["electricity"]);

        dashboard.unload();
        let report = dashboard.send(UserInput::Search("gas".into()));
        assert_eq!(report.delivered, 0);
        assert_eq!(dashboard.state().recent_keywords, vec!["electricity"]);
    }

    // =============================================================================
    // ALERTS PAGE
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_alerts_page_without_backend() {
        let mut dashboard = booted(Page::Alerts, Arc::new(MemoryPreferences::new()));
        assert_eq!(
            dashboard.surface().text(slots::ALERT_STATUS).as_deref(),
            Some("Alert stream unavailable (no API origin configured)")
        );
        assert!(dashboard.surface().items(slots::ALERT_LIST).is_empty());
        assert!(dashboard.unload().is_clean());
    }
}
