//! Keyword search demo with recent-keyword pills.

use std::sync::Arc;

use shared_bus::{names, DashboardEvent, UserInput};
use shared_types::entities::Page;
use shared_types::surface::Surface;
use tracing::debug;
use ud_01_state_store::StateStoreApi;
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::layout::slots;

/// Filter tab labels; clicking one does not start a search.
pub const FILTER_TABS: [&str; 5] = ["All", "Electricity", "Water", "Gas", "Saving tips"];

const PLACEHOLDER: &str =
    "[Suggested] Search results appear here · Type a keyword or tap a chip above.";

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchLogic;

/// Canned result cards for `keyword`.
pub fn sample_results(keyword: &str) -> Vec<String> {
    [
        (
            format!("'{keyword}' summary"),
            format!("Usage logs and alerts for {keyword} over the last month."),
        ),
        (
            format!("{keyword} saving tips"),
            "A quick checklist with the expected savings.".to_string(),
        ),
        (
            format!("{keyword} anomaly detection"),
            "Outlier rules and past occurrences.".to_string(),
        ),
        (
            format!("{keyword} dashboard shortcut"),
            "Jump to the analytics view with the related widgets.".to_string(),
        ),
    ]
    .into_iter()
    .map(|(title, desc)| format!("[Result] {title} · {desc}"))
    .collect()
}

fn render_recent(surface: &Surface, keywords: Vec<String>) {
    surface.set_items(slots::RECENT_KEYWORDS, keywords);
}

fn search(surface: &Surface, store: &dyn StateStoreApi, raw: &str) {
    let query = raw.trim();
    if query.is_empty() {
        surface.set_items(slots::RESULTS, vec![PLACEHOLDER.to_string()]);
        surface.set_visible(slots::EMPTY, false);
        return;
    }

    store.add_recent_keyword(query);
    render_recent(surface, store.get().recent_keywords);

    let results = sample_results(query);
    surface.set_visible(slots::EMPTY, results.is_empty());
    surface.set_items(slots::RESULTS, results);
    debug!(query, "Search rendered");
}

impl Feature for SearchLogic {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("search-logic").on_pages([Page::Search])
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        ctx.surface.has(slots::QUERY)
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        render_recent(&ctx.surface, ctx.store.get().recent_keywords);

        let surface = Arc::clone(&ctx.surface);
        let store = Arc::clone(&ctx.store);
        let on_input = ctx.bus.on_fn(names::USER_INPUT, move |event: &DashboardEvent| {
            let query = match event {
                DashboardEvent::Input(UserInput::Search(raw)) => raw.as_str(),
                DashboardEvent::Input(UserInput::ChipClicked(label)) => {
                    let label = label.trim();
                    if FILTER_TABS.contains(&label) {
                        return Ok(());
                    }
                    label
                }
                _ => return Ok(()),
            };
            surface.set_text(slots::QUERY, query.trim());
            search(&surface, store.as_ref(), query);
            Ok(())
        });

        Ok(MountHandle::new().with_subscription(on_input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::surface_for;
    use shared_bus::EventPublisher;
    use ud_02_feature_registry::FeatureRegistry;

    fn mounted() -> (FeatureContext, FeatureRegistry) {
        let ctx = FeatureContext::in_memory(Page::Search, surface_for(Page::Search));
        let mut registry = FeatureRegistry::new();
        registry.register(SearchLogic).unwrap();
        registry.init(ctx.clone()).unwrap();
        (ctx, registry)
    }

    fn send(ctx: &FeatureContext, input: UserInput) {
        ctx.bus.publish(DashboardEvent::Input(input));
    }

    #[test]
    fn test_search_renders_results_and_recent() {
        let (ctx, _registry) = mounted();
        send(&ctx, UserInput::Search("  electricity bill ".into()));

        let surface = &ctx.surface;
        assert_eq!(surface.text(slots::QUERY).as_deref(), Some("electricity bill"));
        let results = surface.items(slots::RESULTS);
        assert_eq!(results.len(), 4);
        assert!(results[0].contains("'electricity bill' summary"));
        assert_eq!(surface.is_visible(slots::EMPTY), Some(false));
        assert_eq!(surface.items(slots::RECENT_KEYWORDS), vec!["electricity bill"]);
    }

    #[test]
    fn test_blank_query_shows_placeholder() {
        let (ctx, _registry) = mounted();
        send(&ctx, UserInput::Search("   ".into()));
        assert_eq!(ctx.surface.items(slots::RESULTS), vec![PLACEHOLDER]);
        assert_eq!(ctx.surface.is_visible(slots::EMPTY), Some(false));
        assert!(ctx.store.get().recent_keywords.is_empty());
    }

    #[test]
    fn test_filter_tabs_are_ignored() {
        let (ctx, _registry) = mounted();
        for tab in FILTER_TABS {
            send(&ctx, UserInput::ChipClicked(format!(" {tab} ")));
        }
        assert!(ctx.surface.items(slots::RESULTS).is_empty());
        assert!(ctx.store.get().recent_keywords.is_empty());
    }

    #[test]
    fn test_chip_and_recent_pill_search() {
        let (ctx, _registry) = mounted();
        send(&ctx, UserInput::ChipClicked("Standby power".into()));
        send(&ctx, UserInput::Search("gas".into()));
        // A recent pill click arrives as a chip click with its keyword.
        send(&ctx, UserInput::ChipClicked("Standby power".into()));

        assert_eq!(ctx.surface.text(slots::QUERY).as_deref(), Some("Standby power"));
        assert_eq!(
            ctx.surface.items(slots::RECENT_KEYWORDS),
            vec!["gas", "Standby power"]
        );
    }

    #[test]
    fn test_recent_rendered_at_mount() {
        let ctx = FeatureContext::in_memory(Page::Search, surface_for(Page::Search));
        ctx.store.add_recent_keyword("water");
        let handle = SearchLogic.mount(&ctx).unwrap();
        assert_eq!(ctx.surface.items(slots::RECENT_KEYWORDS), vec!["water"]);
        handle.release();
    }

    #[test]
    fn test_only_on_search_page() {
        let info = SearchLogic.info();
        assert!(info.applies_to(Page::Search));
        assert!(!info.applies_to(Page::Home));
    }
}
