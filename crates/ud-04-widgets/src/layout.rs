//! Page layouts: which slots each page offers.
//!
//! Feature applicability is decided by slot presence, so this table is what
//! makes e.g. `search-logic` mount on the search page and nowhere else.

use shared_types::entities::Page;
use shared_types::surface::Surface;

/// Slot identifiers.
pub mod slots {
    // Header
    pub const CLOCK: &str = "clock";
    pub const AREA: &str = "area";
    pub const NAV_DOTS: [&str; 5] = ["navDot0", "navDot1", "navDot2", "navDot3", "navDot4"];

    // Summary
    pub const TOTAL_PRICE: &str = "totalPrice";
    pub const DELTA_TEXT: &str = "deltaText";
    pub const BAR_LAST: &str = "barLast";
    pub const BAR_NOW: &str = "barNow";
    pub const ELEC_PRICE: &str = "elecPrice";
    pub const WATER_PRICE: &str = "waterPrice";
    pub const DONUT_ELEC: &str = "donutElec";
    pub const DONUT_WATER: &str = "donutWater";

    // Savings goal
    pub const GOAL_FORM: &str = "goalForm";
    pub const GOAL_INPUT: &str = "goalInput";
    pub const GOAL_CLEAR: &str = "goalClear";
    pub const SAVED_NOW: &str = "savedNow";
    pub const GOAL_PCT: &str = "goalPct";
    pub const GOAL_FILL: &str = "goalFill";
    pub const GOAL_HINT: &str = "goalHint";
    pub const GOAL_SUCCESS: &str = "goalSuccess";
    pub const GOAL_TOAST: &str = "goalToast";

    // Connection toast
    pub const TOAST: &str = "toast";
    pub const ADDR: &str = "addr";
    pub const COPY_BTN: &str = "copyBtn";
    pub const CLOSE_TOAST: &str = "closeToast";
    pub const TOAST_ERROR: &str = "toastError";

    // Search
    pub const QUERY: &str = "q";
    pub const RESULTS: &str = "results";
    pub const EMPTY: &str = "empty";
    pub const RECENT_KEYWORDS: &str = "recentKeywords";

    // Alerts
    pub const ALERT_LIST: &str = "alertList";
    pub const ALERT_STATUS: &str = "alertStatus";
}

const HEADER: &[&str] = &[slots::CLOCK, slots::AREA];

const NAV: &[&str] = &slots::NAV_DOTS;

const SUMMARY: &[&str] = &[
    slots::TOTAL_PRICE,
    slots::DELTA_TEXT,
    slots::BAR_LAST,
    slots::BAR_NOW,
    slots::ELEC_PRICE,
    slots::WATER_PRICE,
    slots::DONUT_ELEC,
    slots::DONUT_WATER,
];

const GOAL: &[&str] = &[
    slots::GOAL_FORM,
    slots::GOAL_INPUT,
    slots::GOAL_CLEAR,
    slots::SAVED_NOW,
    slots::GOAL_PCT,
    slots::GOAL_FILL,
    slots::GOAL_HINT,
    slots::GOAL_SUCCESS,
    slots::GOAL_TOAST,
];

const CONNECTION: &[&str] = &[
    slots::TOAST,
    slots::ADDR,
    slots::COPY_BTN,
    slots::CLOSE_TOAST,
    slots::TOAST_ERROR,
];

const SEARCH: &[&str] = &[
    slots::QUERY,
    slots::RESULTS,
    slots::EMPTY,
    slots::RECENT_KEYWORDS,
];

const ALERTS: &[&str] = &[slots::ALERT_LIST, slots::ALERT_STATUS];

/// Slot groups present on `page`.
fn sections(page: Page) -> Vec<&'static [&'static str]> {
    let mut sections = vec![HEADER, NAV];
    match page {
        Page::Home => sections.extend([SUMMARY, CONNECTION]),
        Page::Cost | Page::Goals => sections.push(GOAL),
        Page::Search => sections.push(SEARCH),
        Page::Alerts => sections.push(ALERTS),
        Page::Analytics | Page::Settings | Page::Log => {}
    }
    sections
}

/// A fresh surface laid out for `page`.
pub fn surface_for(page: Page) -> Surface {
    let surface = Surface::new();
    for id in sections(page).into_iter().flatten() {
        surface.add_slot(*id);
    }
    surface
}
