//! The selector policy: every DOM selector and attribute vocabulary the
//! pipeline matches against lives in this one table. Site-markup drift means
//! editing this module, never the harvesting or extraction logic.

use once_cell::sync::Lazy;
use scraper::Selector;

/// The scrollable infinite-scroll container on the search results page.
pub const FEED: &str = "[role='feed']";
/// Anchor identifying one listing entry inside the feed.
pub const RESULT_LINK: &str = "a.hfpxzc";
/// Element whose presence signals the feed has no more entries to load.
pub const END_MARKER: &str = ".PbZDve";
/// Root container of a listing's detail panel.
pub const MAIN_PANEL: &str = "[role='main']";

/// Attribute carrying the info-bar button vocabulary.
pub const TOOLTIP_ATTR: &str = "data-tooltip";
/// Tooltip marking the address info-bar button.
pub const TOOLTIP_COPY_ADDRESS: &str = "Copy address";
/// Tooltip marking the phone info-bar button.
pub const TOOLTIP_COPY_PHONE: &str = "Copy phone number";

fn parse(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid selector")
}

pub static RESULT_LINK_SEL: Lazy<Selector> = Lazy::new(|| parse(RESULT_LINK));

pub static NAME: Lazy<Selector> = Lazy::new(|| parse(".tAiQdd h1.DUwDvf"));
pub static RATING: Lazy<Selector> = Lazy::new(|| parse("span.ceNzKf"));
pub static REVIEWS_SUMMARY: Lazy<Selector> = Lazy::new(|| parse("div.F7nice"));
pub static INFO_BAR_BUTTON: Lazy<Selector> = Lazy::new(|| parse("button.CsEnBe"));
pub static INFO_BAR_LABEL: Lazy<Selector> = Lazy::new(|| parse("div.rogA2c"));
pub static WEBSITE: Lazy<Selector> = Lazy::new(|| parse(r#"a[aria-label*="Website:"]"#));
pub static HOURS: Lazy<Selector> = Lazy::new(|| parse("div.t39EBf"));
pub static CATEGORY: Lazy<Selector> = Lazy::new(|| parse("button.DkEaL"));
pub static BUSINESS_STATUS: Lazy<Selector> = Lazy::new(|| parse("span.ZDu9vd"));
