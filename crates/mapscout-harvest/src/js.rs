//! The scripts the harvester and pipeline evaluate against the live page.
//!
//! Each script is a self-contained expression that re-queries its target
//! element, so the feed is located fresh on every use even when the page
//! replaces it. Selector literals come from [`crate::selectors`].

use crate::selectors;
use once_cell::sync::Lazy;

/// `true` when the scrollable results feed is present.
pub static FEED_EXISTS: Lazy<String> = Lazy::new(|| {
    format!(
        r#"document.querySelector("{}") !== null"#,
        selectors::FEED
    )
});

/// Scroll the feed to its maximum extent. Evaluates to `null`.
pub static SCROLL_FEED_TO_BOTTOM: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(() => {{ const feed = document.querySelector("{}"); if (feed) {{ feed.scrollTo(0, feed.scrollHeight); }} return null; }})()"#,
        selectors::FEED
    )
});

/// Current scroll height of the feed, or `-1` when the feed is absent.
pub static FEED_SCROLL_HEIGHT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(() => {{ const feed = document.querySelector("{}"); return feed ? feed.scrollHeight : -1; }})()"#,
        selectors::FEED
    )
});

/// `true` when the end-of-results marker is rendered.
pub static END_MARKER_PRESENT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"document.querySelector("{}") !== null"#,
        selectors::END_MARKER
    )
});

/// Click the last rendered entry to trigger additional lazy loading.
/// Throws when no entries are rendered; the caller swallows that.
pub static CLICK_LAST_ENTRY: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(() => {{ const entries = document.querySelectorAll("{}"); entries[entries.length - 1].click(); return null; }})()"#,
        selectors::RESULT_LINK
    )
});

/// Outer HTML of the feed, or `null` when the feed is absent.
pub static FEED_OUTER_HTML: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(() => {{ const feed = document.querySelector("{}"); return feed ? feed.outerHTML : null; }})()"#,
        selectors::FEED
    )
});

/// Outer HTML of a listing's detail panel, or `null` when absent.
pub static MAIN_PANEL_OUTER_HTML: Lazy<String> = Lazy::new(|| {
    format!(
        r#"(() => {{ const main = document.querySelector("{}"); return main ? main.outerHTML : null; }})()"#,
        selectors::MAIN_PANEL
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_embed_policy_selectors() {
        assert!(FEED_EXISTS.contains(selectors::FEED));
        assert!(SCROLL_FEED_TO_BOTTOM.contains(selectors::FEED));
        assert!(END_MARKER_PRESENT.contains(selectors::END_MARKER));
        assert!(CLICK_LAST_ENTRY.contains(selectors::RESULT_LINK));
        assert!(MAIN_PANEL_OUTER_HTML.contains(selectors::MAIN_PANEL));
    }
}
