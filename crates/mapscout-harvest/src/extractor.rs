//! Tolerant per-field extraction of a listing detail panel.
//!
//! Each field has its own isolated rule returning `Option<String>`; a rule
//! that finds nothing logs a trace entry and leaves its field absent. Rules
//! never affect each other — listing pages are heterogeneous and a missing
//! rating or missing hours is a normal outcome.

use crate::selectors;
use mapscout_core::LocationRecord;
use scraper::{ElementRef, Html};

/// Parse a listing panel snapshot into a [`LocationRecord`].
///
/// `maps_url` is the browser's current URL at extraction time; it is not
/// parsed from the DOM. The returned record always has the complete field
/// shape regardless of which rules succeeded.
#[must_use]
pub fn extract(html: &str, maps_url: Option<String>) -> LocationRecord {
    let doc = Html::parse_document(html);
    let (address, phone) = info_bar_fields(&doc);

    LocationRecord {
        category: capture("category", first_text(&doc, &selectors::CATEGORY)),
        name: capture("name", first_text(&doc, &selectors::NAME)),
        phone: capture("phone", phone),
        maps_url,
        website: capture("website", website(&doc)),
        email: None,
        business_status: capture("business_status", business_status(&doc)),
        address: capture("address", address),
        total_reviews: capture("total_reviews", total_reviews(&doc)),
        booking_links: None,
        rating: capture("rating", rating(&doc)),
        hours: capture("hours", first_text(&doc, &selectors::HOURS)),
    }
}

/// Record a field-level miss without letting it affect any other rule.
fn capture(field: &'static str, value: Option<String>) -> Option<String> {
    if value.is_none() {
        tracing::trace!(field, "no value extracted");
    }
    value
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(doc: &Html, selector: &scraper::Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Accessibility label of the rating element, with the literal word
/// "stars" stripped.
fn rating(doc: &Html) -> Option<String> {
    doc.select(&selectors::RATING)
        .next()
        .and_then(|el| el.value().attr("aria-label"))
        .map(|label| label.replace("stars", "").trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Second child of the reviews summary container; the first child is the
/// rating itself.
fn total_reviews(doc: &Html) -> Option<String> {
    doc.select(&selectors::REVIEWS_SUMMARY)
        .next()?
        .children()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Walk the info-bar buttons, capturing only the two recognized tooltip
/// vocabulary members. Buttons with any other tooltip contribute nothing.
fn info_bar_fields(doc: &Html) -> (Option<String>, Option<String>) {
    let mut address = None;
    let mut phone = None;

    for button in doc.select(&selectors::INFO_BAR_BUTTON) {
        let Some(tooltip) = button.value().attr(selectors::TOOLTIP_ATTR) else {
            continue;
        };
        let Some(label) = button.select(&selectors::INFO_BAR_LABEL).next() else {
            continue;
        };
        let text = element_text(label);
        if text.is_empty() {
            continue;
        }
        match tooltip {
            selectors::TOOLTIP_COPY_ADDRESS => address = Some(text),
            selectors::TOOLTIP_COPY_PHONE => phone = Some(text),
            _ => {}
        }
    }

    (address, phone)
}

fn website(doc: &Html) -> Option<String> {
    doc.select(&selectors::WEBSITE)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

/// First non-recursive child span of the status container.
fn business_status(doc: &Html) -> Option<String> {
    doc.select(&selectors::BUSINESS_STATUS)
        .next()?
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(element_text)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PANEL: &str = r#"
        <div role="main">
            <div class="tAiQdd"><h1 class="DUwDvf"> Baker Street Cafe </h1></div>
            <span class="ceNzKf" aria-label="4.5 stars"></span>
            <div class="F7nice"><span>4.5</span><span>(1,204)</span></div>
            <button class="DkEaL">Coffee shop</button>
            <span class="ZDu9vd"><span>Open</span><span>Closes 6 pm</span></span>
            <button class="CsEnBe" data-tooltip="Copy address">
                <div class="rogA2c">221B Baker Street</div>
            </button>
            <button class="CsEnBe" data-tooltip="Copy phone number">
                <div class="rogA2c">+44 20 7946 0123</div>
            </button>
            <button class="CsEnBe" data-tooltip="Copy plus code">
                <div class="rogA2c">GV5C+XW London</div>
            </button>
            <a aria-label="Website: bakerstreetcafe.example" href="https://bakerstreetcafe.example/">Website</a>
            <div class="t39EBf">Monday 8am to 6pm</div>
        </div>
    "#;

    #[test]
    fn test_extract_full_panel() {
        let record = extract(FULL_PANEL, Some("https://maps.example/place/1".to_string()));

        assert_eq!(record.name.as_deref(), Some("Baker Street Cafe"));
        assert_eq!(record.rating.as_deref(), Some("4.5"));
        assert_eq!(record.total_reviews.as_deref(), Some("(1,204)"));
        assert_eq!(record.category.as_deref(), Some("Coffee shop"));
        assert_eq!(record.business_status.as_deref(), Some("Open"));
        assert_eq!(record.address.as_deref(), Some("221B Baker Street"));
        assert_eq!(record.phone.as_deref(), Some("+44 20 7946 0123"));
        assert_eq!(
            record.website.as_deref(),
            Some("https://bakerstreetcafe.example/")
        );
        assert_eq!(record.hours.as_deref(), Some("Monday 8am to 6pm"));
        assert_eq!(
            record.maps_url.as_deref(),
            Some("https://maps.example/place/1")
        );
        // Never populated by extraction
        assert!(record.email.is_none());
        assert!(record.booking_links.is_none());
    }

    #[test]
    fn test_extract_empty_panel_keeps_full_shape() {
        let record = extract("<div role='main'></div>", None);
        assert!(record.is_empty());

        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(
            value.as_object().map(serde_json::Map::len),
            Some(LocationRecord::FIELD_COUNT)
        );
    }

    #[test]
    fn test_info_bar_recognized_tooltip() {
        let html = r#"
            <button class="CsEnBe" data-tooltip="Copy address">
                <div class="rogA2c">221B Baker Street</div>
            </button>
        "#;
        let record = extract(html, None);
        assert_eq!(record.address.as_deref(), Some("221B Baker Street"));
        assert!(record.phone.is_none());
    }

    #[test]
    fn test_info_bar_unrecognized_tooltip_ignored() {
        let html = r#"
            <button class="CsEnBe" data-tooltip="Copy plus code">
                <div class="rogA2c">GV5C+XW London</div>
            </button>
            <button class="CsEnBe" data-tooltip="Open website">
                <div class="rogA2c">example.com</div>
            </button>
        "#;
        let record = extract(html, None);
        assert!(record.address.is_none());
        assert!(record.phone.is_none());
        assert!(record.website.is_none());
    }

    #[test]
    fn test_rating_strips_stars_literal() {
        let html = r#"<span class="ceNzKf" aria-label=" 3.0 stars "></span>"#;
        let record = extract(html, None);
        assert_eq!(record.rating.as_deref(), Some("3.0"));
    }

    #[test]
    fn test_one_rule_failing_does_not_block_others() {
        // Reviews container present but malformed (single child); rating
        // element carries no aria-label. Name still extracts.
        let html = r#"
            <div class="tAiQdd"><h1 class="DUwDvf">Solo</h1></div>
            <span class="ceNzKf"></span>
            <div class="F7nice"><span>4.0</span></div>
        "#;
        let record = extract(html, None);
        assert_eq!(record.name.as_deref(), Some("Solo"));
        assert!(record.rating.is_none());
        assert!(record.total_reviews.is_none());
    }

    #[test]
    fn test_business_status_takes_first_child_span() {
        let html = r#"<span class="ZDu9vd"><span>Permanently closed</span><span>extra</span></span>"#;
        let record = extract(html, None);
        assert_eq!(record.business_status.as_deref(), Some("Permanently closed"));
    }
}
