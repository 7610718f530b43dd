//! Listing parser for extracting item records from search result markup
//!
//! This module turns one page of raw storefront markup into structured
//! [`ItemRecord`]s. Every per-entry lookup is best-effort: a missing
//! substructure yields `None` rather than an error, and entries that fail the
//! validity gate are silently dropped.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One extracted listing entry
///
/// The serialized field names are the stable, self-describing schema of the
/// per-item JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Numeric identifier extracted from the listing URL; persistence key
    #[serde(rename = "ItemID")]
    pub item_id: String,

    /// Display title of the listing
    #[serde(rename = "Title")]
    pub title: String,

    /// Display price text; opaque, no numeric parsing
    #[serde(rename = "Price")]
    pub price: Option<String>,

    /// Absolute URL of the item's detail page
    #[serde(rename = "ListingUrl")]
    pub listing_url: String,

    /// Condition description, e.g. "Brand New" or "Pre-Owned"
    #[serde(rename = "Condition")]
    pub condition: String,
}

fn item_id_re() -> &'static Regex {
    static ITEM_ID_RE: OnceLock<Regex> = OnceLock::new();
    ITEM_ID_RE.get_or_init(|| Regex::new(r"/itm/(\d+)").expect("item id pattern is valid"))
}

/// Parses listing markup into item records, applying the condition filter
///
/// # Extraction Rules
///
/// Each `li.s-item` element is one listing entry. Per entry:
/// - title: text of `.s-item__info .s-item__title`
/// - URL: `href` of `.s-item__info a.s-item__link`
/// - condition: text of `.s-item__subtitle .SECONDARY_INFO`
/// - price: text of `.s-item__price`
/// - item ID: first `/itm/<digits>` match in the URL
///
/// An entry is emitted only if title, URL, condition, and item ID are all
/// present; price may be absent. When `condition_filter` is given, entries
/// whose condition does not contain it case-insensitively are skipped. An
/// empty filter string behaves like no filter.
///
/// Output preserves the document order of entries. This function is pure and
/// deterministic; it never fails on malformed markup.
///
/// # Example
///
/// ```
/// use shopcrawl::crawler::parse_listing;
///
/// let html = r#"<ul><li class="s-item">
///   <div class="s-item__info">
///     <a class="s-item__link" href="https://www.ebay.com/itm/12345">
///       <span class="s-item__title">Refurbished router</span>
///     </a>
///   </div>
///   <div class="s-item__subtitle"><span class="SECONDARY_INFO">Used</span></div>
///   <span class="s-item__price">$19.99</span>
/// </li></ul>"#;
/// let items = parse_listing(html, None);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].item_id, "12345");
/// ```
pub fn parse_listing(html: &str, condition_filter: Option<&str>) -> Vec<ItemRecord> {
    let document = Html::parse_document(html);
    let filter = condition_filter.map(str::trim).filter(|f| !f.is_empty());

    let mut items = Vec::new();
    if let Ok(entry_selector) = Selector::parse("li.s-item") {
        for entry in document.select(&entry_selector) {
            if let Some(item) = extract_entry(entry) {
                if condition_matches(&item.condition, filter) {
                    items.push(item);
                }
            }
        }
    }
    items
}

/// Extracts a single listing entry, returning `None` if the validity gate
/// fails: title, URL, condition, and an extractable item ID are required.
fn extract_entry(entry: ElementRef<'_>) -> Option<ItemRecord> {
    let title = text_of(entry, ".s-item__info .s-item__title")?;
    let listing_url = href_of(entry, ".s-item__info a.s-item__link")?;
    let condition = text_of(entry, ".s-item__subtitle .SECONDARY_INFO")?;
    let item_id = extract_item_id(&listing_url)?;

    // Price is not part of the validity gate
    let price = text_of(entry, ".s-item__price");

    Some(ItemRecord {
        item_id,
        title,
        price,
        listing_url,
        condition,
    })
}

/// Extracts the numeric item identifier from a listing URL
///
/// Matches the `/itm/<digits>` path pattern; returns exactly the digits.
pub fn extract_item_id(url: &str) -> Option<String> {
    item_id_re()
        .captures(url)
        .map(|captures| captures[1].to_string())
}

/// Case-insensitive substring match of the condition filter
fn condition_matches(condition: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(f) => condition.to_lowercase().contains(&f.to_lowercase()),
        None => true,
    }
}

/// Returns the trimmed text of the first element matching `css` inside
/// `entry`, or `None` when the element is missing or empty.
fn text_of(entry: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = entry.select(&selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Returns the `href` attribute of the first element matching `css` inside
/// `entry`, or `None` when the element or the attribute is missing.
fn href_of(entry: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = entry.select(&selector).next()?;
    let href = element.value().attr("href")?.trim();
    if href.is_empty() {
        None
    } else {
        Some(href.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds one listing entry; empty strings leave that piece out entirely.
    fn entry(title: &str, href: &str, condition: &str, price: &str) -> String {
        let mut html = String::from(r#"<li class="s-item"><div class="s-item__info">"#);
        if href.is_empty() {
            if !title.is_empty() {
                html.push_str(&format!(r#"<span class="s-item__title">{}</span>"#, title));
            }
        } else {
            html.push_str(&format!(r#"<a class="s-item__link" href="{}">"#, href));
            if !title.is_empty() {
                html.push_str(&format!(r#"<span class="s-item__title">{}</span>"#, title));
            }
            html.push_str("</a>");
        }
        html.push_str("</div>");
        if !condition.is_empty() {
            html.push_str(&format!(
                r#"<div class="s-item__subtitle"><span class="SECONDARY_INFO">{}</span></div>"#,
                condition
            ));
        }
        if !price.is_empty() {
            html.push_str(&format!(r#"<span class="s-item__price">{}</span>"#, price));
        }
        html.push_str("</li>");
        html
    }

    fn page(entries: &[String]) -> String {
        format!(
            "<html><body><ul>{}</ul></body></html>",
            entries.join("")
        )
    }

    #[test]
    fn test_extracts_complete_entry() {
        let html = page(&[entry(
            "Dell Optiplex 7060",
            "https://www.ebay.com/itm/123456789?hash=abc",
            "Brand New",
            "$249.99",
        )]);
        let items = parse_listing(&html, None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_id, "123456789");
        assert_eq!(items[0].title, "Dell Optiplex 7060");
        assert_eq!(items[0].price.as_deref(), Some("$249.99"));
        assert_eq!(
            items[0].listing_url,
            "https://www.ebay.com/itm/123456789?hash=abc"
        );
        assert_eq!(items[0].condition, "Brand New");
    }

    #[test]
    fn test_missing_title_drops_entry() {
        let html = page(&[entry("", "https://www.ebay.com/itm/1", "Used", "$5")]);
        assert!(parse_listing(&html, None).is_empty());
    }

    #[test]
    fn test_missing_link_drops_entry() {
        let html = page(&[entry("Title", "", "Used", "$5")]);
        assert!(parse_listing(&html, None).is_empty());
    }

    #[test]
    fn test_missing_condition_drops_entry() {
        let html = page(&[entry("Title", "https://www.ebay.com/itm/1", "", "$5")]);
        assert!(parse_listing(&html, None).is_empty());
    }

    #[test]
    fn test_url_without_item_id_drops_entry() {
        let html = page(&[entry(
            "Title",
            "https://www.ebay.com/p/some-product",
            "Used",
            "$5",
        )]);
        assert!(parse_listing(&html, None).is_empty());
    }

    #[test]
    fn test_missing_price_is_not_fatal() {
        let html = page(&[entry("Title", "https://www.ebay.com/itm/42", "Used", "")]);
        let items = parse_listing(&html, None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, None);
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let html = page(&[
            entry("A", "https://www.ebay.com/itm/1", "Brand New", "$1"),
            entry("B", "https://www.ebay.com/itm/2", "Used", "$2"),
            entry("C", "https://www.ebay.com/itm/3", "NEW other", "$3"),
        ]);
        let items = parse_listing(&html, Some("new"));
        let ids: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_filter_with_no_match_yields_empty() {
        let html = page(&[entry("A", "https://www.ebay.com/itm/1", "Used", "$1")]);
        assert!(parse_listing(&html, Some("new")).is_empty());
    }

    #[test]
    fn test_empty_filter_behaves_like_no_filter() {
        let html = page(&[entry("A", "https://www.ebay.com/itm/1", "Used", "$1")]);
        assert_eq!(parse_listing(&html, Some("")).len(), 1);
        assert_eq!(parse_listing(&html, None).len(), 1);
    }

    #[test]
    fn test_output_preserves_document_order() {
        let html = page(&[
            entry("First", "https://www.ebay.com/itm/30", "Used", "$1"),
            entry("Second", "https://www.ebay.com/itm/10", "Used", "$2"),
            entry("Third", "https://www.ebay.com/itm/20", "Used", "$3"),
        ]);
        let items = parse_listing(&html, None);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_page_without_entries_yields_empty() {
        let items = parse_listing("<html><body><p>No results</p></body></html>", None);
        assert!(items.is_empty());
    }

    #[test]
    fn test_tolerates_malformed_markup() {
        let items = parse_listing("<li class=\"s-item\"><div><<<", None);
        assert!(items.is_empty());
    }

    #[test]
    fn test_item_id_extraction() {
        assert_eq!(
            extract_item_id("https://www.ebay.com/itm/123456?hash=x"),
            Some("123456".to_string())
        );
        assert_eq!(
            extract_item_id("https://www.ebay.com/itm/987654321"),
            Some("987654321".to_string())
        );
        assert_eq!(extract_item_id("https://www.ebay.com/itm/abc"), None);
        assert_eq!(extract_item_id("https://www.ebay.com/p/123456"), None);
    }

    #[test]
    fn test_title_whitespace_is_trimmed() {
        let html = page(&[entry(
            "  Spaced Out  ",
            "https://www.ebay.com/itm/7",
            "Used",
            "$1",
        )]);
        let items = parse_listing(&html, None);
        assert_eq!(items[0].title, "Spaced Out");
    }

    #[test]
    fn test_serialized_field_names_are_stable() {
        let item = ItemRecord {
            item_id: "1".to_string(),
            title: "T".to_string(),
            price: None,
            listing_url: "https://www.ebay.com/itm/1".to_string(),
            condition: "Used".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("ItemID").is_some());
        assert!(json.get("Title").is_some());
        assert!(json.get("Price").is_some());
        assert!(json.get("ListingUrl").is_some());
        assert!(json.get("Condition").is_some());
    }
}
