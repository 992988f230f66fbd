//! Turns the info box cards of the rates page into [`CityRate`] records.
//!
//! Every field has its own rule and its own fallback, so a card with a
//! broken price or a missing button still produces a record. Only a card
//! without a subtitle (the date banner, for instance) is dropped.

use crate::models::{CityRate, Trend};
use crate::scrapers::types::CardSelectors;
use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, info};

pub const DEFAULT_PRICE: &str = "0";
pub const NOT_AVAILABLE: &str = "N/A";

/// Signed delta in parentheses, e.g. `(-5)` or `(+6)`
const CHANGE_PATTERN: &str = r"\(([-+]\d+)\)";
/// Two integers around an ASCII hyphen or an en dash
const RANGE_PATTERN: &str = r"(\d+)\s*[\-\x{2013}]\s*(\d+)";

pub struct CardExtractor {
    selectors: CardSelectors,
    change_re: Regex,
    range_re: Regex,
}

impl CardExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: CardSelectors::new()?,
            change_re: Regex::new(CHANGE_PATTERN).context("Failed to compile change pattern")?,
            range_re: Regex::new(RANGE_PATTERN).context("Failed to compile range pattern")?,
        })
    }

    /// All info box cards, in document order
    pub fn find_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.selectors.card).collect()
    }

    /// Build a record from one card, or `None` when the card has no city
    pub fn extract_record(&self, card: ElementRef<'_>) -> Option<CityRate> {
        let sel = &self.selectors;

        let city = city(sel, card)?;
        let value_container = card.select(&sel.value_container).next();
        let (open_rate, close_rate) = range(sel, &self.range_re, card);

        Some(CityRate {
            city,
            price: price(sel, value_container),
            trend: trend(sel, card),
            change: change(&self.change_re, value_container),
            open_rate,
            close_rate,
            doc_rate: doc_rate(sel, card),
        })
    }

    pub fn extract_all(&self, document: &Html) -> Vec<CityRate> {
        let cards = self.find_cards(document);
        info!("Found {} info box cards", cards.len());

        let mut records = Vec::with_capacity(cards.len());
        let mut skipped = 0;
        for (idx, card) in cards.into_iter().enumerate() {
            match self.extract_record(card) {
                Some(record) => records.push(record),
                None => {
                    debug!("Skipped card {}: no subtitle", idx);
                    skipped += 1;
                }
            }
        }

        info!("Extracted {} city rates ({} cards skipped)", records.len(), skipped);

        records
    }

    pub fn extract_from_html(&self, html: &str) -> Vec<CityRate> {
        let document = Html::parse_document(html);
        self.extract_all(&document)
    }
}

/// Text nodes trimmed, blanks dropped, the rest joined with nothing in between
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn city(sel: &CardSelectors, card: ElementRef<'_>) -> Option<String> {
    card.select(&sel.subtitle).next().map(stripped_text)
}

fn price(sel: &CardSelectors, value_container: Option<ElementRef<'_>>) -> String {
    value_container
        .and_then(|container| container.select(&sel.strong).next())
        .map(stripped_text)
        .unwrap_or_else(|| DEFAULT_PRICE.to_string())
}

fn trend(sel: &CardSelectors, card: ElementRef<'_>) -> Trend {
    let Some(icon) = card.select(&sel.arrow_icon).next() else {
        return Trend::Stable;
    };

    let has_class = |name: &str| icon.value().classes().any(|c| c == name);
    if has_class("down") {
        Trend::Down
    } else if has_class("up") {
        Trend::Up
    } else {
        Trend::Stable
    }
}

fn change(re: &Regex, value_container: Option<ElementRef<'_>>) -> String {
    let Some(container) = value_container else {
        return String::new();
    };

    let text: String = container.text().collect();
    re.captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn range(sel: &CardSelectors, re: &Regex, card: ElementRef<'_>) -> (String, String) {
    card.select(&sel.paragraph)
        .find_map(|p| {
            let text: String = p.text().collect();
            re.captures(&text)
                .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        })
        .unwrap_or_else(|| (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()))
}

fn doc_rate(sel: &CardSelectors, card: ElementRef<'_>) -> String {
    let Some(link) = card
        .select(&sel.button_wrapper)
        .next()
        .and_then(|wrapper| wrapper.select(&sel.link).next())
    else {
        return NOT_AVAILABLE.to_string();
    };

    let text = stripped_text(link);
    match text.split_once(':') {
        Some((_, rate)) => rate.trim().to_string(),
        None => text,
    }
}
