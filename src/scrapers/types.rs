use anyhow::{anyhow, Result};
use scraper::Selector;

pub const CARD: &str = "div.woodmart-info-box";
pub const SUBTITLE: &str = "div.info-box-subtitle";
pub const VALUE_CONTAINER: &str = "div.info-box-inner";
pub const STRONG: &str = "strong";
pub const ARROW_ICON: &str = "i.arrow";
pub const PARAGRAPH: &str = "p";
pub const BUTTON_WRAPPER: &str = "div.woodmart-button-wrapper";
pub const LINK: &str = "a";

/// Compiled selectors for the info box markup
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub card: Selector,
    pub subtitle: Selector,
    pub value_container: Selector,
    pub strong: Selector,
    pub arrow_icon: Selector,
    pub paragraph: Selector,
    pub button_wrapper: Selector,
    pub link: Selector,
}

impl CardSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            card: parse(CARD)?,
            subtitle: parse(SUBTITLE)?,
            value_container: parse(VALUE_CONTAINER)?,
            strong: parse(STRONG)?,
            arrow_icon: parse(ARROW_ICON)?,
            paragraph: parse(PARAGRAPH)?,
            button_wrapper: parse(BUTTON_WRAPPER)?,
            link: parse(LINK)?,
        })
    }
}

// SelectorErrorKind borrows the input and isn't Send, so it can't go through `?` into anyhow
fn parse(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector `{}`: {:?}", css, err))
}
