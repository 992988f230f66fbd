pub mod agbro;
pub mod cards;
pub mod traits;
pub mod types;

pub use agbro::AgbroScraper;
pub use cards::CardExtractor;
pub use traits::RateSource;
pub use types::CardSelectors;
