//----------------------------------------
// prior feed mod
//----------------------------------------
pub mod feed;
pub mod types;

pub use feed::{HistoricalPriorFeed, NoHistoricalFeed, resolve_dropout, resolve_effect, resolve_variability};
pub use types::{HistoricalEstimate, PriorQuery};
