mod client;
mod fetcher;
mod query;
mod reader;

pub use client::Client;
pub use fetcher::PageFetcher;
pub use query::{ConsumptionOptions, OrderBy};
pub use reader::PaginatingReader;
