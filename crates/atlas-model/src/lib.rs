pub mod country;
pub mod error;
pub mod query;
pub mod statistics;

pub use country::{Country, Field};
pub use error::{CountryError, Result};
pub use query::{Filter, SortField};
pub use statistics::{ContinentCounts, Statistics};
