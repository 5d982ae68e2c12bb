//! Core rules for country records.
//!
//! - [`normalize`]: canonical form of labels and numeric text
//! - [`validate`]: label shape and non-negative integer rules
//! - [`store`]: the in-memory collection and its mutations
//! - [`query`]: search, filter and sort
//! - [`aggregate`]: extrema, averages and grouped counts

pub mod aggregate;
pub mod normalize;
pub mod query;
pub mod store;
pub mod validate;

pub use aggregate::{
    average_area, average_population, compute_statistics, count_by_continent,
    extrema_by_population,
};
pub use normalize::{collapse_whitespace, normalize_name, strip_group_separators};
pub use query::{
    apply_filter, filter_by_area_range, filter_by_continent, filter_by_population_range,
    search_by_name, sort,
};
pub use store::CountryStore;
pub use validate::{
    RawCountry, is_nonnegative_integer, is_valid_label, parse_nonnegative_integer, parse_number,
    validate_country,
};
