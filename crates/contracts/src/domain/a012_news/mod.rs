pub mod aggregate;

pub use aggregate::{News, NewsDto, NewsId, NewsLog};
