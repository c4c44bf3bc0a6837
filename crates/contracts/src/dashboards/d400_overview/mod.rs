pub mod dto;

pub use dto::OverviewStats;
