pub mod aggregate;
pub mod log;

pub use aggregate::{
    Ad, AdDetails, AdDto, AdId, AdImage, AdStatus, AdType, AdWithCreator, CreatorRole, PostType,
};
pub use log::{AdLog, AdLogAction};
