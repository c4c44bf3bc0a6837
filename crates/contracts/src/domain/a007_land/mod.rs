pub mod aggregate;

pub use aggregate::{Land, LandDto, LandId};
