pub mod aggregate;

pub use aggregate::{
    LandProduct, LandProductDetails, LandProductDto, LandProductId, UpdateLandProductDto,
};
