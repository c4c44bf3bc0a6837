pub mod aggregate;

pub use aggregate::{CropPlan, CropPlanDto, CropPlanId};
