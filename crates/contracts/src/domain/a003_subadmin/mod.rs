pub mod aggregate;

pub use aggregate::{Subadmin, SubadminDto, SubadminId};
