pub mod aggregate;

pub use aggregate::{Admin, AdminDto, AdminId};
