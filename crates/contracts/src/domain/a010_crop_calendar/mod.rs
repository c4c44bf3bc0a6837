pub mod aggregate;

pub use aggregate::{CropCalendar, CropCalendarDto, CropCalendarId};
