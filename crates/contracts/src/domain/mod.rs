pub mod common;

pub mod a001_user;
pub mod a002_admin;
pub mod a003_subadmin;
pub mod a004_category;
pub mod a005_subcategory;
pub mod a006_product;
pub mod a007_land;
pub mod a008_land_product;
pub mod a009_crop_plan;
pub mod a010_crop_calendar;
pub mod a011_ad;
pub mod a012_news;
pub mod a013_notification;
