pub mod product;
pub mod setting;
pub mod version;
