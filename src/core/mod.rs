pub mod feed_item;
pub mod params;
pub mod result;
pub mod rounding;
