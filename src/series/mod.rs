pub mod builder;
pub mod date_index;
pub mod live;
pub mod summary;
