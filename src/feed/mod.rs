pub mod provider;
pub mod synthetic;
