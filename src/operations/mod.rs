pub mod add;
pub mod import;
pub mod service;
