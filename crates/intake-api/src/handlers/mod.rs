pub mod confirm;
pub mod upload;
