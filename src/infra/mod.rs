pub mod browser;
pub mod file;
pub mod google;
