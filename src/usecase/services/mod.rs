pub mod fill_service;
pub mod locate_service;
pub mod populate_service;
pub mod reveal_service;
