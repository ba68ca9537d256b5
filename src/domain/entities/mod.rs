pub mod placeholder;
pub mod presentation;
pub mod record;
