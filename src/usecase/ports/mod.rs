pub mod credentials;
pub mod presentation_store;
pub mod source;
pub mod viewer;
