pub mod api;
pub mod params;

pub use api::ApiClient;
pub use params::{QueryDraft, SearchField, wire_params};
