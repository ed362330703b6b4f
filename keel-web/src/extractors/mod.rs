pub mod page;
pub mod valid_json;

pub use page::Page;
pub use valid_json::ValidJson;
