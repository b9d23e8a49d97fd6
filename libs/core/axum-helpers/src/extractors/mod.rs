//! Custom extractors shared by API crates.

mod app_json;
mod uuid_path;

pub use app_json::AppJson;
pub use uuid_path::UuidPath;
