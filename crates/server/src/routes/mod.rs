#[path = "summarize.rs"]
mod summarize_route;
mod system;
#[path = "upload.rs"]
mod upload_route;

pub use summarize_route::summarize;
pub use system::health;
pub use upload_route::upload;
