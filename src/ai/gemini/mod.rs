pub mod caption;
pub mod client;
pub mod types;

pub use caption::GeminiCaptionClient;
