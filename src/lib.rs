mod cancel;
mod client;
mod downloader;
mod errors;
mod normalize;
mod pager;
mod rate_limit;
pub mod types;
pub use self::cancel::CancelToken;
pub use self::client::{PhotoClient, VideoClient};
pub use self::errors::Error;
pub use self::normalize::Payload;
pub use self::rate_limit::RateLimit;
