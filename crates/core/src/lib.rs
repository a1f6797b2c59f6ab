pub mod config;
pub mod error;
pub mod order;
pub mod timestamp;

pub use config::Config;
pub use error::*;
pub use order::*;
pub use timestamp::parse_timestamp;
