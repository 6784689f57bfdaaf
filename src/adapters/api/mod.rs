//! Analytics API adapters. Implement `ChannelDataSource`.

pub mod http_source;
pub mod mapper;
pub mod mock_source;

pub use http_source::HttpDataSource;
pub use mapper::{channel_to_domain, parse_published_at, video_to_domain, videos_to_domain};
pub use mock_source::MockDataSource;
