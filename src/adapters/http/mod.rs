//! HTTP adapters. Implement HttpPort.
//!
//! reqwest transport, a cache decorator and a scripted mock for tests/offline runs.

pub mod cached_http;
pub mod link_header;
pub mod mock_http;
pub mod reqwest_http;

pub use cached_http::CachedHttp;
pub use link_header::next_link;
pub use mock_http::MockHttp;
pub use reqwest_http::ReqwestHttp;
