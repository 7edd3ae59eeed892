//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure
//! - Parser: Swappable log-line format used by the swim log view

pub mod inbound;
pub mod outbound;
pub mod parser;

pub use inbound::InputPort;
pub use outbound::{HttpPort, HttpResponse, ResponseCachePort};
pub use parser::{SwimLine, SwimLogParser};
