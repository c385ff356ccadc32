//! Domain types for the scam-detection honey-pot.
//!
//! Small value types with their invariants; no I/O. Wire names follow the
//! external API contract (camelCase) where a type crosses the HTTP boundary.

pub mod detection;
pub mod intelligence;
pub mod message;
pub mod session;

pub use detection::DetectionResult;
pub use intelligence::{EngagementMetrics, ExtractedIntelligence};
pub use message::{Message, Metadata, Timestamp};
pub use session::{Session, SessionId};
