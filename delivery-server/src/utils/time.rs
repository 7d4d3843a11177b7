//! Time helpers
//!
//! All timestamps in the system are Unix milliseconds (`shared::Timestamp`).

use shared::Timestamp;

/// Current time as Unix milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
