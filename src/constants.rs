// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

/// The fixed GitHub notifications endpoint. Subject and comment URLs are
/// not derived from this — they arrive inside the notification records.
pub const NOTIFICATIONS_URL: &str = "https://api.github.com/notifications";

/// User agent sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("gitfeed/", env!("CARGO_PKG_VERSION"));
