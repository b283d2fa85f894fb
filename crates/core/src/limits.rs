//! Size limits and fixed constants for the tracker.

/// Maximum request body size in bytes (64KB).
///
/// Both write endpoints carry a handful of short strings; anything larger
/// is rejected before deserialization.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Maximum size of any client-supplied text field in UTF-8 bytes.
/// Matches the HTTP Referer header limit.
pub const MAX_FIELD_BYTES: usize = 2048;

/// User agent string max length.
/// Browser UAs: 100-300 typical, 500+ with extensions.
pub const MAX_USER_AGENT_LEN: usize = 512;

/// IP address max length (IPv6 = 45 chars).
pub const MAX_IP_LEN: usize = 45;

/// Number of records returned in each of the recent lists of `/api/stats`.
pub const RECENT_LIMIT: u32 = 50;

/// Group label for NULL or empty values (e.g. leads without an A/B variant).
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Message returned when a lead is missing its name or email.
pub const LEAD_REQUIRED_MESSAGE: &str = "Name and email are required";
