//! Built-in chimes

/// Played at startup, when the controller comes up
pub const CONNECTED: &str = "C5 E5 G5/2";

/// Played when a shutdown has been accepted
pub const DISCONNECTED: &str = "G5 E5 C5/2";

/// Played before an emergency shutdown
pub const ERROR: &str = "C/1 P/1 C/1";
