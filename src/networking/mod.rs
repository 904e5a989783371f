//! Networking service (v2.0)

/// BGP dynamic routing extension
pub mod bgp;
