//! BGP dynamic routing extension

/// BGP peers
pub mod peers;
