//! Block storage service (v3)
//!
//! Resource modules for the volume service. All calls go through a
//! [`ServiceClient`](crate::http::ServiceClient) whose endpoint is the
//! project-scoped v3 URL, e.g. `https://volume.example.com/v3/<project>`.

/// Volume snapshots
pub mod snapshots;
