//! External collaborator adapters.

pub mod code_host;
pub mod network;
pub mod resume;
pub mod website;

pub use code_host::CodeHostClient;
pub use network::JsonSnapshotSource;
pub use resume::TextResumeSource;
pub use website::HttpWebsiteSource;
