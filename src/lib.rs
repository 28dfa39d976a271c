pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod controller {
    pub mod audit;
    pub mod golf_genius;
}
pub mod view {
    pub mod report;
}

pub use config::AuditConfig;
pub use controller::audit::{AuditReport, AuditRequest, run_audit};
pub use controller::golf_genius::{HttpFetcher, RemoteFetcher};
pub use error::AuditError;
