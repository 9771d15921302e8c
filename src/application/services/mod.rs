//! Operations the interface drives.

pub mod health_monitor;
pub mod redirect_opener;
pub mod url_service;

pub use health_monitor::{HealthMonitor, MonitorSnapshot, MonitorState};
pub use redirect_opener::{OpenError, RedirectOpener};
pub use url_service::UrlService;
