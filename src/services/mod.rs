//! External service interactions
//!
//! - Proxy-relayed URL fetches and local file reads (import)
//! - Headless rasterization and PDF assembly (screenshot export)
//! - Platform viewer handoff (print export)
//! - Background job execution

pub mod exporter;
pub mod importer;
pub mod job_runner;
pub mod print;

pub use exporter::{
    export_pdf, ChromeRasterizer, ExportError, ExportReport, Rasterizer, DEFAULT_SETTLE,
    EXPORT_FILE_NAME,
};
pub use importer::{default_proxies, fetch_url, normalize_url, read_file, ImportError, RelayProxy};
pub use job_runner::JobRunner;
pub use print::open_in_viewer;
