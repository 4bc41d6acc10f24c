//! CLI interface for PlantDx

mod diagnoser;
mod history;
mod products;
mod report;
mod session;
mod ui;


pub use diagnoser::Diagnoser;
pub use history::{DEFAULT_HISTORY_FILE, DiagnosisHistory, SavedDiagnosis};
pub use products::{PRODUCT_CATALOG, Product, recommend_products};
pub use report::{Report, ReportBuilder, report_id};
pub use session::{DiagnosisSession, HEALTHY_BADGE, RequestToken};
pub use ui::{
    display_badges, display_banner, display_diagnosis, display_history, display_products,
    format_list, headline,
};

// Re-export core types
pub use plantdx_core::{Error, Result};
