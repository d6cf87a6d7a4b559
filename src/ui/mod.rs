// Module declarations
mod app;
pub mod bmi_form;
pub mod dashboard;
pub mod notice;
pub mod splash;
// Re-exports for external use
pub use app::{App, UIConfig, run};
