mod health;
mod nearby;
mod reports;

pub use health::health_check;
pub use nearby::nearby_reports;
pub use reports::{create_report, delete_report, get_report, update_report};
