pub mod category;
pub mod dashboard;
pub mod expense;
pub mod health;

pub use category::CategoryController;
pub use dashboard::DashboardController;
pub use expense::ExpenseController;
pub use health::HealthController;
