// Public job board: paginated listings, job detail, company overview.

pub mod handlers;
pub mod views;
