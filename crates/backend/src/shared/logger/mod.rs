pub mod repository;

use repository::log_event_internal;

/// Persist a server-side event into the system log table.
///
/// ```ignore
/// logger::log("startup", "Server started");
/// logger::log("sweep", "Activated 3 scheduled ads");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
