//! Logging facilities for Enhanced Select.
//!
//! Both crates are instrumented with the `tracing` crate. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "enhanced_select_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "enhanced_select_core::signal";
    /// Scheduler target.
    pub const SCHEDULER: &str = "enhanced_select_core::scheduler";
    /// Selection engine target.
    pub const SELECT: &str = "enhanced_select::select";
    /// Filter engine target.
    pub const FILTER: &str = "enhanced_select::filter";
}
