//! Tracing/logging setup shared by the StockDesk binaries.

/// Initialize process-wide logging with the format from `STOCKDESK_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
