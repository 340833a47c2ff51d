//! Metrics recording for the `SQLite` store.

use std::time::Instant;

/// Records a storage operation.
///
/// Emits `storage_operations_total` (by operation and status) and
/// `storage_operation_duration_ms`.
///
/// # Examples
///
/// ```ignore
/// let start = Instant::now();
/// let result = insert(&conn, turn);
/// record_operation_metrics("append_conversation", start, result.is_ok());
/// ```
pub fn record_operation_metrics(operation: &'static str, start: Instant, ok: bool) {
    let status = if ok { "success" } else { "error" };
    metrics::counter!(
        "storage_operations_total",
        "backend" => "sqlite",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => "sqlite",
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_operation_metrics("append_conversation", Instant::now(), true);
        record_operation_metrics("seed_resources", Instant::now(), false);
    }
}
