//! Subcommand implementations.

pub mod estimate;
pub mod steps;
pub mod timeline;

use std::io::Read;
use std::path::{Path, PathBuf};

use trackline_core::OrderRecord;
use trackline_core::normalize::order_from_str;

use crate::error::{CliError, Result};

/// Read and normalize an order payload from a file, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or normalized.
pub fn load_order(path: &Path) -> Result<OrderRecord> {
    let read_error = |source: std::io::Error| CliError::Read {
        path: PathBuf::from(path),
        source,
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(read_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    let order = order_from_str(&content)?;
    tracing::info!(
        path = %path.display(),
        order_id = order.id.as_ref().map_or("-", |id| id.as_str()),
        events = order.tracking_history.len(),
        "Loaded order"
    );
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("trackline-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_order_missing_file() {
        let path = std::env::temp_dir().join("trackline-does-not-exist.json");
        let err = load_order(&path).unwrap_err();

        assert!(matches!(&err, CliError::Read { path: p, .. } if *p == path));
        assert!(err.to_string().contains("trackline-does-not-exist.json"));
    }

    #[test]
    fn test_load_order_invalid_json() {
        let path = temp_file("invalid.json", "{ not json");
        let result = load_order(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(CliError::Normalize(_))));
    }

    #[test]
    fn test_load_order_from_file() {
        let path = temp_file(
            "order.json",
            r#"{ "data": { "order": { "id": "ORD-3", "status": "shipped" } } }"#,
        );
        let order = load_order(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(order.id.as_ref().map(|id| id.as_str()), Some("ORD-3"));
        assert_eq!(order.status.as_deref(), Some("shipped"));
    }
}
