use std::path::Path;
use tracing::debug;

use crate::error::{ReconError, Result};

/// Write `first` followed by `second` into `dest`. Missing inputs count as empty; a newline is
/// inserted between them when `first` does not end with one.
pub async fn merge_targets(first: &Path, second: &Path, dest: &Path) -> Result<()> {
    let mut combined = read_if_exists(first).await?;
    let tail = read_if_exists(second).await?;

    if !combined.is_empty() && !tail.is_empty() && !combined.ends_with(b"\n") {
        combined.push(b'\n');
    }
    combined.extend_from_slice(&tail);

    debug!(dest=%dest.display(), bytes = combined.len(), "writing combined targets");
    tokio::fs::write(dest, combined).await.map_err(|e| ReconError::io(dest, e))
}

async fn read_if_exists(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(ReconError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_merge_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b, c) = (dir.path().join("a"), dir.path().join("b"), dir.path().join("c"));
        std::fs::write(&a, "one.example.com\ntwo.example.com\n").unwrap();
        std::fs::write(&b, "https://example.com/x\n").unwrap();
        merge_targets(&a, &b, &c).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&c).unwrap(),
            "one.example.com\ntwo.example.com\nhttps://example.com/x\n"
        );
    }

    #[tokio::test]
    async fn test_merge_does_not_fuse_lines() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b, c) = (dir.path().join("a"), dir.path().join("b"), dir.path().join("c"));
        std::fs::write(&a, "one.example.com").unwrap();
        std::fs::write(&b, "two.example.com\n").unwrap();
        merge_targets(&a, &b, &c).await.unwrap();
        assert_eq!(std::fs::read_to_string(&c).unwrap(), "one.example.com\ntwo.example.com\n");
    }

    #[tokio::test]
    async fn test_merge_with_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let c = dir.path().join("c");
        merge_targets(&dir.path().join("nope1"), &dir.path().join("nope2"), &c).await.unwrap();
        assert_eq!(std::fs::read_to_string(&c).unwrap(), "");
    }

    #[tokio::test]
    async fn test_merge_into_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let c = dir.path().join("missing").join("c");
        let err = merge_targets(&dir.path().join("a"), &dir.path().join("b"), &c).await;
        assert!(matches!(err, Err(ReconError::Io { .. })));
    }
}
