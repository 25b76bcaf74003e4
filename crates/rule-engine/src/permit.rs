//! Time-boxed override permits.
//!
//! A separate actor may grant itself a short-lived permit that suspends all
//! rule evaluation. The permit lives in a small JSON file at a well-known
//! relative path; this module only ever reads it.
//!
//! The check fails closed: a missing file, unreadable file, malformed JSON,
//! missing fields, or an expired/inactive record all mean "no bypass".

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

/// Well-known permit location, relative to the process working directory.
pub const PERMIT_PATH: &str = ".tripwire/permit.json";

#[derive(Debug, Deserialize)]
struct PermitRecord {
    status: String,
    expires_epoch: f64,
}

/// Check the well-known permit path. See [`bypass_active_at`].
pub fn bypass_active() -> bool {
    bypass_active_at(Path::new(PERMIT_PATH))
}

/// Returns true only if `path` holds a permit with `status == "active"`
/// whose `expires_epoch` has not passed. Every failure mode yields false.
pub fn bypass_active_at(path: &Path) -> bool {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return false,
    };
    let permit: PermitRecord = match serde_json::from_str(&contents) {
        Ok(p) => p,
        Err(_) => return false,
    };
    if permit.status != "active" {
        return false;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(f64::MAX);
    now <= permit.expires_epoch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_permit(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("permit.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn far_future() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs_f64()
            + 3600.0
    }

    #[test]
    fn active_unexpired_permit_bypasses() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(
            &dir,
            &format!(r#"{{"status":"active","expires_epoch":{}}}"#, far_future()),
        );
        assert!(bypass_active_at(&path));
    }

    #[test]
    fn expired_permit_does_not_bypass() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(&dir, r#"{"status":"active","expires_epoch":1000}"#);
        assert!(!bypass_active_at(&path));
    }

    #[test]
    fn inactive_status_does_not_bypass() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(
            &dir,
            &format!(r#"{{"status":"revoked","expires_epoch":{}}}"#, far_future()),
        );
        assert!(!bypass_active_at(&path));
    }

    #[test]
    fn missing_file_fails_closed() {
        assert!(!bypass_active_at(Path::new("/nonexistent/permit.json")));
    }

    #[test]
    fn malformed_json_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(&dir, "not json at all {");
        assert!(!bypass_active_at(&path));
    }

    #[test]
    fn missing_fields_fail_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(&dir, r#"{"status":"active"}"#);
        assert!(!bypass_active_at(&path));
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_permit(
            &dir,
            &format!(
                r#"{{"status":"active","expires_epoch":{},"scope":["/tmp/x"],"granted_by":"ops"}}"#,
                far_future()
            ),
        );
        assert!(bypass_active_at(&path));
    }
}
