//! Handshake failure classification
//!
//! ssh reports every failure as exit status 255; the reason is only in its
//! log output.

use crate::error::DeployError;

const AUTH_MARKERS: &[&str] = &[
    "Permission denied",
    "Too many authentication failures",
    "Host key verification failed",
    "REMOTE HOST IDENTIFICATION HAS CHANGED",
    "No more authentication methods",
];

/// Turn a failed control-master start into `Authentication` or `Unreachable`.
pub fn classify_handshake_failure(host: &str, exit_code: i32, log: &str) -> DeployError {
    let message = last_meaningful_line(log)
        .map(str::to_string)
        .unwrap_or_else(|| format!("ssh exited with status {}", exit_code));

    if AUTH_MARKERS.iter().any(|m| log.contains(m)) {
        DeployError::Authentication {
            host: host.to_string(),
            message,
        }
    } else {
        DeployError::Unreachable {
            host: host.to_string(),
            message,
        }
    }
}

fn last_meaningful_line(log: &str) -> Option<&str> {
    log.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("Warning: Permanently added"))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_is_authentication() {
        let err = classify_handshake_failure(
            "203.0.113.10",
            255,
            "deploy@203.0.113.10: Permission denied (publickey,password).\n",
        );
        match err {
            DeployError::Authentication { host, message } => {
                assert_eq!(host, "203.0.113.10");
                assert!(message.contains("Permission denied"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn host_key_failure_is_authentication() {
        let err = classify_handshake_failure("h", 255, "Host key verification failed.\n");
        assert!(matches!(err, DeployError::Authentication { .. }));
    }

    #[test]
    fn connection_timeout_is_unreachable() {
        let err = classify_handshake_failure(
            "203.0.113.10",
            255,
            "ssh: connect to host 203.0.113.10 port 22: Connection timed out\n",
        );
        assert!(matches!(err, DeployError::Unreachable { .. }));
        assert!(err.to_string().contains("Connection timed out"));
    }

    #[test]
    fn empty_log_reports_exit_status() {
        let err = classify_handshake_failure("h", 255, "");
        assert_eq!(err.to_string(), "cannot reach h: ssh exited with status 255");
    }

    #[test]
    fn known_hosts_notice_is_skipped() {
        let log = "ssh: Could not resolve hostname nope: Name or service not known\n\
                   Warning: Permanently added 'x' (ED25519) to the list of known hosts.\n";
        let err = classify_handshake_failure("nope", 255, log);
        assert!(err.to_string().contains("Could not resolve hostname"));
    }
}
