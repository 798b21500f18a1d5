//! Live mount list (`vfs/list`) and the mount/unmount calls.

use std::collections::HashSet;

use crate::error::RcError;
use crate::executor::RcCommandRunner;
use rcmount_core::{CacheMode, mount_id};
use serde::Deserialize;

/// Response shape of `vfs/list`.
#[derive(Debug, Deserialize)]
struct VfsList {
    vfses: Vec<String>,
}

/// Fetch the identifiers of currently mounted filesystems, e.g. `"dropbox:"`.
pub fn list_mounts(runner: &impl RcCommandRunner) -> Result<HashSet<String>, RcError> {
    let raw = runner.run(&["vfs/list"])?;
    let list: VfsList = serde_json::from_str(&raw).map_err(|e| RcError::Protocol {
        call: "vfs/list",
        detail: e.to_string(),
    })?;
    Ok(list.vfses.into_iter().collect())
}

/// Instruct the daemon to mount `name` at `mount_point`.
///
/// The reply is inspected: a non-zero rc exit or an `error` field in the
/// response JSON becomes `RcError::Mount`, distinct from success.
pub fn mount_remote(
    runner: &impl RcCommandRunner,
    name: &str,
    mount_point: &str,
    volume: &str,
    cache_mode: CacheMode,
) -> Result<(), RcError> {
    let fs = format!("fs={}", mount_id(name));
    let point = format!("mountPoint={mount_point}");
    let vfs_opt = format!(
        "vfsOpt={}",
        serde_json::json!({ "CacheMode": cache_mode.as_str() })
    );
    let mount_opt = format!("mountOpt={}", serde_json::json!({ "VolumeName": volume }));

    let raw = runner
        .run(&["mount/mount", &fs, &point, &vfs_opt, &mount_opt])
        .map_err(|e| match e {
            RcError::CommandFailed(detail) => RcError::Mount {
                remote: name.to_string(),
                mount_point: mount_point.to_string(),
                detail,
            },
            other => other,
        })?;

    match response_error(&raw) {
        Some(detail) => Err(RcError::Mount {
            remote: name.to_string(),
            mount_point: mount_point.to_string(),
            detail,
        }),
        None => Ok(()),
    }
}

/// Instruct the daemon to unmount the filesystem at `mount_point`.
pub fn unmount_remote(runner: &impl RcCommandRunner, mount_point: &str) -> Result<(), RcError> {
    let point = format!("mountPoint={mount_point}");
    let raw = runner
        .run(&["mount/unmount", &point])
        .map_err(|e| match e {
            RcError::CommandFailed(detail) => RcError::Unmount {
                mount_point: mount_point.to_string(),
                detail,
            },
            other => other,
        })?;

    match response_error(&raw) {
        Some(detail) => Err(RcError::Unmount {
            mount_point: mount_point.to_string(),
            detail,
        }),
        None => Ok(()),
    }
}

/// Extract the `error` field from an rc reply, if present.
fn response_error(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRunner {
        reply: String,
        expect_op: &'static str,
    }

    impl MockRunner {
        fn new(expect_op: &'static str, reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                expect_op,
            }
        }
    }

    impl RcCommandRunner for MockRunner {
        fn run(&self, args: &[&str]) -> Result<String, RcError> {
            assert_eq!(args.first(), Some(&self.expect_op));
            Ok(self.reply.clone())
        }
    }

    struct FailingRunner;
    impl RcCommandRunner for FailingRunner {
        fn run(&self, _args: &[&str]) -> Result<String, RcError> {
            Err(RcError::CommandFailed(
                "exit code 1: connection refused".to_string(),
            ))
        }
    }

    #[test]
    fn list_mounts_parses_identifier_set() {
        let runner = MockRunner::new("vfs/list", r#"{"vfses": ["dropbox:", "gdrive:"]}"#);
        let mounts = list_mounts(&runner).expect("should parse");
        assert_eq!(mounts.len(), 2);
        assert!(mounts.contains("dropbox:"));
        assert!(mounts.contains("gdrive:"));
    }

    #[test]
    fn list_mounts_empty() {
        let runner = MockRunner::new("vfs/list", r#"{"vfses": []}"#);
        let mounts = list_mounts(&runner).expect("should parse");
        assert!(mounts.is_empty());
    }

    #[test]
    fn list_mounts_malformed_json_is_protocol_error() {
        let runner = MockRunner::new("vfs/list", "gateway timeout");
        let err = list_mounts(&runner).expect_err("should fail");
        assert!(matches!(err, RcError::Protocol { call: "vfs/list", .. }));
    }

    #[test]
    fn list_mounts_missing_key_is_protocol_error() {
        let runner = MockRunner::new("vfs/list", r#"{"mounts": []}"#);
        let err = list_mounts(&runner).expect_err("should fail");
        assert!(matches!(err, RcError::Protocol { .. }));
    }

    #[test]
    fn mount_builds_expected_parameters() {
        struct CheckArgs;
        impl RcCommandRunner for CheckArgs {
            fn run(&self, args: &[&str]) -> Result<String, RcError> {
                assert_eq!(args[0], "mount/mount");
                assert!(args.contains(&"fs=dropbox:"), "fs with mount suffix");
                assert!(args.contains(&"mountPoint=/mnt/dropbox"));
                assert!(
                    args.contains(&r#"vfsOpt={"CacheMode":"full"}"#),
                    "cache mode forwarded, got {args:?}"
                );
                assert!(
                    args.contains(&r#"mountOpt={"VolumeName":"Dropbox Home"}"#),
                    "volume label forwarded, got {args:?}"
                );
                Ok("{}".to_string())
            }
        }
        mount_remote(
            &CheckArgs,
            "dropbox",
            "/mnt/dropbox",
            "Dropbox Home",
            CacheMode::Full,
        )
        .expect("should mount");
    }

    #[test]
    fn mount_failure_is_a_mount_error() {
        let err = mount_remote(
            &FailingRunner,
            "dropbox",
            "/mnt/dropbox",
            "Dropbox",
            CacheMode::Full,
        )
        .expect_err("should fail");
        match err {
            RcError::Mount {
                remote,
                mount_point,
                detail,
            } => {
                assert_eq!(remote, "dropbox");
                assert_eq!(mount_point, "/mnt/dropbox");
                assert!(detail.contains("connection refused"));
            }
            other => panic!("expected Mount error, got {other:?}"),
        }
    }

    #[test]
    fn mount_error_field_in_reply_is_a_mount_error() {
        let runner = MockRunner::new(
            "mount/mount",
            r#"{"error": "mount helper not found", "status": 500}"#,
        );
        let err = mount_remote(&runner, "gdrive", "/mnt/gdrive", "gdrive", CacheMode::Writes)
            .expect_err("should fail");
        assert!(matches!(err, RcError::Mount { .. }));
    }

    #[test]
    fn unmount_passes_mount_point() {
        struct CheckArgs;
        impl RcCommandRunner for CheckArgs {
            fn run(&self, args: &[&str]) -> Result<String, RcError> {
                assert_eq!(args, ["mount/unmount", "mountPoint=/mnt/dropbox"]);
                Ok("{}".to_string())
            }
        }
        unmount_remote(&CheckArgs, "/mnt/dropbox").expect("should unmount");
    }

    #[test]
    fn unmount_failure_is_an_unmount_error() {
        let err = unmount_remote(&FailingRunner, "/mnt/dropbox").expect_err("should fail");
        assert!(matches!(err, RcError::Unmount { .. }));
    }
}
