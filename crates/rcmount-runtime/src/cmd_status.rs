//! `rcmount status` — poll the daemon and render the remote listing.

use rcmount_core::{Settings, reconcile};
use rcmount_rc::{DaemonSession, RcCommandRunner, RcError};

use crate::render::render_status;

pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let settings = settings.clone();
    // Session start and the three queries are blocking subprocess
    // round-trips; keep them off the async runtime.
    let output = tokio::task::spawn_blocking(move || {
        let session = DaemonSession::start(&settings)?;
        poll_session(&session, &settings)
    })
    .await??;
    println!("{output}");
    Ok(())
}

/// One full poll cycle against an open session: three queries,
/// reconcile, render. Separated from `cmd_status` so tests can drive it
/// with a fake backend.
pub(crate) fn poll_session<R: RcCommandRunner>(
    session: &DaemonSession<R>,
    settings: &Settings,
) -> Result<String, RcError> {
    let config = session.dump_config()?;
    let mounted = session.list_mounts()?;
    let stats = session.stats()?;
    let remotes = reconcile(&config, &mounted, &settings.mount_dir);
    Ok(render_status(&remotes, mounted.len(), stats.speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcmount_core::CacheMode;
    use std::path::PathBuf;

    /// Fake rclone backend serving canned control-API replies.
    struct FakeRcBackend {
        config: &'static str,
        vfses: &'static str,
        stats: &'static str,
    }

    impl Default for FakeRcBackend {
        fn default() -> Self {
            Self {
                config: "{}",
                vfses: r#"{"vfses": []}"#,
                stats: r#"{"speed": 0}"#,
            }
        }
    }

    impl RcCommandRunner for FakeRcBackend {
        fn run(&self, args: &[&str]) -> Result<String, RcError> {
            Ok(match args.first().copied() {
                Some("config/dump") => self.config,
                Some("vfs/list") => self.vfses,
                Some("core/stats") => self.stats,
                other => panic!("unexpected call: {other:?}"),
            }
            .to_string())
        }
    }

    fn settings() -> Settings {
        Settings {
            mount_dir: PathBuf::from("/mnt"),
            ..Settings::default()
        }
    }

    #[test]
    fn poll_renders_reconciled_view() {
        let backend = FakeRcBackend {
            config: r#"{
                "dropbox": {"type": "dropbox", "volume_name": "Dropbox Home"},
                "gdrive": {"type": "drive"},
                "home": {"type": "local"}
            }"#,
            vfses: r#"{"vfses": ["dropbox:"]}"#,
            stats: r#"{"speed": 2048.0}"#,
        };
        let session = DaemonSession::with_runner(backend, CacheMode::Full);

        let out = poll_session(&session, &settings()).expect("should poll");

        assert!(out.starts_with("2 remotes"), "local filtered, got: {out}");
        assert!(out.contains("* dropbox"), "dropbox mounted: {out}");
        assert!(out.contains("Dropbox Home"));
        assert!(out.contains("/mnt/gdrive"));
        assert!(out.contains("2.0 KiB/s"));
    }

    #[test]
    fn poll_with_no_remotes() {
        let session = DaemonSession::with_runner(FakeRcBackend::default(), CacheMode::Full);
        let out = poll_session(&session, &settings()).expect("should poll");
        assert_eq!(out, "0 remotes");
    }

    #[test]
    fn unreachable_daemon_is_surfaced_not_a_panic() {
        struct Refused;
        impl RcCommandRunner for Refused {
            fn run(&self, _args: &[&str]) -> Result<String, RcError> {
                Err(RcError::CommandFailed(
                    "exit code 1: connection refused".to_string(),
                ))
            }
        }
        let session = DaemonSession::with_runner(Refused, CacheMode::Full);
        let err = poll_session(&session, &settings()).expect_err("should fail");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn malformed_mount_list_is_a_protocol_error() {
        let backend = FakeRcBackend {
            vfses: "502 bad gateway",
            ..FakeRcBackend::default()
        };
        let session = DaemonSession::with_runner(backend, CacheMode::Full);
        let err = poll_session(&session, &settings()).expect_err("should fail");
        assert!(matches!(err, RcError::Protocol { call: "vfs/list", .. }));
    }
}
