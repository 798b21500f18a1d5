//! In-process action dispatcher: resolves CLI requests into concrete
//! mount actions and executes them against the daemon.

use std::path::{Path, PathBuf};

use rcmount_core::{Action, ReconciledRemote, Settings, reconcile};
use rcmount_rc::{DaemonSession, RcCommandRunner, RcError};

use crate::notify;

/// A CLI action request before remote-name resolution.
#[derive(Debug, Clone)]
pub enum Request {
    Mount {
        name: String,
        mount_point: Option<PathBuf>,
        volume: Option<String>,
    },
    /// Target is either a mount path or a bare remote name.
    Unmount { target: PathBuf },
    Open { target: PathBuf },
}

/// Resolve and execute one action against the daemon. A failure raises
/// a visible alert in addition to the error return.
pub async fn dispatch(settings: &Settings, request: Request) -> anyhow::Result<()> {
    let settings = settings.clone();
    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let session = DaemonSession::attach(&settings)?;
        let action = resolve(&session, &settings, &request)?;
        run_action(&session, &action)?;
        Ok(())
    })
    .await?;

    if let Err(ref e) = result {
        notify::alert("rcmount", &format!("{e:#}"));
    }
    result
}

/// Turn a request into a concrete action, filling omitted mount paths
/// and volume labels from the reconciled remote view. A fully-specified
/// request resolves without touching the daemon.
pub(crate) fn resolve<R: RcCommandRunner>(
    session: &DaemonSession<R>,
    settings: &Settings,
    request: &Request,
) -> anyhow::Result<Action> {
    match request {
        Request::Mount {
            name,
            mount_point: Some(mount_point),
            volume: Some(volume),
        } => Ok(Action::Mount {
            remote: name.clone(),
            mount_point: mount_point.clone(),
            volume: volume.clone(),
        }),
        Request::Mount {
            name,
            mount_point,
            volume,
        } => {
            let remote = lookup_remote(session, settings, name)?;
            match (mount_point, volume) {
                (None, None) => Ok(Action::mount_for(&remote)),
                (point, vol) => Ok(Action::Mount {
                    remote: remote.name.clone(),
                    mount_point: point.clone().unwrap_or_else(|| remote.mount_path.clone()),
                    volume: vol.clone().unwrap_or_else(|| remote.volume.clone()),
                }),
            }
        }
        Request::Unmount { target } => match bare_remote_name(session, settings, target)? {
            Some(remote) => Ok(Action::unmount_for(&remote)),
            None => Ok(Action::Unmount {
                mount_point: target.clone(),
            }),
        },
        Request::Open { target } => match bare_remote_name(session, settings, target)? {
            Some(remote) => Ok(Action::open_for(&remote)),
            None => Ok(Action::Open {
                mount_point: target.clone(),
            }),
        },
    }
}

fn lookup_remote<R: RcCommandRunner>(
    session: &DaemonSession<R>,
    settings: &Settings,
    name: &str,
) -> anyhow::Result<ReconciledRemote> {
    let remotes = reconcile(
        &session.dump_config()?,
        &session.list_mounts()?,
        &settings.mount_dir,
    );
    remotes
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no configured remote named {name}"))
}

/// A single-component target that names a configured remote resolves
/// through the reconciler; anything else is treated as a path.
fn bare_remote_name<R: RcCommandRunner>(
    session: &DaemonSession<R>,
    settings: &Settings,
    target: &Path,
) -> anyhow::Result<Option<ReconciledRemote>> {
    let Some(name) = target.to_str() else {
        return Ok(None);
    };
    if name.contains(std::path::MAIN_SEPARATOR) || name.is_empty() {
        return Ok(None);
    }
    let remotes = reconcile(
        &session.dump_config()?,
        &session.list_mounts()?,
        &settings.mount_dir,
    );
    Ok(remotes.get(name).cloned())
}

/// Action execution against an open session, separated so tests can
/// drive it with fake runners.
pub(crate) fn run_action<R: RcCommandRunner>(
    session: &DaemonSession<R>,
    action: &Action,
) -> Result<(), RcError> {
    match action {
        Action::Mount {
            remote,
            mount_point,
            volume,
        } => {
            tracing::info!("mounting {remote} at {}", mount_point.display());
            session.mount(remote, mount_point, volume)
        }
        Action::Unmount { mount_point } => {
            tracing::info!("unmounting {}", mount_point.display());
            session.unmount(mount_point)
        }
        Action::Open { mount_point } => open_path(mount_point),
    }
}

/// Reveal a path in the file manager.
fn open_path(path: &Path) -> Result<(), RcError> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    let status = std::process::Command::new(opener).arg(path).status()?;
    if !status.success() {
        return Err(RcError::CommandFailed(format!(
            "{opener} exited with code {}",
            status.code().unwrap_or(-1)
        )));
    }
    Ok(())
}
