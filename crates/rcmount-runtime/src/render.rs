//! Plain-text rendering of the reconciled remote listing.

use std::collections::BTreeMap;

use rcmount_core::ReconciledRemote;

/// Render the status listing: a summary line followed by one line per
/// remote. Pure function, separated for testability.
pub fn render_status(
    remotes: &BTreeMap<String, ReconciledRemote>,
    mounted_count: usize,
    speed: f64,
) -> String {
    let mut out = String::new();

    let word = if remotes.len() == 1 { "remote" } else { "remotes" };
    out.push_str(&format!("{} {word}", remotes.len()));
    if mounted_count > 0 {
        out.push_str(&format!(
            " \u{2014} {mounted_count} mounted, {}",
            format_speed(speed)
        ));
    }
    out.push('\n');

    let name_w = remotes.keys().map(|n| n.len()).max().unwrap_or(0);
    let vol_w = remotes
        .values()
        .map(|r| r.volume.len())
        .max()
        .unwrap_or(0);

    for remote in remotes.values() {
        let marker = if remote.mounted { "*" } else { " " };
        let state = if remote.mounted { "mounted" } else { "unmounted" };
        out.push_str(&format!(
            "  {marker} {name:<name_w$}  {volume:<vol_w$}  {state:<9}  {path}\n",
            name = remote.name,
            volume = remote.volume,
            path = remote.mount_path.display(),
        ));
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Human-readable bytes per second.
pub fn format_speed(bytes_per_sec: f64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    if bytes_per_sec >= MIB {
        format!("{:.1} MiB/s", bytes_per_sec / MIB)
    } else if bytes_per_sec >= KIB {
        format!("{:.1} KiB/s", bytes_per_sec / KIB)
    } else {
        format!("{bytes_per_sec:.0} B/s")
    }
}
