//! Remote configuration dump (`config/dump`), filtered to actual remotes.

use std::collections::BTreeMap;

use crate::error::RcError;
use crate::executor::RcCommandRunner;
use rcmount_core::RemoteConfig;

/// Fetch the full remote configuration, excluding `"local"`-type entries
/// (they describe the host filesystem, not a remote).
///
/// A malformed entry is skipped with a warning so one bad remote does
/// not blank the whole listing.
pub fn config_dump(
    runner: &impl RcCommandRunner,
) -> Result<BTreeMap<String, RemoteConfig>, RcError> {
    let raw = runner.run(&["config/dump"])?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| RcError::Protocol {
        call: "config/dump",
        detail: e.to_string(),
    })?;
    let entries = value.as_object().ok_or_else(|| RcError::Protocol {
        call: "config/dump",
        detail: "expected a JSON object keyed by remote name".to_string(),
    })?;

    let mut remotes = BTreeMap::new();
    for (name, entry) in entries {
        match serde_json::from_value::<RemoteConfig>(entry.clone()) {
            Ok(cfg) if cfg.is_local() => {}
            Ok(cfg) => {
                remotes.insert(name.clone(), cfg);
            }
            Err(e) => {
                tracing::warn!("skipping malformed config entry {name}: {e}");
            }
        }
    }
    Ok(remotes)
}
