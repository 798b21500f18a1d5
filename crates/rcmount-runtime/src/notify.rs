//! User-visible failure alerts.
//! On macOS the alert is raised as a dialog via `osascript`; elsewhere
//! it goes to the log only.

/// Report a failure to the user. Best-effort: a failed alert must not
/// mask the original error.
pub fn alert(title: &str, text: &str) {
    tracing::error!("{title}: {text}");

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            "display alert \"{}\" message \"{}\"",
            applescript_escape(title),
            applescript_escape(text)
        );
        let _ = std::process::Command::new("osascript")
            .args(["-e", &script])
            .status();
    }
}

/// Escape a string for embedding in double quotes inside AppleScript.
#[cfg_attr(not(any(target_os = "macos", test)), allow(dead_code))]
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(
            applescript_escape(r#"mount of "dropbox" failed: C:\path"#),
            r#"mount of \"dropbox\" failed: C:\\path"#
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(applescript_escape("all good"), "all good");
    }
}
