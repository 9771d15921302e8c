//! Platform browser launcher.

use std::process::{Command, Stdio};

use tracing::debug;
use url::Url;

use crate::domain::ports::{NavigationError, Navigator};

/// Hands addresses to the operating system's URL opener, which shows them
/// in a new tab or window of the default browser.
///
/// The opener is awaited, so a non-zero exit (no browser configured, for
/// example) is reported instead of lost.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNavigator;

impl SystemNavigator {
    fn command(target: &str) -> Result<Command, NavigationError> {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            Ok(cmd)
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            Ok(cmd)
        } else if cfg!(unix) {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            Ok(cmd)
        } else {
            Err(NavigationError::Unsupported)
        }
    }
}

impl Navigator for SystemNavigator {
    fn navigate(&self, target: &Url) -> Result<(), NavigationError> {
        match target.scheme() {
            "http" | "https" => {}
            other => {
                return Err(NavigationError::Blocked(format!(
                    "scheme '{other}' is not allowed"
                )));
            }
        }

        debug!(target = %target, "Opening in browser");

        launch(Self::command(target.as_str())?)
    }
}

/// Runs the opener to completion; platform openers exit once the browser
/// has the address.
fn launch(mut cmd: Command) -> Result<(), NavigationError> {
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if !status.success() {
        return Err(NavigationError::Blocked(format!("opener exited with {status}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_http_scheme_is_blocked() {
        let target = Url::parse("javascript:alert(1)").unwrap();
        let result = SystemNavigator.navigate(&target);
        assert!(matches!(result, Err(NavigationError::Blocked(_))));
    }

    #[test]
    fn test_file_scheme_is_blocked() {
        let target = Url::parse("file:///etc/passwd").unwrap();
        assert!(SystemNavigator.navigate(&target).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_succeeds_when_opener_exits_cleanly() {
        assert!(launch(Command::new("true")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_reports_failed_opener() {
        let result = launch(Command::new("false"));
        assert!(matches!(result, Err(NavigationError::Blocked(_))));
    }

    #[test]
    fn test_launch_reports_missing_opener() {
        let result = launch(Command::new("shortlink-no-such-opener"));
        assert!(matches!(result, Err(NavigationError::Launch(_))));
    }
}
