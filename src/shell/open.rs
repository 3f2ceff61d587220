//! Open a URL with the platform's default handler.

use std::process::{Command, Stdio};

use url::Url;

/// Launch the system URL handler for `url`.  Returns `true` if a handler
/// process was started.
pub fn open_link(url: &Url) -> bool {
    let target = url.as_str();

    #[cfg(target_os = "macos")]
    {
        return run_opener("open", &[target]);
    }

    #[cfg(target_os = "windows")]
    {
        // The empty string is the window title `start` expects first.
        return run_opener("cmd", &["/C", "start", "", target]);
    }

    #[cfg(target_os = "linux")]
    {
        if run_opener("xdg-open", &[target]) {
            return true;
        }
        // WSL has no xdg-open by default.
        return run_opener("wslview", &[target]);
    }

    #[allow(unreachable_code)]
    {
        tracing::warn!("no URL handler for this platform: {target}");
        false
    }
}

/// Start `cmd` detached from the terminal.  The handler is not waited on,
/// so a slow browser launch never stalls the event loop.
fn run_opener(cmd: &str, args: &[&str]) -> bool {
    let spawned = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(_) => {
            tracing::debug!("{cmd} launched for {:?}", args.last());
            true
        }
        Err(e) => {
            tracing::debug!("could not run {cmd}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_opener_reports_failure() {
        assert!(!run_opener("folio-no-such-opener-binary", &["https://example.com"]));
    }

    #[cfg(unix)]
    #[test]
    fn slow_opener_does_not_block() {
        let started = std::time::Instant::now();
        assert!(run_opener("sleep", &["5"]));
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}
