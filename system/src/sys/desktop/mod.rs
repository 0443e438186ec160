use std::process::{Command, Stdio};

use crate::SystemError;

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

// Not `cmd /C start`: cmd.exe would parse `&`, `|` and `^` in the URL.
#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(url);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

pub(crate) fn open_url(url: &str) -> Result<(), SystemError> {
    let mut child = browser_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap the launcher off the calling thread.
    std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            log::warn!("browser launcher did not exit cleanly: {e}");
        }
    });
    Ok(())
}

pub(crate) fn open_app_settings(_uri: &str) -> Result<(), SystemError> {
    Err(SystemError::NotSupported("application settings screen"))
}

pub(crate) fn finish_screen() -> Result<(), SystemError> {
    log::debug!("finish_screen is a no-op on desktop");
    Ok(())
}

pub(crate) fn platform_version() -> Option<u32> {
    None
}

pub(crate) fn package_name() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn url_is_the_launcher_argument_verbatim() {
        let url = "https://x.example/?a=1&b=2&calc|more^<x>";
        let command = browser_command(url);
        assert_eq!(command.get_args().last(), Some(OsStr::new(url)));
    }

    #[test]
    fn launcher_is_not_a_shell() {
        let command = browser_command("https://x.example/");
        let program = command.get_program();
        for shell in ["cmd", "cmd.exe", "sh", "bash", "powershell"] {
            assert_ne!(program, OsStr::new(shell));
        }
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn windows_goes_through_the_protocol_handler() {
        let command = browser_command("https://x.example/?a=1&calc");
        assert_eq!(command.get_program(), OsStr::new("rundll32"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(
            args,
            [
                OsStr::new("url.dll,FileProtocolHandler"),
                OsStr::new("https://x.example/?a=1&calc")
            ]
        );
    }
}
