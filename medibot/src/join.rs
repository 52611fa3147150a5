//! Opens a match card's meet link in the user's browser.

use std::io;
use std::process::{Command, Stdio};

/// Hands `link` to the platform opener and reaps the opener in the background.
///
/// Only `http` and `https` links without whitespace, control characters or
/// quotes are opened; anything else is rejected with `InvalidInput`. The
/// link always travels as a single argv entry and never through a shell.
///
/// Must be called from inside the tokio runtime.
///
/// # Errors
///
/// Returns `Err` if the link is rejected or the opener cannot be spawned.
pub fn open_link(link: &str) -> io::Result<()> {
    let link = validate(link)?;
    let (program, args) = opener_argv(std::env::consts::OS, link);

    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    tracing::info!(link, program, "opened meet link");

    tokio::task::spawn_blocking(move || match child.wait() {
        Ok(status) if !status.success() => {
            tracing::warn!(%status, program, "link opener exited with failure");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, program, "cannot reap link opener"),
    });
    Ok(())
}

fn validate(link: &str) -> io::Result<&str> {
    let link = link.trim();
    let web = link.starts_with("https://") || link.starts_with("http://");
    let clean = !link.chars().any(|c| c.is_whitespace() || c.is_control() || c == '"');
    if web && clean {
        Ok(link)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to open link {link:?}"),
        ))
    }
}

/// Program and arguments that open `link` on `os` (as in `std::env::consts::OS`).
///
/// Windows goes through `rundll32 url.dll,FileProtocolHandler`, which takes the
/// URL as a plain argument; `cmd /C start` would split it at `&`.
fn opener_argv<'a>(os: &str, link: &'a str) -> (&'static str, Vec<&'a str>) {
    match os {
        "macos" => ("open", vec![link]),
        "windows" => ("rundll32", vec!["url.dll,FileProtocolHandler", link]),
        _ => ("xdg-open", vec![link]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_web_links_are_rejected() {
        for link in [
            "",
            "javascript:alert(1)",
            "file:///etc/passwd",
            "; rm -rf ~",
            "https://x/ calc",
            "https://x/\"&calc",
            "https://x/\ncalc",
        ] {
            let err = open_link(link).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{link:?}");
        }
    }

    #[test]
    fn query_strings_survive_validation() {
        let link = "https://meet.example/j?id=1&pwd=2";
        assert_eq!(validate(link).unwrap(), link);
    }

    #[test]
    fn windows_argv_keeps_the_link_whole() {
        let link = "https://meet.example/j?id=1&pwd=2|x^y";
        let (program, args) = opener_argv("windows", link);
        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", link]);
        assert!(!args.iter().any(|a| a.eq_ignore_ascii_case("/c")));
    }

    #[test]
    fn unix_openers_take_the_link_as_one_argument() {
        let link = "https://meet.example/j?id=1&pwd=2";
        assert_eq!(opener_argv("linux", link), ("xdg-open", vec![link]));
        assert_eq!(opener_argv("macos", link), ("open", vec![link]));
    }
}
