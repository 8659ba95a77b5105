//! Log file location, ANSI stripping and timestamps.
use std::path::PathBuf;

/// Remove the SGR colour sequences the console formatter emits.
///
/// An unterminated sequence swallows the rest of the string.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("\x1b[") {
        out.push_str(rest.get(..start).unwrap_or_default());
        let tail = rest.get(start + 2..).unwrap_or_default();
        rest = tail
            .find('m')
            .and_then(|end| tail.get(end + 1..))
            .unwrap_or_default();
    }
    out.push_str(rest);
    out
}

/// `<cache>/conventions/<command>.log`, where `<cache>` is `$XDG_CACHE_HOME`
/// or `~/.cache`. The directory is created on demand.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = cache.join("conventions");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_console_styles() {
        assert_eq!(strip_ansi("\x1b[33mWARN\x1b[0m  :app"), "WARN  :app");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mResolving targets\x1b[0m"),
            "==> Resolving targets"
        );
        assert_eq!(strip_ansi("app.library"), "app.library");
    }

    #[test]
    fn strip_ansi_drops_unterminated_sequence() {
        assert_eq!(strip_ansi("ok \x1b[31"), "ok ");
    }

    #[test]
    fn log_file_is_named_after_command() {
        if let Some(path) = log_file_path("resolve") {
            assert!(path.ends_with("conventions/resolve.log"));
        }
    }

    #[test]
    fn utc_now_uses_format() {
        let time = utc_now("%H:%M:%S");
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);
    }
}
