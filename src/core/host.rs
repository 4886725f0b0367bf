//! core::host
//!
//! Build-host facts: machine name and local build time.

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

/// strftime pattern for `git.build.time`.
pub const BUILD_TIME_FORMAT: &str = "%d.%m.%Y @ %H:%M:%S %:z";

/// Name of the local machine.
///
/// Uses the `gethostname` syscall, then the `HOSTNAME` and `COMPUTERNAME`
/// environment variables. Empty if none of them answer.
pub fn hostname() -> String {
    system_hostname()
        .or_else(|| hostname_from_env(|var| std::env::var(var).ok()))
        .unwrap_or_default()
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => name
            .into_string()
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
        Err(err) => {
            debug!(error = %err, "gethostname failed");
            None
        }
    }
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
    None
}

fn hostname_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .filter_map(lookup)
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
}

/// Format a timestamp as `DD.MM.YYYY @ HH:MM:SS +HH:MM`.
pub fn format_build_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(BUILD_TIME_FORMAT).to_string()
}

/// The current local time as [`format_build_time`] renders it.
pub fn build_time_now() -> String {
    format_build_time(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn build_time_format() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2024, 1, 5, 9, 7, 3).unwrap();
        assert_eq!(format_build_time(&at), "05.01.2024 @ 09:07:03 +02:00");
    }

    #[test]
    fn build_time_now_has_expected_shape() {
        let now = build_time_now();
        let (date, rest) = now.split_once(" @ ").unwrap();
        assert_eq!(date.len(), "DD.MM.YYYY".len());
        assert_eq!(rest.split(' ').count(), 2);
    }

    #[test]
    fn hostname_needs_no_external_binary() {
        assert!(!hostname().is_empty());
        assert_eq!(hostname(), hostname().trim());
    }

    #[test]
    fn env_fallback_skips_blank_values() {
        let name = hostname_from_env(|var| match var {
            "HOSTNAME" => Some("  ".to_string()),
            "COMPUTERNAME" => Some("WIN-BOX\r\n".to_string()),
            _ => None,
        });
        assert_eq!(name.as_deref(), Some("WIN-BOX"));
    }

    #[test]
    fn env_fallback_prefers_hostname() {
        let name = hostname_from_env(|var| Some(format!("{var}-value")));
        assert_eq!(name.as_deref(), Some("HOSTNAME-value"));
    }

    #[test]
    fn env_fallback_empty_when_unset() {
        assert_eq!(hostname_from_env(|_| None), None);
    }
}
