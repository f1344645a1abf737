//! One-Shot Notice Cookie
//!
//! The transient "flash" notice shown after a redirect. The value is
//! `<level>:<base64url(message)>` so arbitrary text survives cookie
//! syntax rules. The cookie is deliberately not HttpOnly: the page script
//! reads it, renders the notice, and clears it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Cookie name for the transient notice
pub const NOTICE_COOKIE: &str = "notice";

/// Notice severity, mirrored in the page styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Danger,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Danger => "danger",
            NoticeLevel::Info => "info",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(NoticeLevel::Success),
            "warning" => Some(NoticeLevel::Warning),
            "danger" => Some(NoticeLevel::Danger),
            "info" => Some(NoticeLevel::Info),
            _ => None,
        }
    }
}

/// Build the Set-Cookie value carrying a notice.
pub fn notice_cookie(level: NoticeLevel, message: &str) -> String {
    format!(
        "{}={}:{}; Path=/; Max-Age=60; SameSite=Lax",
        NOTICE_COOKIE,
        level.as_str(),
        URL_SAFE_NO_PAD.encode(message)
    )
}

/// Decode a notice cookie value back into level and message.
pub fn parse_notice(value: &str) -> Option<(NoticeLevel, String)> {
    let (level, encoded) = value.split_once(':')?;
    let level = NoticeLevel::from_str(level)?;
    let message = String::from_utf8(URL_SAFE_NO_PAD.decode(encoded).ok()?).ok()?;
    Some((level, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_roundtrip() {
        let cookie = notice_cookie(NoticeLevel::Warning, "Passwords do not match.");
        let value = cookie
            .strip_prefix("notice=")
            .unwrap()
            .split(';')
            .next()
            .unwrap();

        let (level, message) = parse_notice(value).unwrap();
        assert_eq!(level, NoticeLevel::Warning);
        assert_eq!(message, "Passwords do not match.");
    }

    #[test]
    fn test_notice_cookie_attributes() {
        let cookie = notice_cookie(NoticeLevel::Info, "You have been logged out.");
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.contains("Path=/"));
        // Page script must be able to read and clear it
        assert!(!cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_parse_notice_rejects_garbage() {
        assert!(parse_notice("").is_none());
        assert!(parse_notice("nocolon").is_none());
        assert!(parse_notice("shouting:???").is_none());
    }
}
