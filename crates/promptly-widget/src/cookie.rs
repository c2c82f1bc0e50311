//! Cookie storage for the conversation identifier.
//!
//! [`CookieJar`] models a page's `document.cookie`: writes are raw
//! `name=value; expires=...; path=/` assignments and reads scan the visible
//! `a=1; b=2` string. [`FileCookieJar`] persists a jar to disk so the
//! identifier survives restarts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the cookie holding the conversation identifier.
pub const CHAT_ID_COOKIE: &str = "chat_id";

/// Lifetime of the conversation identifier cookie, in days.
pub const CHAT_ID_TTL_DAYS: i64 = 30;

/// Longest lifetime a cookie write is given, in days.
pub const MAX_COOKIE_TTL_DAYS: i64 = 400;

/// `toUTCString`-style date used in `expires=` attributes.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Error type for cookie persistence.
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store for cookies.
pub trait CookieStore {
    /// Value of a visible cookie, or `None` when absent or expired.
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie. `None` or a zero TTL makes it a session cookie; a
    /// negative TTL expires it immediately.
    fn set(&mut self, name: &str, value: &str, ttl: Option<Duration>);

    /// Remove a cookie.
    fn remove(&mut self, name: &str);
}

/// One stored cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// In-memory cookie jar with `document.cookie` semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw cookie assignment, as `document.cookie = raw` would.
    ///
    /// Whitespace around the name is ignored. An `expires` in the past
    /// deletes the cookie. Assignments without `=` are ignored.
    pub fn assign(&mut self, raw: &str) {
        let mut parts = raw.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut expires = None;
        for attribute in parts {
            let Some((key, val)) = attribute.split_once('=') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case("expires") {
                expires = DateTime::parse_from_rfc2822(val.trim())
                    .ok()
                    .map(|date| date.with_timezone(&Utc));
            }
        }

        self.cookies.retain(|cookie| cookie.name != name);

        let cookie = Cookie {
            name: name.to_string(),
            value: value.trim().to_string(),
            expires,
        };
        if !cookie.is_expired(Utc::now()) {
            self.cookies.push(cookie);
        }
    }

    /// Visible cookies as a `name=value; name=value` string.
    pub fn cookie_string(&self) -> String {
        let now = Utc::now();
        self.cookies
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Drop cookies without an expiry, as a browser does on restart.
    pub fn purge_session(&mut self) {
        self.cookies.retain(|cookie| cookie.expires.is_some());
    }

    /// Drop expired cookies.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.cookies.retain(|cookie| !cookie.is_expired(now));
    }

    /// Number of stored cookies, expired ones included.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.cookie_string()
            .split(';')
            .map(|part| part.trim_start_matches(' '))
            .find_map(|part| part.strip_prefix(prefix.as_str()).map(str::to_string))
    }

    fn set(&mut self, name: &str, value: &str, ttl: Option<Duration>) {
        self.assign(&format_assignment(name, value, ttl, Utc::now()));
    }

    fn remove(&mut self, name: &str) {
        self.cookies.retain(|cookie| cookie.name != name);
    }
}

/// Format a cookie write the way a page script does.
///
/// The TTL is clamped to [`MAX_COOKIE_TTL_DAYS`] either way.
pub fn format_assignment(
    name: &str,
    value: &str,
    ttl: Option<Duration>,
    now: DateTime<Utc>,
) -> String {
    let expires = match ttl {
        Some(ttl) if ttl != Duration::zero() => {
            let max = Duration::days(MAX_COOKIE_TTL_DAYS);
            now.checked_add_signed(ttl.clamp(-max, max))
                .map(|at| format!("; expires={}", at.format(EXPIRES_FORMAT)))
                .unwrap_or_default()
        }
        _ => String::new(),
    };
    format!("{name}={value}{expires}; path=/")
}

/// A cookie jar persisted as JSON.
///
/// Every write is flushed to disk. Flush failures are logged and the
/// in-memory jar stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    jar: CookieJar,
}

impl FileCookieJar {
    /// Open a jar at `path`. A missing file yields an empty jar; an
    /// unreadable one is discarded with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CookieError> {
        let path = path.into();
        let jar = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<CookieJar>(&content) {
                Ok(mut jar) => {
                    jar.purge_session();
                    jar.purge_expired();
                    jar
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable cookie file");
                    CookieJar::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => CookieJar::new(),
            Err(e) => return Err(CookieError::Io(e)),
        };
        Ok(Self { path, jar })
    }

    /// Default jar location in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("promptly").join("cookies.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Write the jar to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), CookieError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.jar)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "saved cookie jar");
        Ok(())
    }

    fn flush(&mut self) {
        self.jar.purge_expired();
        if let Err(e) = self.save() {
            warn!(path = %self.path.display(), error = %e, "failed to save cookie jar");
        }
    }
}

impl CookieStore for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name)
    }

    fn set(&mut self, name: &str, value: &str, ttl: Option<Duration>) {
        self.jar.set(name, value, ttl);
        self.flush();
    }

    fn remove(&mut self, name: &str) {
        self.jar.remove(name);
        self.flush();
    }
}
