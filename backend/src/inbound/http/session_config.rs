//! Session cookie configuration.
//!
//! The shell session lives in an encrypted cookie, so the cookie key and
//! flags are security relevant. Values come from the environment through
//! [`mockable::Env`]. Debug builds fall back to safe defaults with a
//! warning; release builds refuse to start on anything missing or invalid.

use std::path::{Path, PathBuf};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this length, so debug builds enforce it too.
const KEY_DERIVE_MIN_LEN: usize = 32;
/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of a session cookie in hours.
pub const SESSION_TTL_HOURS: i64 = 2;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const FINGERPRINT_BYTES: usize = 8;

/// Build mode deciding how strictly settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerate missing or invalid values and warn.
    Debug,
    /// Require every toggle explicitly.
    Release,
}

impl BuildMode {
    /// Mode matching the current compilation profile.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Use `fallback` in debug builds, fail with `error` in release builds.
    fn tolerate<T>(
        self,
        fallback: T,
        error: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        match self {
            Self::Debug => {
                warn!(%error, "session setting falls back to default");
                Ok(fallback)
            }
            Self::Release => Err(error),
        }
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    /// Whether the key was generated for this process only.
    pub ephemeral_key: bool,
}

impl SessionSettings {
    /// Read and validate settings from `env`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use homestead::inbound::http::session_config::{BuildMode, SessionSettings};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "SESSION_ALLOW_EPHEMERAL" => Some("1".to_owned()),
    ///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = SessionSettings::from_env(&env, BuildMode::Debug).expect("debug defaults");
    /// assert!(settings.cookie_secure);
    /// assert!(settings.ephemeral_key);
    /// ```
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, SessionConfigError> {
        let cookie_secure = bool_setting(env, mode, COOKIE_SECURE_ENV, true)?;
        let same_site = same_site_setting(env, mode, cookie_secure)?;
        let allow_ephemeral = bool_setting(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
        if allow_ephemeral && mode == BuildMode::Release {
            return Err(SessionConfigError::EphemeralNotAllowed);
        }

        let path = env
            .string(KEY_FILE_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_KEY_PATH), PathBuf::from);
        let (key, ephemeral_key) = match load_key(&path, mode) {
            Ok(key) => (key, false),
            Err(SessionConfigError::KeyRead { path, source })
                if mode == BuildMode::Debug || allow_ephemeral =>
            {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "using temporary session key (dev only)"
                );
                (Key::generate(), true)
            }
            Err(error) => return Err(error),
        };

        Ok(Self {
            key,
            cookie_secure,
            same_site,
            ephemeral_key,
        })
    }

    /// Short, non-secret identifier of the active key for logs and runbooks.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }

    /// Session middleware storing the encrypted session in a cookie.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let ttl = time::Duration::hours(SESSION_TTL_HOURS);
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(PersistentSession::default().session_ttl(ttl))
            .build()
    }

    /// Log the effective settings without exposing key material.
    pub fn log_summary(&self) {
        info!(
            fingerprint = %self.fingerprint(),
            ephemeral = self.ephemeral_key,
            cookie_secure = self.cookie_secure,
            same_site = ?self.same_site,
            "session cookie configured"
        );
    }
}

/// Truncated SHA-256 of the key's signing half, hex encoded.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

fn load_key(path: &Path, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let bytes = Zeroizing::new(std::fs::read(path).map_err(|source| {
        SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }
    })?);
    let min_len = match mode {
        BuildMode::Debug => KEY_DERIVE_MIN_LEN,
        BuildMode::Release => SESSION_KEY_MIN_LEN,
    };
    if bytes.len() < min_len {
        return Err(SessionConfigError::KeyTooShort {
            path: path.to_path_buf(),
            length: bytes.len(),
            min_len,
        });
    }
    Ok(Key::derive_from(&bytes))
}

fn bool_setting<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    fallback: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.tolerate(fallback, SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => mode.tolerate(
            fallback,
            SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn same_site_setting<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.tolerate(fallback, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.tolerate(SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => mode.tolerate(
            fallback,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
