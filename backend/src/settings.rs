//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TRUSTYHIRE_*` environment variables and an
//! optional configuration file. Every key is optional at load time; the
//! accessors apply defaults and report missing required values.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroize;

use crate::inbound::http::state::DEFAULT_RESUME_MAX_BYTES;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DB_QUERY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_FOLDER: &str = "trustyhire/resumes";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAIL_FROM: &str = "TrustyHire <noreply@trustyhire.com>";

/// Problems found while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required key was not supplied.
    #[error("missing required setting `{key}`")]
    Missing {
        /// Setting name.
        key: &'static str,
    },
    /// A key was supplied with an unusable value.
    #[error("invalid value for `{key}`: {message}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What was wrong.
        message: String,
    },
}

/// Signature algorithm expected on bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JwtAlgorithm {
    /// RSA public key verification, as used by hosted identity providers.
    #[default]
    Rs256,
    /// Shared-secret verification for local development.
    Hs256,
}

/// Key material for verifying bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtKey {
    /// PEM encoded RSA public key.
    RsaPem(String),
    /// HMAC shared secret.
    Secret(String),
}

impl Zeroize for JwtKey {
    fn zeroize(&mut self) {
        match self {
            Self::RsaPem(pem) => pem.zeroize(),
            Self::Secret(secret) => secret.zeroize(),
        }
    }
}

/// Object store credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    /// Account namespace in upload URLs.
    pub cloud_name: String,
    /// Public API key sent with each upload.
    pub api_key: String,
    /// Signing secret; never sent over the wire.
    pub api_secret: String,
    /// Folder prefix for uploaded resumes.
    pub folder: String,
}

/// SMTP relay configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// Relay host name.
    pub host: String,
    /// Relay port; STARTTLS is always negotiated.
    pub port: u16,
    /// Login name, when the relay requires authentication.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// `From` mailbox for outgoing notifications.
    pub from: String,
}

/// Configuration values for the TrustyHire server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRUSTYHIRE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
    /// Seconds before a repository call is abandoned.
    pub db_query_timeout_secs: Option<u64>,
    /// `RS256` or `HS256`.
    pub jwt_algorithm: Option<String>,
    /// PEM public key for `RS256`.
    pub jwt_public_key_pem: Option<String>,
    /// Shared secret for `HS256`.
    pub jwt_secret: Option<String>,
    /// Expected `iss` claim.
    pub jwt_issuer: Option<String>,
    /// Expected `aud` claim.
    pub jwt_audience: Option<String>,
    /// Object store account name.
    pub storage_cloud_name: Option<String>,
    /// Object store API key.
    pub storage_api_key: Option<String>,
    /// Object store API secret.
    pub storage_api_secret: Option<String>,
    /// Folder resumes are uploaded into.
    pub storage_folder: Option<String>,
    /// SMTP relay host; notifications are skipped when unset.
    pub smtp_host: Option<String>,
    /// SMTP relay port.
    pub smtp_port: Option<u16>,
    /// SMTP username.
    pub smtp_username: Option<String>,
    /// SMTP password.
    pub smtp_password: Option<String>,
    /// `From` header of outgoing mail.
    pub mail_from: Option<String>,
    /// Largest accepted resume in bytes.
    pub resume_max_bytes: Option<usize>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = present(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            key: "bind_addr",
            message: err.to_string(),
        })
    }

    /// The database URL, which has no default.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        present(self.database_url.as_ref()).ok_or(SettingsError::Missing {
            key: "database_url",
        })
    }

    /// Pool size limit.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Pool checkout timeout.
    pub fn db_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        )
    }

    /// Per-call repository timeout.
    pub fn db_query_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_query_timeout_secs
                .unwrap_or(DEFAULT_DB_QUERY_TIMEOUT_SECS),
        )
    }

    /// Token signature algorithm, `RS256` unless configured otherwise.
    pub fn jwt_algorithm(&self) -> Result<JwtAlgorithm, SettingsError> {
        match present(self.jwt_algorithm.as_ref()) {
            None => Ok(JwtAlgorithm::default()),
            Some(raw) if raw.eq_ignore_ascii_case("RS256") => Ok(JwtAlgorithm::Rs256),
            Some(raw) if raw.eq_ignore_ascii_case("HS256") => Ok(JwtAlgorithm::Hs256),
            Some(other) => Err(SettingsError::Invalid {
                key: "jwt_algorithm",
                message: format!("expected RS256 or HS256, got {other}"),
            }),
        }
    }

    /// Key material matching [`Self::jwt_algorithm`].
    pub fn jwt_key(&self) -> Result<JwtKey, SettingsError> {
        match self.jwt_algorithm()? {
            JwtAlgorithm::Rs256 => present(self.jwt_public_key_pem.as_ref())
                .map(|pem| JwtKey::RsaPem(pem.to_owned()))
                .ok_or(SettingsError::Missing {
                    key: "jwt_public_key_pem",
                }),
            JwtAlgorithm::Hs256 => present(self.jwt_secret.as_ref())
                .map(|secret| JwtKey::Secret(secret.to_owned()))
                .ok_or(SettingsError::Missing { key: "jwt_secret" }),
        }
    }

    /// Expected token issuer, if any.
    pub fn jwt_issuer(&self) -> Option<&str> {
        present(self.jwt_issuer.as_ref())
    }

    /// Expected token audience, if any.
    pub fn jwt_audience(&self) -> Option<&str> {
        present(self.jwt_audience.as_ref())
    }

    /// Object store credentials, when all three are configured.
    pub fn storage(&self) -> Option<StorageCredentials> {
        let cloud_name = present(self.storage_cloud_name.as_ref())?;
        let api_key = present(self.storage_api_key.as_ref())?;
        let api_secret = present(self.storage_api_secret.as_ref())?;
        Some(StorageCredentials {
            cloud_name: cloud_name.to_owned(),
            api_key: api_key.to_owned(),
            api_secret: api_secret.to_owned(),
            folder: present(self.storage_folder.as_ref())
                .unwrap_or(DEFAULT_STORAGE_FOLDER)
                .to_owned(),
        })
    }

    /// SMTP relay settings, when a host is configured.
    pub fn smtp(&self) -> Option<SmtpSettings> {
        let host = present(self.smtp_host.as_ref())?;
        Some(SmtpSettings {
            host: host.to_owned(),
            port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
            username: present(self.smtp_username.as_ref()).map(str::to_owned),
            password: present(self.smtp_password.as_ref()).map(str::to_owned),
            from: present(self.mail_from.as_ref())
                .unwrap_or(DEFAULT_MAIL_FROM)
                .to_owned(),
        })
    }

    /// Resume size limit.
    pub fn resume_max_bytes(&self) -> usize {
        self.resume_max_bytes.unwrap_or(DEFAULT_RESUME_MAX_BYTES)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 8] = [
        "TRUSTYHIRE_BIND_ADDR",
        "TRUSTYHIRE_DATABASE_URL",
        "TRUSTYHIRE_JWT_ALGORITHM",
        "TRUSTYHIRE_JWT_SECRET",
        "TRUSTYHIRE_JWT_PUBLIC_KEY_PEM",
        "TRUSTYHIRE_SMTP_HOST",
        "TRUSTYHIRE_STORAGE_CLOUD_NAME",
        "TRUSTYHIRE_RESUME_MAX_BYTES",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("trustyhire")]).expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(settings.db_query_timeout(), Duration::from_secs(10));
        assert_eq!(settings.jwt_algorithm(), Ok(JwtAlgorithm::Rs256));
        assert_eq!(settings.resume_max_bytes(), 5 * 1024 * 1024);
        assert!(settings.smtp().is_none());
        assert!(settings.storage().is_none());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::Missing {
                key: "database_url"
            })
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.extend([
            ("TRUSTYHIRE_DATABASE_URL", Some("postgres://localhost/hire".to_owned())),
            ("TRUSTYHIRE_JWT_ALGORITHM", Some("hs256".to_owned())),
            ("TRUSTYHIRE_JWT_SECRET", Some("local-secret".to_owned())),
            ("TRUSTYHIRE_SMTP_HOST", Some("smtp.example.com".to_owned())),
            ("TRUSTYHIRE_RESUME_MAX_BYTES", Some("1024".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), Ok("postgres://localhost/hire"));
        assert_eq!(
            settings.jwt_key(),
            Ok(JwtKey::Secret("local-secret".to_owned()))
        );
        let smtp = settings.smtp().expect("smtp configured");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.from, "TrustyHire <noreply@trustyhire.com>");
        assert_eq!(settings.resume_max_bytes(), 1024);
    }

    #[rstest]
    #[case("ES256")]
    #[case("none")]
    fn unknown_algorithms_are_rejected(#[case] algorithm: &str) {
        let mut vars = cleared();
        vars.push(("TRUSTYHIRE_JWT_ALGORITHM", Some(algorithm.to_owned())));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.jwt_algorithm(),
            Err(SettingsError::Invalid {
                key: "jwt_algorithm",
                ..
            })
        ));
    }

    #[rstest]
    fn rs256_requires_a_public_key() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.jwt_key(),
            Err(SettingsError::Missing {
                key: "jwt_public_key_pem"
            })
        );
    }
}
