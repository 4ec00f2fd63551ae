//! Secret identity classification.
//!
//! A service string that parses as a URL with a host names an internet
//! password; anything else names a generic password verbatim.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::KeychainError;

/// Keychain record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKind {
    /// Application password (`*-generic-password`).
    Generic,
    /// Internet password (`*-internet-password`).
    Networked,
}

impl SecretKind {
    /// Probe order when the kind is not known in advance.
    pub const ALL: [SecretKind; 2] = [SecretKind::Generic, SecretKind::Networked];

    /// Subcommand family understood by the `security` tool.
    pub fn family(self) -> &'static str {
        match self {
            SecretKind::Generic => "generic",
            SecretKind::Networked => "internet",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}

impl FromStr for SecretKind {
    type Err = KeychainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(SecretKind::Generic),
            "internet" | "networked" => Ok(SecretKind::Networked),
            _ => Err(KeychainError::InvalidType(s.to_string())),
        }
    }
}

/// Logical identity of a secret, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretIdentity {
    kind: SecretKind,
    name: String,
    account: String,
    host: Option<String>,
    path: Option<String>,
    scheme: Option<String>,
}

impl SecretIdentity {
    /// Generic identity with the name taken verbatim.
    pub fn generic(name: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            kind: SecretKind::Generic,
            name: name.into(),
            account: account.into(),
            host: None,
            path: None,
            scheme: None,
        }
    }

    /// Internet identity for `host`, with the item's path and URL scheme.
    pub fn networked(
        host: impl Into<String>,
        account: impl Into<String>,
        path: Option<String>,
        scheme: Option<String>,
    ) -> Self {
        let host = host.into();
        Self {
            kind: SecretKind::Networked,
            name: host.clone(),
            account: account.into(),
            host: Some(host),
            path,
            scheme,
        }
    }

    /// Same identity addressed as another record family.
    ///
    /// URL-derived fields are kept so a networked record can still carry its
    /// path and protocol.
    pub fn with_kind(&self, kind: SecretKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> SecretKind {
        self.kind
    }

    /// Service (generic) or server (networked) attribute.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// URL scheme including the trailing colon, e.g. `"https:"`.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
}

impl fmt::Display for SecretIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.account.is_empty() {
            write!(f, "{} ({})", self.name, self.kind)
        } else {
            write!(f, "{}@{} ({})", self.account, self.name, self.kind)
        }
    }
}

/// Classify a raw service string.
///
/// Pure: no I/O and no trimming. A URL without a host (`mailto:x`,
/// `localhost:8080`) is treated as a generic name.
pub fn classify(service: &str, account: &str) -> SecretIdentity {
    match Url::parse(service) {
        Ok(url) => match url.host_str().filter(|h| !h.is_empty()) {
            Some(host) => SecretIdentity::networked(
                host,
                account,
                Some(url.path().to_string()),
                Some(format!("{}:", url.scheme())),
            ),
            None => SecretIdentity::generic(service, account),
        },
        Err(_) => SecretIdentity::generic(service, account),
    }
}
