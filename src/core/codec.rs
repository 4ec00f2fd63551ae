//! Text protocol of the `security` tool.
//!
//! `security find-*-password -g` prints a dump of the keychain item: one
//! attribute per line, values either double-quoted, the `<NULL>`
//! placeholder, or a `0x`-prefixed hex run (optionally followed by a quoted
//! rendering). The password goes to stderr on its own `password: ` line.
//!
//! ```text
//! keychain: "/Users/alice/Library/Keychains/login.keychain-db"
//! class: "inet"
//! attributes:
//!     0x00000007 <blob>="example.com"
//!     "acct"<blob>="alice"
//!     "path"<blob>="/api"
//!     "ptcl"<uint32>="htps"
//!     "srvr"<blob>="example.com"
//! password: "hunter2"
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Literal the tool prints for an attribute that exists but has no value.
pub const NULL_PLACEHOLDER: &str = "<NULL>";

/// URL scheme to four-character keychain protocol code.
const PROTOCOLS: &[(&str, &str)] = &[("https:", "htps"), ("http:", "http"), ("ftp:", "ftp ")];

/// A decoded attribute value.
///
/// Keeps "not printed at all" apart from "printed as `<NULL>`" and from an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    /// The attribute did not appear in the dump.
    #[default]
    Absent,
    /// The attribute appeared as `<NULL>`.
    Null,
    /// The attribute carried a value, possibly empty.
    Value(String),
}

impl Field {
    /// Borrow the value, if any.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Value(v) => Some(v.as_str()),
            Field::Absent | Field::Null => None,
        }
    }

    /// Take the value, if any.
    pub fn into_option(self) -> Option<String> {
        match self {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

/// Attributes extracted from a `find-*-password -g` dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dump {
    pub keychain: Field,
    pub account: Field,
    pub service: Field,
    pub server: Field,
    pub path: Field,
    pub protocol: Field,
    pub password: Field,
    pub label: Field,
}

/// Extraction patterns, in the order the `Dump` fields are filled.
fn patterns() -> &'static [Regex; 8] {
    static PATTERNS: OnceLock<[Regex; 8]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |p: &str| Regex::new(p).unwrap_or_else(|e| panic!("bad pattern {p}: {e}"));
        [
            compile(r"keychain: (.*)"),
            compile(r#""acct"<blob>=(.*)"#),
            compile(r#""svce"<blob>=(.*)"#),
            compile(r#""srvr"<blob>=(.*)"#),
            compile(r#""path"<blob>=(.*)"#),
            compile(r#""ptcl"<(?:blob|uint32)>=(.*)"#),
            compile(r"(?m)^password: (.*)"),
            compile(r#"(?:"labl"|0x00000007 )<blob>=(.*)"#),
        ]
    })
}

fn hex_run() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^0x([0-9a-fA-F]+)").unwrap_or_else(|e| panic!("{e}")))
}

/// Decode one raw attribute value as printed by the tool.
///
/// `<NULL>` becomes [`Field::Null`]. A value starting with a `0x` hex run is
/// decoded byte-wise and read as UTF-8 (lossy); a trailing odd nibble is
/// dropped. Anything else has one layer of surrounding double quotes
/// stripped, with no further unescaping.
pub fn decode_field(raw: &str) -> Field {
    let raw = raw.trim_end();

    if raw == NULL_PLACEHOLDER {
        return Field::Null;
    }

    if let Some(caps) = hex_run().captures(raw) {
        let digits = &caps[1];
        let even = &digits[..digits.len() - digits.len() % 2];
        // The run only holds hex digits, so decoding cannot fail.
        let bytes = hex::decode(even).unwrap_or_default();
        return Field::Value(String::from_utf8_lossy(&bytes).into_owned());
    }

    match (raw.find('"'), raw.rfind('"')) {
        (Some(start), Some(end)) if end > start => Field::Value(raw[start + 1..end].to_string()),
        _ => Field::Value(raw.trim().to_string()),
    }
}

/// Extract every known attribute from a dump.
///
/// Each pattern takes its first match in the text.
pub fn parse_dump(text: &str) -> Dump {
    let p = patterns();
    let grab = |re: &Regex| {
        re.captures(text)
            .map_or(Field::Absent, |caps| decode_field(&caps[1]))
    };

    Dump {
        keychain: grab(&p[0]),
        account: grab(&p[1]),
        service: grab(&p[2]),
        server: grab(&p[3]),
        path: grab(&p[4]),
        protocol: grab(&p[5]),
        password: grab(&p[6]),
        label: grab(&p[7]),
    }
}

/// Keychain protocol code for a URL scheme such as `"https:"`.
pub fn scheme_to_code(scheme: &str) -> Option<&'static str> {
    PROTOCOLS
        .iter()
        .find(|(s, _)| *s == scheme)
        .map(|(_, code)| *code)
}

/// URL scheme for a keychain protocol code such as `"htps"`.
pub fn code_to_scheme(code: &str) -> Option<&'static str> {
    PROTOCOLS
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(scheme, _)| *scheme)
}
