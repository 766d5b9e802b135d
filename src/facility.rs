// SPDX-License-Identifier: Apache-2.0 OR MIT
// Syslog facilities (RFC 5424 section 6.2.1)

use crate::error::FacilityError;
use serde::{Deserialize, Serialize};

/// Syslog facility - identifies what kind of program is logging the message
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facility {
    Kern = 0,
    #[default]
    User = 1,
    Mail = 2,
    Daemon = 3,
    Auth = 4,
    Syslog = 5,
    Lpr = 6,
    News = 7,
    Uucp = 8,
    Cron = 9,
    AuthPriv = 10,
    Ftp = 11,
    Ntp = 12,
    Security = 13,
    Console = 14,
    SolarisCron = 15,
    Local0 = 16,
    Local1 = 17,
    Local2 = 18,
    Local3 = 19,
    Local4 = 20,
    Local5 = 21,
    Local6 = 22,
    Local7 = 23,
}

impl Facility {
    /// The whole catalog, ordered by code.
    pub const ALL: [Facility; 24] = [
        Facility::Kern,
        Facility::User,
        Facility::Mail,
        Facility::Daemon,
        Facility::Auth,
        Facility::Syslog,
        Facility::Lpr,
        Facility::News,
        Facility::Uucp,
        Facility::Cron,
        Facility::AuthPriv,
        Facility::Ftp,
        Facility::Ntp,
        Facility::Security,
        Facility::Console,
        Facility::SolarisCron,
        Facility::Local0,
        Facility::Local1,
        Facility::Local2,
        Facility::Local3,
        Facility::Local4,
        Facility::Local5,
        Facility::Local6,
        Facility::Local7,
    ];

    /// Numeric facility code (0-23)
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Keyword used in configuration files and by `resolve`
    pub const fn keyword(self) -> &'static str {
        match self {
            Facility::Kern => "kern",
            Facility::User => "user",
            Facility::Mail => "mail",
            Facility::Daemon => "daemon",
            Facility::Auth => "auth",
            Facility::Syslog => "syslog",
            Facility::Lpr => "lpr",
            Facility::News => "news",
            Facility::Uucp => "uucp",
            Facility::Cron => "cron",
            Facility::AuthPriv => "authpriv",
            Facility::Ftp => "ftp",
            Facility::Ntp => "ntp",
            Facility::Security => "security",
            Facility::Console => "console",
            Facility::SolarisCron => "solaris-cron",
            Facility::Local0 => "local0",
            Facility::Local1 => "local1",
            Facility::Local2 => "local2",
            Facility::Local3 => "local3",
            Facility::Local4 => "local4",
            Facility::Local5 => "local5",
            Facility::Local6 => "local6",
            Facility::Local7 => "local7",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Facility::Kern => "Kernel messages",
            Facility::User => "User-level messages",
            Facility::Mail => "Mail system",
            Facility::Daemon => "System daemons",
            Facility::Auth => "Security/authorization messages",
            Facility::Syslog => "Messages generated internally by syslogd",
            Facility::Lpr => "Line printer subsystem",
            Facility::News => "Network news subsystem",
            Facility::Uucp => "UUCP subsystem",
            Facility::Cron => "Clock daemon",
            Facility::AuthPriv => "Security/authorization messages (private)",
            Facility::Ftp => "FTP daemon",
            Facility::Ntp => "NTP subsystem",
            Facility::Security => "Log audit",
            Facility::Console => "Log alert",
            Facility::SolarisCron => "Scheduling daemon",
            Facility::Local0 => "Local use (local0)",
            Facility::Local1 => "Local use (local1)",
            Facility::Local2 => "Local use (local2)",
            Facility::Local3 => "Local use (local3)",
            Facility::Local4 => "Local use (local4)",
            Facility::Local5 => "Local use (local5)",
            Facility::Local6 => "Local use (local6)",
            Facility::Local7 => "Local use (local7)",
        }
    }

    /// Look a facility up by keyword (case-insensitive).
    pub fn resolve(keyword: &str) -> Result<Self, FacilityError> {
        Self::ALL
            .iter()
            .copied()
            .find(|facility| facility.keyword().eq_ignore_ascii_case(keyword.trim()))
            .ok_or_else(|| FacilityError::unknown_keyword(keyword))
    }

    /// Look a facility up by numeric code.
    pub fn from_code(code: u8) -> Result<Self, FacilityError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| FacilityError::unknown_code(code))
    }

    /// Facility bits as expected by `openlog(3)` and `syslog(3)`.
    #[inline]
    pub const fn syslog_bits(self) -> libc::c_int {
        (self.code() as libc::c_int) << 3
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "facility: {} - {}(code: {})",
            self.keyword(),
            self.description(),
            self.code()
        )
    }
}

impl std::str::FromStr for Facility {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl Serialize for Facility {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}

impl<'de> Deserialize<'de> for Facility {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keyword = String::deserialize(deserializer)?;
        Self::resolve(&keyword).map_err(serde::de::Error::custom)
    }
}

/// A facility named by keyword or by code, resolved when a syslog sink is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityRef {
    Keyword(String),
    Code(u8),
}

impl FacilityRef {
    pub fn resolve(&self) -> Result<Facility, FacilityError> {
        match self {
            FacilityRef::Keyword(keyword) => Facility::resolve(keyword),
            FacilityRef::Code(code) => Facility::from_code(*code),
        }
    }
}

impl Default for FacilityRef {
    fn default() -> Self {
        FacilityRef::Code(Facility::default().code())
    }
}

impl From<&str> for FacilityRef {
    fn from(keyword: &str) -> Self {
        FacilityRef::Keyword(keyword.to_string())
    }
}

impl From<String> for FacilityRef {
    fn from(keyword: String) -> Self {
        FacilityRef::Keyword(keyword)
    }
}

impl From<u8> for FacilityRef {
    fn from(code: u8) -> Self {
        FacilityRef::Code(code)
    }
}

impl From<Facility> for FacilityRef {
    fn from(facility: Facility) -> Self {
        FacilityRef::Code(facility.code())
    }
}
