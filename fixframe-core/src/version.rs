/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX protocol versions and their wire identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// BeginString of the FIXT 1.1 transport used by FIX 5.0 and later.
pub const BEGINSTRING_FIXT11: &str = "FIXT.1.1";

/// FIX protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// FIX 4.0
    Fix40,
    /// FIX 4.1
    Fix41,
    /// FIX 4.2
    Fix42,
    /// FIX 4.3
    Fix43,
    /// FIX 4.4
    Fix44,
    /// FIX 5.0
    Fix50,
    /// FIX 5.0 SP1
    Fix50Sp1,
    /// FIX 5.0 SP2
    Fix50Sp2,
    /// FIXT 1.1 (transport layer for FIX 5.0+)
    Fixt11,
    /// Hanoi Stock Exchange trading data stream.
    Hnx,
}

impl Version {
    /// Every known version, in registration order.
    pub const ALL: [Self; 10] = [
        Self::Fix40,
        Self::Fix41,
        Self::Fix42,
        Self::Fix43,
        Self::Fix44,
        Self::Hnx,
        Self::Fixt11,
        Self::Fix50,
        Self::Fix50Sp1,
        Self::Fix50Sp2,
    ];

    /// Returns the identifier used to register factories for this version.
    ///
    /// For FIX 4.x this is the BeginString; FIX 5.0+ application versions
    /// have their own identifiers since they travel inside `FIXT.1.1`.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Fix40 => "FIX.4.0",
            Self::Fix41 => "FIX.4.1",
            Self::Fix42 => "FIX.4.2",
            Self::Fix43 => "FIX.4.3",
            Self::Fix44 => "FIX.4.4",
            Self::Fix50 => "FIX.5.0",
            Self::Fix50Sp1 => "FIX.5.0SP1",
            Self::Fix50Sp2 => "FIX.5.0SP2",
            Self::Fixt11 => BEGINSTRING_FIXT11,
            Self::Hnx => "HNX.TDS.1",
        }
    }

    /// Returns the BeginString value that appears on the wire.
    #[must_use]
    pub const fn begin_string(&self) -> &'static str {
        if self.uses_fixt() {
            BEGINSTRING_FIXT11
        } else {
            self.id()
        }
    }

    /// Returns the ApplVerID for FIX 4.x and 5.0+ application versions.
    #[must_use]
    pub const fn appl_ver_id(&self) -> Option<&'static str> {
        match self {
            Self::Fix40 => Some("2"),
            Self::Fix41 => Some("3"),
            Self::Fix42 => Some("4"),
            Self::Fix43 => Some("5"),
            Self::Fix44 => Some("6"),
            Self::Fix50 => Some("7"),
            Self::Fix50Sp1 => Some("8"),
            Self::Fix50Sp2 => Some("9"),
            Self::Fixt11 | Self::Hnx => None,
        }
    }

    /// Resolves an ApplVerID (tag 1128) value.
    #[must_use]
    pub fn from_appl_ver_id(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.appl_ver_id() == Some(value))
    }

    /// Returns true if this version uses FIXT transport.
    #[must_use]
    pub const fn uses_fixt(&self) -> bool {
        matches!(
            self,
            Self::Fix50 | Self::Fix50Sp1 | Self::Fix50Sp2 | Self::Fixt11
        )
    }
}

impl FromStr for Version {
    type Err = String;

    /// Parses a version identifier such as `FIX.4.4` or `FIX.5.0SP2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| format!("unknown FIX version: {s}"))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
