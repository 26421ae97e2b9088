//! Host platform facts used for trigger resolution and mobile padding heuristics.

use serde::{Deserialize, Serialize};

/// Keyboard family; decides which half of a per-platform trigger applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Mac,
    #[default]
    Pc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Ios,
    Android,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub kind: PlatformKind,
    pub os: Os,
    pub mobile: bool,
}

impl Platform {
    pub fn desktop(kind: PlatformKind) -> Self {
        Self {
            kind,
            os: Os::Other,
            mobile: false,
        }
    }

    pub fn mobile(os: Os) -> Self {
        Self {
            kind: match os {
                Os::Ios => PlatformKind::Mac,
                _ => PlatformKind::Pc,
            },
            os,
            mobile: true,
        }
    }

    pub fn is_ios(&self) -> bool {
        self.os == Os::Ios
    }

    pub fn is_android(&self) -> bool {
        self.os == Os::Android
    }
}
