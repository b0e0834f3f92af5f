use std::fmt;

use serde::{Deserialize, Serialize};

/// Video resolution tier recognised in filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    /// 480p: Standard Definition
    SD480,
    /// 720p: High Definition
    HD720,
    /// 1080p: Full HD
    FHD1080,
    /// 1440p: Quad HD
    QHD1440,
    /// 2160p: Ultra HD / 4K
    UHD2160,
    /// 4320p: 8K
    UHD4320,
}

impl Resolution {
    /// Maps a vertical line count to a tier.
    #[must_use]
    pub fn from_lines(lines: u32) -> Option<Self> {
        match lines {
            480 => Some(Self::SD480),
            720 => Some(Self::HD720),
            1080 => Some(Self::FHD1080),
            1440 => Some(Self::QHD1440),
            2160 => Some(Self::UHD2160),
            4320 => Some(Self::UHD4320),
            _ => None,
        }
    }

    /// Vertical line count of this tier.
    #[must_use]
    pub fn lines(self) -> u32 {
        match self {
            Self::SD480 => 480,
            Self::HD720 => 720,
            Self::FHD1080 => 1080,
            Self::QHD1440 => 1440,
            Self::UHD2160 => 2160,
            Self::UHD4320 => 4320,
        }
    }

    /// The bracketed tag used in canonical names, e.g. `[1080p]`.
    #[must_use]
    pub fn tag(self) -> String {
        format!("[{self}]")
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_ordering() {
        assert!(Resolution::UHD4320 > Resolution::UHD2160);
        assert!(Resolution::UHD2160 > Resolution::QHD1440);
        assert!(Resolution::FHD1080 > Resolution::HD720);
        assert!(Resolution::HD720 > Resolution::SD480);
    }

    #[test]
    fn resolution_display_and_tag() {
        assert_eq!(Resolution::FHD1080.to_string(), "1080p");
        assert_eq!(Resolution::UHD4320.to_string(), "4320p");
        assert_eq!(Resolution::HD720.tag(), "[720p]");
    }

    #[test]
    fn from_lines_rejects_unknown_heights() {
        assert_eq!(Resolution::from_lines(1440), Some(Resolution::QHD1440));
        assert_eq!(Resolution::from_lines(576), None);
        assert_eq!(Resolution::from_lines(352), None);
    }
}
