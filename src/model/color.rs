use crate::error::{AsanaError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The team's color palette.
///
/// Each palette color maps onto one of Asana's internal color names, which is
/// what the API returns on tags and projects. The palette names are what
/// users type and what views are configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Purple,
    DarkPurple,
    Yellow,
    Orange,
    Blue,
    LightBlue,
    LightTeal,
    Coral,
    HotPink,
    LightPink,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Purple,
        Color::DarkPurple,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
        Color::LightBlue,
        Color::LightTeal,
        Color::Coral,
        Color::HotPink,
        Color::LightPink,
    ];

    /// Asana's internal name for this color.
    pub fn asana_name(self) -> &'static str {
        match self {
            Color::Purple => "light-purple",
            Color::DarkPurple => "dark-purple",
            Color::Yellow => "dark-brown",
            Color::Orange => "dark-orange",
            Color::Blue => "light-blue",
            Color::LightBlue => "dark-teal",
            Color::LightTeal => "light-teal",
            Color::Coral => "light-red",
            Color::HotPink => "dark-pink",
            Color::LightPink => "light-pink",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Color::Purple => "#CD95EA",
            Color::DarkPurple => "#9E97E7",
            Color::Yellow => "#F8DF72",
            Color::Orange => "#EC8D71",
            Color::Blue => "#4573D2",
            Color::LightBlue => "#9EE7E3",
            Color::LightTeal => "#4ECBC4",
            Color::Coral => "#FC979A",
            Color::HotPink => "#F26FB2",
            Color::LightPink => "#F9AAEF",
        }
    }

    /// Map an Asana internal color name back onto the palette.
    ///
    /// Returns `None` for colors the team does not use.
    pub fn from_asana_name(name: &str) -> Option<Self> {
        Color::ALL.into_iter().find(|c| c.asana_name() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Purple => write!(f, "purple"),
            Color::DarkPurple => write!(f, "dark-purple"),
            Color::Yellow => write!(f, "yellow"),
            Color::Orange => write!(f, "orange"),
            Color::Blue => write!(f, "blue"),
            Color::LightBlue => write!(f, "light-blue"),
            Color::LightTeal => write!(f, "light-teal"),
            Color::Coral => write!(f, "coral"),
            Color::HotPink => write!(f, "hot-pink"),
            Color::LightPink => write!(f, "light-pink"),
        }
    }
}

impl FromStr for Color {
    type Err = AsanaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "purple" => Ok(Color::Purple),
            "dark-purple" => Ok(Color::DarkPurple),
            "yellow" => Ok(Color::Yellow),
            "orange" => Ok(Color::Orange),
            "blue" => Ok(Color::Blue),
            "light-blue" => Ok(Color::LightBlue),
            "light-teal" | "teal" => Ok(Color::LightTeal),
            "coral" => Ok(Color::Coral),
            "hot-pink" => Ok(Color::HotPink),
            "light-pink" | "pink" => Ok(Color::LightPink),
            _ => Err(AsanaError::Parse(format!("Invalid color: {}", s))),
        }
    }
}
