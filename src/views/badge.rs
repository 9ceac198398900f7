//! Risk level badge.

/// Badge color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Red,
    Orange,
    Green,
}

impl BadgeTone {
    /// CSS classes for the badge
    pub fn class(&self) -> &'static str {
        match self {
            BadgeTone::Red => "bg-red-100 text-red-700 border-red-300",
            BadgeTone::Orange => "bg-orange-100 text-orange-700 border-orange-300",
            BadgeTone::Green => "bg-green-100 text-green-700 border-green-300",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    Alert,
    Check,
}

impl BadgeIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            BadgeIcon::Alert => "⚠",
            BadgeIcon::Check => "✓",
        }
    }
}

/// Presentation of a risk level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskBadge {
    pub tone: BadgeTone,
    pub icon: BadgeIcon,
    pub label: String,
}

impl RiskBadge {
    /// `high` is red, `moderate` orange, anything else green.
    /// The icon only distinguishes `high` from the rest.
    pub fn for_level(level: &str) -> Self {
        let tone = match level {
            "high" => BadgeTone::Red,
            "moderate" => BadgeTone::Orange,
            _ => BadgeTone::Green,
        };
        let icon = if level == "high" {
            BadgeIcon::Alert
        } else {
            BadgeIcon::Check
        };

        Self {
            tone,
            icon,
            label: format!("{} risk", level).to_uppercase(),
        }
    }

    pub fn class(&self) -> &'static str {
        self.tone.class()
    }
}
