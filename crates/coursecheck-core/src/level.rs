//! Accessibility level bands for an overall score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named band an overall score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Excellent => "Excellent",
            Level::Good => "Good",
            Level::Fair => "Fair",
            Level::Poor => "Poor",
            Level::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// A level with its description and display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessibilityLevel {
    pub level: Level,
    pub description: &'static str,
    /// Hex colour token.
    pub color: &'static str,
}

/// Classify an overall score: `>=90` Excellent, `>=80` Good, `>=70` Fair,
/// `>=60` Poor, anything else Critical.
pub fn classify(score: i64) -> AccessibilityLevel {
    if score >= 90 {
        AccessibilityLevel {
            level: Level::Excellent,
            description: "Your course demonstrates outstanding accessibility practices",
            color: "#27ae60",
        }
    } else if score >= 80 {
        AccessibilityLevel {
            level: Level::Good,
            description: "Your course meets most accessibility standards with room for minor improvements",
            color: "#2ecc71",
        }
    } else if score >= 70 {
        AccessibilityLevel {
            level: Level::Fair,
            description: "Your course has basic accessibility features but needs significant improvements",
            color: "#f39c12",
        }
    } else if score >= 60 {
        AccessibilityLevel {
            level: Level::Poor,
            description: "Your course has major accessibility barriers that need immediate attention",
            color: "#e67e22",
        }
    } else {
        AccessibilityLevel {
            level: Level::Critical,
            description: "Your course has severe accessibility issues that prevent many users from accessing content",
            color: "#e74c3c",
        }
    }
}
