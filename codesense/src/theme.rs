//! Color theme system for codesense.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the
//! report draws. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, so it works on any terminal including
//!   256-color SSH sessions without truecolor.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; needs truecolor.
//!
//! Score tiers get two projections, a foreground and a background, both looked
//! up from the same [`Tier`] so a score badge and a metric bar never disagree.

use codesense_core::model::Severity;
use codesense_core::score::Tier;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Header and tabs
    /// Application name in the header row.
    pub brand: Color,
    /// Active comparison tab text.
    pub tab_active: Color,
    /// Inactive comparison tab text.
    pub tab_inactive: Color,

    // Score tiers
    pub tier_good: Color,
    pub tier_warning: Color,
    pub tier_critical: Color,
    /// Dimmed counterparts used behind score badges.
    pub tier_good_bg: Color,
    pub tier_warning_bg: Color,
    pub tier_critical_bg: Color,
    /// Unfilled part of a metric bar.
    pub bar_track: Color,

    // Finding severities
    pub severity_error: Color,
    pub severity_warning: Color,
    pub severity_info: Color,

    // Report text
    /// Finding, change and recommendation titles.
    pub heading: Color,
    /// Body text: explanations, descriptions.
    pub text: Color,
    /// Secondary text: locations, `/100` suffixes, placeholders.
    pub muted: Color,
    /// "Recommendation:" / "Explanation:" labels.
    pub label: Color,
    /// "Original:" label in change cards.
    pub change_original: Color,
    /// "Correction:" label in change cards.
    pub change_correction: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Focus indicator in the status bar.
    pub status_focus: Color,

    // General
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            brand: Color::Red,
            tab_active: Color::White,
            tab_inactive: Color::DarkGray,

            tier_good: Color::Green,
            tier_warning: Color::Yellow,
            tier_critical: Color::Red,
            tier_good_bg: Color::Black,
            tier_warning_bg: Color::Black,
            tier_critical_bg: Color::Black,
            bar_track: Color::DarkGray,

            severity_error: Color::Red,
            severity_warning: Color::Yellow,
            severity_info: Color::Blue,

            heading: Color::LightBlue,
            text: Color::Reset,
            muted: Color::DarkGray,
            label: Color::Magenta,
            change_original: Color::Red,
            change_correction: Color::Green,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_focus: Color::Cyan,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            brand: red,
            tab_active: text,
            tab_inactive: overlay1,

            tier_good: green,
            tier_warning: yellow,
            tier_critical: red,
            tier_good_bg: Color::Rgb(49, 68, 58),
            tier_warning_bg: Color::Rgb(68, 62, 50),
            tier_critical_bg: Color::Rgb(70, 44, 56),
            bar_track: surface0,

            severity_error: red,
            severity_warning: yellow,
            severity_info: blue,

            heading: blue,
            text: subtext0,
            muted: overlay1,
            label: mauve,
            change_original: red,
            change_correction: green,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_focus: lavender,

            background: base,
        }
    }

    /// Resolves a theme name to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` and are logged.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Foreground emphasis for a score tier (score text, bar fill).
    pub fn tier_fg(&self, tier: Tier) -> Color {
        match tier {
            Tier::Good => self.tier_good,
            Tier::Warning => self.tier_warning,
            Tier::Critical => self.tier_critical,
        }
    }

    /// Background emphasis for a score tier (score badge).
    pub fn tier_bg(&self, tier: Tier) -> Color {
        match tier {
            Tier::Good => self.tier_good_bg,
            Tier::Warning => self.tier_warning_bg,
            Tier::Critical => self.tier_critical_bg,
        }
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Error => self.severity_error,
            Severity::Warning => self.severity_warning,
            Severity::Info => self.severity_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_projections_follow_classification() {
        let theme = Theme::dark();
        assert_eq!(theme.tier_fg(codesense_core::score::classify(85)), Color::Green);
        assert_eq!(theme.tier_fg(codesense_core::score::classify(60)), Color::Yellow);
        assert_eq!(theme.tier_fg(codesense_core::score::classify(12)), Color::Red);
    }

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").border_active, Theme::dark().border_active);
        assert_eq!(
            Theme::from_name("catppuccin_mocha").brand,
            Theme::catppuccin_mocha().brand
        );
    }
}
