/// The cosmetic light/dark flag. Every page starts in night mode and the
/// toggle lives entirely in the rendered markup; nothing is persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Night,
    Day,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Night => Theme::Day,
            Theme::Day => Theme::Night,
        }
    }

    /// Icon shown on the toggle button: the sun invites you out of the
    /// dark, the moon back in.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Night => "sun",
            Theme::Day => "moon",
        }
    }

    /// Value of the `data-theme` attribute the stylesheet keys off.
    pub fn attr(self) -> &'static str {
        match self {
            Theme::Night => "night",
            Theme::Day => "day",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_night_mode() {
        assert_eq!(Theme::default(), Theme::Night);
    }

    #[test]
    fn double_toggle_is_identity() {
        for theme in [Theme::Night, Theme::Day] {
            assert_eq!(theme.toggle().toggle(), theme);
            assert_ne!(theme.toggle(), theme);
        }
    }

    #[test]
    fn icon_and_attr_swap_together() {
        assert_eq!(Theme::Night.icon(), "sun");
        assert_eq!(Theme::Day.icon(), "moon");
        assert_eq!(Theme::Night.attr(), "night");
        assert_eq!(Theme::Day.attr(), "day");
    }
}
