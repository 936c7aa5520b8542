/// Which calendar the day header is rendered in. Presentation-only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Gregorian,
    Hijri,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Gregorian => DisplayMode::Hijri,
            DisplayMode::Hijri => DisplayMode::Gregorian,
        }
    }

    pub fn from_flag(hijri: bool) -> Self {
        if hijri {
            DisplayMode::default().toggled()
        } else {
            DisplayMode::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_between_modes() {
        assert_eq!(DisplayMode::default(), DisplayMode::Gregorian);
        assert_eq!(DisplayMode::Gregorian.toggled(), DisplayMode::Hijri);
        assert_eq!(DisplayMode::Hijri.toggled().toggled(), DisplayMode::Hijri);
        assert_eq!(DisplayMode::from_flag(true), DisplayMode::Hijri);
    }
}
