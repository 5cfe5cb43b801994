//! The playback speed selector.

use std::fmt;

use tracing::warn;

/// One of the fixed playback speeds offered by the speed selector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Speed {
    P25,
    P50,
    P75,
    #[default]
    P100,
    P125,
    P150,
    P175,
    P200,
}

impl Speed {
    /// Every selectable speed, slowest first.
    pub const ALL: [Speed; 8] = [
        Speed::P25,
        Speed::P50,
        Speed::P75,
        Speed::P100,
        Speed::P125,
        Speed::P150,
        Speed::P175,
        Speed::P200,
    ];

    pub fn percent(self) -> u16 {
        match self {
            Speed::P25 => 25,
            Speed::P50 => 50,
            Speed::P75 => 75,
            Speed::P100 => 100,
            Speed::P125 => 125,
            Speed::P150 => 150,
            Speed::P175 => 175,
            Speed::P200 => 200,
        }
    }

    /// Playback rate multiplier, `percent / 100`.
    pub fn rate(self) -> f32 {
        self.percent() as f32 / 100.0
    }

    pub fn from_percent(percent: u16) -> Option<Speed> {
        Self::ALL.into_iter().find(|s| s.percent() == percent)
    }

    /// Parse a selector label such as `"150%"` (the `%` is optional).
    ///
    /// Unknown labels fall back to 100%.
    pub fn from_label(label: &str) -> Speed {
        let digits = label.trim().trim_end_matches('%').trim();
        match digits.parse::<u16>().ok().and_then(Speed::from_percent) {
            Some(s) => s,
            None => {
                warn!(label, "unrecognised speed selection, using 100%");
                Speed::P100
            }
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(3)
    }

    /// The next faster speed, saturating at 200%.
    pub fn faster(self) -> Speed {
        Self::ALL[(self.position() + 1).min(Self::ALL.len() - 1)]
    }

    /// The next slower speed, saturating at 25%.
    pub fn slower(self) -> Speed {
        Self::ALL[self.position().saturating_sub(1)]
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_selection_maps_to_percent_over_one_hundred() {
        let expected = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];
        for (speed, rate) in Speed::ALL.iter().zip(expected) {
            assert_eq!(speed.rate(), rate);
        }
        assert_eq!(Speed::from_label("150%").rate(), 1.5);
    }

    #[test]
    fn labels_round_trip_through_display() {
        for s in Speed::ALL {
            assert_eq!(Speed::from_label(&s.to_string()), s);
        }
        assert_eq!(Speed::from_label(" 75 "), Speed::P75);
    }

    #[test]
    fn unknown_labels_fail_closed_to_normal_speed() {
        assert_eq!(Speed::from_label("110%"), Speed::P100);
        assert_eq!(Speed::from_label("fast"), Speed::P100);
        assert_eq!(Speed::from_label(""), Speed::P100);
        assert_eq!(Speed::from_percent(0), None);
    }

    #[test]
    fn faster_and_slower_saturate_at_the_ends() {
        assert_eq!(Speed::P100.faster(), Speed::P125);
        assert_eq!(Speed::P100.slower(), Speed::P75);
        assert_eq!(Speed::P200.faster(), Speed::P200);
        assert_eq!(Speed::P25.slower(), Speed::P25);
    }
}
