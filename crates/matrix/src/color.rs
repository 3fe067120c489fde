use serde::{Deserialize, Serialize};

/// Heat classification of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Cold,
    Warm,
    Hot,
    /// Outside every configured band
    Unbanded,
}

impl ColorBand {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorBand::Cold => "cold",
            ColorBand::Warm => "warm",
            ColorBand::Hot => "hot",
            ColorBand::Unbanded => "none",
        }
    }

    /// Display color of the band.
    pub fn color_name(self) -> &'static str {
        match self {
            ColorBand::Cold => "blue",
            ColorBand::Warm => "yellow",
            ColorBand::Hot => "red",
            ColorBand::Unbanded => "grey",
        }
    }
}

/// Inclusive thresholds per band, checked cold, warm, hot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBands {
    pub cold: (f64, f64),
    pub warm: (f64, f64),
    pub hot: (f64, f64),
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            cold: (0.0, 5.0),
            warm: (6.0, 14.0),
            hot: (15.0, 20.0),
        }
    }
}

impl ColorBands {
    pub fn classify(&self, value: f64) -> ColorBand {
        let within = |(lo, hi): (f64, f64)| lo <= value && value <= hi;
        if within(self.cold) {
            ColorBand::Cold
        } else if within(self.warm) {
            ColorBand::Warm
        } else if within(self.hot) {
            ColorBand::Hot
        } else {
            ColorBand::Unbanded
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, (lo, hi)) in [("cold", self.cold), ("warm", self.warm), ("hot", self.hot)] {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(format!("{name} band ({lo}, {hi}) must have min <= max"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_follow_thresholds() {
        let bands = ColorBands::default();
        assert_eq!(bands.classify(0.0), ColorBand::Cold);
        assert_eq!(bands.classify(5.0), ColorBand::Cold);
        assert_eq!(bands.classify(5.5), ColorBand::Unbanded);
        assert_eq!(bands.classify(6.0), ColorBand::Warm);
        assert_eq!(bands.classify(14.0), ColorBand::Warm);
        assert_eq!(bands.classify(20.0), ColorBand::Hot);
        assert_eq!(bands.classify(21.0), ColorBand::Unbanded);
        assert_eq!(bands.classify(-1.0), ColorBand::Unbanded);
        assert_eq!(bands.classify(f64::NAN), ColorBand::Unbanded);
    }

    #[test]
    fn color_names() {
        assert_eq!(ColorBand::Hot.color_name(), "red");
        assert_eq!(ColorBand::Unbanded.as_str(), "none");
    }

    #[test]
    fn validation_rejects_inverted_band() {
        assert!(ColorBands::default().validate().is_ok());
        let bands = ColorBands {
            warm: (14.0, 6.0),
            ..Default::default()
        };
        assert!(bands.validate().is_err());
    }
}
