use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Below this score a plot should not be grazed.
pub const UNSUITABLE_BELOW: f64 = 0.3;
/// Below this score a plot may be grazed with care.
pub const CAUTION_BELOW: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hausa,
}

impl Language {
    /// ISO 639-1 code, as expected by speech synthesis services.
    pub fn speech_code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hausa => "ha",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "English",
            Language::Hausa => "Hausa",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language '{0}' (expected English or Hausa)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hausa" | "ha" => Ok(Language::Hausa),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceTier {
    NotSuitable,
    GrazeWithCaution,
    Suitable,
}

impl AdviceTier {
    /// Non-finite scores are treated as unsuitable.
    pub fn for_score(gss: f64) -> Self {
        if !gss.is_finite() || gss < UNSUITABLE_BELOW {
            AdviceTier::NotSuitable
        } else if gss < CAUTION_BELOW {
            AdviceTier::GrazeWithCaution
        } else {
            AdviceTier::Suitable
        }
    }

    pub fn text(self, language: Language) -> &'static str {
        match (self, language) {
            (AdviceTier::NotSuitable, Language::English) => {
                "This plot is not suitable for grazing. Water is limited and vegetation is poor."
            }
            (AdviceTier::NotSuitable, Language::Hausa) => {
                "Wannan fili bai dace da kiwo ba. Babu ruwan sha sosai, kuma ganyen ciyawa ya ragu."
            }
            (AdviceTier::GrazeWithCaution, Language::English) => {
                "This plot can be grazed cautiously. Monitor livestock load."
            }
            (AdviceTier::GrazeWithCaution, Language::Hausa) => {
                "Za a iya kiwo a hankali a wannan fili. Amma a kula da yawancin shanu da za a kai."
            }
            (AdviceTier::Suitable, Language::English) => {
                "This is a very suitable plot for grazing. Water and forage are sufficient."
            }
            (AdviceTier::Suitable, Language::Hausa) => {
                "Wannan fili yana da kyau sosai don kiwo. Ruwan sha da ciyawa sun isa."
            }
        }
    }
}

/// Advisory text for a plot's GSS.
pub fn recommend(gss: f64, language: Language) -> &'static str {
    AdviceTier::for_score(gss).text(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(AdviceTier::for_score(0.0), AdviceTier::NotSuitable);
        assert_eq!(AdviceTier::for_score(0.299), AdviceTier::NotSuitable);
        assert_eq!(AdviceTier::for_score(0.3), AdviceTier::GrazeWithCaution);
        assert_eq!(AdviceTier::for_score(0.499), AdviceTier::GrazeWithCaution);
        assert_eq!(AdviceTier::for_score(0.5), AdviceTier::Suitable);
        assert_eq!(AdviceTier::for_score(1.0), AdviceTier::Suitable);
        assert_eq!(AdviceTier::for_score(f64::NAN), AdviceTier::NotSuitable);
    }

    #[test]
    fn test_recommend_in_both_languages() {
        assert!(recommend(0.1, Language::English).starts_with("This plot is not suitable"));
        assert!(recommend(0.4, Language::Hausa).starts_with("Za a iya kiwo"));
        assert!(recommend(0.9, Language::Hausa).starts_with("Wannan fili yana da kyau"));
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("Hausa".parse::<Language>(), Ok(Language::Hausa));
        assert_eq!(" EN ".parse::<Language>(), Ok(Language::English));
        assert_eq!("ha".parse::<Language>().map(Language::speech_code), Ok("ha"));
        assert!("french".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde() {
        let lang: Language = serde_json::from_str("\"hausa\"").unwrap();
        assert_eq!(lang, Language::Hausa);
        assert_eq!(Language::default(), Language::English);
    }
}
