// Closed label sets written into the derived columns.
use std::fmt;

use serde::Serialize;

/// Age band of a policyholder. Bands are inclusive on their lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AgeBracket {
    #[serde(rename = "abaixo de 18")]
    Under18,
    #[serde(rename = "18 a 24")]
    From18To24,
    #[serde(rename = "25 a 34")]
    From25To34,
    #[serde(rename = "35 a 44")]
    From35To44,
    #[serde(rename = "45 a 54")]
    From45To54,
    #[serde(rename = "55 a 64")]
    From55To64,
    #[serde(rename = "65 a 74")]
    From65To74,
    #[serde(rename = "75 a 84")]
    From75To84,
    #[serde(rename = "acima de 85")]
    From85,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 9] = [
        AgeBracket::Under18,
        AgeBracket::From18To24,
        AgeBracket::From25To34,
        AgeBracket::From35To44,
        AgeBracket::From45To54,
        AgeBracket::From55To64,
        AgeBracket::From65To74,
        AgeBracket::From75To84,
        AgeBracket::From85,
    ];

    pub fn from_age(age: i64) -> Self {
        match age {
            i64::MIN..=17 => AgeBracket::Under18,
            18..=24 => AgeBracket::From18To24,
            25..=34 => AgeBracket::From25To34,
            35..=44 => AgeBracket::From35To44,
            45..=54 => AgeBracket::From45To54,
            55..=64 => AgeBracket::From55To64,
            65..=74 => AgeBracket::From65To74,
            75..=84 => AgeBracket::From75To84,
            _ => AgeBracket::From85,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Under18 => "abaixo de 18",
            AgeBracket::From18To24 => "18 a 24",
            AgeBracket::From25To34 => "25 a 34",
            AgeBracket::From35To44 => "35 a 44",
            AgeBracket::From45To54 => "45 a 54",
            AgeBracket::From55To64 => "55 a 64",
            AgeBracket::From65To74 => "65 a 74",
            AgeBracket::From75To84 => "75 a 84",
            AgeBracket::From85 => "acima de 85",
        }
    }
}

/// Brazilian macro-region derived from a two-letter state code (UF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

const NORTE: [&str; 9] = ["AC", "AM", "AP", "PA", "PI", "RN", "RO", "RR", "TO"];
const NORDESTE: [&str; 7] = ["AL", "BA", "CE", "MA", "PB", "PE", "SE"];
const CENTRO_OESTE: [&str; 4] = ["DF", "GO", "MS", "MT"];
const SUDESTE: [&str; 4] = ["ES", "MG", "SP", "RJ"];
const SUL: [&str; 3] = ["PR", "RS", "SC"];

impl Region {
    /// Exact-match lookup. Anything outside the four explicit lists is `Sul`,
    /// including codes that are not Brazilian states at all.
    pub fn from_uf(uf: &str) -> Self {
        if NORTE.contains(&uf) {
            Region::Norte
        } else if NORDESTE.contains(&uf) {
            Region::Nordeste
        } else if CENTRO_OESTE.contains(&uf) {
            Region::CentroOeste
        } else if SUDESTE.contains(&uf) {
            Region::Sudeste
        } else {
            Region::Sul
        }
    }

    /// Whether `uf` is one of the 27 federative unit codes.
    pub fn is_known_uf(uf: &str) -> bool {
        [&NORTE[..], &NORDESTE[..], &CENTRO_OESTE[..], &SUDESTE[..], &SUL[..]]
            .iter()
            .any(|set| set.contains(&uf))
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Norte => "norte",
            Region::Nordeste => "nordeste",
            Region::CentroOeste => "centro-oeste",
            Region::Sudeste => "sudeste",
            Region::Sul => "sul",
        }
    }
}

/// Billing treatment assigned to a surviving enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BillingCategory {
    #[serde(rename = "pagamento regular")]
    RegularPayment,
    #[serde(rename = "pagamento adesão")]
    EnrollmentPayment,
    #[serde(rename = "nova tentativa adesão")]
    EnrollmentRetry,
    #[serde(rename = "regularização")]
    Regularization,
    #[serde(rename = "inválido")]
    Invalid,
}

impl BillingCategory {
    pub fn label(self) -> &'static str {
        match self {
            BillingCategory::RegularPayment => "pagamento regular",
            BillingCategory::EnrollmentPayment => "pagamento adesão",
            BillingCategory::EnrollmentRetry => "nova tentativa adesão",
            BillingCategory::Regularization => "regularização",
            BillingCategory::Invalid => "inválido",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_as_label!(AgeBracket, Region, BillingCategory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries() {
        assert_eq!(AgeBracket::from_age(17).label(), "abaixo de 18");
        assert_eq!(AgeBracket::from_age(18).label(), "18 a 24");
        assert_eq!(AgeBracket::from_age(24).label(), "18 a 24");
        assert_eq!(AgeBracket::from_age(25).label(), "25 a 34");
        assert_eq!(AgeBracket::from_age(84).label(), "75 a 84");
        assert_eq!(AgeBracket::from_age(85).label(), "acima de 85");
        assert_eq!(AgeBracket::from_age(200).label(), "acima de 85");
        assert_eq!(AgeBracket::from_age(-1).label(), "abaixo de 18");
    }

    #[test]
    fn every_uf_maps_to_its_region() {
        let cases = [
            ("SP", Region::Sudeste),
            ("RJ", Region::Sudeste),
            ("BA", Region::Nordeste),
            ("PI", Region::Norte),
            ("RN", Region::Norte),
            ("DF", Region::CentroOeste),
            ("RS", Region::Sul),
            ("PR", Region::Sul),
            ("SC", Region::Sul),
        ];
        for (uf, region) in cases {
            assert_eq!(Region::from_uf(uf), region, "{uf}");
        }
    }

    #[test]
    fn unknown_uf_falls_back_to_sul() {
        assert_eq!(Region::from_uf("XX"), Region::Sul);
        assert_eq!(Region::from_uf("sp"), Region::Sul);
        assert!(!Region::is_known_uf("XX"));
        assert!(!Region::is_known_uf("sp"));
        assert!(Region::is_known_uf("SC"));
    }

    #[test]
    fn labels_match_serde_names() {
        assert_eq!(
            serde_json::to_string(&BillingCategory::EnrollmentRetry).unwrap(),
            "\"nova tentativa adesão\""
        );
        assert_eq!(serde_json::to_string(&Region::CentroOeste).unwrap(), "\"centro-oeste\"");
        assert_eq!(serde_json::to_string(&AgeBracket::From85).unwrap(), "\"acima de 85\"");
        assert_eq!(BillingCategory::Invalid.to_string(), "inválido");
    }
}
