use serde::{Deserialize, Serialize};

use super::scale::ColorScale;
use crate::aggregate::EntityBreakdown;
use crate::rank::percent_of;

/// A choropleth indicator. Each variant carries its own threshold table,
/// palette and accessor, so an unknown metric name is unrepresentable and
/// the legend can never drift from the fill colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Absolute registered-voter count.
    VoterTotal,
    /// Share of voters with a biometric registration, in percent.
    BiometricShare,
    /// Share of female voters, in percent.
    FemaleShare,
    /// Share of voters aged 60+, in percent.
    ElderlyShare,
    /// Share of voters with a registered disability, in percent.
    DisabilityShare,
    /// Share of voters in self-declared quilombola communities, in percent.
    QuilombolaShare,
}

impl Indicator {
    pub fn to_str(&self) -> &'static str {
        match self {
            Indicator::VoterTotal => "voter_total",
            Indicator::BiometricShare => "biometric_share",
            Indicator::FemaleShare => "female_share",
            Indicator::ElderlyShare => "elderly_share",
            Indicator::DisabilityShare => "disability_share",
            Indicator::QuilombolaShare => "quilombola_share",
        }
    }

    pub fn order() -> [Indicator; 6] {
        [
            Indicator::VoterTotal,
            Indicator::BiometricShare,
            Indicator::FemaleShare,
            Indicator::ElderlyShare,
            Indicator::DisabilityShare,
            Indicator::QuilombolaShare,
        ]
    }

    /// The indicator's current value for one entity.
    pub fn evaluate(&self, breakdown: &EntityBreakdown) -> f64 {
        match self {
            Indicator::VoterTotal => breakdown.voters as f64,
            Indicator::BiometricShare => percent_of(breakdown.biometric, breakdown.voters),
            Indicator::FemaleShare => percent_of(breakdown.female, breakdown.voters),
            Indicator::ElderlyShare => percent_of(breakdown.elderly, breakdown.voters),
            Indicator::DisabilityShare => percent_of(breakdown.disability, breakdown.voters),
            Indicator::QuilombolaShare => percent_of(breakdown.quilombola, breakdown.voters),
        }
    }

    /// The per-indicator threshold/palette table. Shares bucket on fixed
    /// percent cuts; the absolute count uses electorate-sized cuts.
    pub fn scale(&self) -> ColorScale {
        match self {
            Indicator::VoterTotal => ColorScale::new(
                &[200_000.0, 100_000.0, 50_000.0, 20_000.0, 5_000.0],
                &["#800026", "#BD0026", "#E31A1C", "#FC4E2A", "#FED976"],
            ),
            Indicator::BiometricShare => ColorScale::new(
                &[95.0, 90.0, 80.0, 70.0, 50.0],
                &["#00441B", "#238B45", "#66C2A4", "#CCECE6", "#F7FCFD"],
            ),
            Indicator::FemaleShare => ColorScale::new(
                &[55.0, 52.5, 50.0, 47.5],
                &["#54278F", "#756BB1", "#9E9AC8", "#DADAEB"],
            ),
            Indicator::ElderlyShare => ColorScale::new(
                &[30.0, 20.0, 15.0, 10.0],
                &["#08306B", "#2171B5", "#6BAED6", "#DEEBF7"],
            ),
            Indicator::DisabilityShare => ColorScale::new(
                &[5.0, 3.0, 2.0, 1.0],
                &["#7F2704", "#D94801", "#FD8D3C", "#FEE6CE"],
            ),
            Indicator::QuilombolaShare => ColorScale::new(
                &[10.0, 5.0, 2.0, 0.5],
                &["#00441B", "#238B45", "#74C476", "#E5F5E0"],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Indicator;
    use crate::aggregate::EntityBreakdown;

    #[test]
    fn shares_evaluate_against_the_entity_total() {
        let breakdown = EntityBreakdown {
            voters: 200,
            biometric: 150,
            disability: 4,
            female: 120,
            elderly: 30,
            quilombola: 0,
        };

        assert_eq!(Indicator::VoterTotal.evaluate(&breakdown), 200.0);
        assert!((Indicator::FemaleShare.evaluate(&breakdown) - 60.0).abs() < 1e-9);
        assert!((Indicator::BiometricShare.evaluate(&breakdown) - 75.0).abs() < 1e-9);
        assert_eq!(Indicator::QuilombolaShare.evaluate(&breakdown), 0.0);
    }

    #[test]
    fn empty_entity_evaluates_to_zero_not_nan() {
        let empty = EntityBreakdown::default();
        for indicator in Indicator::order() {
            assert_eq!(indicator.evaluate(&empty), 0.0);
        }
    }

    #[test]
    fn every_scale_has_a_color_per_threshold() {
        for indicator in Indicator::order() {
            // Walk well past both ends of each table.
            let scale = indicator.scale();
            assert!(!scale.legend().is_empty());
            let _ = scale.color_for(f64::MAX);
            let _ = scale.color_for(-1.0);
        }
    }
}
