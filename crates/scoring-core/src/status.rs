//! Status chips for the overview metrics.

use serde::{Deserialize, Serialize};

use crate::grade::{status_label, StatusLabel, GOOD_THRESHOLD, WARNING_THRESHOLD};
use crate::metrics::OverviewMetrics;
use crate::normalize::{ANAEROBIC_POWER_INDEX, BODY_OPTIMIZATION_SCORE};

/// (good, warning) thresholds for VO2max, which is not on a 0-100 scale.
pub const VO2MAX_THRESHOLDS: (f64, f64) = (50.0, 40.0);

/// One status label per overview metric.
///
/// `Default` is the all-warning state shown before any metrics are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStatusLabels {
    pub overall_score: StatusLabel,
    pub msi: StatusLabel,
    pub mes: StatusLabel,
    pub api: StatusLabel,
    pub vo2max: StatusLabel,
    pub frr: StatusLabel,
    pub acs: StatusLabel,
    pub bos: StatusLabel,
}

impl OverviewStatusLabels {
    pub fn from_metrics(m: &OverviewMetrics) -> Self {
        let scaled = |value: f64| status_label(value, GOOD_THRESHOLD, WARNING_THRESHOLD);
        let (vo2_good, vo2_warning) = VO2MAX_THRESHOLDS;

        Self {
            overall_score: scaled(m.overall_score),
            msi: scaled(m.msi),
            mes: scaled(m.mes),
            api: scaled(ANAEROBIC_POWER_INDEX.apply(m.api)),
            vo2max: status_label(m.vo2max, vo2_good, vo2_warning),
            frr: scaled(m.frr),
            acs: scaled(m.acs),
            bos: scaled(BODY_OPTIMIZATION_SCORE.apply(m.bos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_athlete_labels() {
        let labels = OverviewStatusLabels::from_metrics(&OverviewMetrics {
            overall_score: 86.0,
            msi: 92.0,
            mes: 78.0,
            api: 420.0,
            vo2max: 55.0,
            frr: 84.0,
            acs: 72.0,
            bos: 4.0,
        });

        assert_eq!(labels.overall_score, StatusLabel::Good);
        assert_eq!(labels.msi, StatusLabel::Good);
        assert_eq!(labels.mes, StatusLabel::Warning);
        // 420 / 10 = 42
        assert_eq!(labels.api, StatusLabel::Bad);
        assert_eq!(labels.vo2max, StatusLabel::Good);
        assert_eq!(labels.acs, StatusLabel::Warning);
        // 4 * 10 = 40
        assert_eq!(labels.bos, StatusLabel::Bad);
    }

    #[test]
    fn test_vo2max_uses_own_thresholds() {
        let mut m = OverviewMetrics {
            overall_score: 0.0,
            msi: 0.0,
            mes: 0.0,
            api: 0.0,
            vo2max: 45.0,
            frr: 0.0,
            acs: 0.0,
            bos: 0.0,
        };
        // 45 would be bad on the 80/60 scale
        assert_eq!(
            OverviewStatusLabels::from_metrics(&m).vo2max,
            StatusLabel::Warning
        );
        m.vo2max = 39.0;
        assert_eq!(
            OverviewStatusLabels::from_metrics(&m).vo2max,
            StatusLabel::Bad
        );
    }

    #[test]
    fn test_default_is_all_warning() {
        let labels = OverviewStatusLabels::default();
        assert_eq!(labels.overall_score, StatusLabel::Warning);
        assert_eq!(labels.bos, StatusLabel::Warning);
        assert_eq!(labels.vo2max, StatusLabel::Warning);
    }
}
