use std::fmt;

/// Severity band for a daily pollen index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
    DeathByPollen,
}

impl SeverityTier {
    pub const fn label(&self) -> &'static str {
        match self {
            SeverityTier::Low => "Low",
            SeverityTier::MediumLow => "Medium-Low",
            SeverityTier::Medium => "Medium",
            SeverityTier::MediumHigh => "Medium-High",
            SeverityTier::High => "High",
            SeverityTier::DeathByPollen => "Death by Pollen",
        }
    }

    /// Attachment color tag for this band. Adjacent bands intentionally
    /// share colors; the groupings are part of the published scale.
    pub const fn color(&self) -> &'static str {
        match self {
            SeverityTier::Low => "good",
            SeverityTier::MediumLow => "warning",
            SeverityTier::Medium => "warning",
            SeverityTier::MediumHigh => "danger",
            SeverityTier::High => "danger",
            SeverityTier::DeathByPollen => "danger",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a pollen index into its severity tier.
///
/// The index is rounded to one decimal place first, then compared against
/// inclusive upper bounds in ascending order.
pub fn classify(index: f64) -> SeverityTier {
    let rounded = (index * 10.0).round() / 10.0;

    if rounded <= 2.4 {
        return SeverityTier::Low;
    }
    if rounded <= 4.8 {
        return SeverityTier::MediumLow;
    }
    if rounded <= 7.2 {
        return SeverityTier::Medium;
    }
    if rounded <= 9.6 {
        return SeverityTier::MediumHigh;
    }
    if rounded <= 12.0 {
        return SeverityTier::High;
    }
    SeverityTier::DeathByPollen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_map_to_the_lower_band() {
        assert_eq!(classify(2.4), SeverityTier::Low);
        assert_eq!(classify(4.8), SeverityTier::MediumLow);
        assert_eq!(classify(7.2), SeverityTier::Medium);
        assert_eq!(classify(9.6), SeverityTier::MediumHigh);
        assert_eq!(classify(12.0), SeverityTier::High);
    }

    #[test]
    fn values_just_past_a_bound_move_up_a_band() {
        assert_eq!(classify(2.5), SeverityTier::MediumLow);
        assert_eq!(classify(4.9), SeverityTier::Medium);
        assert_eq!(classify(7.3), SeverityTier::MediumHigh);
        assert_eq!(classify(9.7), SeverityTier::High);
        assert_eq!(classify(12.1), SeverityTier::DeathByPollen);
    }

    #[test]
    fn index_is_rounded_to_one_decimal_before_comparison() {
        assert_eq!(classify(2.44), SeverityTier::Low);
        assert_eq!(classify(2.46), SeverityTier::MediumLow);
        assert_eq!(classify(12.04), SeverityTier::High);
        assert_eq!(classify(12.06), SeverityTier::DeathByPollen);
    }

    #[test]
    fn extremes_are_classified() {
        assert_eq!(classify(0.0), SeverityTier::Low);
        assert_eq!(classify(999.9), SeverityTier::DeathByPollen);
    }

    #[test]
    fn colors_follow_the_published_groupings() {
        assert_eq!(SeverityTier::Low.color(), "good");
        assert_eq!(SeverityTier::MediumLow.color(), "warning");
        assert_eq!(SeverityTier::Medium.color(), "warning");
        assert_eq!(SeverityTier::MediumHigh.color(), "danger");
        assert_eq!(SeverityTier::High.color(), "danger");
        assert_eq!(SeverityTier::DeathByPollen.color(), "danger");
    }

    #[test]
    fn display_matches_the_label() {
        assert_eq!(SeverityTier::MediumHigh.to_string(), "Medium-High");
        assert_eq!(SeverityTier::DeathByPollen.label(), "Death by Pollen");
    }
}
