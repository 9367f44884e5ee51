use std::fmt;

/// One side of a threshold. Both variants are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtMost(f64),
    AtLeast(f64),
}

impl Bound {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            Bound::AtMost(n) => value <= *n,
            Bound::AtLeast(n) => value >= *n,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtMost(n) => write!(f, "<={}", n),
            Bound::AtLeast(n) => write!(f, ">={}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub bound: Bound,
    pub points: u32,
}

const fn at_most(limit: f64, points: u32) -> Step {
    Step {
        bound: Bound::AtMost(limit),
        points,
    }
}

const fn at_least(limit: f64, points: u32) -> Step {
    Step {
        bound: Bound::AtLeast(limit),
        points,
    }
}

/// Ordered step function. The first matching step wins; values matching no
/// step (including NaN) get `otherwise`.
#[derive(Debug, Clone, Copy)]
pub struct StepScale {
    pub steps: &'static [Step],
    pub otherwise: u32,
}

/// Outcome of scoring a single value against a scale
#[derive(Debug, Clone, PartialEq)]
pub struct StepMatch {
    pub points: u32,
    pub rule: String,
}

impl StepScale {
    pub fn evaluate(&self, value: f64) -> StepMatch {
        for step in self.steps {
            if step.bound.matches(value) {
                return StepMatch {
                    points: step.points,
                    rule: step.bound.to_string(),
                };
            }
        }
        StepMatch {
            points: self.otherwise,
            rule: "otherwise".to_string(),
        }
    }

    pub fn points(&self, value: f64) -> u32 {
        self.evaluate(value).points
    }

    pub fn max_points(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| s.points)
            .chain(std::iter::once(self.otherwise))
            .max()
            .unwrap_or(0)
    }
}

pub const AFP: StepScale = StepScale {
    steps: &[at_most(20.0, 0), at_most(400.0, 1), at_most(1000.0, 2)],
    otherwise: 3,
};

pub const SHUNT_FRACTION: StepScale = StepScale {
    steps: &[at_most(5.0, 0), at_most(10.0, 1)],
    otherwise: 2,
};

pub const MELD3: StepScale = StepScale {
    steps: &[at_most(10.0, 0), at_most(14.0, 1)],
    otherwise: 2,
};

/// Lower albumin scores higher.
pub const ALBUMIN: StepScale = StepScale {
    steps: &[at_least(35.0, 0), at_least(28.0, 1)],
    otherwise: 2,
};

pub const ALT_AST_RATIO: StepScale = StepScale {
    steps: &[at_most(1.5, 0), at_most(2.0, 1)],
    otherwise: 2,
};

pub const NLR: StepScale = StepScale {
    steps: &[at_most(2.5, 0), at_most(4.0, 1)],
    otherwise: 2,
};

pub const SIZE_VOLUME_MAX: u32 = 4;
pub const ECOG_MAX: u32 = 2;

/// Joint tumor size/volume score: 0, 1, 2 or 4 (3 is never awarded).
///
/// The 1-point branch has three overlapping conditions; they are checked
/// exactly as listed and in this order, and the one that matched is reported.
/// The second and third lie inside the first, so in practice the first wins.
pub fn size_volume(diameter_cm: f64, volume_cc: f64) -> StepMatch {
    let (points, rule) = if diameter_cm <= 3.0 && volume_cc <= 100.0 {
        (0, "<=3cm and <=100cc")
    } else if diameter_cm <= 5.0 && volume_cc <= 300.0 {
        (1, "<=5cm and <=300cc")
    } else if diameter_cm <= 3.0 && volume_cc <= 300.0 {
        (1, "<=3cm and <=300cc")
    } else if diameter_cm <= 5.0 && volume_cc <= 100.0 {
        (1, "<=5cm and <=100cc")
    } else if diameter_cm <= 8.0 && volume_cc <= 500.0 {
        (2, "<=8cm and <=500cc")
    } else {
        (SIZE_VOLUME_MAX, "otherwise")
    };
    StepMatch {
        points,
        rule: rule.to_string(),
    }
}

pub fn ecog(status: u8) -> StepMatch {
    let (points, rule) = match status {
        0 | 1 => (0, "<=1"),
        2 => (1, "=2"),
        _ => (ECOG_MAX, ">=3"),
    };
    StepMatch {
        points,
        rule: rule.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_inclusive() {
        assert!(Bound::AtMost(2.5).matches(2.5));
        assert!(!Bound::AtMost(2.5).matches(2.51));
        assert!(Bound::AtLeast(35.0).matches(35.0));
        assert!(!Bound::AtLeast(35.0).matches(34.9));
    }

    #[test]
    fn test_bound_display() {
        assert_eq!(Bound::AtMost(20.0).to_string(), "<=20");
        assert_eq!(Bound::AtLeast(28.0).to_string(), ">=28");
        assert_eq!(Bound::AtMost(1.5).to_string(), "<=1.5");
    }

    #[test]
    fn test_afp_steps() {
        assert_eq!(AFP.points(0.0), 0);
        assert_eq!(AFP.points(20.0), 0);
        assert_eq!(AFP.points(20.1), 1);
        assert_eq!(AFP.points(400.0), 1);
        assert_eq!(AFP.points(1000.0), 2);
        assert_eq!(AFP.points(1000.5), 3);
        assert_eq!(AFP.max_points(), 3);
    }

    #[test]
    fn test_first_match_wins() {
        let m = AFP.evaluate(15.0);
        assert_eq!(m.points, 0);
        assert_eq!(m.rule, "<=20");
    }

    #[test]
    fn test_otherwise_rule() {
        let m = SHUNT_FRACTION.evaluate(12.0);
        assert_eq!(m.points, 2);
        assert_eq!(m.rule, "otherwise");
    }

    #[test]
    fn test_nan_falls_through() {
        assert_eq!(NLR.points(f64::NAN), 2);
    }

    #[test]
    fn test_albumin_inverted() {
        assert_eq!(ALBUMIN.points(40.0), 0);
        assert_eq!(ALBUMIN.points(35.0), 0);
        assert_eq!(ALBUMIN.points(34.9), 1);
        assert_eq!(ALBUMIN.points(28.0), 1);
        assert_eq!(ALBUMIN.points(27.9), 2);
    }

    #[test]
    fn test_nlr_boundary() {
        assert_eq!(NLR.points(2.5), 0);
        assert_eq!(NLR.points(2.51), 1);
        assert_eq!(NLR.points(4.0), 1);
        assert_eq!(NLR.points(4.01), 2);
    }

    #[test]
    fn test_meld_and_ratio_steps() {
        assert_eq!(MELD3.points(10.0), 0);
        assert_eq!(MELD3.points(11.0), 1);
        assert_eq!(MELD3.points(14.0), 1);
        assert_eq!(MELD3.points(15.0), 2);
        assert_eq!(ALT_AST_RATIO.points(1.5), 0);
        assert_eq!(ALT_AST_RATIO.points(2.0), 1);
        assert_eq!(ALT_AST_RATIO.points(2.01), 2);
    }

    #[test]
    fn test_size_volume_boundaries() {
        assert_eq!(size_volume(3.0, 100.0).points, 0);
        assert_eq!(size_volume(3.01, 100.0).points, 1);
        assert_eq!(size_volume(3.0, 100.01).points, 1);
        assert_eq!(size_volume(5.0, 300.0).points, 1);
        assert_eq!(size_volume(5.01, 300.0).points, 2);
        assert_eq!(size_volume(8.0, 500.0).points, 2);
        assert_eq!(size_volume(8.0, 500.1).points, 4);
        assert_eq!(size_volume(8.1, 50.0).points, 4);
    }

    #[test]
    fn test_size_volume_small_tumor_large_volume() {
        // Small diameter alone does not cap the score
        assert_eq!(size_volume(2.0, 450.0).points, 2);
        assert_eq!(size_volume(2.0, 600.0).points, 4);
    }

    #[test]
    fn test_size_volume_reports_matched_rule() {
        // Inside all three 1-point conditions: the first listed one is reported
        assert_eq!(size_volume(2.0, 250.0).rule, "<=5cm and <=300cc");
        assert_eq!(size_volume(4.5, 90.0).rule, "<=5cm and <=300cc");
        assert_eq!(size_volume(1.0, 50.0).rule, "<=3cm and <=100cc");
        assert_eq!(size_volume(7.0, 450.0).rule, "<=8cm and <=500cc");
        assert_eq!(size_volume(9.0, 10.0).rule, "otherwise");
    }

    #[test]
    fn test_size_volume_never_three() {
        for d in [0.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 9.0, 20.0] {
            for v in [0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 501.0, 3000.0] {
                assert_ne!(size_volume(d, v).points, 3);
            }
        }
    }

    #[test]
    fn test_ecog() {
        assert_eq!(ecog(0).points, 0);
        assert_eq!(ecog(1).points, 0);
        assert_eq!(ecog(2).points, 1);
        assert_eq!(ecog(3).points, 2);
    }
}
