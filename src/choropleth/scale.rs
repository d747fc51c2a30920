use serde::Serialize;

/// Ordered threshold → color table. `palette[i]` applies when
/// `value >= thresholds[i]` and no earlier threshold matched; values below
/// every threshold (including the zero a bad input normalized to) fall back
/// to the last, lowest-bucket color.
///
/// Thresholds are strictly descending and the palette has the same length.
/// The legend is derived from this same table, so legend and fill always
/// agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    thresholds: &'static [f64],
    palette: &'static [&'static str],
}

/// One legend row: human-readable bucket bounds plus the bucket's color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

impl ColorScale {
    pub(crate) const fn new(
        thresholds: &'static [f64],
        palette: &'static [&'static str],
    ) -> Self {
        Self { thresholds, palette }
    }

    /// Index of the bucket `value` lands in.
    fn bucket(&self, value: f64) -> usize {
        debug_assert!(self.thresholds.len() == self.palette.len());
        debug_assert!(self.thresholds.windows(2).all(|w| w[0] > w[1]));

        self.thresholds
            .iter()
            .position(|&t| value >= t)
            .unwrap_or(self.palette.len() - 1)
    }

    pub fn color_for(&self, value: f64) -> &'static str {
        self.palette[self.bucket(value)]
    }

    /// Bucket labels derived from the threshold table itself:
    /// `"> t0"`, `"t1 – t0"`, …, `"< t(n-2)"`.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let n = self.thresholds.len();
        (0..n)
            .map(|i| {
                let label = if i == 0 {
                    format!("> {}", fmt_threshold(self.thresholds[0]))
                } else if i < n - 1 {
                    format!(
                        "{} – {}",
                        fmt_threshold(self.thresholds[i]),
                        fmt_threshold(self.thresholds[i - 1]),
                    )
                } else {
                    format!("< {}", fmt_threshold(self.thresholds[i - 1]))
                };
                LegendEntry { label, color: self.palette[i] }
            })
            .collect()
    }
}

fn fmt_threshold(t: f64) -> String {
    if t.fract() == 0.0 {
        format!("{t:.0}")
    } else {
        format!("{t}")
    }
}
