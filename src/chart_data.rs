//! Prepare line chart data from pivoted rows: one series per metric, x = period index.

use crate::reshape::PivotedRow;

/// Format a numeric axis tick.
pub fn format_axis_label(v: f64) -> String {
    if v.abs() >= 1e6 || (v.abs() < 1e-2 && v != 0.0) {
        format!("{:.2e}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Chart-ready series plus the period labels the x axis indexes into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChartData {
    pub periods: Vec<String>,
    pub series: Vec<LineSeries>,
}

impl LineChartData {
    /// Builds one series per metric. With no `metrics` given, every metric found in the
    /// rows is charted in first-seen order. Non-finite values are skipped.
    pub fn from_rows(rows: &[PivotedRow], metrics: &[String]) -> Self {
        let names: Vec<String> = if metrics.is_empty() {
            let mut seen: Vec<String> = Vec::new();
            for name in rows.iter().flat_map(|r| r.metrics()) {
                if !seen.iter().any(|s| s == name) {
                    seen.push(name.to_string());
                }
            }
            seen
        } else {
            metrics.to_vec()
        };

        let series = names
            .into_iter()
            .map(|name| {
                let points = rows
                    .iter()
                    .enumerate()
                    .filter_map(|(i, row)| row.get(&name).map(|y| (i as f64, y)))
                    .filter(|(_, y)| y.is_finite())
                    .collect();
                LineSeries { name, points }
            })
            .collect();

        Self {
            periods: rows.iter().map(|r| r.period.clone()).collect(),
            series,
        }
    }

    /// True when there is not a single point to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    /// Axis bounds. A flat or empty range is widened to one unit so the chart has height.
    pub fn bounds(&self, y_from_zero: bool) -> ChartBounds {
        let x_max = self.periods.len().saturating_sub(1).max(1) as f64;

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for (_, y) in self.series.iter().flat_map(|s| s.points.iter()) {
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
        if y_min > y_max {
            y_min = 0.0;
            y_max = 1.0;
        }
        if y_from_zero {
            y_min = y_min.min(0.0);
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }

        ChartBounds {
            x_min: 0.0,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Period label at an x position, rounding to the nearest period.
    pub fn period_label(&self, x: f64) -> Option<&str> {
        if !x.is_finite() || x < -0.5 {
            return None;
        }
        self.periods.get(x.round() as usize).map(|s| s.as_str())
    }

    /// Up to `max_labels` evenly spaced period labels for the x axis, always
    /// including the first and last period.
    pub fn x_labels(&self, max_labels: usize) -> Vec<String> {
        let n = self.periods.len();
        if n == 0 || max_labels == 0 {
            return Vec::new();
        }
        if n <= max_labels {
            return self.periods.clone();
        }
        if max_labels == 1 {
            return vec![self.periods[0].clone()];
        }
        let step = (n - 1) as f64 / (max_labels - 1) as f64;
        (0..max_labels)
            .map(|i| self.periods[((i as f64) * step).round() as usize].clone())
            .collect()
    }
}
