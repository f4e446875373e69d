//! Bar chart description for the "average value by pack status" stats view.
//!
//! A [`BarChart`] is a plain value built from scratch on every call; renderers
//! draw it and drop it, so there is no chart instance to keep or tear down.

use crate::view::PackStatusAverage;

pub const CHART_TITLE: &str = "Average Value by Pack Status";

/// Fill and border colour of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColor {
    pub fill: &'static str,
    pub border: &'static str,
}

/// Green for the first group, yellow for the second, then repeating.
pub const BAR_COLORS: [BarColor; 2] = [
    BarColor {
        fill: "rgba(46, 204, 113, 0.7)",
        border: "rgba(46, 204, 113, 1)",
    },
    BarColor {
        fill: "rgba(241, 196, 15, 0.7)",
        border: "rgba(241, 196, 15, 1)",
    },
];

/// Text and grid colours, chosen by the dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTheme {
    pub title: &'static str,
    pub grid: &'static str,
    pub ticks: &'static str,
}

impl ChartTheme {
    pub const LIGHT: ChartTheme = ChartTheme {
        title: "#2c3e50",
        grid: "rgba(0,0,0,0.1)",
        ticks: "#7f8c8d",
    };

    pub const DARK: ChartTheme = ChartTheme {
        title: "#ecf0f1",
        grid: "rgba(255,255,255,0.1)",
        ticks: "#95a5a6",
    };

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: BarColor,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub bars: Vec<Bar>,
    pub theme: ChartTheme,
}

impl BarChart {
    pub fn build(averages: &[PackStatusAverage], theme: ChartTheme) -> Self {
        let bars = averages
            .iter()
            .enumerate()
            .map(|(i, group)| Bar {
                label: group.pack_status.to_string(),
                value: group.average,
                color: BAR_COLORS[i % BAR_COLORS.len()],
                tooltip: format!("Avg. Value: ₹{:.2}", group.average),
            })
            .collect();

        Self {
            title: CHART_TITLE,
            bars,
            theme,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest bar value; the y axis always starts at zero.
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackStatus;

    fn averages() -> Vec<PackStatusAverage> {
        vec![
            PackStatusAverage {
                pack_status: PackStatus::Opened,
                average: 150.0,
                count: 2,
            },
            PackStatusAverage {
                pack_status: PackStatus::InPack,
                average: 99.5,
                count: 1,
            },
            PackStatusAverage {
                pack_status: PackStatus::Other("Loose".into()),
                average: 10.0,
                count: 1,
            },
        ]
    }

    #[test]
    fn bars_follow_aggregate_order_and_cycle_colors() {
        let chart = BarChart::build(&averages(), ChartTheme::LIGHT);
        let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Opened", "In-Pack", "Loose"]);
        assert_eq!(chart.bars[0].color, BAR_COLORS[0]);
        assert_eq!(chart.bars[1].color, BAR_COLORS[1]);
        assert_eq!(chart.bars[2].color, BAR_COLORS[0]);
        assert_eq!(chart.max_value(), 150.0);
    }

    #[test]
    fn tooltip_has_two_decimals() {
        let chart = BarChart::build(&averages(), ChartTheme::LIGHT);
        assert_eq!(chart.bars[1].tooltip, "Avg. Value: ₹99.50");
    }

    #[test]
    fn theme_follows_dark_mode() {
        assert_eq!(ChartTheme::for_mode(true).title, "#ecf0f1");
        assert_eq!(ChartTheme::for_mode(false).ticks, "#7f8c8d");
    }

    #[test]
    fn each_build_is_independent() {
        let first = BarChart::build(&averages(), ChartTheme::DARK);
        let second = BarChart::build(&averages()[..1], ChartTheme::DARK);
        assert_eq!(first.bars.len(), 3);
        assert_eq!(second.bars.len(), 1);
        assert!(BarChart::build(&[], ChartTheme::DARK).is_empty());
    }
}
