//! Terminal rendering. Every function returns a `String` so output can be
//! checked without a terminal; `commands.rs` does the printing.

use carz::api::{CmdMessage, MessageLevel};
use carz::chart::BarChart;
use carz::commands::show::CarDetails;
use carz::index::Position;
use carz::view::{DisplayCar, PackStatusAverage, Showcase};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 36;
const BAR_WIDTH: usize = 40;
const STAR: &str = "⭐";
const FAVORITE_MARKER: &str = "❤";
const CURRENCY: &str = "₹";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_car_list(cars: &[DisplayCar]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Items: {}", cars.len());

    if cars.is_empty() {
        let _ = writeln!(
            out,
            "No cars match this filter. Try adjusting your filters or add a new car."
        );
        return out;
    }

    for dc in cars {
        let position = format!("{:>3}. ", Position::from_index(dc.index));
        let marker = if dc.is_favorite {
            FAVORITE_MARKER.red()
        } else {
            " ".normal()
        };
        let name = truncate_to_width(&dc.car.name, NAME_WIDTH);
        let padding = NAME_WIDTH.saturating_sub(name.width());

        let _ = writeln!(
            out,
            "{}{} {}{} {:>10}  {}",
            position.yellow(),
            marker,
            name.bold(),
            " ".repeat(padding),
            format!("{}{}", CURRENCY, dc.car.value),
            STAR.repeat(dc.car.stars())
        );
    }
    out
}

/// Nothing at all when there are no favorites: the section is hidden.
pub(super) fn render_showcase(showcase: &Showcase) -> String {
    let mut out = String::new();
    if showcase.is_empty() {
        return out;
    }

    let _ = writeln!(out, "{}", "Showcase".bold().underline());
    for dc in &showcase.cars {
        let _ = writeln!(
            out,
            "  {} {} | {}{} | Rating: {}",
            FAVORITE_MARKER.red(),
            dc.car.name.bold(),
            CURRENCY,
            dc.car.value,
            STAR.repeat(dc.car.stars())
        );
    }
    out
}

pub(super) fn render_details(dc: &DisplayCar) -> String {
    let details = CarDetails::from(&dc.car);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}{}",
        Position::from_index(dc.index).to_string().yellow(),
        details.name.bold(),
        if dc.is_favorite {
            format!(" {}", FAVORITE_MARKER.red())
        } else {
            String::new()
        }
    );
    let _ = writeln!(out, "--------------------------------");
    let _ = writeln!(out, "Value:    {}{}", CURRENCY, details.value);
    let _ = writeln!(out, "Type:     {}", details.kind);
    let _ = writeln!(out, "Pack:     {}", details.pack_status);
    let _ = writeln!(out, "Category: {}", details.category);
    let _ = writeln!(out, "Rating:   {}", STAR.repeat(details.stars));
    let _ = writeln!(out, "Image:    {}", dc.car.image);
    if let Some(wiki) = &details.wiki {
        let _ = writeln!(out, "Wiki:     {}", wiki.cyan().underline());
    }
    if let Some(shop) = &details.marketplace {
        let _ = writeln!(out, "Buy:      {}", shop.cyan().underline());
    }
    if let Some(added) = dc.car.added_at {
        let _ = writeln!(out, "{}", format!("Added {}", time_ago(added)).dimmed());
    }
    out
}

pub(super) fn render_stats(averages: &[PackStatusAverage], chart: &BarChart) -> String {
    let mut out = String::new();
    if chart.is_empty() {
        return out;
    }

    let _ = writeln!(out, "{}", tint(chart.title, chart.theme.title).bold());
    let label_width = chart
        .bars
        .iter()
        .map(|b| display_label(&b.label).width())
        .max()
        .unwrap_or(0);
    let max = chart.max_value();

    for (bar, group) in chart.bars.iter().zip(averages) {
        let label = display_label(&bar.label);
        let filled = if max > 0.0 {
            ((bar.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {}{}  {} {}",
            tint(&label, chart.theme.ticks),
            " ".repeat(label_width.saturating_sub(label.width())),
            tint(&"█".repeat(filled), bar.color.fill),
            format!("{} ({} car{})", bar.tooltip, group.count, plural(group.count)).dimmed()
        );
    }
    out
}

fn display_label(label: &str) -> String {
    if label.is_empty() {
        "(none)".to_string()
    } else {
        label.to_string()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Applies a CSS-style colour (`#rrggbb` or `rgba(r, g, b, a)`), falling back
/// to plain text for anything else.
fn tint(text: &str, css: &str) -> ColoredString {
    match parse_css_rgb(css) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_css_rgb(css: &str) -> Option<(u8, u8, u8)> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some((channel(0)?, channel(2)?, channel(4)?));
    }

    let inner = css
        .strip_prefix("rgba(")
        .or_else(|| css.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
    Some((parts.next()??, parts.next()??, parts.next()??))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carz::chart::ChartTheme;
    use carz::model::{Car, PackStatus};
    use carz::view::aggregate_by_pack_status;

    fn display(car: Car, index: usize, is_favorite: bool) -> DisplayCar {
        DisplayCar {
            car,
            index,
            is_favorite,
        }
    }

    #[test]
    fn empty_list_shows_hint_and_count() {
        colored::control::set_override(false);
        let out = render_car_list(&[]);
        assert!(out.starts_with("Total Items: 0"));
        assert!(out.contains("No cars match this filter"));
    }

    #[test]
    fn list_shows_one_based_position_and_clamped_stars() {
        colored::control::set_override(false);
        let car = Car::new("Deora II", 300, "d.png").with_rating(42);
        let out = render_car_list(&[display(car, 0, true)]);
        assert!(out.contains("  1. "));
        assert!(out.contains("₹300"));
        assert!(out.contains(&STAR.repeat(5)));
        assert!(!out.contains(&STAR.repeat(6)));
    }

    #[test]
    fn empty_showcase_renders_nothing() {
        assert_eq!(render_showcase(&Showcase::default()), "");
    }

    #[test]
    fn details_hide_missing_links() {
        colored::control::set_override(false);
        let car = Car::new("Twin Mill", 90, "t.png");
        let out = render_details(&display(car, 2, false));
        assert!(out.starts_with("3 Twin Mill"));
        assert!(out.contains("Type:     N/A"));
        assert!(!out.contains("Wiki:"));
    }

    #[test]
    fn stats_scale_bars_to_largest_average() {
        colored::control::set_override(false);
        let cars = vec![
            Car::new("a", 200, "i").with_pack_status(PackStatus::Opened),
            Car::new("b", 100, "i").with_pack_status(PackStatus::InPack),
        ];
        let averages = aggregate_by_pack_status(&cars);
        let chart = BarChart::build(&averages, ChartTheme::LIGHT);
        let out = render_stats(&averages, &chart);
        assert!(out.contains(&"█".repeat(BAR_WIDTH)));
        assert!(out.contains(&"█".repeat(BAR_WIDTH / 2)));
        assert!(out.contains("Avg. Value: ₹100.00 (1 car)"));
    }

    #[test]
    fn css_colors_parse() {
        assert_eq!(parse_css_rgb("#2c3e50"), Some((0x2c, 0x3e, 0x50)));
        assert_eq!(parse_css_rgb("rgba(46, 204, 113, 0.7)"), Some((46, 204, 113)));
        assert_eq!(parse_css_rgb("teal"), None);
    }

    #[test]
    fn truncates_long_names() {
        let long = "x".repeat(NAME_WIDTH + 5);
        let out = truncate_to_width(&long, NAME_WIDTH);
        assert_eq!(out.width(), NAME_WIDTH);
        assert!(out.ends_with('…'));
    }
}
