//! # View Engine
//!
//! Pure derivations from the stored collection to what a rendering surface
//! shows. Nothing here reads or writes storage; given the same inputs every
//! function returns the same output.
//!
//! - [`filter_and_sort`]: the main card list, with a running count
//! - [`showcase`]: the first few favorites, in collection order
//! - [`aggregate_by_pack_status`]: average value per pack status, for the chart
//!
//! Every entry carries its position in the stored collection. Edit and delete
//! address cars by that position, never by where they appear in a sorted view.

use crate::model::{Car, Favorites, PackStatus};
use std::cmp::Ordering;

/// How many favorites the showcase shows unless configured otherwise.
pub const DEFAULT_SHOWCASE_LIMIT: usize = 4;

/// Exact-match filters. `None` and empty strings both mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub pack_status: Option<String>,
    pub category: Option<String>,
}

impl ViewFilter {
    pub fn new(pack_status: Option<String>, category: Option<String>) -> Self {
        Self {
            pack_status,
            category,
        }
    }

    fn matches(&self, car: &Car) -> bool {
        if let Some(status) = active(&self.pack_status) {
            if car.pack_status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = active(&self.category) {
            if car.category != category {
                return false;
            }
        }
        true
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the filtered, stored order.
    #[default]
    Unsorted,
    /// Ascending, locale-aware.
    Name,
    /// Highest rating first.
    Rating,
    /// Highest value first.
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Unsorted => "",
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::Price => "price",
        }
    }
}

/// Unrecognised keys sort nothing.
impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s {
            "name" => SortKey::Name,
            "rating" => SortKey::Rating,
            "price" => SortKey::Price,
            _ => SortKey::Unsorted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCar {
    pub car: Car,
    /// Position in the stored collection.
    pub index: usize,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub cars: Vec<DisplayCar>,
}

impl ListView {
    /// The running count shown next to the list.
    pub fn total(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

pub fn filter_and_sort(
    collection: &[Car],
    favorites: &Favorites,
    filter: &ViewFilter,
    sort: SortKey,
) -> ListView {
    let mut cars: Vec<DisplayCar> = collection
        .iter()
        .enumerate()
        .filter(|(_, car)| filter.matches(car))
        .map(|(index, car)| DisplayCar {
            car: car.clone(),
            index,
            is_favorite: favorites.contains(&car.id),
        })
        .collect();

    // `sort_by` is stable, so ties keep their filtered order.
    match sort {
        SortKey::Name => cars.sort_by(|a, b| locale_cmp(&a.car.name, &b.car.name)),
        SortKey::Rating => cars.sort_by(|a, b| b.car.rating.cmp(&a.car.rating)),
        SortKey::Price => cars.sort_by(|a, b| b.car.value.cmp(&a.car.value)),
        SortKey::Unsorted => {}
    }

    ListView { cars }
}

/// The favorites section. Empty means "no favorites yet" and the section
/// should be hidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Showcase {
    pub cars: Vec<DisplayCar>,
}

impl Showcase {
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

pub fn showcase(collection: &[Car], favorites: &Favorites, limit: usize) -> Showcase {
    let cars = collection
        .iter()
        .enumerate()
        .filter(|(_, car)| favorites.contains(&car.id))
        .take(limit)
        .map(|(index, car)| DisplayCar {
            car: car.clone(),
            index,
            is_favorite: true,
        })
        .collect();
    Showcase { cars }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackStatusAverage {
    pub pack_status: PackStatus,
    pub average: f64,
    pub count: usize,
}

/// Average value per pack status, in the order each status is first seen.
pub fn aggregate_by_pack_status(collection: &[Car]) -> Vec<PackStatusAverage> {
    // Summed as i128 so any number of i64 values fits.
    let mut groups: Vec<(PackStatus, i128, usize)> = Vec::new();

    for car in collection {
        match groups
            .iter_mut()
            .find(|(status, _, _)| status.as_str() == car.pack_status.as_str())
        {
            Some((_, total, count)) => {
                *total += i128::from(car.value);
                *count += 1;
            }
            None => groups.push((car.pack_status.clone(), i128::from(car.value), 1)),
        }
    }

    groups
        .into_iter()
        .map(|(pack_status, total, count)| PackStatusAverage {
            pack_status,
            average: total as f64 / count as f64,
            count,
        })
        .collect()
}

/// Orders names the way a reader expects rather than by code point:
/// punctuation before digits before letters, case-insensitive, with the
/// lowercase form first when two names differ only in case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(collation_weight)
        .cmp(b.chars().flat_map(char::to_lowercase).map(collation_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let tertiary = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    tertiary.then_with(|| a.cmp(b))
}

fn collation_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}
