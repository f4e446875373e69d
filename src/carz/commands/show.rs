use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::model::Car;
use crate::view::DisplayCar;

const NOT_AVAILABLE: &str = "N/A";

/// What the details view shows for one car, with empty fields already
/// replaced by "N/A" and links present only when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDetails {
    pub name: String,
    pub value: i64,
    pub kind: String,
    pub pack_status: String,
    pub category: String,
    pub stars: usize,
    pub wiki: Option<String>,
    pub marketplace: Option<String>,
}

impl From<&Car> for CarDetails {
    fn from(car: &Car) -> Self {
        Self {
            name: car.name.clone(),
            value: car.value,
            kind: or_na(&car.kind),
            pack_status: or_na(car.pack_status.as_str()),
            category: or_na(&car.category),
            stars: car.stars(),
            wiki: car.wiki_link().map(str::to_string),
            marketplace: car.marketplace_link().map(str::to_string),
        }
    }
}

fn or_na(s: &str) -> String {
    if s.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

pub fn run(state: &CollectionState, index: usize) -> CmdResult {
    let mut result = CmdResult::default();
    match state.cars.get(index) {
        Some(car) => {
            result.listed_cars.push(DisplayCar {
                car: car.clone(),
                index,
                is_favorite: state.favorites.contains(&car.id),
            });
        }
        None => result.add_message(CmdMessage::info(format!("No car at position {}", index + 1))),
    }
    result
}
