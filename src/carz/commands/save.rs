use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::error::{CarzError, Result};
use crate::model::{Car, CarForm, PackStatus, MAX_RATING};
use crate::session::EditSession;
use crate::store::{save_collection, DataStore};
use chrono::Utc;

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCar {
    pub name: String,
    pub value: i64,
    pub image: String,
    pub kind: String,
    pub pack_status: PackStatus,
    pub category: String,
    pub rating: i64,
    pub wiki: String,
    pub marketplace: String,
}

/// Checks a form. Any problem yields the single combined validation error;
/// the offending field is only logged.
pub fn validate(form: &CarForm) -> Result<ValidCar> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(reject("name", "empty"));
    }

    let image = form.image.trim();
    if image.is_empty() {
        return Err(reject("image", "empty"));
    }

    let value: i64 = form
        .value
        .trim()
        .parse()
        .map_err(|_| reject("value", "not an integer"))?;
    if value < 0 {
        return Err(reject("value", "negative"));
    }

    let rating = match form.rating.trim() {
        "" => 0,
        raw => raw
            .parse::<i64>()
            .map_err(|_| reject("rating", "not an integer"))?,
    };
    if !(0..=MAX_RATING).contains(&rating) {
        return Err(reject("rating", "out of range"));
    }

    Ok(ValidCar {
        name: name.to_string(),
        value,
        image: image.to_string(),
        kind: form.kind.trim().to_string(),
        pack_status: PackStatus::from(form.pack_status.trim()),
        category: form.category.trim().to_string(),
        rating,
        wiki: form.wiki.trim().to_string(),
        marketplace: form.marketplace.trim().to_string(),
    })
}

fn reject(field: &str, reason: &str) -> CarzError {
    tracing::debug!(field, reason, "car form rejected");
    CarzError::validation()
}

/// Adds a new car when idle, or replaces the edited one.
///
/// On success the full collection is persisted and the session returns to
/// `Idle`. On any failure nothing changes.
pub fn run<S: DataStore>(
    store: &mut S,
    state: &mut CollectionState,
    form: &CarForm,
) -> Result<CmdResult> {
    let valid = validate(form)?;
    let mut next = state.cars.clone();

    let session = state.session;
    let (car, verb) = match session {
        EditSession::Idle => {
            let mut car = Car::new(valid.name.clone(), valid.value, valid.image.clone());
            apply(&mut car, valid);
            next.push(car.clone());
            (car, "added")
        }
        EditSession::Editing(index) => {
            let len = next.len();
            let Some(existing) = next.get_mut(index) else {
                tracing::warn!(index, len, "edit target vanished");
                state.session.cancel();
                return Err(CarzError::Api(format!(
                    "The car being edited (position {}) no longer exists",
                    index + 1
                )));
            };
            apply(existing, valid);
            existing.updated_at = Some(Utc::now());
            (existing.clone(), "updated")
        }
    };

    save_collection(store, &next)?;
    state.cars = next;
    state.session.commit();
    tracing::debug!(id = %car.id, verb, "car saved");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Car {}: {}", verb, car.name)));
    Ok(result.with_affected_cars(vec![car]))
}

fn apply(car: &mut Car, valid: ValidCar) {
    car.name = valid.name;
    car.value = valid.value;
    car.image = valid.image;
    car.kind = valid.kind;
    car.pack_status = valid.pack_status;
    car.category = valid.category;
    car.rating = valid.rating;
    car.wiki = valid.wiki;
    car.marketplace = valid.marketplace;
}
