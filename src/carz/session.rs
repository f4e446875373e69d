//! # Edit Session
//!
//! Tracks whether the next save creates a new car or replaces an existing one.
//!
//! ```text
//!          start_edit(i)            commit / cancel / deleted(i)
//!   Idle ───────────────▶ Editing(i) ─────────────────────────▶ Idle
//! ```
//!
//! The session addresses cars by position in the collection. Positions are only
//! stable until the next insert or removal: deleting a car *before* the edited
//! one leaves the session pointing at whatever car slid into that slot. This is
//! kept as-is; [`EditSession::on_deleted`] only resets when the edited car
//! itself is removed.

use crate::model::Car;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(usize),
}

impl EditSession {
    /// Enters edit mode for `index` and returns the car to pre-populate the
    /// input surface with. Out-of-range indexes leave the session unchanged.
    pub fn start_edit<'a>(&mut self, collection: &'a [Car], index: usize) -> Option<&'a Car> {
        let car = collection.get(index)?;
        *self = EditSession::Editing(index);
        Some(car)
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn commit(&mut self) {
        *self = EditSession::Idle;
    }

    /// Called after the car at `index` was removed.
    pub fn on_deleted(&mut self, index: usize) {
        if *self == EditSession::Editing(index) {
            *self = EditSession::Idle;
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(i) => Some(*i),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cars(n: usize) -> Vec<Car> {
        (0..n)
            .map(|i| Car::new(format!("Car {}", i), 10, "img"))
            .collect()
    }

    #[test]
    fn start_edit_returns_the_car() {
        let cars = cars(3);
        let mut session = EditSession::Idle;
        let car = session.start_edit(&cars, 1).unwrap();
        assert_eq!(car.name, "Car 1");
        assert_eq!(session, EditSession::Editing(1));
    }

    #[test]
    fn start_edit_out_of_range_is_noop() {
        let cars = cars(2);
        let mut session = EditSession::Idle;
        assert!(session.start_edit(&cars, 2).is_none());
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn cancel_and_commit_return_to_idle() {
        let cars = cars(2);
        let mut session = EditSession::Idle;
        session.start_edit(&cars, 0);
        session.cancel();
        assert_eq!(session, EditSession::Idle);
        session.start_edit(&cars, 1);
        session.commit();
        assert!(!session.is_editing());
    }

    #[test]
    fn deleting_another_index_keeps_session() {
        let mut session = EditSession::Editing(2);
        session.on_deleted(0);
        assert_eq!(session, EditSession::Editing(2));
        session.on_deleted(2);
        assert_eq!(session, EditSession::Idle);
    }
}
