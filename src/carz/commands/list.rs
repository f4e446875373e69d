use crate::commands::{CmdResult, CollectionState};
use crate::view::{filter_and_sort, showcase, SortKey, ViewFilter};

/// The main collection view: filtered, sorted cards plus the showcase.
pub fn run(
    state: &CollectionState,
    filter: &ViewFilter,
    sort: SortKey,
    showcase_limit: usize,
) -> CmdResult {
    let view = filter_and_sort(&state.cars, &state.favorites, filter, sort);
    let favorites = showcase(&state.cars, &state.favorites, showcase_limit);
    CmdResult::default()
        .with_listed_cars(view.cars)
        .with_showcase(favorites)
}

/// Only the favorites section.
pub fn showcase_only(state: &CollectionState, limit: usize) -> CmdResult {
    CmdResult::default().with_showcase(showcase(&state.cars, &state.favorites, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackStatus;
    use crate::store::load;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_filtered_cars_with_showcase() {
        let store = StoreFixture::new()
            .with_car("Deora II", 300, PackStatus::InPack)
            .with_car("Bone Shaker", 150, PackStatus::Opened)
            .with_favorite_car("Twin Mill")
            .build();
        let state = CollectionState::from(load(&store));

        let filter = ViewFilter::new(Some("In-Pack".into()), None);
        let result = run(&state, &filter, SortKey::Unsorted, 4);
        assert_eq!(result.listed_cars.len(), 1);
        assert_eq!(result.listed_cars[0].car.name, "Deora II");

        let showcase = result.showcase.unwrap();
        assert_eq!(showcase.cars.len(), 1);
        assert_eq!(showcase.cars[0].car.name, "Twin Mill");
    }

    #[test]
    fn showcase_limit_is_honoured() {
        let mut fixture = StoreFixture::new();
        for i in 0..6 {
            fixture = fixture.with_favorite_car(&format!("Fav {}", i));
        }
        let state = CollectionState::from(load(&fixture.build()));
        assert_eq!(showcase_only(&state, 2).showcase.unwrap().cars.len(), 2);
    }
}
