use crate::chart::{BarChart, ChartTheme};
use crate::commands::{CmdMessage, CmdResult, CollectionState};
use crate::view::aggregate_by_pack_status;

pub fn run(state: &CollectionState) -> CmdResult {
    let averages = aggregate_by_pack_status(&state.cars);
    let theme = ChartTheme::for_mode(state.preferences.dark_mode);

    let mut result = CmdResult {
        chart: Some(BarChart::build(&averages, theme)),
        averages,
        ..CmdResult::default()
    };
    if result.averages.is_empty() {
        result.add_message(CmdMessage::info("No cars yet, nothing to chart."));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackStatus;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::{load, Preferences};

    #[test]
    fn averages_and_chart_agree() {
        let store = StoreFixture::new()
            .with_car("a", 100, PackStatus::Opened)
            .with_car("b", 200, PackStatus::Opened)
            .with_car("c", 50, PackStatus::InPack)
            .build();
        let state = CollectionState::from(load(&store));

        let result = run(&state);
        assert_eq!(result.averages.len(), 2);
        assert_eq!(result.averages[0].average, 150.0);
        let chart = result.chart.unwrap();
        assert_eq!(chart.bars[1].label, "In-Pack");
        assert_eq!(chart.theme, ChartTheme::LIGHT);
    }

    #[test]
    fn dark_mode_selects_dark_theme() {
        let state = CollectionState {
            preferences: Preferences { dark_mode: true },
            ..CollectionState::default()
        };
        let result = run(&state);
        assert_eq!(result.chart.unwrap().theme, ChartTheme::DARK);
        assert_eq!(result.messages.len(), 1);
    }
}
