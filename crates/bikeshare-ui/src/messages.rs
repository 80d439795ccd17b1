//! Prompt questions and banners shown by the interactive session.

use bikeshare_core::formatting::title_case;
use bikeshare_core::models::FilterSelection;

pub const WELCOME: &str = "\n\nWelcome to the US bikeshare data explorer!\n\n\
                           Type 'end' at any time to exit the program.\n";

pub const INVALID_INPUT: &str = "\nInvalid input. Please enter a valid option:";

pub const RETRY_FILTERS: &str = "\nLet's try that again!";

pub const MONTH_QUESTION: &str = "\nWhich month(s) would you like to filter by? \
                                  Options: January to June. Use commas for multiple selections.\n>";

pub const WEEKDAY_QUESTION: &str = "\nWhich weekday(s) would you like to filter by? \
                                    Options: Sunday to Saturday. Use commas for multiple selections.\n>";

pub const MENU_QUESTION: &str = "\nSelect the information you want:\n\
                                 [ts] Time Stats\n\
                                 [ss] Station Stats\n\
                                 [tds] Trip Duration Stats\n\
                                 [us] User Stats\n\
                                 [rd] Display Raw Data\n\
                                 [r] Restart\n\n>";

pub const RESTART_QUESTION: &str = "\nWould you like to restart? [y] Yes [n] No\n>";

pub const RAW_DATA_INTRO: &str = "\nYou chose to view raw data.";

pub const RESUME_QUESTION: &str = "\nContinue from where you left off? [y] Yes [n] No\n>";

pub const MORE_QUESTION: &str = "Do you want to see more raw data? [y] Yes [n] No\n>";

pub const NO_MORE_DATA: &str = "\nNo more data to display.";

pub const LOADING: &str = "\nLoading data based on your selections...";

/// City prompt listing the configured cities.
pub fn city_question(cities: &[&str]) -> String {
    let options = cities
        .iter()
        .map(|c| title_case(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "\nWhich city(ies) would you like to analyze? Options: {}. \
         Use commas for multiple selections.\n>",
        options
    )
}

/// Confirmation prompt summarising the chosen filters.
pub fn confirm_question(selection: &FilterSelection) -> String {
    format!(
        "\nYou have selected the following filters:\n\
         City(ies): {}\nMonth(s): {}\nWeekday(s): {}\n\
         Confirm? [y] Yes [n] No\n\n>",
        selection.city_label(),
        selection.month_label(),
        selection.weekday_label()
    )
}

/// Line reporting how many trips were loaded and how long it took.
pub fn loaded_summary(trips: usize, seconds: &str) -> String {
    format!(
        "\nData loaded in {} seconds ({} trips match your filters).",
        seconds,
        bikeshare_core::formatting::format_count(trips)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{Month, Selector};
    use chrono::Weekday;

    #[test]
    fn test_city_question_lists_title_cased_cities() {
        let q = city_question(&["chicago", "new york city"]);
        assert!(q.contains("Options: Chicago, New York City."));
    }

    #[test]
    fn test_confirm_question_summarises_selection() {
        let selection = FilterSelection {
            cities: Selector::OneOf("washington".to_string()),
            months: Selector::ManyOf(vec![Month::January, Month::June]),
            weekdays: Selector::OneOf(Weekday::Sat),
        };
        let q = confirm_question(&selection);
        assert!(q.contains("City(ies): Washington\n"));
        assert!(q.contains("Month(s): January, June\n"));
        assert!(q.contains("Weekday(s): Saturday\n"));
    }

    #[test]
    fn test_loaded_summary() {
        assert_eq!(
            loaded_summary(1_234, "0.5000"),
            "\nData loaded in 0.5000 seconds (1,234 trips match your filters)."
        );
    }
}
