//! Interactive session state machine.
//!
//! ```text
//! SelectingFilters ──confirm──▶ Loaded ──▶ Dispatching ──restart? y──▶ SelectingFilters
//!        ▲                        │                      └──restart? n──▶ Exit
//!        └──────load failed───────┘
//! ```
//!
//! The working dataset and the raw-data cursor live in [`WorkingSet`], which
//! is created on every successful load and dropped on restart.

use std::io::{BufRead, Write};
use std::time::Instant;

use bikeshare_core::error::{ExplorerError, Result};
use bikeshare_core::formatting::format_elapsed;
use bikeshare_core::models::{
    weekday_from_name, FilterSelection, Month, TripTable, MONTH_NAMES, WEEKDAY_NAMES,
};
use bikeshare_data::filter::apply_filters;
use bikeshare_data::paginator::{self, Page};
use bikeshare_data::reader::RecordStore;
use bikeshare_data::statistics::{
    duration_stats, station_stats, time_stats, timed, user_stats,
};
use bikeshare_ui::messages::{self, city_question, confirm_question, loaded_summary};
use bikeshare_ui::raw_table::render_rows;
use bikeshare_ui::report::{
    render_duration_stats, render_station_stats, render_time_stats, render_user_stats, SEPARATOR,
};
use bikeshare_ui::screen::Screen;
use tracing::{debug, info, warn};

use crate::prompt::Prompter;

// ── Menu ──────────────────────────────────────────────────────────────────────

/// Actions offered once a dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TimeStats,
    StationStats,
    DurationStats,
    UserStats,
    RawData,
    Restart,
}

impl MenuAction {
    /// Menu codes in display order.
    pub const CODES: [&'static str; 6] = ["ts", "ss", "tds", "us", "rd", "r"];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ts" => Some(MenuAction::TimeStats),
            "ss" => Some(MenuAction::StationStats),
            "tds" => Some(MenuAction::DurationStats),
            "us" => Some(MenuAction::UserStats),
            "rd" => Some(MenuAction::RawData),
            "r" => Some(MenuAction::Restart),
            _ => None,
        }
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// The filtered trips of one load cycle and the raw-data cursor into them.
#[derive(Debug)]
pub struct WorkingSet {
    pub selection: FilterSelection,
    pub table: TripTable,
    pub cursor: usize,
}

enum State {
    SelectingFilters,
    Loaded(FilterSelection),
    Dispatching(WorkingSet),
    Exit,
}

/// Load the selected cities and apply the month and weekday filters.
pub fn load_filtered(store: &RecordStore, selection: &FilterSelection) -> Result<TripTable> {
    let table = store.load_many(&selection.cities)?;
    Ok(apply_filters(&table, &selection.months, &selection.weekdays))
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Drives prompting, loading and dispatch until the user leaves.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    store: RecordStore,
    screen: Screen,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, store: RecordStore, screen: Screen) -> Self {
        Self {
            prompter,
            store,
            screen,
        }
    }

    /// Run until the user declines to restart.
    ///
    /// Returns [`ExplorerError::Cancelled`] when the escape sentinel is
    /// entered and [`ExplorerError::InputClosed`] when input runs out.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::SelectingFilters;
        loop {
            state = match state {
                State::SelectingFilters => State::Loaded(self.select_filters()?),
                State::Loaded(selection) => match self.load(selection)? {
                    Some(working) => State::Dispatching(working),
                    None => State::SelectingFilters,
                },
                State::Dispatching(mut working) => {
                    self.dispatch(&mut working)?;
                    if self.prompter.confirm(messages::RESTART_QUESTION)? {
                        info!("restarting session");
                        State::SelectingFilters
                    } else {
                        State::Exit
                    }
                }
                State::Exit => return Ok(()),
            };
        }
    }

    // ── SelectingFilters ──────────────────────────────────────────────────

    fn select_filters(&mut self) -> Result<FilterSelection> {
        self.prompter.say(messages::WELCOME)?;
        loop {
            let city_names = self.store.catalog().names();
            let cities = self
                .prompter
                .select(&city_question(&city_names), &city_names)?;

            let months = self
                .prompter
                .select(messages::MONTH_QUESTION, &MONTH_NAMES)?
                .try_map(|name| {
                    Month::from_name(name).ok_or_else(|| ExplorerError::InvalidChoice(name.clone()))
                })?;

            let weekdays = self
                .prompter
                .select(messages::WEEKDAY_QUESTION, &WEEKDAY_NAMES)?
                .try_map(|name| {
                    weekday_from_name(name).ok_or_else(|| ExplorerError::InvalidChoice(name.clone()))
                })?;

            let selection = FilterSelection {
                cities,
                months,
                weekdays,
            };

            if self.prompter.confirm(&confirm_question(&selection))? {
                debug!(?selection, "filters confirmed");
                self.prompter.say(SEPARATOR)?;
                return Ok(selection);
            }
            self.prompter.say(messages::RETRY_FILTERS)?;
        }
    }

    // ── Loaded ────────────────────────────────────────────────────────────

    /// Build the working set, or report the failure and return `None`.
    fn load(&mut self, selection: FilterSelection) -> Result<Option<WorkingSet>> {
        self.screen.clear(self.prompter.output())?;
        self.prompter.say(messages::LOADING)?;

        let start = Instant::now();
        let table = match load_filtered(&self.store, &selection) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "failed to load trip data");
                self.prompter.say(&format!("\nUnable to load data: {}", e))?;
                self.prompter.say(SEPARATOR)?;
                return Ok(None);
            }
        };

        self.prompter
            .say(&loaded_summary(table.len(), &format_elapsed(start.elapsed())))?;
        self.prompter.say(SEPARATOR)?;

        Ok(Some(WorkingSet {
            selection,
            table,
            cursor: 0,
        }))
    }

    // ── Dispatching ───────────────────────────────────────────────────────

    /// Serve menu choices until the user picks restart.
    fn dispatch(&mut self, working: &mut WorkingSet) -> Result<()> {
        loop {
            let choice = self
                .prompter
                .choose(messages::MENU_QUESTION, &MenuAction::CODES)?;
            self.screen.clear(self.prompter.output())?;

            // A multi-value answer names no action; show the menu again.
            let Some(code) = choice else {
                debug!("multi-value menu answer, prompting again");
                continue;
            };
            let action = MenuAction::from_code(&code)
                .ok_or_else(|| ExplorerError::InvalidChoice(code.clone()))?;
            debug!(?action, "menu action selected");

            let text = match action {
                MenuAction::TimeStats => render_time_stats(&timed(|| time_stats(&working.table))),
                MenuAction::StationStats => {
                    render_station_stats(&timed(|| station_stats(&working.table)))
                }
                MenuAction::DurationStats => {
                    render_duration_stats(&timed(|| duration_stats(&working.table)))
                }
                MenuAction::UserStats => {
                    let city = working.selection.city_label();
                    render_user_stats(&timed(|| user_stats(&working.table, &city)))
                }
                MenuAction::RawData => {
                    self.browse_raw(working)?;
                    continue;
                }
                MenuAction::Restart => return Ok(()),
            };
            write!(self.prompter.output(), "{}", text)?;
        }
    }

    /// Page through raw rows, resuming from the saved cursor when asked.
    fn browse_raw(&mut self, working: &mut WorkingSet) -> Result<()> {
        self.prompter.say(messages::RAW_DATA_INTRO)?;

        // Only a plain `n` starts over; any other answer resumes.
        if working.cursor > 0 && self.prompter.yes_no(messages::RESUME_QUESTION)? == Some(false) {
            working.cursor = 0;
        }

        loop {
            match paginator::view(working.table.records(), working.cursor) {
                Page::NoMoreData => {
                    self.prompter.say(messages::NO_MORE_DATA)?;
                    return Ok(());
                }
                Page::Rows { rows, next_cursor } => {
                    let text = render_rows(&working.table, rows);
                    write!(self.prompter.output(), "{}", text)?;
                    working.cursor = next_cursor;
                }
            }

            if !paginator::has_more(working.table.records(), working.cursor) {
                self.prompter.say(messages::NO_MORE_DATA)?;
                return Ok(());
            }
            if self.prompter.yes_no(messages::MORE_QUESTION)? == Some(false) {
                return Ok(());
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
