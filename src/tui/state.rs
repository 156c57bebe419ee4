use crate::calendar::{
    MonthView, Summary, WeekView, next_month, next_week, prev_month, prev_week, select_day,
};
use crate::color_utils::ColorMode;
use crate::config::ViewMode;
use crate::model::CalendarItem;
use chrono::{Days, NaiveDate};
use ratatui::widgets::ListState;

pub struct AppState {
    pub items: Vec<CalendarItem>,
    pub focus: NaiveDate,
    pub today: NaiveDate,
    pub view: ViewMode,
    pub color_mode: ColorMode,
    pub list_state: ListState,
    pub message: String,
    pub loading: bool,
}

impl AppState {
    pub fn new(today: NaiveDate, view: ViewMode, color_mode: ColorMode) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        Self {
            items: vec![],
            focus: today,
            today,
            view,
            color_mode,
            list_state: l_state,
            message: "Tab: View | n/p: Period | t: Today | q: Quit".to_string(),
            loading: true,
        }
    }

    pub fn set_items(&mut self, items: Vec<CalendarItem>) {
        self.items = items;
        self.loading = false;
        self.clamp_selection();
    }

    pub fn month_view(&self) -> MonthView {
        MonthView::containing(&self.items, self.focus)
    }

    pub fn week_view(&self) -> WeekView {
        WeekView::build(&self.items, self.focus)
    }

    /// Items on the focused date, in schedule order.
    pub fn day_items(&self) -> Vec<CalendarItem> {
        let mut items = select_day(&self.items, self.focus);
        items.sort_by(CalendarItem::chronological);
        items
    }

    pub fn selected_item(&self) -> Option<CalendarItem> {
        let idx = self.list_state.selected()?;
        self.day_items().into_iter().nth(idx)
    }

    /// Counts for whatever period the active view shows.
    pub fn period_summary(&self) -> Summary {
        match self.view {
            ViewMode::Month => {
                let view = self.month_view();
                Summary::of(view.days.values().flatten())
            }
            ViewMode::Week => Summary::of(self.week_view().items()),
            ViewMode::Day => Summary::of(&self.day_items()),
        }
    }

    pub fn move_days(&mut self, delta: i64) {
        let step = Days::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.focus.checked_add_days(step)
        } else {
            self.focus.checked_sub_days(step)
        };
        if let Some(d) = moved {
            self.set_focus(d);
        }
    }

    pub fn next_period(&mut self) {
        let d = match self.view {
            ViewMode::Month => next_month(self.focus),
            ViewMode::Week => next_week(self.focus),
            ViewMode::Day => self.focus.succ_opt().unwrap_or(self.focus),
        };
        self.set_focus(d);
    }

    pub fn prev_period(&mut self) {
        let d = match self.view {
            ViewMode::Month => prev_month(self.focus),
            ViewMode::Week => prev_week(self.focus),
            ViewMode::Day => self.focus.pred_opt().unwrap_or(self.focus),
        };
        self.set_focus(d);
    }

    pub fn go_today(&mut self) {
        self.set_focus(self.today);
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn next(&mut self) {
        let len = self.day_items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.day_items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn set_focus(&mut self, date: NaiveDate) {
        self.focus = date;
        self.list_state.select(Some(0));
    }

    fn clamp_selection(&mut self) {
        let len = self.day_items().len();
        let sel = self.list_state.selected().unwrap_or(0);
        if len == 0 {
            self.list_state.select(Some(0));
        } else if sel >= len {
            self.list_state.select(Some(len - 1));
        }
    }
}
