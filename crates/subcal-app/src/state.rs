// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DayCell, NavDirection, ViewKind, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_month: YearMonth,
    pub selected_detail_day: Option<DayCell>,
    pub view: ViewKind,
    pub navigation_direction: NavDirection,
    pub status_line: Option<String>,
}

impl ViewState {
    pub fn new(active_month: YearMonth) -> Self {
        Self {
            active_month,
            selected_detail_day: None,
            view: ViewKind::Grid,
            navigation_direction: NavDirection::None,
            status_line: None,
        }
    }

    pub fn for_today() -> Self {
        Self::new(YearMonth::current())
    }

    pub fn is_donut_view(&self) -> bool {
        self.view == ViewKind::Donut
    }

    pub fn is_selected(&self, cell: &DayCell) -> bool {
        self.selected_detail_day.as_ref() == Some(cell)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    ToggleView,
    PrevMonth,
    NextMonth,
    GoToMonth(YearMonth),
    SelectDay(DayCell),
    CloseDetail,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ViewChanged(ViewKind),
    MonthChanged {
        month: YearMonth,
        direction: NavDirection,
    },
    DetailOpened(DayCell),
    DetailClosed,
    StatusUpdated(String),
    StatusCleared,
}

impl ViewState {
    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        match command {
            ViewCommand::ToggleView => {
                self.view = self.view.toggled();
                let mut events = Vec::with_capacity(2);
                if self.selected_detail_day.take().is_some() {
                    events.push(ViewEvent::DetailClosed);
                }
                events.push(ViewEvent::ViewChanged(self.view));
                events
            }
            ViewCommand::PrevMonth => self.navigate(NavDirection::Prev),
            ViewCommand::NextMonth => self.navigate(NavDirection::Next),
            ViewCommand::GoToMonth(month) => {
                if month == self.active_month {
                    return Vec::new();
                }
                let direction = if month < self.active_month {
                    NavDirection::Prev
                } else {
                    NavDirection::Next
                };
                self.set_month(month, direction)
            }
            ViewCommand::SelectDay(cell) => self.toggle_selection(cell),
            ViewCommand::CloseDetail => {
                if self.selected_detail_day.take().is_some() {
                    vec![ViewEvent::DetailClosed]
                } else {
                    Vec::new()
                }
            }
            ViewCommand::SetStatus(message) => vec![self.set_status(message)],
            ViewCommand::ClearStatus => {
                self.status_line = None;
                vec![ViewEvent::StatusCleared]
            }
        }
    }

    fn navigate(&mut self, direction: NavDirection) -> Vec<ViewEvent> {
        if self.view != ViewKind::Grid {
            return Vec::new();
        }
        let target = match direction {
            NavDirection::Prev => self.active_month.prev(),
            NavDirection::Next => self.active_month.next(),
            NavDirection::None => None,
        };
        match target {
            Some(month) => self.set_month(month, direction),
            None => vec![self.set_status("no further months")],
        }
    }

    fn set_month(&mut self, month: YearMonth, direction: NavDirection) -> Vec<ViewEvent> {
        self.active_month = month;
        self.navigation_direction = direction;
        vec![ViewEvent::MonthChanged { month, direction }]
    }

    fn toggle_selection(&mut self, cell: DayCell) -> Vec<ViewEvent> {
        if self.view != ViewKind::Grid || !cell.has_subscriptions() {
            return Vec::new();
        }
        if self.is_selected(&cell) {
            self.selected_detail_day = None;
            return vec![ViewEvent::DetailClosed];
        }
        self.selected_detail_day = Some(cell.clone());
        vec![ViewEvent::DetailOpened(cell)]
    }

    fn set_status(&mut self, message: impl Into<String>) -> ViewEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        ViewEvent::StatusUpdated(message)
    }
}
