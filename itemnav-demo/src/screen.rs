//! Raw-mode terminal drawing for the demo.

use std::io::{self, Stdout, Write};
use std::sync::Arc;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use itemnav::{Item, NavigableSelection};

use crate::item::DemoItem;

/// Rows used above the listbox: tab bar, blank line, help line, blank line.
const HEADER_ROWS: u16 = 4;

pub struct Screen {
    stdout: Stdout,
    /// First listbox row on screen.
    scroll: usize,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout, scroll: 0 })
    }

    /// How many listbox rows fit on screen.
    pub fn list_rows(&self) -> usize {
        let height = terminal::size().map(|(_, height)| height).unwrap_or(24);
        usize::from(height.saturating_sub(HEADER_ROWS).max(1))
    }

    pub fn draw(
        &mut self,
        tabs: &NavigableSelection<DemoItem>,
        list: &NavigableSelection<DemoItem>,
        tabs_focused: bool,
    ) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.draw_tabs(tabs, tabs_focused)?;

        queue!(
            self.stdout,
            cursor::MoveTo(0, 2),
            Print("Tab: switch  Space/Enter: select  Ctrl+A: all  Esc: quit")
        )?;

        let rows = self.list_rows();
        let items = list.items();
        if let Some(active) = list.tracker().active_index() {
            if active < self.scroll {
                self.scroll = active;
            } else if active >= self.scroll + rows {
                self.scroll = active + 1 - rows;
            }
        }

        let active = list.active_item();
        for (row, item) in items.iter().enumerate().skip(self.scroll).take(rows) {
            let is_active = !tabs_focused
                && active
                    .as_ref()
                    .is_some_and(|active| Arc::ptr_eq(active, item));
            let line = format!(
                "{} {} {}{}",
                if item.is_tab_stop() { '*' } else { ' ' },
                if item.is_selected() { "[x]" } else { "[ ]" },
                item.label(),
                if item.is_disabled() { " (disabled)" } else { "" },
            );
            let y = HEADER_ROWS + u16::try_from(row - self.scroll).unwrap_or(u16::MAX);
            queue!(self.stdout, cursor::MoveTo(0, y))?;
            self.print_line(&line, is_active)?;
        }

        self.stdout.flush()
    }

    fn draw_tabs(&mut self, tabs: &NavigableSelection<DemoItem>, focused: bool) -> io::Result<()> {
        let active = tabs.active_item();
        for item in tabs.items() {
            let is_active = focused
                && active
                    .as_ref()
                    .is_some_and(|active| Arc::ptr_eq(active, &item));
            let label = if item.is_selected() {
                format!("[{}]", item.label())
            } else if item.is_disabled() {
                format!(" ({}) ", item.label())
            } else {
                format!(" {} ", item.label())
            };
            self.print_line(&label, is_active)?;
            queue!(self.stdout, Print("  "))?;
        }
        Ok(())
    }

    fn print_line(&mut self, text: &str, highlighted: bool) -> io::Result<()> {
        if highlighted {
            queue!(
                self.stdout,
                SetAttribute(Attribute::Reverse),
                Print(text),
                SetAttribute(Attribute::Reset)
            )
        } else {
            queue!(self.stdout, Print(text))
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
