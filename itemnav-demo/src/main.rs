//! Terminal demo: a tab bar above a multi-select listbox.
//!
//! Tab moves between the two widgets, arrows/Home/End/PageUp/PageDown and
//! typing move the active item, Space/Enter select, Ctrl+A selects all.
//! Esc or Ctrl+C quits. An optional argument names a JSON file with the
//! listbox navigation config.

mod item;
mod screen;

use std::fs::{self, File};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use itemnav::{EventResult, Item, Key, KeyCombo, NavConfig, NavigableSelection, SelectionMode};
use simplelog::{Config, LevelFilter, WriteLogger};

use item::DemoItem;
use screen::Screen;

const FRUIT: &[&str] = &[
    "Apple",
    "Apricot",
    "Banana",
    "Blackberry",
    "Blueberry",
    "Cherry",
    "Coconut",
    "Date",
    "Elderberry",
    "Fig",
    "Grape",
    "Guava",
    "Kiwi",
    "Lemon",
    "Lime",
    "Mango",
    "Nectarine",
    "Orange",
    "Papaya",
    "Peach",
];

const SECTIONS: &[&str] = &["Fruit", "Vegetables", "Grains", "Archive"];

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Tabs,
    List,
}

struct Demo {
    tabs: NavigableSelection<DemoItem>,
    list: NavigableSelection<DemoItem>,
    focus: Focus,
}

impl Demo {
    fn new(list_config: NavConfig) -> Self {
        let tabs = NavigableSelection::tabs();
        let sections: Vec<Arc<DemoItem>> =
            SECTIONS.iter().map(|name| DemoItem::new(name)).collect();
        if let Some(archive) = sections.last() {
            archive.set_disabled(true);
        }
        if let Some(first) = sections.first() {
            first.set_selected(true);
        }
        tabs.set_items(sections);

        let list = NavigableSelection::new(list_config, SelectionMode::Multiple);
        let fruit: Vec<Arc<DemoItem>> = FRUIT.iter().map(|name| DemoItem::new(name)).collect();
        for (index, item) in fruit.iter().enumerate() {
            if index % 7 == 3 {
                item.set_disabled(true);
            }
        }
        list.set_items(fruit);
        list.tracker().on_active_item_change(|| {
            log::trace!("[demo] listbox active item changed");
        });
        list.selection().on_selected_items_change(|| {
            log::trace!("[demo] listbox selection changed");
        });

        Self {
            tabs,
            list,
            focus: Focus::List,
        }
    }

    fn focused(&self) -> &NavigableSelection<DemoItem> {
        match self.focus {
            Focus::Tabs => &self.tabs,
            Focus::List => &self.list,
        }
    }

    fn handle_key(&mut self, combo: KeyCombo) -> EventResult {
        let result = self.focused().on_key_down(&combo);
        if result.is_consumed() {
            return result;
        }
        if matches!(combo.key, Key::Tab | Key::BackTab) {
            self.focus = match self.focus {
                Focus::Tabs => Focus::List,
                Focus::List => Focus::Tabs,
            };
            if let Some(stop) = self.focused().tab_stop() {
                stop.focus();
            }
            log::debug!("[demo] focus -> {:?}", self.focus);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }
}

fn load_config(path: Option<String>) -> io::Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::listbox());
    };
    let json = fs::read_to_string(&path)?;
    NavConfig::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn run(demo: &mut Demo) -> io::Result<()> {
    let mut screen = Screen::new()?;
    let viewport = screen.list_rows();
    demo.list.tracker().set_viewport_size(viewport);

    loop {
        screen.draw(&demo.tabs, &demo.list, demo.focus == Focus::Tabs)?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let quit = key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit {
            return Ok(());
        }

        let result = demo.handle_key(KeyCombo::from(key));
        log::trace!("[demo] {:?} -> {:?}", key.code, result);
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("itemnav-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).map_err(io::Error::other)?;

    let config = load_config(std::env::args().nth(1))?;
    log::info!("[demo] listbox config: {:?}", config);

    let mut demo = Demo::new(config);
    if let Err(e) = run(&mut demo) {
        eprintln!("Error: {}", e);
        return Err(e);
    }

    let chosen: Vec<String> = demo
        .list
        .selected_items()
        .iter()
        .map(|item| item.label())
        .collect();
    println!("Selected: {}", chosen.join(", "));
    Ok(())
}
