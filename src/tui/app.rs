//! Inspector application state and logic.

use crate::trace::TraceEntry;

/// Inspector application state.
pub struct InspectorApp {
    /// Decode result for every program word.
    pub entries: Vec<TraceEntry>,
    /// Index of the selected entry.
    pub selected: usize,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
}

impl InspectorApp {
    /// Decode a program and select its first word.
    pub fn new(words: &[u32]) -> Self {
        let entries: Vec<_> = words
            .iter()
            .enumerate()
            .map(|(i, w)| TraceEntry::new(i, *w))
            .collect();
        let faults = entries.iter().filter(|e| e.is_fault()).count();

        Self {
            entries,
            selected: 0,
            should_quit: false,
            status: format!(
                "{} words, {} unsupported. ↑↓ select, q quit.",
                words.len(),
                faults
            ),
        }
    }

    /// Currently selected entry, if the program is non-empty.
    pub fn current(&self) -> Option<&TraceEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Jump to the next unsupported word after the selection, wrapping.
    pub fn select_next_fault(&mut self) {
        let n = self.entries.len();
        let found = (1..=n)
            .map(|step| (self.selected + step) % n.max(1))
            .find(|&i| self.entries[i].is_fault());

        match found {
            Some(i) => {
                self.selected = i;
                self.status = format!("Fault at {:#06x}", self.entries[i].address);
            }
            None => self.status = "No unsupported instructions.".into(),
        }
    }

    /// Window of entries to show for a list of `rows` lines.
    ///
    /// Keeps the selection visible. Returns the first index shown.
    pub fn scroll_offset(&self, rows: usize) -> usize {
        if rows == 0 || self.selected < rows / 2 {
            return 0;
        }
        let max_start = self.entries.len().saturating_sub(rows);
        (self.selected - rows / 2).min(max_start)
    }
}

/// Run the inspector over a program.
pub fn run_inspector(words: &[u32]) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = InspectorApp::new(words);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
                        KeyCode::Char('G') | KeyCode::End => app.select_last(),
                        KeyCode::Char('f') => app.select_next_fault(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
