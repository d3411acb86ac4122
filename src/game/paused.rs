use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// The pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    selection: PauseOpt,
}

impl Paused {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Esc => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::M => return Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            _ => (),
        }
        None
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOpt {
    fn line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::MainMenu => ("Main Menu", "m"),
            PauseOpt::Quit => ("Quit", "q"),
        };
        let mut line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(label),
            Span::raw(" ("),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (Esc)  │
     * │   Restart (r)   │
     * │   Main Menu (m) │
     * │   Quit (q)      │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_shortcut_keys() {
        let mut paused = Paused::new();
        assert_eq!(
            paused.handle_event(Event::Key(KeyCode::Esc.into())),
            Some(PauseOpt::Resume)
        );
        assert_eq!(
            paused.handle_event(Event::Key(KeyCode::Char('r').into())),
            Some(PauseOpt::Restart)
        );
        assert_eq!(
            paused.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(PauseOpt::MainMenu)
        );
        assert_eq!(
            paused.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(PauseOpt::Quit)
        );
    }

    #[test]
    fn test_navigate_and_choose() {
        let mut paused = Paused::new();
        assert!(paused.handle_event(Event::Key(KeyCode::Down.into())).is_none());
        assert!(paused.handle_event(Event::Key(KeyCode::Down.into())).is_none());
        assert_eq!(
            paused.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(PauseOpt::MainMenu)
        );
        // arrows do not wrap; Tab does
        let mut paused = Paused::new();
        assert!(paused.handle_event(Event::Key(KeyCode::Up.into())).is_none());
        assert_eq!(paused.selection, PauseOpt::Resume);
        assert!(paused
            .handle_event(Event::Key(KeyCode::BackTab.into()))
            .is_none());
        assert_eq!(paused.selection, PauseOpt::Quit);
    }

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused::new().render(area, &mut buffer);
        let mut s = String::new();
        for y in area.rows() {
            for p in y.positions() {
                s.push_str(buffer[p].symbol());
            }
            s.push('\n');
        }
        assert!(s.contains(" PAUSED "), "{s}");
        assert!(s.contains("» Resume (Esc)"), "{s}");
        assert!(s.contains("  Quit (q)"), "{s}");
    }
}
