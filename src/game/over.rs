use crate::command::Command;
use crate::consts;
use crate::highscores::ScoreEntry;
use crate::util::{center_rect, Globals};
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The game-over pop-up.  If the final score makes the high-score table,
/// it first prompts for the player's name; afterwards it shows the table
/// and offers a new game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    score: u32,
    name: String,
    /// Whether we are still collecting the player's name
    entering: bool,
    /// One-based position of the player's entry in the table, once recorded
    rank: Option<usize>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum OverOutcome {
    NewGame,
    MainMenu,
    Quit,
}

impl GameOver {
    const WIDTH: u16 = 41;

    pub(super) fn new(score: u32, globals: &Globals) -> GameOver {
        GameOver {
            score,
            name: String::new(),
            entering: globals.scores.qualifies(score),
            rank: None,
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(
        &mut self,
        event: Event,
        globals: &mut Globals,
    ) -> Option<OverOutcome> {
        let key = event.as_key_press_event()?;
        if self.entering {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    // Quit without recording the score
                    return Some(OverOutcome::Quit);
                }
                KeyCode::Enter | KeyCode::Esc => self.commit(globals),
                KeyCode::Backspace => {
                    if let Some((i, _)) = self.name.grapheme_indices(true).next_back() {
                        self.name.truncate(i);
                    }
                }
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.push_char(c);
                }
                _ => (),
            }
            return None;
        }
        match Command::from_key_event(key)? {
            Command::Enter | Command::R => Some(OverOutcome::NewGame),
            Command::Esc | Command::M => Some(OverOutcome::MainMenu),
            Command::Q | Command::Quit => Some(OverOutcome::Quit),
            _ => None,
        }
    }

    /// Record the entered name in the high-score table and write the table
    /// out.  A write failure is not worth interrupting the game-over screen
    /// for, so it is discarded.
    fn commit(&mut self, globals: &mut Globals) {
        let name = match self.name.trim() {
            "" => consts::DEFAULT_PLAYER_NAME,
            s => s,
        };
        self.rank = Some(globals.scores.record(ScoreEntry::today(self.score, name)));
        let _ = globals.config.save_scores(&globals.scores);
        self.entering = false;
    }

    fn push_char(&mut self, c: char) {
        if c.general_category_group() == GeneralCategoryGroup::Other {
            return;
        }
        let width = self.name.width() + c.width().unwrap_or(0);
        if width <= usize::from(consts::NAME_WIDTH) {
            self.name.push(c);
        }
    }

    pub(super) fn render(&self, display: Rect, buf: &mut Buffer, globals: &Globals) {
        let mut lines = vec![
            Line::styled("GAME OVER", consts::GAME_OVER_STYLE).centered(),
            Line::default(),
            Line::from(format!("Final score: {score}", score = self.score)).centered(),
            Line::default(),
        ];
        if self.entering {
            lines.push(Line::from("New high score!  Enter your name:").centered());
            lines.push(
                Line::from_iter([
                    Span::raw("        > "),
                    Span::raw(self.name.clone()),
                    Span::raw("█"),
                ]),
            );
            lines.push(Line::default());
            lines.push(
                Line::from_iter([
                    Span::raw("("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(" to record)"),
                ])
                .centered(),
            );
        } else {
            for (i, entry) in globals.scores.iter().enumerate() {
                let style = if self.rank == Some(i + 1) {
                    consts::MENU_SELECTION_STYLE
                } else {
                    Style::new()
                };
                lines.push(Line::styled(
                    format!(
                        "{rank:>2}. {name:<nwidth$} {score:>6}  {date}",
                        rank = i + 1,
                        name = entry.name,
                        nwidth = usize::from(consts::NAME_WIDTH),
                        score = entry.score,
                        date = entry.date,
                    ),
                    style,
                ));
            }
            lines.push(Line::default());
            lines.push(
                Line::from_iter([
                    Span::raw("("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(") Play again  ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") Menu  ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(") Quit"),
                ])
                .centered(),
            );
        }
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let popup = center_rect(
            display,
            Size {
                width: Self::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(popup);
        Clear.render(popup, buf);
        block.render(popup, buf);
        for (line, row) in lines.iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn test_globals() -> Globals {
        let mut globals = Globals::default();
        // keep the tests off the real filesystem
        globals.config = toml::from_str::<Config>("[files]\nsave-scores = false\n").unwrap();
        globals
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn test_qualifying_score_prompts_for_name() {
        let mut globals = test_globals();
        let mut over = GameOver::new(90, &globals);
        assert!(over.entering);
        for c in "Glim".chars() {
            assert!(over.handle_event(key(KeyCode::Char(c)), &mut globals).is_none());
        }
        assert!(over.handle_event(key(KeyCode::Enter), &mut globals).is_none());
        assert!(!over.entering);
        assert_eq!(over.rank, Some(2));
        let top = globals.scores.iter().nth(1).unwrap();
        assert_eq!(top.name, "Glim");
        assert_eq!(top.score, 90);
    }

    #[test]
    fn test_blank_name_gets_a_default() {
        let mut globals = test_globals();
        let mut over = GameOver::new(120, &globals);
        assert!(over.handle_event(key(KeyCode::Char(' ')), &mut globals).is_none());
        assert!(over.handle_event(key(KeyCode::Esc), &mut globals).is_none());
        assert_eq!(over.rank, Some(1));
        assert_eq!(
            globals.scores.iter().next().unwrap().name,
            consts::DEFAULT_PLAYER_NAME
        );
    }

    #[test]
    fn test_backspace_and_length_cap() {
        let mut globals = test_globals();
        let mut over = GameOver::new(90, &globals);
        for c in "Overenthusiastic".chars() {
            assert!(over.handle_event(key(KeyCode::Char(c)), &mut globals).is_none());
        }
        assert_eq!(over.name, "Overenthusia");
        assert!(over
            .handle_event(key(KeyCode::Backspace), &mut globals)
            .is_none());
        assert_eq!(over.name, "Overenthusi");
    }

    #[test]
    fn test_nonqualifying_score_skips_the_prompt() {
        let mut globals = test_globals();
        for i in 0..7 {
            globals
                .scores
                .record(ScoreEntry::today(500 + i, "Filler"));
        }
        let mut over = GameOver::new(10, &globals);
        assert!(!over.entering);
        assert_eq!(
            over.handle_event(key(KeyCode::Enter), &mut globals),
            Some(OverOutcome::NewGame)
        );
        assert_eq!(
            over.handle_event(key(KeyCode::Char('m')), &mut globals),
            Some(OverOutcome::MainMenu)
        );
        assert_eq!(
            over.handle_event(key(KeyCode::Char('q')), &mut globals),
            Some(OverOutcome::Quit)
        );
        assert_eq!(over.rank, None);
    }

    #[test]
    fn test_render_table_after_entry() {
        let mut globals = test_globals();
        let mut over = GameOver::new(90, &globals);
        assert!(over.handle_event(key(KeyCode::Char('A')), &mut globals).is_none());
        assert!(over.handle_event(key(KeyCode::Enter), &mut globals).is_none());
        let area = Rect::new(0, 0, 80, 36);
        let mut buffer = Buffer::empty(area);
        over.render(area, &mut buffer, &globals);
        let mut s = String::new();
        for y in area.rows() {
            for p in y.positions() {
                s.push_str(buffer[p].symbol());
            }
            s.push('\n');
        }
        assert!(s.contains("GAME OVER"), "{s}");
        assert!(s.contains("Final score: 90"), "{s}");
        assert!(s.contains(" 2. A"), "{s}");
        assert!(s.contains("Play again"), "{s}");
    }
}
