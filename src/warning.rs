use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

/// A modal pop-up reporting a non-fatal startup problem, e.g. an
/// unreadable configuration file.  The error's source chain is shown as
/// a "Caused by:" list; overlong reports get a scrollbar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Handle a decoded key press.  Returns `Some` when the pop-up is
    /// done.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc, _) => return Some(WarningOutcome::Dismissed),
            (Command::Quit, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn from_error_messages(msgs: Vec<String>) -> Warning {
        let Some((first, causes)) = msgs.split_first() else {
            return Warning {
                lines: vec![String::from("You should never see this.")],
                scroll_offset: 0,
                max_scroll: 0,
            };
        };
        let mut lines = Vec::new();
        let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH)).break_words(true);
        lines.extend(
            textwrap::wrap(first.as_str(), opts)
                .into_iter()
                .map(Cow::into_owned),
        );
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            if causes.len() > 1 {
                for (i, m) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                        .break_words(true)
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    lines.extend(textwrap::wrap(m, opts).into_iter().map(Cow::into_owned));
                }
            } else {
                let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(
                    textwrap::wrap(causes[0].as_str(), opts)
                        .into_iter()
                        .map(Cow::into_owned),
                );
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES) - 1);
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(
                self.lines
                    .iter()
                    .skip(self.scroll_offset)
                    .take(usize::from(Warning::MAX_LINES))
                    .map(String::as_str),
            )
            .render(text_area, buf);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM));
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            scrollbar.render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        }

        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
