use crate::consts;
use crate::highscores::HighScores;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const WYRM_WIDTH: u16 = 34;
    const HOLE_WIDTH: u16 = 28;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::WYRM_WIDTH + Self::HOLE_WIDTH;

    #[rustfmt::skip]
    const WYRM: [&'static str; Self::TEXT_HEIGHT as usize] = [
         "__        ____   __ ____   __  __ ",
        r"\ \      / /\ \ / /|  _ \ |  \/  |",
        r" \ \ /\ / /  \ V / | |_) || |\/| |",
        r"  \ V  V /    | |  |  _ < | |  | |",
        r"   \_/\_/     |_|  |_| \_\|_|  |_|",
    ];

    #[rustfmt::skip]
    const HOLE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " _   _   ___   _      _____ ",
        r"| | | | / _ \ | |    | ____|",
         "| |_| || | | || |    |  _|  ",
         "|  _  || |_| || |___ | |___ ",
        r"|_| |_| \___/ |_____||_____|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [wyrm_area, hole_area] = Layout::horizontal([Self::WYRM_WIDTH, Self::HOLE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::WYRM)
            .style(consts::WYRM_STYLE)
            .render(wyrm_area, buf);
        Text::from_iter(Self::HOLE)
            .style(consts::SNAKE_STYLE)
            .render(hole_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for p in body_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_BODY_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in head_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_HEAD_EAST_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in food_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::FOOD_SYMBOL);
                cell.set_style(consts::FOOD_STYLES[0]);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the wyrm with:"),
            Line::from_iter([
                Span::raw("       "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("h", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("j", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("k", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("l", consts::KEY_STYLE),
            ]),
            Line::from("Eat food (● ◆), seek"),
            Line::from("the wizard's elixir!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

/// Pop-up listing the high-score table, opened from the main menu.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct ScoresPopup<'a> {
    scores: &'a HighScores,
}

impl<'a> ScoresPopup<'a> {
    const WIDTH: u16 = 41;

    pub(super) fn new(scores: &'a HighScores) -> ScoresPopup<'a> {
        ScoresPopup { scores }
    }
}

impl Widget for ScoresPopup<'_> {
    // `area` is the whole display; the pop-up centers itself.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = u16::try_from(self.scores.len().max(1)).unwrap_or(u16::MAX);
        let popup = center_rect(
            area,
            Size {
                width: Self::WIDTH,
                height: rows.saturating_add(4),
            },
        );
        let block = Block::bordered()
            .title(" HIGH SCORES ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup);
        Clear.render(popup, buf);
        block.render(popup, buf);
        let [table_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .flex(Flex::Start)
                .spacing(1)
                .areas(inner);
        if self.scores.is_empty() {
            Line::from("No scores yet.").render(table_area, buf);
        } else {
            let entries = self.scores.iter().enumerate().map(|(i, entry)| {
                format!(
                    "{rank:>2}. {name:<nwidth$} {score:>6}  {date}",
                    rank = i + 1,
                    name = entry.name,
                    nwidth = usize::from(consts::NAME_WIDTH),
                    score = entry.score,
                    date = entry.date,
                )
            });
            Text::from_iter(entries.map(Line::from)).render(table_area, buf);
        }
        Line::from_iter([
            Span::raw("("),
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(" to close)"),
        ])
        .centered()
        .render(hint_area, buf);
    }
}
