mod widgets;
use self::widgets::{Instructions, Logo, ScoresPopup};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::fx::{FxEvent, FxSink, Gated, SilentFx};
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The title screen: logo, instructions, the Play/High Scores/Quit
/// buttons, and the options panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu<F = SilentFx> {
    selection: Selection,
    options: OptionsMenu,
    scores_open: bool,
    globals: Globals,
    fx: Gated<F>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> MainMenu {
        MainMenu::with_fx(globals, SilentFx)
    }
}

impl<F: FxSink> MainMenu<F> {
    fn with_fx(globals: Globals, sink: F) -> MainMenu<F> {
        let sound = globals.options.sound;
        MainMenu {
            selection: Selection::default(),
            options: OptionsMenu::new(globals.options),
            scores_open: false,
            globals,
            fx: Gated::new(sink, sound),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if self.scores_open {
            match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Esc | Command::Enter | Command::S | Command::Q => {
                    self.scores_open = false;
                }
                _ => (),
            }
            return None;
        }
        match (self.selection, cmd) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => {
                self.fx.play(FxEvent::MenuSelect);
                return Some(Screen::Game(self.play()));
            }
            (Selection::PlayButton, Command::Prev) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::ScoresButton, None);
            }
            (Selection::ScoresButton, Command::Enter) | (_, Command::S) => {
                self.fx.play(FxEvent::MenuSelect);
                self.scores_open = true;
            }
            (Selection::ScoresButton, Command::Up | Command::Prev) => {
                self.select(Selection::PlayButton, None);
            }
            (Selection::ScoresButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(true));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                } else {
                    self.fx.play(FxEvent::MenuChange);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                } else {
                    self.fx.play(FxEvent::MenuChange);
                }
            }
            (Selection::Options, Command::Left) => {
                self.options.move_left();
                self.after_edit();
            }
            (Selection::Options, Command::Right) => {
                self.options.move_right();
                self.after_edit();
            }
            (Selection::Options, Command::Space | Command::Enter) => {
                self.options.toggle();
                self.after_edit();
            }
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Next) => self.select(Selection::PlayButton, None),
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Options, Some(false));
            }
            _ => (),
        }
        None
    }

    fn play(&self) -> Game {
        let mut globals = self.globals.clone();
        globals.options = self.options.to_options();
        Game::new(globals)
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        if self.selection != selection {
            self.fx.play(FxEvent::MenuChange);
        }
        self.selection = selection;
        if selection == Selection::Options {
            if let Some(first) = first_option {
                self.options.selection = if first {
                    Some(OptKey::min())
                } else {
                    Some(OptKey::max())
                };
            }
        } else {
            self.options.selection = None;
        }
    }

    /// An option value just changed; the sound gate may be stale.
    fn after_edit(&mut self) {
        self.fx.set_enabled(self.options.to_options().sound);
        self.fx.play(FxEvent::MenuChange);
    }
}

impl<F> Widget for &MainMenu<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, scores_area, options_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                1,
                OptionsMenu::HEIGHT,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        render_button(
            "Play",
            'p',
            self.selection == Selection::PlayButton,
            play_area,
            buf,
        );
        render_button(
            "High Scores",
            's',
            self.selection == Selection::ScoresButton,
            scores_area,
            buf,
        );

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        render_button(
            "Quit",
            'q',
            self.selection == Selection::QuitButton,
            quit_area,
            buf,
        );

        if self.scores_open {
            ScoresPopup::new(&self.globals.scores).render(display, buf);
        }
    }
}

fn render_button(label: &str, key: char, selected: bool, area: Rect, buf: &mut Buffer) {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key.to_string(), consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
    .render(area, buf);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    ScoresButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// If the currently-selected main menu item is an element of this menu,
    /// then `selection` is `Some(key)`, where `key` is the key of the selected
    /// item within the `OptionsMenu`.
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> OptionsMenu {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::ScoresButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].decrease();
        }
    }

    fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].increase();
        }
    }

    fn toggle(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].toggle();
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
