use crate::command::Command;
use crate::game::Game;
use crate::menu::MainMenu;
use crate::util::Globals;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::read;
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::io;

/// Top-level driver: owns the current screen and any startup warnings
/// still waiting to be acknowledged.
#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
    /// Startup problems shown one at a time over the main menu
    warnings: VecDeque<Warning>,
}

impl App {
    pub(crate) fn new(globals: Globals, warnings: Vec<Warning>) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
            warnings: warnings.into(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| {
                    menu.draw(frame);
                    if let Some(warning) = self.warnings.front() {
                        frame.render_widget(warning, frame.area());
                    }
                })?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| {
                    game.draw(frame);
                    if let Some(warning) = self.warnings.front() {
                        frame.render_widget(warning, frame.area());
                    }
                })?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        // A pending warning modals away all other input handling.
        if self.warnings.front().is_some() {
            let event = read()?;
            if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
                self.handle_warning_command(cmd);
            }
            return Ok(());
        }
        match self.screen {
            Screen::Main(ref mut menu) => {
                if let Some(screen) = menu.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn handle_warning_command(&mut self, cmd: Command) {
        let Some(warning) = self.warnings.front_mut() else {
            return;
        };
        match warning.handle_command(cmd) {
            Some(WarningOutcome::Dismissed) => {
                let _ = self.warnings.pop_front();
            }
            Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
            None => (),
        }
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screens a session can be on, plus the terminal quit state.
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Quit,
}
