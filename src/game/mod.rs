mod direction;
mod food;
mod grid;
mod over;
mod particles;
mod paused;
mod powerup;
mod snake;
mod wizard;
use self::direction::Direction;
use self::food::{Food, FoodEffect, FoodKind};
use self::grid::Grid;
use self::over::{GameOver, OverOutcome};
use self::paused::{PauseOpt, Paused};
use self::powerup::{Banner, PowerUps};
use self::snake::Snake;
use self::wizard::Wizard;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::fx::{FxEvent, FxSink, Gated, SilentFx};
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::collections::HashSet;
use std::f32::consts::TAU;
use std::time::Instant;

/// One play session on the toroidal playfield.
///
/// The session loop runs at [`consts::FRAME_PERIOD`] so cosmetics stay
/// smooth; the snake itself moves on its own rate gate.  Every tick
/// takes the current `Instant` as a parameter, so tests can drive the
/// clock by hand.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng, F = SilentFx> {
    rng: R,
    fx: Gated<F>,
    globals: Globals,
    grid: Grid,
    score: u32,
    snake: Snake,
    food: Food,
    wizard: Wizard,
    powerups: PowerUps,
    /// Whether food and elixir placement must also avoid each other
    distinct_pickups: bool,
    state: GameState,
    /// When the last tick ran; animation deltas are measured from here.
    last_frame: Instant,
    next_frame: Option<Instant>,
}

impl Game {
    pub(crate) fn new(globals: Globals) -> Game {
        Game::with_parts(globals, rand::rng(), SilentFx, Instant::now())
    }
}

impl<R: Rng, F: FxSink> Game<R, F> {
    fn with_parts(globals: Globals, mut rng: R, sink: F, now: Instant) -> Game<R, F> {
        let grid = Grid::from(consts::GRID_SIZE);
        let tuning = globals.options.difficulty.tuning();
        let snake = Snake::new(grid, tuning, now);
        let occupied = snake.cells().collect::<HashSet<_>>();
        let food = Food::new(&mut rng, grid, tuning.special_food_chance, &occupied);
        let sound = globals.options.sound;
        Game {
            rng,
            fx: Gated::new(sink, sound),
            distinct_pickups: globals.config.game.distinct_pickups,
            globals,
            grid,
            score: 0,
            snake,
            food,
            wizard: Wizard::new(tuning.wizard_chance, now),
            powerups: PowerUps::new(),
            state: GameState::Running,
            last_frame: now,
            next_frame: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            if self.next_frame.is_none() {
                self.next_frame = Some(Instant::now() + consts::FRAME_PERIOD);
            }
            let when = self.next_frame.expect("next_frame should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick(Instant::now());
                self.next_frame = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// One frame of simulation: age the cosmetics, run the wizard, and
    /// move the snake if its rate gate lets it.
    fn tick(&mut self, now: Instant) {
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.food.animate(dt);
        self.snake.update_embers(dt);
        self.powerups.update(now, dt);
        self.snake.set_wyrm(self.powerups.wyrm_active(now));
        let excluded = self.elixir_exclusions();
        self.wizard.update(now, &mut self.rng, self.grid, &excluded);
        if self.snake.advance(now, self.grid) {
            if self.snake.is_wyrm() {
                self.snake.breathe(&mut self.rng);
            }
            self.resolve_collisions(now);
        }
    }

    /// Everything the head may have landed on this move.  Food and elixir
    /// occupy distinct cells by construction only when the corresponding
    /// configuration knob is on, so a head can collect both at once.
    fn resolve_collisions(&mut self, now: Instant) {
        let head = self.snake.head();
        if self.snake.self_collision() {
            self.fx.play(FxEvent::GameOver { pos: head });
            self.state = GameState::Over(GameOver::new(self.score, &self.globals));
            return;
        }
        if head == self.food.position() {
            let kind = self.food.kind();
            self.score += kind.points();
            self.fx.play(FxEvent::Eat {
                pos: head,
                special: kind == FoodKind::Special,
            });
            self.snake.grow();
            self.snake.increase_speed();
            if kind.effect() == Some(FoodEffect::SpeedBoost) {
                self.snake.increase_speed();
            }
            let occupied = self.food_exclusions();
            self.food.respawn(&mut self.rng, self.grid, &occupied);
        }
        if self.wizard.take_elixir(head) {
            self.score += consts::ELIXIR_POINTS;
            self.fx.play(FxEvent::BonusCollected { pos: head });
            self.powerups.trigger(now, &mut self.rng, head);
        }
    }

    fn elixir_exclusions(&self) -> HashSet<Position> {
        let mut excluded = self.snake.cells().collect::<HashSet<_>>();
        if self.distinct_pickups {
            excluded.insert(self.food.position());
        }
        excluded
    }

    fn food_exclusions(&self) -> HashSet<Position> {
        let mut occupied = self.snake.cells().collect::<HashSet<_>>();
        if self.distinct_pickups {
            occupied.extend(self.wizard.position());
            occupied.extend(self.wizard.elixir());
        }
        occupied
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.snake.turn(Direction::North),
                        Command::Left => self.snake.turn(Direction::West),
                        Command::Down => self.snake.turn(Direction::South),
                        Command::Right => self.snake.turn(Direction::East),
                        Command::Esc | Command::P => self.pause(),
                        _ => (),
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => self.resume(),
                PauseOpt::Restart => return Some(Screen::Game(Game::new(self.globals.clone()))),
                PauseOpt::MainMenu => {
                    return Some(Screen::Main(crate::menu::MainMenu::new(
                        self.globals.clone(),
                    )))
                }
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Over(ref mut over) => {
                match over.handle_event(event, &mut self.globals)? {
                    OverOutcome::NewGame => {
                        return Some(Screen::Game(Game::new(self.globals.clone())))
                    }
                    OverOutcome::MainMenu => {
                        return Some(Screen::Main(crate::menu::MainMenu::new(
                            self.globals.clone(),
                        )))
                    }
                    OverOutcome::Quit => return Some(Screen::Quit),
                }
            }
        }
        None
    }

    fn running(&self) -> bool {
        matches!(self.state, GameState::Running)
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    fn resume(&mut self) {
        self.state = GameState::Running;
        // Restart the animation clock so the paused stretch does not get
        // integrated into the next frame's delta.
        self.last_frame = Instant::now();
        self.next_frame = None;
    }
}

impl<R, F> Game<R, F> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn head_symbol(&self) -> char {
        if self.snake.is_wyrm() {
            consts::WYRM_HEAD_SYMBOL
        } else {
            match self.snake.direction() {
                Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
                Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
                Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
                Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
            }
        }
    }
}

impl<R, F> Widget for &Game<R, F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {score}   Speed: {speed:.1}",
                score = self.score,
                speed = self.snake.speed(),
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let mut block_size = self.grid.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        DottedBorder.render(block_area, buf);

        let theme = &self.globals.config.theme;
        let pulse = usize::from(self.food.pulse() >= 0.5);
        let field_area = block_area.inner(Margin::new(1, 1));
        let mut field = Canvas {
            area: field_area,
            buf,
        };
        if let Some(pos) = self.wizard.position() {
            field.draw_cell(pos, consts::WIZARD_SYMBOL, theme.wizard());
        }
        if let Some(pos) = self.wizard.elixir() {
            field.draw_cell(pos, consts::ELIXIR_SYMBOL, theme.elixir());
        }
        let food_style = match self.food.kind() {
            FoodKind::Normal => theme.food(pulse),
            FoodKind::Special => theme.special_food(pulse),
        };
        field.draw_cell(self.food.position(), self.food.kind().symbol(), food_style);
        for ember in self.snake.embers().iter() {
            if let Some(pos) = ember.cell(self.grid) {
                let idx = ember_index(ember.fade());
                field.draw_cell(pos, consts::EMBER_SYMBOLS[idx], consts::EMBER_STYLES[idx]);
            }
        }
        let (body_symbol, snake_style) = if self.snake.is_wyrm() {
            (consts::WYRM_BODY_SYMBOL, theme.wyrm())
        } else {
            (consts::SNAKE_BODY_SYMBOL, theme.snake())
        };
        for cell in self.snake.cells().skip(1) {
            field.draw_cell(cell, body_symbol, snake_style);
        }
        field.draw_cell(self.snake.head(), self.head_symbol(), snake_style);
        // effects overlay, drawn above the playfield entities
        if self.powerups.is_any_active(self.last_frame) {
            for particle in self.powerups.debris().iter() {
                if let Some(pos) = particle.cell(self.grid) {
                    field.draw_cell(pos, consts::DEBRIS_SYMBOL, consts::DEBRIS_STYLE);
                }
            }
            if let Some(progress) = self.powerups.burst_progress(self.last_frame) {
                let max_radius = f32::from(self.grid.width.min(self.grid.height))
                    * consts::BURST_SIZE_FACTOR
                    / 2.0;
                let radius = PowerUps::burst_radius(progress, max_radius);
                let center = self.powerups.burst_center();
                for ring in [radius, radius * 0.6] {
                    if ring < 0.5 {
                        continue;
                    }
                    for i in 0..64u16 {
                        let angle = f32::from(i) / 64.0 * TAU;
                        // terminal cells are about twice as tall as wide
                        let x = f32::from(center.x) + angle.cos() * ring;
                        let y = f32::from(center.y) + angle.sin() * ring * 0.5;
                        if let Some(pos) = grid_cell(x, y, self.grid) {
                            field.draw_cell(
                                pos,
                                consts::BURST_RING_SYMBOL,
                                consts::BURST_RING_STYLE,
                            );
                        }
                    }
                }
            }
        }

        match self.state {
            GameState::Running => {
                if self.powerups.banner_active(self.last_frame) {
                    Banner.render(display, buf);
                }
                Line::from_iter([
                    Span::raw(" Pause ("),
                    Span::styled("Esc", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(hint_area, buf);
            }
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over(ref over) => {
                buf.set_style(block_area, consts::DIMMED_STYLE);
                over.render(display, buf, &self.globals);
            }
        }
    }
}

/// Ember age bucket: fresh, cooling, nearly out.
fn ember_index(fade: f32) -> usize {
    if fade > 0.66 {
        0
    } else if fade > 0.33 {
        1
    } else {
        2
    }
}

/// The cell under fractional playfield coordinates, if any.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_cell(x: f32, y: f32, grid: Grid) -> Option<Position> {
    let x = x.round();
    let y = y.round();
    (x >= 0.0 && x < f32::from(grid.width) && y >= 0.0 && y < f32::from(grid.height))
        .then(|| Position::new(x as u16, y as u16))
}

/// Draws single cells at playfield coordinates offset into a buffer.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn as dots: every edge wraps onto the opposite one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Over(GameOver),
}
