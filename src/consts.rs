//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::ops::{Range, RangeInclusive};
use std::time::Duration;

/// Playfield size in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 40,
    height: 30,
};

/// Target delay between session-loop frames (roughly 60 Hz).  Snake
/// movement is paced separately by the per-move rate gate, so this only
/// bounds how often cosmetics animate and input is polled.
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 36,
};

/// Snake length at the start of a session
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Fractional speed increase per food item eaten
pub(crate) const SPEED_GROWTH_RATE: f64 = 0.05;

/// Points for eating a normal food item
pub(crate) const FOOD_POINTS: u32 = 10;

/// Points for eating a special food item
pub(crate) const SPECIAL_FOOD_POINTS: u32 = 30;

/// Points for collecting the wizard's elixir
pub(crate) const ELIXIR_POINTS: u32 = 50;

/// Maximum number of entries kept in the high-score table
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Name recorded for a high score when the player enters nothing
pub(crate) const DEFAULT_PLAYER_NAME: &str = "Player";

/// Maximum display width of a high-score name
pub(crate) const NAME_WIDTH: u16 = 12;

/// Uniform samples tried when respawning food before falling back to
/// scanning the free cells
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;

/// Cycles per second of the food pulse animation
pub(crate) const FOOD_PULSE_RATE: f32 = 2.0;

/// Time between wizard appearance trials
pub(crate) const WIZARD_TRIAL_INTERVAL: Duration = Duration::from_secs(5);

/// How long the wizard stays on the board if his elixir goes untaken
pub(crate) const WIZARD_STAY_DURATION: Duration = Duration::from_secs(60);

/// The wizard never appears closer than this many cells to an edge
pub(crate) const WIZARD_EDGE_MARGIN: u16 = 2;

/// Chance per tick that an active wizard conjures an elixir
pub(crate) const ELIXIR_CHANCE: f64 = 0.02;

/// The elixir lands within this many cells of the wizard on each axis
pub(crate) const ELIXIR_RADIUS: i32 = 2;

/// Placement attempts per elixir roll before giving up for the tick
pub(crate) const ELIXIR_PLACEMENT_ATTEMPTS: u32 = 10;

/// How long the celebration banner stays up after an elixir pickup
pub(crate) const BANNER_DURATION: Duration = Duration::from_secs(6);

/// How long the burst effect runs after an elixir pickup
pub(crate) const BURST_DURATION: Duration = Duration::from_millis(3500);

/// How long the wyrm transformation lasts
pub(crate) const WYRM_DURATION: Duration = Duration::from_secs(60);

/// Debris particles thrown by the burst
pub(crate) const BURST_DEBRIS_COUNT: usize = 40;

/// Maximum burst ring radius as a fraction of the shorter grid side
pub(crate) const BURST_SIZE_FACTOR: f32 = 0.9;

/// Embers spawned behind the head per move while transformed
pub(crate) const EMBERS_PER_MOVE: RangeInclusive<u32> = 2..=3;

/// Ember lifetime in seconds
pub(crate) const EMBER_LIFETIME: Range<f32> = 0.5..1.0;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the snake's head while transformed, any direction
pub(crate) const WYRM_HEAD_SYMBOL: char = 'Ω';

/// Glyph for the snake's body while transformed
pub(crate) const WYRM_BODY_SYMBOL: char = '≈';

/// Glyph for a normal food item
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for a special food item
pub(crate) const SPECIAL_FOOD_SYMBOL: char = '◆';

/// Glyph for the wizard
pub(crate) const WIZARD_SYMBOL: char = 'Ψ';

/// Glyph for the elixir
pub(crate) const ELIXIR_SYMBOL: char = '♦';

/// Ember glyphs from freshest to nearly burned out
pub(crate) const EMBER_SYMBOLS: [char; 3] = ['✦', '*', '·'];

/// Glyph for the burst rings
pub(crate) const BURST_RING_SYMBOL: char = '○';

/// Glyph for burst debris
pub(crate) const DEBRIS_SYMBOL: char = '❋';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while the wyrm transformation is active
pub(crate) const WYRM_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

/// Styles for a normal food item, bright and dim halves of the pulse
pub(crate) const FOOD_STYLES: [Style; 2] = [
    Style::new().fg(Color::LightRed),
    Style::new().fg(Color::Red),
];

/// Styles for a special food item, bright and dim halves of the pulse
pub(crate) const SPECIAL_FOOD_STYLES: [Style; 2] = [
    Style::new()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD),
    Style::new().fg(Color::Yellow),
];

/// Style for the wizard
pub(crate) const WIZARD_STYLE: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

/// Style for the elixir
pub(crate) const ELIXIR_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Ember styles from freshest to nearly burned out
pub(crate) const EMBER_STYLES: [Style; 3] = [
    Style::new().fg(Color::LightYellow),
    Style::new().fg(Color::LightRed),
    Style::new().fg(Color::DarkGray),
];

/// Style for the burst rings
pub(crate) const BURST_RING_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for burst debris
pub(crate) const DEBRIS_STYLE: Style = Style::new().fg(Color::LightRed);

/// Border style for the celebration banner
pub(crate) const BANNER_BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Banner stripes, top to bottom
pub(crate) const BANNER_STRIPE_STYLES: [Style; 3] = [
    Style::new().bg(Color::Green),
    Style::new().bg(Color::White),
    Style::new().bg(Color::Red),
];

/// Style for the text on the celebration banner
pub(crate) const BANNER_TEXT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::White)
    .add_modifier(Modifier::BOLD);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "GAME OVER" headline
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Style painted over the playfield behind the game-over panel
pub(crate) const DIMMED_STYLE: Style = Style::new().fg(Color::DarkGray);
