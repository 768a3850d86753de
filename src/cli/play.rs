//! CUI player mode for running drills
//!
//! The terminal stands in for the presentation layer: it reads the session
//! state, turns keystrokes into events and never mutates state itself.

use crate::{
    assets::{self, AssetBoard, AssetProvider, AssetSlot, GlyphAssetProvider},
    cli::view_state::{ItemAlert, ViewState, clear_screen, render_delta},
    facade::Drill,
    rules::RulesConfig,
    types::{Catalog, Direction, Event, Mode, Position, Role, SessionState},
};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Map size in terminal cells
const MAP_COLS: usize = 40;
const MAP_ROWS: usize = 20;

/// A parsed line of player input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(Event),
    Quit,
}

/// Translate one input line for the current mode
///
/// A run of movement keys (`wwaa`) walks several steps at once. Digits pick a
/// role during role selection and a choice otherwise.
pub fn parse_line(line: &str, state: &SessionState) -> Result<Vec<Command>, String> {
    let line = line.trim();

    match line {
        "" => return Ok(vec![Command::Play(Event::AdvanceStage)]),
        "q" => return Ok(vec![Command::Quit]),
        "r" => return Ok(vec![Command::Play(Event::Restart)]),
        "x" => return Ok(vec![Command::Play(Event::CancelDialogue)]),
        _ => {}
    }

    if let Ok(number) = line.parse::<usize>() {
        if state.mode == Mode::RoleSelect {
            return Role::ALL
                .get(number.wrapping_sub(1))
                .map(|&role| vec![Command::Play(Event::SelectRole { role })])
                .ok_or_else(|| format!("Pick a role between 1 and {}.", Role::ALL.len()));
        }
        if (1..=9).contains(&number) {
            return Ok(vec![Command::Play(Event::SelectChoice { index: number - 1 })]);
        }
        return Err("Invalid choice. Enter 1-9.".to_string());
    }

    line.chars()
        .map(|c| {
            let direction = match c.to_ascii_lowercase() {
                'w' => Direction::Up,
                's' => Direction::Down,
                'a' => Direction::Left,
                'd' => Direction::Right,
                _ => return Err(format!("Unknown key '{}'. Use w/a/s/d, x, 1-9, r or q.", c)),
            };
            Ok(Command::Play(Event::Move { direction }))
        })
        .collect()
}

/// Run the player mode
///
/// Must be called inside a tokio runtime; asset requests are spawned on it.
pub fn run_play(catalog: Catalog, rules: RulesConfig, debug: bool) -> anyhow::Result<()> {
    let provider: Arc<dyn AssetProvider> = Arc::new(GlyphAssetProvider::from_catalog(&catalog));
    let (asset_tx, mut asset_rx) = mpsc::unbounded_channel();
    let mut board = AssetBoard::new("🙂");

    let mut view_state = ViewState::new(Duration::from_millis(rules.item_alert_ms));
    let mut drill = Drill::new(catalog, rules);

    println!("=== {} ===", drill.catalog().title);
    println!();
    println!("Controls:");
    println!("  w/a/s/d: move (repeat keys to walk further)");
    println!("  x:       leave the current conversation");
    println!("  1-9:     select role / choice");
    println!("  Enter:   continue after feedback");
    println!("  r:       restart");
    println!("  q:       quit");
    println!();
    println!("Press Enter to start...");
    get_input("")?;

    let mut message: Option<String> = None;
    loop {
        let requests = board.sync(drill.state(), drill.catalog());
        if !requests.is_empty() {
            assets::spawn_requests(Arc::clone(&provider), requests, asset_tx.clone());
        }
        while let Ok(response) = asset_rx.try_recv() {
            board.accept(response);
        }

        clear_screen();
        let alert = view_state.active_alert(Instant::now()).cloned();
        show_screen(&drill, &board, alert.as_ref());
        if let Some(text) = message.take() {
            println!("{}", text);
            println!();
        }
        if debug {
            display_debug_info(&drill);
        }

        let input = get_input(prompt_for(drill.state()))?;
        let commands = match parse_line(&input, drill.state()) {
            Ok(commands) => commands,
            Err(hint) => {
                message = Some(hint);
                continue;
            }
        };

        for command in commands {
            let event = match command {
                Command::Quit => {
                    println!("Goodbye!");
                    return Ok(());
                }
                Command::Play(event) => event,
            };

            match drill.dispatch(event) {
                Ok(output) => {
                    if event == Event::Restart {
                        view_state.reset();
                    }
                    let delta = view_state.apply(drill.state(), &output, Instant::now());
                    if !delta.is_empty() {
                        render_delta(&delta);
                    }
                    // Stop walking once a conversation opens
                    if drill.state().interacting_with().is_some() {
                        break;
                    }
                }
                Err(error) => {
                    message = Some(format!("[{}]", error));
                    break;
                }
            }
        }
    }
}

fn prompt_for(state: &SessionState) -> &'static str {
    match state.mode {
        Mode::RoleSelect => "Choose your role (1-5):",
        Mode::Exploring => "Move (w/a/s/d):",
        Mode::Dialogue { .. } => "Answer (1-9) or x to leave:",
        Mode::Resolving { .. } => "Press Enter to continue:",
        Mode::Terminal { .. } => "Press r to restart or q to quit:",
    }
}

fn show_screen(drill: &Drill, board: &AssetBoard, alert: Option<&ItemAlert>) {
    let state = drill.state();

    if state.mode == Mode::RoleSelect {
        show_role_select(drill);
        return;
    }

    show_status(drill, board);

    if let Some(view) = drill.view() {
        println!(
            "[{}] Stage {}: {}",
            view.stage.time, view.stage.id, view.stage.title
        );
        println!("{}", view.stage.description);
        println!();
        print!("{}", render_map(state.position, view.events, board));
        println!();
    }

    match &state.mode {
        Mode::Dialogue { dialogue, .. } => {
            println!(
                "{} {} ({})",
                board.get(&AssetSlot::AllySprite(dialogue.ally.id.clone())),
                dialogue.ally.name,
                dialogue.ally.role
            );
            println!("\"{}\"", dialogue.dialogue);
            println!();
            println!("--- Choice ---");
            let choices = drill.view().map(|view| view.choices).unwrap_or(&[]);
            for (i, choice) in choices.iter().enumerate() {
                println!("{}. {}", i + 1, choice.text);
            }
            println!();
        }
        Mode::Resolving { feedback } => {
            println!("{}", feedback);
            println!();
        }
        Mode::Terminal { ending } => {
            if ending.is_success() {
                println!("== The kingdom is safe ==");
            } else {
                println!("== The kingdom has fallen ({:?}) ==", ending.cause);
            }
            println!("Items gathered: {}", state.inventory.len());
            for line in &state.history {
                println!("  {}", line);
            }
            println!();
        }
        Mode::Exploring | Mode::RoleSelect => {}
    }

    if let Some(alert) = alert {
        println!(
            ">> New item: {} {} - {}",
            alert.item.icon, alert.item.name, alert.item.description
        );
        println!();
    }
}

fn show_role_select(drill: &Drill) {
    if let Some(prologue) = drill.state().history.last() {
        println!("{}", prologue);
        println!();
    }
    for (i, role) in Role::ALL.iter().enumerate() {
        let info = drill.catalog().role_info(*role);
        println!("{}. {} - {}", i + 1, info.title, info.name);
        println!("   {}", info.description);
    }
    println!();
}

fn show_status(drill: &Drill, board: &AssetBoard) {
    let state = drill.state();
    println!(
        "{} Chaos {} {:>3}  Risk {} {:>3}",
        board.get(&AssetSlot::PlayerSprite),
        gauge(state.chaos.value()),
        state.chaos,
        gauge(state.risk.value()),
        state.risk
    );
    let items: Vec<&str> = state.inventory.iter().map(|i| i.icon.as_str()).collect();
    println!("Inventory: {}", items.join(" "));
    println!();
}

fn gauge(value: u8) -> String {
    let filled = usize::from(value) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Draw the 0-100 map scaled down to the terminal grid
fn render_map(
    player: Position,
    events: &[crate::types::DialogueEvent],
    board: &AssetBoard,
) -> String {
    let cell = |pos: Position| {
        let col = ((pos.x / 100.0) * (MAP_COLS - 1) as f32).round() as usize;
        let row = ((pos.y / 100.0) * (MAP_ROWS - 1) as f32).round() as usize;
        (row.min(MAP_ROWS - 1), col.min(MAP_COLS - 1))
    };

    let mut grid = vec![vec![".".to_string(); MAP_COLS]; MAP_ROWS];
    for event in events {
        let (row, col) = cell(event.pos);
        grid[row][col] = board
            .get(&AssetSlot::AllySprite(event.ally.id.clone()))
            .to_string();
    }
    let (row, col) = cell(player);
    grid[row][col] = "@".to_string();

    let mut out = String::new();
    for row in grid {
        out.push_str(&row.concat());
        out.push('\n');
    }
    out
}

/// Display debug information (only when --debug is set)
fn display_debug_info(drill: &Drill) {
    let state = drill.state();
    println!("[debug]");
    match drill.catalog().fingerprint() {
        Ok(digest) => println!("catalog={}", digest),
        Err(err) => println!("catalog=<unavailable: {}>", err),
    }
    println!(
        "pos=({:.1}, {:.1}) suppressed={:?}",
        state.position.x, state.position.y, state.suppressed
    );
    let mode = serde_json::to_string(&state.mode).unwrap_or_else(|_| "{}".to_string());
    println!("mode={}", mode);
    println!();
}

/// Get user input with an optional prompt
fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
