pub mod frame;
pub mod ui;

use std::io::{self, Write};
use std::time::Instant;

use common::{
    config::Config,
    game::{Game, GameEvent, Outcome},
    input::{self, Command, UiKey},
    render::{self, Layout},
    time,
};

use crate::ui::TerminalUi;

/// Takes over the terminal and plays until the player quits. Returns the
/// last session outcome, if any session finished.
pub fn run_client(config: &Config) -> io::Result<Option<Outcome>> {
    let mut ui = TerminalUi::new(config.rows, config.cols)?;
    let mut game = Game::new(config);

    let events = game.generate_animated(Instant::now());
    report(&mut ui, &events);

    main_loop(&mut game, &mut ui)
}

fn main_loop<W: Write>(game: &mut Game, ui: &mut TerminalUi<W>) -> io::Result<Option<Outcome>> {
    let layout = frame::terminal_layout();
    let mut last_outcome = None;

    loop {
        // The poll timeout paces the loop at roughly one frame per tick.
        let key = match ui.poll_key(time::FRAME) {
            Ok(key) => key,
            Err(e) => {
                ui.show_message(&e.to_string());
                break;
            }
        };

        match advance(game, ui, &layout, key, Instant::now())? {
            Some(outcome) => last_outcome = outcome.or(last_outcome),
            None => break,
        }
    }

    Ok(last_outcome)
}

/// One frame: apply the key, update the game, draw. `None` means quit.
fn advance<W: Write>(
    game: &mut Game,
    ui: &mut TerminalUi<W>,
    layout: &Layout,
    key: Option<UiKey>,
    now: Instant,
) -> io::Result<Option<Option<Outcome>>> {
    let mut events = Vec::new();

    match key.and_then(input::command_for) {
        Some(Command::Quit) => return Ok(None),
        Some(command) => events.extend(game.handle(command, now)),
        None => {}
    }

    events.extend(game.update(now));
    let outcome = report(ui, &events);

    render::render(game, layout, ui);
    ui.present()?;

    Ok(Some(outcome))
}

fn report<W: Write>(ui: &mut TerminalUi<W>, events: &[GameEvent]) -> Option<Outcome> {
    let mut outcome = None;

    for event in events {
        match event {
            // The status line already shows the clock.
            GameEvent::CountdownTicked { .. } => continue,
            GameEvent::Finished(finished) => outcome = Some(*finished),
            _ => {}
        }
        ui.show_message(&event.message());
    }

    outcome
}
