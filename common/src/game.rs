use std::time::Instant;

use crate::{
    config::Config,
    input::Command,
    maze::{Animation, Direction, Maze, MazeMaker, Position, Speed, Tick},
    notice::{Notice, Notices},
    player::Player,
    timer::Countdown,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GenerationStarted { animated: bool },
    MazeReady { passages: usize },
    NotReady,
    SessionStarted { session: u64, start: Position },
    Moved { from: Position, to: Position },
    Blocked { at: Position, direction: Direction },
    CountdownTicked { remaining: i32 },
    Finished(Outcome),
    SpeedChanged(Speed),
    Reset,
}

impl GameEvent {
    pub fn message(&self) -> String {
        match self {
            GameEvent::GenerationStarted { animated: true } => "Generating maze...".to_string(),
            GameEvent::GenerationStarted { animated: false } => "Generating maze.".to_string(),
            GameEvent::MazeReady { passages } => {
                format!("Maze ready with {passages} passages. Press p to play.")
            }
            GameEvent::NotReady => "Maze is not ready yet; ignoring play request.".to_string(),
            GameEvent::SessionStarted { session, start } => format!(
                "Session {session} started at row {}, column {}.",
                start.row, start.col
            ),
            GameEvent::Moved { to, .. } => format!("Moved to row {}, column {}.", to.row, to.col),
            GameEvent::Blocked { direction, .. } => format!("There is a wall to the {direction}."),
            GameEvent::CountdownTicked { remaining } => format!("{remaining}s left."),
            GameEvent::Finished(Outcome::Victory) => "Victory!".to_string(),
            GameEvent::Finished(Outcome::Defeat) => "Defeat.".to_string(),
            GameEvent::SpeedChanged(speed) => format!("Animation speed set to {speed}."),
            GameEvent::Reset => "Session reset.".to_string(),
        }
    }
}

/// One maze plus the play session on top of it.
///
/// All scheduling is cooperative: the host calls [`Game::update`] once per
/// frame with the current time, and forwards input through
/// [`Game::handle_intent`] or [`Game::handle`]. Nothing in here reads the
/// clock or blocks.
pub struct Game {
    maze: Maze,
    maker: MazeMaker,
    animation: Option<Animation>,
    speed: Speed,
    player: Option<Player>,
    countdown: Countdown,
    notices: Notices,
    sessions: u64,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(config: &Config) -> Self {
        let mut maker = config
            .seed
            .map(MazeMaker::from_seed)
            .unwrap_or_default();
        let exit = maker.random_position(config.rows, config.cols);

        Self {
            maze: Maze::build(config.rows, config.cols, exit),
            maker,
            animation: None,
            speed: config.speed,
            player: None,
            countdown: Countdown::new(config.countdown_secs),
            notices: Notices::new(),
            sessions: 0,
            outcome: None,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_generating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation.is_current(&self.maze) && !animation.is_finished())
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_some() && self.outcome.is_none()
    }

    pub fn handle(&mut self, command: Command, now: Instant) -> Vec<GameEvent> {
        match command {
            Command::Move(direction) => self.handle_intent(direction).into_iter().collect(),
            Command::GenerateAnimated => self.generate_animated(now),
            Command::GenerateInstant => self.generate(),
            Command::Play => self.start(now),
            Command::SetSpeed(speed) => vec![self.set_speed(speed)],
            Command::Confirm => self.confirm_outcome(),
            Command::Quit => Vec::new(),
        }
    }

    /// Builds a whole maze in one go.
    pub fn generate(&mut self) -> Vec<GameEvent> {
        self.prepare_generation();
        self.animation = None;
        self.maker.generate(&mut self.maze);

        vec![
            GameEvent::GenerationStarted { animated: false },
            GameEvent::MazeReady {
                passages: self.maze.carved_passages(),
            },
        ]
    }

    /// Starts a maze that is carved one step per due frame. Any earlier
    /// animation is superseded.
    pub fn generate_animated(&mut self, now: Instant) -> Vec<GameEvent> {
        self.prepare_generation();
        self.animation = Some(self.maker.generate_animated(&mut self.maze, now));

        vec![GameEvent::GenerationStarted { animated: true }]
    }

    fn prepare_generation(&mut self) {
        self.notices.hide(Notice::MazeNotReady);
        self.countdown.stop();
        self.reset();
    }

    pub fn set_speed(&mut self, speed: Speed) -> GameEvent {
        self.speed = speed;
        GameEvent::SpeedChanged(speed)
    }

    /// Starts a play session on a finished maze. A request made while the
    /// maze is still being carved only shows an advisory notice.
    pub fn start(&mut self, now: Instant) -> Vec<GameEvent> {
        if !self.maze.is_ready() {
            self.notices.show(Notice::MazeNotReady, now);
            return vec![GameEvent::NotReady];
        }

        self.reset();

        let start = self
            .maker
            .random_position(self.maze.rows(), self.maze.cols());
        self.player = Some(Player::new(start));
        self.sessions += 1;
        self.countdown.start(now);
        self.notices.show(Notice::TimerTip, now);

        vec![GameEvent::SessionStarted {
            session: self.sessions,
            start,
        }]
    }

    /// Ends the current session, if any, and puts the maze back the way it
    /// was generated.
    pub fn reset(&mut self) {
        self.player = None;
        self.outcome = None;
        self.maze.unexplore_all();
        self.countdown.stop();
        self.countdown.reset();
        for notice in [
            Notice::TimerTip,
            Notice::DefeatTip,
            Notice::Victory,
            Notice::Defeat,
        ] {
            self.notices.hide(notice);
        }
    }

    /// Dismisses a victory or defeat popup.
    pub fn confirm_outcome(&mut self) -> Vec<GameEvent> {
        if self.outcome.is_none() {
            return Vec::new();
        }
        self.reset();
        vec![GameEvent::Reset]
    }

    /// Moves the player one cell if the maze allows it. Whatever happens is
    /// fully applied before this returns, so the next frame sees it.
    pub fn handle_intent(&mut self, direction: Direction) -> Option<GameEvent> {
        if self.outcome.is_some() || !self.maze.is_ready() {
            return None;
        }
        let player = self.player.as_mut()?;

        let from = player.position;
        let (to_row, to_col) = player.target(direction);

        if !self
            .maze
            .can_move(from.row as isize, from.col as isize, to_row, to_col)
        {
            return Some(GameEvent::Blocked {
                at: from,
                direction,
            });
        }

        let to = Position::new(to_row as usize, to_col as usize);
        player.move_to(to);
        self.maze.explore(from);
        self.maze.explore(to);

        Some(GameEvent::Moved { from, to })
    }

    /// One frame of the cooperative loop.
    pub fn update(&mut self, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.update_animation(now, &mut events);
        self.notices.update(now);

        if !self.is_playing() || !self.maze.is_ready() {
            return events;
        }

        if self.countdown.update(now) > 0 {
            events.push(GameEvent::CountdownTicked {
                remaining: self.countdown.remaining(),
            });
        }

        if let Some(player) = self.player.as_mut() {
            player.blink();
        }

        if let Some(outcome) = self.evaluate() {
            self.finish(outcome, now);
            events.push(GameEvent::Finished(outcome));
        }

        events
    }

    fn update_animation(&mut self, now: Instant, events: &mut Vec<GameEvent>) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };

        match animation.tick(&mut self.maker, &mut self.maze, self.speed, now) {
            Tick::Finished => {
                events.push(GameEvent::MazeReady {
                    passages: self.maze.carved_passages(),
                });
                self.animation = None;
            }
            Tick::Stale | Tick::Idle => self.animation = None,
            Tick::Waiting | Tick::Stepped => {}
        }
    }

    // Running out of time beats reaching the exit on the same frame.
    fn evaluate(&self) -> Option<Outcome> {
        let player = self.player.as_ref()?;

        if self.countdown.has_expired() {
            Some(Outcome::Defeat)
        } else if self.maze.is_exit(player.position) {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: Outcome, now: Instant) {
        self.outcome = Some(outcome);
        self.countdown.stop();
        self.notices.hide(Notice::TimerTip);

        match outcome {
            Outcome::Victory => self.notices.show(Notice::Victory, now),
            Outcome::Defeat => {
                self.notices.show(Notice::DefeatTip, now);
                self.notices.show(Notice::Defeat, now);
            }
        }
    }
}
