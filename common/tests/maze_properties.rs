use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use common::maze::{Direction, Maze, MazeMaker, Position, Speed, Tick};

fn blank(rows: usize, cols: usize) -> Maze {
    Maze::build(rows, cols, Position::new(0, 0))
}

fn open(maze: &Maze, from: Position, to: Position) -> bool {
    maze.can_move(
        from.row as isize,
        from.col as isize,
        to.row as isize,
        to.col as isize,
    )
}

fn flood_fill(maze: &Maze, start: Position) -> HashSet<Position> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(position) = queue.pop_front() {
        for direction in Direction::ALL {
            if let Some(next) = position.step(direction) {
                if maze.contains(next) && open(maze, position, next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    seen
}

fn assert_perfect(maze: &Maze) {
    let cells = maze.rows() * maze.cols();

    assert!(maze.is_ready());
    assert_eq!(maze.carved_passages(), cells - 1, "not a spanning tree:\n{maze}");
    assert!(maze.cells().all(|cell| cell.visited));
    assert_eq!(
        flood_fill(maze, maze.exit()).len(),
        cells,
        "not fully connected:\n{maze}"
    );
}

fn assert_symmetric(maze: &Maze) {
    for cell in maze.cells() {
        for direction in Direction::ALL {
            let Some(neighbor) = cell.position.step(direction).filter(|&n| maze.contains(n))
            else {
                assert!(cell.walls.has(direction), "outer wall removed:\n{maze}");
                continue;
            };

            assert_eq!(
                cell.walls.has(direction),
                maze.cell(neighbor).walls.has(direction.opposite())
            );
            assert_eq!(open(maze, cell.position, neighbor), open(maze, neighbor, cell.position));
        }
    }
}

fn animate_to_completion(maker: &mut MazeMaker, maze: &mut Maze, speed: Speed) -> usize {
    let mut now = Instant::now();
    let mut animation = maker.generate_animated(maze, now);
    let mut ticks = 0;

    loop {
        ticks += 1;
        match animation.tick(maker, maze, speed, now) {
            Tick::Finished => return ticks,
            Tick::Stepped | Tick::Waiting => now += Duration::from_millis(100),
            other => panic!("unexpected tick {other:?}"),
        }
    }
}

#[test]
fn generated_mazes_are_perfect_across_sizes() {
    let sizes = [(1, 2), (2, 1), (2, 2), (3, 7), (10, 10), (1, 30), (24, 24)];

    for (seed, &(rows, cols)) in sizes.iter().enumerate() {
        let mut maker = MazeMaker::from_seed(seed as u64);
        let mut maze = blank(rows, cols);
        maker.generate(&mut maze);

        assert_perfect(&maze);
        assert_symmetric(&maze);
    }
}

#[test]
fn random_seeds_stay_perfect() {
    for _ in 0..32 {
        let mut maker = MazeMaker::new();
        let mut maze = blank(12, 9);
        maker.generate(&mut maze);
        assert_perfect(&maze);
    }
}

#[test]
fn animated_and_synchronous_runs_agree_on_the_same_seed() {
    for seed in [0, 1, 99, 2024] {
        let mut sync_maker = MazeMaker::from_seed(seed);
        let mut sync_maze = blank(11, 13);
        sync_maker.generate(&mut sync_maze);

        let mut animated_maker = MazeMaker::from_seed(seed);
        let mut animated_maze = blank(11, 13);
        let ticks = animate_to_completion(&mut animated_maker, &mut animated_maze, Speed::Medium);

        assert_eq!(ticks, 11 * 13, "one cell per tick");
        assert_eq!(sync_maze.exit(), animated_maze.exit());
        assert_eq!(sync_maze.log(), animated_maze.log());
        for (a, b) in sync_maze.cells().zip(animated_maze.cells()) {
            assert_eq!(a.walls, b.walls);
        }
    }
}

#[test]
fn switching_speed_mid_run_still_matches_the_synchronous_maze() {
    let mut sync_maker = MazeMaker::from_seed(77);
    let mut sync_maze = blank(9, 9);
    sync_maker.generate(&mut sync_maze);

    let mut maker = MazeMaker::from_seed(77);
    let mut maze = blank(9, 9);
    let now = Instant::now();
    let mut animation = maker.generate_animated(&mut maze, now);
    for _ in 0..20 {
        assert_eq!(animation.tick(&mut maker, &mut maze, Speed::Fast, now), Tick::Stepped);
    }
    assert_eq!(
        animation.tick(&mut maker, &mut maze, Speed::Instantaneous, now),
        Tick::Finished
    );

    assert_eq!(sync_maze.log(), maze.log());
}

#[test]
fn one_by_one_grid_is_ready_without_carving() {
    let mut maker = MazeMaker::from_seed(4);
    let mut maze = blank(1, 1);
    maker.generate(&mut maze);

    let only = Position::new(0, 0);
    assert!(maze.is_ready());
    assert_eq!(maze.carved_passages(), 0);
    assert_eq!(maze.exit(), only);
    assert!(maze.is_visited(only));

    let mut animated = blank(1, 1);
    let ticks = animate_to_completion(&mut MazeMaker::from_seed(4), &mut animated, Speed::Slow);
    assert_eq!(ticks, 1);
    assert!(animated.is_ready());
}

#[test]
fn new_generation_cancels_an_animation_in_flight() {
    let mut maker = MazeMaker::from_seed(31);
    let mut maze = blank(8, 8);
    let now = Instant::now();

    let mut old = maker.generate_animated(&mut maze, now);
    for _ in 0..10 {
        old.tick(&mut maker, &mut maze, Speed::Fast, now);
    }

    let mut new = maker.generate_animated(&mut maze, now);
    assert_eq!(new.tick(&mut maker, &mut maze, Speed::Fast, now), Tick::Stepped);
    let after_first_step = maze.log();

    assert_eq!(old.tick(&mut maker, &mut maze, Speed::Fast, now), Tick::Stale);
    assert_eq!(maze.log(), after_first_step);
    assert_eq!(maze.cells().filter(|cell| cell.visited).count(), 1);

    while new.tick(&mut maker, &mut maze, Speed::Fast, now) != Tick::Finished {}
    assert_perfect(&maze);
}

#[test]
fn legality_does_not_survive_a_regeneration() {
    let mut maker = MazeMaker::from_seed(5);
    let mut maze = blank(6, 6);
    maker.generate(&mut maze);

    let before: Vec<bool> = maze
        .cells()
        .flat_map(|cell| {
            Direction::ALL.map(|direction| {
                let (drow, dcol) = direction.delta();
                maze.can_move(
                    cell.position.row as isize,
                    cell.position.col as isize,
                    cell.position.row as isize + drow,
                    cell.position.col as isize + dcol,
                )
            })
        })
        .collect();

    maker.generate(&mut maze);
    assert_perfect(&maze);

    let after: Vec<bool> = maze
        .cells()
        .flat_map(|cell| {
            Direction::ALL.map(|direction| !cell.walls.has(direction))
        })
        .collect();

    // Every answer comes straight from the new walls, whatever the old ones were.
    let recomputed: Vec<bool> = maze
        .cells()
        .flat_map(|cell| {
            Direction::ALL.map(|direction| {
                let (drow, dcol) = direction.delta();
                maze.can_move(
                    cell.position.row as isize,
                    cell.position.col as isize,
                    cell.position.row as isize + drow,
                    cell.position.col as isize + dcol,
                )
            })
        })
        .collect();
    assert_eq!(recomputed, after);
    assert_ne!(before, after, "two seeded generations in a row should differ");
}

#[test]
fn moves_longer_than_one_step_are_always_rejected() {
    let mut maker = MazeMaker::from_seed(8);
    let mut maze = blank(5, 5);
    maker.generate(&mut maze);

    for cell in maze.cells() {
        let (row, col) = (cell.position.row as isize, cell.position.col as isize);
        for (drow, dcol) in [(0, 0), (1, 1), (-1, 1), (2, 0), (0, -2), (3, 4)] {
            assert!(!maze.can_move(row, col, row + drow, col + dcol));
        }
    }
}
