// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::{HashSet, VecDeque};
use crate::grid::{Grid, Position};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction { North, South, East, West }

impl Direction {
	/// Expansion order; fixed, so that returned paths are reproducible.
	pub(crate) const ALL: [Direction; 4] = [
		Direction::North, Direction::South, Direction::East, Direction::West];

	pub(crate) fn delta(self) -> (isize, isize) {
		match self {
			Direction::North => (0, -1),
			Direction::South => (0, 1),
			Direction::East => (1, 0),
			Direction::West => (-1, 0),
		}
	}
}

impl std::fmt::Display for Direction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::fmt::Write as _;
		f.write_char(match self {
			Direction::North => '^',
			Direction::South => 'v',
			Direction::East => '>',
			Direction::West => '<',
		})
	}
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status { Start, Goal, Blocked, Valid, Invalid, Unknown }


/// Which elevation changes a single step may make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Constraint {
	/// Climbing from start to goal: descend any amount, ascend at most one.
	AscendAtMostOne,
	/// Walking a climb backwards: ascend any amount, descend at most one.
	DescendAtMostOne,
}

impl Constraint {
	pub(crate) fn permits(self, from: u8, to: u8) -> bool {
		let delta = to as i16 - from as i16;
		match self {
			Constraint::AscendAtMostOne => delta <= 1,
			Constraint::DescendAtMostOne => delta >= -1,
		}
	}
}


/// Search node. Expanding one produces a new [`Location`] rather than
/// updating it.
#[derive(Debug)]
struct Location {
	pos: Position,
	path: Vec<Direction>,
	status: Status,
}

impl Location {
	fn new(pos: Position, path: Vec<Direction>) -> Self {
		Location { pos, path, status: Status::Unknown }
	}

	fn classified(self, status: Status) -> Self {
		debug_assert_eq!(self.status, Status::Unknown);
		Location { status, ..self }
	}
}


/// One breadth-first query over a [`Grid`]. Consumed by
/// [`PathFinder::find_shortest_path`], so its visited set never
/// outlives the query.
pub(crate) struct PathFinder<'g> {
	grid: &'g Grid,
	start: Position,
	targets: HashSet<Position>,
	constraint: Constraint,
	visited: HashSet<Position>,
}

impl<'g> PathFinder<'g> {
	pub(crate) fn new(
		grid: &'g Grid,
		start: Position,
		targets: impl IntoIterator<Item = Position>,
		constraint: Constraint,
	) -> Self {
		PathFinder {
			grid,
			start,
			targets: targets.into_iter().collect(),
			constraint,
			visited: HashSet::new(),
		}
	}

	fn location_status(&self, old_pos: Position, new_pos: Position) -> Status {
		let (Ok(old_elevation), Ok(new_elevation))
			= (self.grid.elevation(old_pos), self.grid.elevation(new_pos))
			else { return Status::Invalid };

		if self.visited.contains(&new_pos)
			|| !self.constraint.permits(old_elevation, new_elevation) {
			return Status::Blocked
		}

		// Only after the visited check; a visited target is never reported again
		if self.targets.contains(&new_pos) { return Status::Goal }

		Status::Valid
	}

	fn explore_in_direction(&mut self, location: &Location, direction: Direction) -> Location {
		let pos = location.pos.step(direction);
		let mut path = Vec::with_capacity(location.path.len() + 1);
		path.extend_from_slice(&location.path);
		path.push(direction);

		let status = self.location_status(location.pos, pos);

		// Marked on discovery rather than on dequeue, so no cell is queued twice
		if status == Status::Valid { self.visited.insert(pos); }

		Location::new(pos, path).classified(status)
	}

	/// Returns the directions of a shortest path from the start to the
	/// nearest target, or `None` if no target can be reached.
	pub(crate) fn find_shortest_path(mut self) -> Option<Vec<Direction>> {
		let start = Location::new(self.start, vec![]).classified(Status::Start);
		if self.targets.contains(&start.pos) { return Some(start.path) }
		self.visited.insert(start.pos);

		// Breadth-first search
		let mut queue = VecDeque::new();
		queue.push_back(start);

		while let Some(location) = queue.pop_front() {

			#[cfg(LOGGING)]
			println!("{},{} @ {}: {:?}",
				location.pos.x,
				location.pos.y,
				location.path.len(),
				self.grid.elevation(location.pos));

			for direction in Direction::ALL {
				let next = self.explore_in_direction(&location, direction);
				match next.status {
					Status::Goal => return Some(next.path),
					Status::Valid => queue.push_back(next),
					Status::Blocked | Status::Invalid => (),
					Status::Start | Status::Unknown => unreachable!(),
				}
			}
		}

		None
	}
}


/// Positions visited when following `path` from `start`, `start` included.
#[cfg(any(test, LOGGING))]
pub(crate) fn positions_along(start: Position, path: &[Direction])
-> impl Iterator<Item = Position> + '_ {
	std::iter::once(start).chain(path.iter().scan(start, |pos, &direction| {
		*pos = pos.step(direction);
		Some(*pos)
	}))
}
