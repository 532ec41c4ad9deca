// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod grid;
mod path_finder;

use std::path::PathBuf;
use grid::{Grid, Position};
use path_finder::{Constraint, PathFinder};


const EXAMPLE: &str = include_str!("example.txt");


/// Shortest hill-climbing routes across a heightmap.
#[derive(clap::Parser)]
#[command(version)]
struct Cli {
	/// Heightmap to climb; read from stdin if omitted
	#[arg(value_name = "FILE", conflicts_with = "example")]
	input: Option<PathBuf>,

	/// Climb the built-in example heightmap instead
	#[arg(long)]
	example: bool,
}

impl Cli {
	fn heightmap(&self) -> std::io::Result<String> {
		use std::io::Read as _;
		if self.example { return Ok(EXAMPLE.to_owned()) }
		match &self.input {
			Some(path) => std::fs::read_to_string(path),
			None => {
				let mut s = String::new();
				std::io::stdin().read_to_string(&mut s)?;
				Ok(s)
			}
		}
	}
}


/// Move count of a query, or the sentinel when nothing was reached.
struct Answer(Option<usize>);

impl std::fmt::Display for Answer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.0 {
			Some(steps) => write!(f, "{steps}"),
			None => write!(f, "No path found"),
		}
	}
}


fn steps(
	grid: &Grid,
	start: Position,
	targets: impl IntoIterator<Item = Position>,
	constraint: Constraint,
) -> Option<usize> {
	let path = PathFinder::new(grid, start, targets, constraint).find_shortest_path()?;

	#[cfg(LOGGING)]
	{
		use std::collections::HashMap;
		let arrows = path_finder::positions_along(start, &path)
			.zip(path.iter().copied())
			.collect::<HashMap<_, _>>();
		let mut s = String::new();
		if grid.fmt_with(&mut s, |pos| arrows.get(&pos).copied()).is_ok() {
			println!("{s}\n");
		}
	}

	Some(path.len())
}

/// Fewest steps from the start marker up to the goal marker.
fn shortest_ascent(grid: &Grid) -> Option<usize> {
	steps(grid, grid.start_pos, [grid.end_pos], Constraint::AscendAtMostOne)
}

/// Fewest steps from the goal marker down to any cell of elevation `a`.
fn shortest_descent(grid: &Grid) -> Option<usize> {
	steps(grid, grid.end_pos, grid.cells_with_elevation(0), Constraint::DescendAtMostOne)
}


fn main() -> Result<(), Box<dyn std::error::Error>> {
	use clap::Parser as _;
	let cli = Cli::parse();
	let grid: Grid = cli.heightmap()?.parse()?;

	#[cfg(LOGGING)]
	println!("{grid}\n");

	// The grid is only ever read, so both queries can share it
	let (part1, part2) = rayon::join(
		|| shortest_ascent(&grid),
		|| shortest_descent(&grid));

	println!("Part 1: {}", Answer(part1));
	println!("Part 2: {}", Answer(part2));
	Ok(())
}
