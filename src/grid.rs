// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Column (`x`) & row (`y`) of a cell. Signed, so that stepping off
/// the edge of a [`Grid`] still yields a representable position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Position {
	pub(crate) x: isize,
	pub(crate) y: isize,
}

impl Position {
	pub(crate) const fn new(x: isize, y: isize) -> Self {
		Position { x, y }
	}

	pub(crate) fn step(self, direction: crate::path_finder::Direction) -> Self {
		let (dx, dy) = direction.delta();
		Position { x: self.x + dx, y: self.y + dy }
	}
}


/// Rectangular heightmap with elevations `0..=25` (`a` through `z`).
pub(crate) struct Grid {
	elevations: Vec<u8>,
	width: usize,
	pub(crate) start_pos: Position,
	pub(crate) end_pos: Position,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OutOfRange {
	pub(crate) pos: Position,
}

impl std::fmt::Display for OutOfRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "position {},{} is outside the grid", self.pos.x, self.pos.y)
	}
}

impl std::error::Error for OutOfRange {}

impl Grid {
	pub(crate) fn width(&self) -> usize {
		self.width
	}

	pub(crate) fn height(&self) -> usize {
		self.elevations.len() / self.width
	}

	pub(crate) fn contains(&self, pos: Position) -> bool {
		(0..self.width() as isize).contains(&pos.x)
			&& (0..self.height() as isize).contains(&pos.y)
	}

	fn index(&self, pos: Position) -> Option<usize> {
		self.contains(pos).then(|| pos.y as usize * self.width + pos.x as usize)
	}

	pub(crate) fn elevation(&self, pos: Position) -> Result<u8, OutOfRange> {
		self.index(pos)
			.map(|i| self.elevations[i])
			.ok_or(OutOfRange { pos })
	}

	/// Returns every cell at `elevation`, in row-major order.
	pub(crate) fn cells_with_elevation(&self, elevation: u8) -> impl Iterator<Item = Position> + '_ {
		use itertools::iproduct;
		iproduct!(0..self.height() as isize, 0..self.width as isize)
			.map(|(y, x)| Position::new(x, y))
			.filter(move |&pos| self.elevation(pos) == Ok(elevation))
	}
}


mod parsing {
	use std::str::FromStr;
	use super::{Grid, Position};

	#[derive(Debug, PartialEq, Eq)]
	pub(crate) enum FormatError {
		Empty,
		LineLen { line: usize, len: Option<usize>, found: usize },
		InvalidChar { line: usize, column: usize, found: char },
		DuplicateStart { line: usize, column: usize },
		DuplicateEnd { line: usize, column: usize },
		NoStart,
		NoEnd,
	}

	impl std::fmt::Display for FormatError {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			use FormatError::*;
			match self {
				Empty => write!(f, "empty heightmap"),
				LineLen { line, len: Some(len), found } =>
					write!(f, "line {line} has length {found}, expected {len}"),
				LineLen { line, len: None, found } =>
					write!(f, "line {line} has invalid length {found}"),
				InvalidChar { line, column, found } =>
					write!(f, "invalid character {found:?} at {line}:{column}"),
				DuplicateStart { line, column } =>
					write!(f, "duplicate start marker at {line}:{column}"),
				DuplicateEnd { line, column } =>
					write!(f, "duplicate end marker at {line}:{column}"),
				NoStart => write!(f, "no start marker"),
				NoEnd => write!(f, "no end marker"),
			}
		}
	}

	impl std::error::Error for FormatError {}

	impl FromStr for Grid {
		type Err = FormatError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if s.trim_end().is_empty() { return Err(FormatError::Empty) }

			let mut elevations = vec![];
			let mut width = None;
			let mut start = None;
			let mut end = None;

			for (l, line) in s.lines().enumerate() {
				let line = line.strip_suffix('\r').unwrap_or(line);

				let line_len = line.chars().count();
				match width {
					None if line_len == 0 => return Err(FormatError::LineLen {
						line: l + 1, len: None, found: 0 }),
					None => width = Some(line_len),
					Some(len) if line_len != len => return Err(FormatError::LineLen {
						line: l + 1, len: width, found: line_len }),
					Some(_) => (),
				}

				for (c, ch) in line.chars().enumerate() {
					let pos = Position::new(c as isize, l as isize);

					macro_rules! set_start_or_end {
						( $which:ident, $which_err:ident, $elevation:literal ) => { {
							if $which.is_some() { return Err(FormatError::$which_err {
								line: l + 1, column: c + 1 }) }
							$which = Some(pos);
							elevations.push($elevation);
						} }
					}

					match ch {
						'S' => set_start_or_end!(start, DuplicateStart, 0),
						'E' => set_start_or_end!(end, DuplicateEnd, 25),
						'a'..='z' => elevations.push(ch as u8 - b'a'),
						found => return Err(FormatError::InvalidChar {
							line: l + 1, column: c + 1, found }),
					}
				}
			}

			Ok(Grid {
				elevations,
				width: width.ok_or(FormatError::Empty)?,
				start_pos: start.ok_or(FormatError::NoStart)?,
				end_pos: end.ok_or(FormatError::NoEnd)?,
			})
		}
	}
}


#[cfg(LOGGING)]
impl Grid {
	/// Renders the grid, with `overlay` taking precedence over the letters.
	pub(crate) fn fmt_with<D: std::fmt::Display>(&self, f: &mut impl std::fmt::Write,
		overlay: impl Fn(Position) -> Option<D>) -> std::fmt::Result {
		for y in 0..self.height() as isize {
			for x in 0..self.width as isize {
				let pos = Position::new(x, y);
				match overlay(pos) {
					Some(d) => write!(f, "{d}")?,
					None if pos == self.start_pos => f.write_char('S')?,
					None if pos == self.end_pos => f.write_char('E')?,
					None => f.write_char((b'a' + self.elevations[y as usize * self.width + x as usize]) as char)?,
				}
			}
			if y < self.height() as isize - 1 { f.write_char('\n')? }
		}
		Ok(())
	}
}

#[cfg(LOGGING)]
impl std::fmt::Display for Grid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.fmt_with(f, |_| None::<char>)
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::{*, parsing::FormatError};

	const EXAMPLE: &str = include_str!("example.txt");

	#[test]
	fn parse_example() {
		let grid: Grid = EXAMPLE.parse().unwrap();
		assert_eq!((grid.width(), grid.height()), (8, 5));
		assert_eq!(grid.start_pos, Position::new(0, 0));
		assert_eq!(grid.end_pos, Position::new(5, 2));
		assert_eq!(grid.elevation(grid.start_pos), Ok(0));
		assert_eq!(grid.elevation(grid.end_pos), Ok(25));
		assert_eq!(grid.elevation(Position::new(3, 0)), Ok(b'q' - b'a'));
		assert_eq!(grid.elevation(Position::new(7, 4)), Ok(b'i' - b'a'));
	}

	#[test]
	fn parse_crlf() {
		let grid: Grid = "Sb\r\naE\r\n".parse().unwrap();
		assert_eq!((grid.width(), grid.height()), (2, 2));
		assert_eq!(grid.end_pos, Position::new(1, 1));
	}

	#[test_case("" => FormatError::Empty; "empty")]
	#[test_case("\n\n" => FormatError::Empty; "blank")]
	#[test_case("Sab\naE\n" => FormatError::LineLen { line: 2, len: Some(3), found: 2 }; "ragged")]
	#[test_case("Sa\n\naE\n" => FormatError::LineLen { line: 2, len: Some(2), found: 0 }; "blank line")]
	#[test_case("Sa\naX\n" => FormatError::InvalidChar { line: 2, column: 2, found: 'X' }; "uppercase")]
	#[test_case("S1\naE\n" => FormatError::InvalidChar { line: 1, column: 2, found: '1' }; "digit")]
	#[test_case("Sé\naE\n" => FormatError::InvalidChar { line: 1, column: 2, found: 'é' }; "non-ascii")]
	#[test_case("éa\nSE\n" => FormatError::InvalidChar { line: 1, column: 1, found: 'é' }; "non-ascii width")]
	#[test_case("SS\naE\n" => FormatError::DuplicateStart { line: 1, column: 2 }; "two starts")]
	#[test_case("SE\nEa\n" => FormatError::DuplicateEnd { line: 2, column: 1 }; "two ends")]
	#[test_case("ab\naE\n" => FormatError::NoStart; "no start")]
	#[test_case("Sb\naa\n" => FormatError::NoEnd; "no end")]
	fn parse_error(input: &str) -> FormatError {
		input.parse::<Grid>().err().unwrap()
	}

	#[test_case(FormatError::Empty => "empty heightmap"; "empty")]
	#[test_case(FormatError::LineLen { line: 2, len: Some(3), found: 2 }
		=> "line 2 has length 2, expected 3"; "ragged")]
	#[test_case(FormatError::InvalidChar { line: 1, column: 2, found: 'é' }
		=> "invalid character 'é' at 1:2"; "non-ascii")]
	#[test_case(FormatError::DuplicateEnd { line: 2, column: 1 }
		=> "duplicate end marker at 2:1"; "two ends")]
	#[test_case(FormatError::NoStart => "no start marker"; "no start")]
	fn format_error_display(error: FormatError) -> String {
		error.to_string()
	}

	#[test_case(-1, 0; "west of grid")]
	#[test_case(0, -1; "north of grid")]
	#[test_case(8, 0; "east of grid")]
	#[test_case(0, 5; "south of grid")]
	fn elevation_out_of_range(x: isize, y: isize) {
		let grid: Grid = EXAMPLE.parse().unwrap();
		let pos = Position::new(x, y);
		assert!(!grid.contains(pos));
		assert_eq!(grid.elevation(pos), Err(OutOfRange { pos }));
	}

	#[test]
	fn cells_with_elevation() {
		let grid: Grid = EXAMPLE.parse().unwrap();
		let lowest = grid.cells_with_elevation(0).collect::<Vec<_>>();
		assert_eq!(lowest.len(), 6);
		assert_eq!(lowest[..3], [Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)]);
		assert!(lowest.windows(2).all(|w| (w[0].y, w[0].x) < (w[1].y, w[1].x)));
		assert_eq!(grid.cells_with_elevation(25).collect::<Vec<_>>(), [Position::new(4, 2), grid.end_pos]);
	}
}
