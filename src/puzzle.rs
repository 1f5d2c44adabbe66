// PuzzleState: the N×N sliding-tile board
//
// Tiles keep their value and blank flag forever; a move only swaps the
// positions of a tile and the blank, so values and positions stay a bijection
// onto 1..=N².

use serde::{Deserialize, Serialize};

use crate::rng::SeededRng;
use crate::solvability::is_solvable;
use crate::types::{Direction, PuzzleError, Result, Seed};

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Face value in `1..=N²`; `N²` is the blank
    pub value: usize,
    /// Current slot, 1-based, row-major
    pub position: usize,
    /// True only for the blank
    pub disabled: bool,
}

impl Tile {
    pub fn new(value: usize, position: usize, disabled: bool) -> Tile {
        Tile { value, position, disabled }
    }

    /// 1-based row of the tile's current slot
    pub fn row(&self, size: usize) -> usize {
        row_of(self.position, size)
    }

    /// 1-based column of the tile's current slot
    pub fn col(&self, size: usize) -> usize {
        col_of(self.position, size)
    }
}

/// 1-based row of `pos` on a board of width `size`
pub fn row_of(pos: usize, size: usize) -> usize {
    pos.div_ceil(size)
}

/// 1-based column of `pos` on a board of width `size`
pub fn col_of(pos: usize, size: usize) -> usize {
    match pos % size {
        0 => size,
        col => col,
    }
}

/// Tile as handed to the renderer, with pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub value: usize,
    pub position: usize,
    pub x: usize,
    pub y: usize,
    pub disabled: bool,
}

/// Immutable projection of the board for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub size: usize,
    pub tile_px: usize,
    pub seed: Seed,
    pub moves: u32,
    pub solved: bool,
    pub tiles: Vec<TileView>,
}

/// The board: N² tiles, the seed that produced them, and the move counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleState {
    size: usize,
    seed: Seed,
    tiles: Vec<Tile>,
    moves: u32,
}

impl PuzzleState {
    /// Solved board: value `i` at position `i`, blank in the last cell
    pub fn solved(size: usize) -> Result<PuzzleState> {
        if size < 2 {
            return Err(PuzzleError::InvalidSize(size));
        }
        let cells = size * size;
        let tiles = (1..=cells).map(|v| Tile::new(v, v, v == cells)).collect();
        Ok(PuzzleState { size, seed: 0, tiles, moves: 0 })
    }

    /// Board with `values[i]` placed at position `i + 1`
    pub fn from_values(values: &[usize], size: usize) -> Result<PuzzleState> {
        if size < 2 {
            return Err(PuzzleError::InvalidSize(size));
        }
        let cells = size * size;
        if values.len() != cells {
            return Err(PuzzleError::InvalidBoard(format!(
                "expected {} values, got {}",
                cells,
                values.len()
            )));
        }

        let mut seen = vec![false; cells + 1];
        for &v in values {
            if v == 0 || v > cells || seen[v] {
                return Err(PuzzleError::InvalidBoard(format!(
                    "values must be a permutation of 1..={}",
                    cells
                )));
            }
            seen[v] = true;
        }

        let tiles = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Tile::new(v, i + 1, v == cells))
            .collect();
        Ok(PuzzleState { size, seed: 0, tiles, moves: 0 })
    }

    /// Tag the board with the seed it is played under
    pub fn with_seed(mut self, seed: Seed) -> PuzzleState {
        self.seed = seed;
        self
    }

    /// Deterministically shuffle a board of `size` from `seed`
    ///
    /// Permutations are drawn from `seed`, `seed + 1`, ... until a solvable one
    /// appears. Gives up after `max_attempts` draws.
    pub fn shuffle(seed: Seed, size: usize, max_attempts: u32) -> Result<PuzzleState> {
        let mut board = PuzzleState::solved(size)?;
        board.seed = seed;

        let cells = size * size;
        let mut attempt_seed = seed;

        for attempt in 1..=max_attempts {
            let values = SeededRng::permutation(attempt_seed, cells);
            for (tile, value) in board.tiles.iter_mut().zip(values) {
                tile.value = value;
                tile.disabled = value == cells;
            }
            attempt_seed = attempt_seed.wrapping_add(1);

            if is_solvable(&board.tiles, size) {
                log::debug!(
                    "shuffled {}x{} board from seed {} in {} attempt(s)",
                    size,
                    size,
                    seed,
                    attempt
                );
                return Ok(board);
            }
        }

        log::error!(
            "no solvable {}x{} board from seed {} after {} attempts",
            size,
            size,
            seed,
            max_attempts
        );
        Err(PuzzleError::ShuffleExhausted { seed, attempts: max_attempts })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Seed this board was requested with
    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn reset_moves(&mut self) {
        self.moves = 0;
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Index of the blank tile
    pub fn blank_index(&self) -> Option<usize> {
        self.tiles.iter().position(|t| t.disabled)
    }

    /// Index of the tile currently sitting at `position`
    pub fn tile_at(&self, position: usize) -> Option<usize> {
        self.tiles.iter().position(|t| t.position == position)
    }

    /// Try to slide tile `index` into the blank
    ///
    /// Returns `Ok(false)` when the tile is not an orthogonal neighbour of the
    /// blank; that is an ordinary no-op, not an error.
    pub fn move_tile(&mut self, index: usize) -> Result<bool> {
        let tile = *self.tiles.get(index).ok_or(PuzzleError::TileNotFound(index))?;
        let Some(blank_index) = self.blank_index() else {
            return Ok(false);
        };
        let blank = self.tiles[blank_index];

        let distance = tile.row(self.size).abs_diff(blank.row(self.size))
            + tile.col(self.size).abs_diff(blank.col(self.size));
        if distance != 1 {
            return Ok(false);
        }

        self.tiles[index].position = blank.position;
        self.tiles[blank_index].position = tile.position;
        self.moves += 1;
        Ok(true)
    }

    /// Tile that would slide into the blank for an arrow-key press
    pub fn neighbor_for(&self, direction: Direction) -> Option<usize> {
        let blank = self.tiles[self.blank_index()?];
        let (pos, size) = (blank.position, self.size);

        let target = match direction {
            Direction::Left if blank.col(size) < size => pos + 1,
            Direction::Right if blank.col(size) > 1 => pos - 1,
            Direction::Up if blank.row(size) < size => pos + size,
            Direction::Down if blank.row(size) > 1 => pos - size,
            _ => return None,
        };

        self.tile_at(target)
    }

    /// Slide the neighbour selected by `direction`, if any
    pub fn slide(&mut self, direction: Direction) -> bool {
        match self.neighbor_for(direction) {
            Some(index) => self.move_tile(index).unwrap_or(false),
            None => false,
        }
    }

    /// True when every tile sits at the coordinates implied by its value
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(|tile| {
            let expected_col = (tile.value - 1) % self.size;
            let expected_row = (tile.value - 1) / self.size;
            tile.col(self.size) - 1 == expected_col && tile.row(self.size) - 1 == expected_row
        })
    }

    pub fn snapshot(&self, tile_px: usize) -> BoardSnapshot {
        let tiles = self
            .tiles
            .iter()
            .map(|t| TileView {
                value: t.value,
                position: t.position,
                x: (t.col(self.size) - 1) * tile_px,
                y: (t.row(self.size) - 1) * tile_px,
                disabled: t.disabled,
            })
            .collect();

        BoardSnapshot {
            size: self.size,
            tile_px,
            seed: self.seed,
            moves: self.moves,
            solved: self.is_solved(),
            tiles,
        }
    }
}
