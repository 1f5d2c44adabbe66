// Solvability: 15-puzzle parity rule generalized to N×N boards

use crate::puzzle::Tile;

/// Number of out-of-order pairs among the non-blank values
pub fn count_inversions(values: &[usize]) -> usize {
    let mut inversions = 0;
    for i in 0..values.len() {
        for j in (i + 1)..values.len() {
            if values[i] > values[j] {
                inversions += 1;
            }
        }
    }
    inversions
}

/// Check a board given as values in position order (`values[0]` sits at position 1)
///
/// The blank is the value `size * size`.
pub fn is_solvable_values(values: &[usize], size: usize) -> bool {
    let blank = size * size;
    let Some(blank_index) = values.iter().position(|&v| v == blank) else {
        return false;
    };

    let non_blank: Vec<usize> = values.iter().copied().filter(|&v| v != blank).collect();
    let inversions = count_inversions(&non_blank);

    let empty_row = (blank_index + 1).div_ceil(size);
    let row_from_bottom = size - empty_row + 1;

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + row_from_bottom) % 2 == 1
    }
}

/// Check whether `tiles` can be reached from the solved board
pub fn is_solvable(tiles: &[Tile], size: usize) -> bool {
    let mut ordered: Vec<&Tile> = tiles.iter().collect();
    ordered.sort_by_key(|t| t.position);

    if ordered.iter().filter(|t| t.disabled).count() != 1 {
        return false;
    }

    // The disabled tile is the blank even if its value were mislabeled
    let blank = size * size;
    let values: Vec<usize> = ordered
        .iter()
        .map(|t| if t.disabled { blank } else { t.value })
        .collect();

    is_solvable_values(&values, size)
}
