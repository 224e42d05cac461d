//! Penalty smoothing.
//!
//! A separable box blur: one horizontal and one vertical pass, each a
//! running sum over a `2r + 1` window, so the whole blur is O(cells)
//! regardless of the radius. Window indices are clamped to the field, which
//! replicates edge values instead of padding with zeros; border cells are
//! therefore not pulled towards 0 and a uniform field stays exactly uniform.

/// Largest radius the window sums are computed for; larger radii blur as
/// this one does.
const MAX_RADIUS: usize = u32::MAX as usize;

/// Blur a row-major `width × height` field in place with kernel radius
/// `radius`. Each value becomes the rounded mean of its `(2r + 1)²` window.
pub fn box_blur(field: &mut [i32], width: usize, height: usize, radius: usize) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(field.len(), width * height);
    let radius = radius.min(MAX_RADIUS);

    let area = (2.0 * radius as f64 + 1.0).powi(2);

    // Horizontal pass: window sums along each row.
    let mut horizontal = vec![0i128; field.len()];
    for y in 0..height {
        let row = &field[y * width..(y + 1) * width];
        let out = &mut horizontal[y * width..(y + 1) * width];
        slide(width, radius, |x| row[x] as i128, |x, sum| out[x] = sum);
    }

    // Vertical pass over the row sums.
    for x in 0..width {
        let column = |y: usize| horizontal[y * width + x];
        slide(height, radius, column, |y, sum| {
            field[y * width + x] = rounded_mean(sum, area)
        });
    }
}

/// Emit the sum of the edge-clamped window `i - r ..= i + r` for every `i`
/// in `0..len`.
fn slide(
    len: usize,
    r: usize,
    value: impl Fn(usize) -> i128,
    mut emit: impl FnMut(usize, i128),
) {
    let last = len - 1;
    // Window at 0: r + 1 copies of the first value, the values up to r, and
    // the last value repeated for the part of the window past the end.
    let inside = r.min(last);
    let mut sum = (r as i128 + 1) * value(0)
        + (1..=inside).map(&value).sum::<i128>()
        + (r - inside) as i128 * value(last);
    emit(0, sum);
    for i in 1..len {
        let remove = i.saturating_sub(r.saturating_add(1));
        let add = i.saturating_add(r).min(last);
        sum += value(add) - value(remove);
        emit(i, sum);
    }
}

#[inline]
fn rounded_mean(sum: i128, area: f64) -> i32 {
    (sum as f64 / area).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_field_is_unchanged() {
        for radius in [1, 2, 5, 12] {
            let mut field = vec![7; 6 * 4];
            box_blur(&mut field, 6, 4, radius);
            assert!(field.iter().all(|&v| v == 7), "radius {radius}: {field:?}");
        }
    }

    #[test]
    fn zero_radius_is_identity() {
        let mut field = vec![1, 5, 9, 0, 3, 2];
        box_blur(&mut field, 3, 2, 0);
        assert_eq!(field, vec![1, 5, 9, 0, 3, 2]);
    }

    #[test]
    fn spike_spreads_over_kernel() {
        let mut field = vec![0; 25];
        field[2 * 5 + 2] = 90;
        box_blur(&mut field, 5, 5, 1);
        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..=3).contains(&x) && (1..=3).contains(&y) { 10 } else { 0 };
                assert_eq!(field[y * 5 + x], expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn edges_replicate() {
        let mut field = vec![0, 0, 9];
        box_blur(&mut field, 3, 1, 1);
        // Right edge: window {0, 9, 9} replicated over 3 rows → 54 / 9.
        assert_eq!(field, vec![0, 3, 6]);
    }

    #[test]
    fn radius_larger_than_field() {
        let mut field = vec![4, 8];
        box_blur(&mut field, 2, 1, 3);
        // Row windows: x=0 → 4·4 + 3·8 = 40, x=1 → 3·4 + 4·8 = 44; times 7 rows.
        assert_eq!(field, vec![(40.0f64 / 7.0).round() as i32, (44.0f64 / 7.0).round() as i32]);
    }

    #[test]
    fn huge_radius_averages_towards_edges() {
        let mut field = vec![0, 100, 0];
        box_blur(&mut field, 3, 1, usize::MAX);
        // The window covers the clamped edges almost entirely, so every mean
        // rounds to the edge value.
        assert_eq!(field, vec![0, 0, 0]);

        let mut field = vec![100, 100, 100, 100];
        box_blur(&mut field, 2, 2, 1 << 32);
        assert_eq!(field, vec![100; 4]);
    }
}
