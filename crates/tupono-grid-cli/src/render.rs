//! ASCII drawing of a sheet
//!
//! Every region is drawn as one box, so merged regions have no inner borders. Text is the
//! plain-text form of the master's content, placed by its alignment and truncated to the
//! box.

use tupono_grid::{content, Cell, Grid, HorizontalAlign, Region, VerticalAlign};

const MIN_WIDTH: usize = 3;

/// Draw `grid` with columns at most `max_width` characters wide
pub fn render(grid: &Grid, max_width: usize) -> String {
    let widths = column_widths(grid, max_width.max(MIN_WIDTH));

    let mut xs = Vec::with_capacity(widths.len() + 1);
    xs.push(0);
    for width in &widths {
        let last = xs[xs.len() - 1];
        xs.push(last + width + 1);
    }
    let ys: Vec<usize> = (0..=grid.rows() as usize).map(|row| row * 2).collect();

    let mut canvas = Canvas::new(xs[xs.len() - 1] + 1, ys[ys.len() - 1] + 1);

    for region in grid.regions() {
        let top = ys[region.start.row as usize];
        let bottom = ys[region.end.row as usize + 1];
        let left = xs[region.start.col as usize];
        let right = xs[region.end.col as usize + 1];

        canvas.frame(top, left, bottom, right);

        if let Some(cell) = grid.cell(region.start) {
            let lines = text_lines(cell);
            canvas.text(top + 1, left + 1, bottom - top - 1, right - left - 1, &lines, cell);
        }
    }

    canvas.finish()
}

fn text_lines(cell: &Cell) -> Vec<String> {
    content::plain_text(&cell.content)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Width of each column, sized by the single-column regions in it
fn column_widths(grid: &Grid, max_width: usize) -> Vec<usize> {
    let mut widths = vec![MIN_WIDTH; grid.cols() as usize];

    for region in grid.regions().filter(|region| region.col_count() == 1) {
        let Some(cell) = grid.cell(region.start) else {
            continue;
        };
        let longest = text_lines(cell)
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = &mut widths[region.start.col as usize];
        *width = (*width).max(longest.min(max_width));
    }

    widths
}

struct Canvas {
    width: usize,
    chars: Vec<Vec<char>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            chars: vec![vec![' '; width]; height],
        }
    }

    fn frame(&mut self, top: usize, left: usize, bottom: usize, right: usize) {
        for x in left + 1..right {
            self.line(top, x, '-');
            self.line(bottom, x, '-');
        }
        for y in top + 1..bottom {
            self.line(y, left, '|');
            self.line(y, right, '|');
        }
        for (y, x) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
            self.chars[y][x] = '+';
        }
    }

    /// Draw a border character, turning crossings into corners
    fn line(&mut self, y: usize, x: usize, ch: char) {
        let slot = &mut self.chars[y][x];
        *slot = match *slot {
            ' ' => ch,
            existing if existing == ch => ch,
            _ => '+',
        };
    }

    fn text(
        &mut self,
        top: usize,
        left: usize,
        height: usize,
        width: usize,
        lines: &[String],
        cell: &Cell,
    ) {
        let shown = lines.len().min(height);
        let first = match cell.v_align {
            VerticalAlign::Top => 0,
            VerticalAlign::Middle => (height - shown) / 2,
            VerticalAlign::Bottom => height - shown,
        };

        for (offset, line) in lines.iter().take(shown).enumerate() {
            let text: Vec<char> = line.chars().take(width).collect();
            let pad = width - text.len();
            let indent = match cell.align {
                HorizontalAlign::Left => 0,
                HorizontalAlign::Center => pad / 2,
                HorizontalAlign::Right => pad,
            };
            let row = &mut self.chars[top + first + offset];
            for (i, ch) in text.into_iter().enumerate() {
                row[left + indent + i] = ch;
            }
        }
    }

    fn finish(self) -> String {
        let mut out = String::with_capacity(self.chars.len() * (self.width + 1));
        for row in self.chars {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// One-line description of a region for listings
pub fn describe(region: Region, cell: &Cell) -> String {
    let text = content::plain_text(&cell.content);
    let preview: String = text.lines().next().unwrap_or("").chars().take(32).collect();
    if preview.is_empty() {
        format!("{} ({}x{})", region, region.row_count(), region.col_count())
    } else {
        format!(
            "{} ({}x{}) {:?}",
            region,
            region.row_count(),
            region.col_count(),
            preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tupono_grid::{CellCoord, FormatPatch};

    #[test]
    fn test_render_singletons() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.set_content(CellCoord::new(0, 0), "Hi");

        assert_eq!(render(&grid, 24), "+---+---+\n|Hi |   |\n+---+---+\n");
    }

    #[test]
    fn test_render_merged_region_has_no_inner_border() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.merge_right(CellCoord::new(0, 0));
        grid.set_content(CellCoord::new(0, 0), "<b>Hi</b>");

        assert_eq!(render(&grid, 24), "+-------+\n|Hi     |\n+-------+\n");
    }

    #[test]
    fn test_render_junctions_under_merge() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.merge_right(CellCoord::new(0, 0));

        let expected = "\
+-------+
|       |
+---+---+
|   |   |
+---+---+
";
        assert_eq!(render(&grid, 24), expected);
    }

    #[test]
    fn test_render_alignment() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.merge_down(CellCoord::new(0, 0));
        grid.set_content(CellCoord::new(0, 0), "ab");
        grid.set_formatting(
            CellCoord::new(0, 0),
            &FormatPatch::new()
                .align(HorizontalAlign::Right)
                .v_align(VerticalAlign::Bottom),
        );

        assert_eq!(render(&grid, 24), "+---+\n|   |\n|   |\n| ab|\n+---+\n");
    }

    #[test]
    fn test_render_truncates_to_max_width() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set_content(CellCoord::new(0, 0), "abcdefgh");

        assert_eq!(render(&grid, 5), "+-----+\n|abcde|\n+-----+\n");
    }

    #[test]
    fn test_describe_region() {
        let region = Region::from_span(CellCoord::new(0, 0), 2, 3);
        let cell = Cell::new().with_content("<p>Total</p>");
        assert_eq!(describe(region, &cell), "A1:C2 (2x3) \"Total\"");
    }
}
