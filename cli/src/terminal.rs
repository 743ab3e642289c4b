use std::fmt::Write as _;
use std::time::Duration;

use synapse_core::*;

/// Presenter that turns notifications into lines of text. The game loop prints them
/// after every command.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    lines: Vec<String>,
    completed_words: Vec<usize>,
}

impl TerminalPresenter {
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn completed_words(&self) -> &[usize] {
        &self.completed_words
    }

    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

fn coords_list(coords: &[Coord2]) -> String {
    coords
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn callout(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Locked => "is locked (#), tapping it clears your path",
        ObstacleKind::Hidden => "is masked (?), tap once to reveal it",
        ObstacleKind::Hazard => "is a hazard (!), it clears your path even once revealed",
        ObstacleKind::DirectionBlock => "has blocked edges, see the list below the grid",
    }
}

impl Presenter for TerminalPresenter {
    fn on_grid_ready(&mut self, grid: &Grid) {
        self.say(format!("New {0}x{0} grid", grid.size()));
        for kind in ObstacleKind::ALL {
            if let Some((x, y)) = grid.first_with(kind) {
                self.say(format!("Cell {x},{y} {}", callout(kind)));
            }
        }
    }

    fn draw_path(&mut self, path: &[Coord2]) {
        self.say(format!("Path: {}", coords_list(path)));
    }

    fn set_path_color(&mut self, color: PathColor) {
        match color {
            PathColor::InProgress => {}
            PathColor::Complete => self.say("Word found!"),
            PathColor::Rejected => self.say("Wrong letter, path cleared"),
        }
    }

    fn flash_hint(&mut self, (x, y): Coord2) {
        self.say(format!("Hint: one letter sits at {x},{y}"));
    }

    fn flash_word(&mut self, coords: &[Coord2]) {
        self.say(format!("Hint: {}", coords_list(coords)));
    }

    fn show_direction_warning(&mut self) {
        self.say("That way is blocked, path cleared");
    }

    fn play_sound(&mut self, sound: Sound) {
        log::trace!("sound: {:?}", sound);
    }

    fn on_cell_unmasked(&mut self, (x, y): Coord2) {
        self.say(format!("Cell {x},{y} unmasked"));
    }

    fn mark_word_complete(&mut self, index: usize) {
        self.completed_words.push(index);
    }

    fn on_level_completed(&mut self) {
        self.completed_words.clear();
        self.say("Level complete!");
    }

    fn on_swap(&mut self, (ax, ay): Coord2, (bx, by): Coord2) {
        self.say(format!("Letters at {ax},{ay} and {bx},{by} swapped"));
    }

    fn on_timer_warning(&mut self, remaining: Duration) {
        self.say(format!("Hurry, {}s left", remaining.as_secs()));
    }

    fn on_time_expired(&mut self) {
        self.say("Time is up! Type `restart` to try again");
    }
}

fn face_char(cell: &Cell) -> char {
    match cell.face() {
        CellFace::Letter(letter) => letter,
        CellFace::HazardLetter(letter) => letter.to_ascii_lowercase(),
        CellFace::Hazard => '!',
        CellFace::Locked => '#',
        CellFace::Masked => '?',
    }
}

/// Draws the grid with column and row numbers. Selected cells are bracketed, unmasked
/// hazards are lower-case and blocked edges are listed below the grid.
pub fn render(grid: &Grid) -> String {
    let mut out = String::from("   ");
    for x in 0..grid.size() {
        let _ = write!(out, "{x:^3}");
    }
    out.push('\n');

    let mut blocked = Vec::new();
    for (y, row) in grid.rows().enumerate() {
        let _ = write!(out, "{y:>2} ");
        for cell in row {
            let face = face_char(cell);
            if cell.is_selected() {
                let _ = write!(out, "[{face}]");
            } else {
                let _ = write!(out, " {face} ");
            }
            if !cell.blocked().is_empty() {
                blocked.push(cell);
            }
        }
        out.push('\n');
    }

    for cell in blocked {
        let (x, y) = cell.coords();
        let directions: Vec<_> = Direction::ALL
            .iter()
            .filter(|&&direction| cell.blocked().blocks(direction))
            .map(|direction| format!("{direction:?}").to_lowercase())
            .collect();
        let _ = writeln!(out, "   {x},{y} blocks {}", directions.join(", "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_faces_and_selection() {
        let grid = Grid::from_rows(&["AB", "CD"], &[(0, 0), (1, 1)])
            .unwrap()
            .with_obstacles((1, 0), Obstacles::locked())
            .unwrap()
            .with_obstacles((0, 1), Obstacles::hidden())
            .unwrap();
        let mut engine = SelectionEngine::new(grid, "AD");
        engine.tap((0, 0)).unwrap();

        assert_eq!(
            render(engine.grid()),
            "    0  1 \n 0 [A] # \n 1  ?  D \n"
        );
    }

    #[test]
    fn lists_blocked_edges() {
        let grid = Grid::from_rows(&["AB", "CD"], &[(0, 0)])
            .unwrap()
            .with_obstacles((1, 1), Obstacles::blocked(Directions::UP | Directions::LEFT))
            .unwrap();

        assert!(render(&grid).ends_with("   1,1 blocks up, left\n"));
    }

    #[test]
    fn new_grid_points_out_one_cell_per_obstacle_kind() {
        let grid = Grid::from_rows(&["ABC", "DEF", "GHI"], &[(0, 0)])
            .unwrap()
            .with_obstacles((2, 0), Obstacles::hazardous())
            .unwrap()
            .with_obstacles((1, 1), Obstacles::locked())
            .unwrap()
            .with_obstacles((0, 2), Obstacles::locked())
            .unwrap();
        let mut presenter = TerminalPresenter::default();

        presenter.on_grid_ready(&grid);

        assert_eq!(
            presenter.drain(),
            [
                "New 3x3 grid",
                "Cell 1,1 is locked (#), tapping it clears your path",
                "Cell 2,0 is a hazard (!), it clears your path even once revealed",
            ]
        );
    }

    #[test]
    fn presenter_collects_lines() {
        let mut presenter = TerminalPresenter::default();

        presenter.draw_path(&[(1, 1), (2, 2)]);
        presenter.set_path_color(PathColor::Rejected);
        presenter.mark_word_complete(2);

        assert_eq!(
            presenter.drain(),
            ["Path: 1,1 -> 2,2", "Wrong letter, path cleared"]
        );
        assert!(presenter.drain().is_empty());
        assert_eq!(presenter.completed_words(), &[2]);
    }
}
