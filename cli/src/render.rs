use std::fmt::{self, Write};
use std::time::Duration;

use cubesweeper_core::*;

/// `mm:ss`, minutes keep growing past 99.
pub fn format_time(time: Duration) -> String {
    let seconds = time.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn cell_glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Pulsing => '!',
        CellView::Empty(0) => '.',
        CellView::Empty(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Reward => '$',
        CellView::Hazard => '*',
    }
}

/// One block per z slice, rows are y and columns are x.
pub fn render_grid<C: Clock>(session: &Session<C>) -> String {
    let mut out = String::new();
    match write_grid(&mut out, session) {
        Ok(()) => out,
        Err(err) => {
            log::warn!("Could not render grid: {}", err);
            String::new()
        }
    }
}

fn write_grid<C: Clock>(out: &mut impl Write, session: &Session<C>) -> fmt::Result {
    let side = session.side();

    for z in 0..side {
        writeln!(out, "z = {z}")?;
        write!(out, "   ")?;
        for x in 0..side {
            write!(out, " {x}")?;
        }
        writeln!(out)?;

        for y in 0..side {
            write!(out, "{y:>2} ")?;
            for x in 0..side {
                let glyph = session
                    .cell_view((x, y, z))
                    .map(cell_glyph)
                    .unwrap_or(' ');
                write!(out, " {glyph}")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn status_line<C: Clock>(session: &Session<C>) -> String {
    let phase = match session.phase() {
        Phase::InProgress => "in progress",
        Phase::Won => "victory!",
        Phase::Lost => "defeat, you hit a hazard",
    };
    format!(
        "rewards {}/{}  revealed {}/{}  time {}  [{}]",
        session.rewards_collected(),
        session.total_rewards(),
        session.cells_revealed(),
        session.total_safe_cells(),
        format_time(session.elapsed()),
        phase
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_millis(61_999)), "01:01");
        assert_eq!(format_time(Duration::from_secs(6000)), "100:00");
    }

    #[test]
    fn render_shows_slices_and_glyphs() {
        let grid = Grid::from_coords(2, &[(1, 1, 1)], &[(1, 0, 0)]).unwrap();
        let mut session = Session::from_grid(grid, SessionOptions::default(), ManualClock::new());
        session.reveal((0, 1, 1)).unwrap();
        session.reveal((1, 0, 0)).unwrap();
        assert_eq!(session.phase(), Phase::Won);

        let rendered = render_grid(&session);

        assert_eq!(
            rendered,
            "z = 0\n    0 1\n 0  # $\n 1  # #\n\nz = 1\n    0 1\n 0  # #\n 1  1 #\n\n"
        );
    }

    /// Accepts at most `capacity` bytes, then fails every write.
    struct Bounded {
        out: String,
        capacity: usize,
    }

    impl Write for Bounded {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.out.len() + s.len() > self.capacity {
                return Err(fmt::Error);
            }
            self.out.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn write_grid_stops_at_first_failed_write() {
        let grid = Grid::from_coords(2, &[(1, 1, 1)], &[(1, 0, 0)]).unwrap();
        let session = Session::from_grid(grid, SessionOptions::default(), ManualClock::new());
        let mut out = Bounded {
            out: String::new(),
            capacity: 8,
        };

        assert_eq!(write_grid(&mut out, &session), Err(fmt::Error));
        assert_eq!(out.out, "z = 0\n");
    }

    #[test]
    fn status_line_reports_counters() {
        let grid = Grid::from_coords(2, &[(1, 1, 1)], &[(1, 0, 0)]).unwrap();
        let mut session = Session::from_grid(grid, SessionOptions::default(), ManualClock::new());
        session.reveal((1, 1, 1)).unwrap();

        assert_eq!(
            status_line(&session),
            "rewards 0/1  revealed 1/7  time 00:00  [defeat, you hit a hazard]"
        );
        assert_eq!(cell_glyph(session.cell_view((1, 1, 1)).unwrap()), '*');
    }
}
