///! Some utility functions

use crate::render::{CellFlags, GoalView};

/// A debug utility that pretty-prints a list of goals with their stats
pub fn print_goal_list(views: &[GoalView]) {
    for view in views {
        println!("GOAL {}", view.name);
        println!("    {} completed, {} missed, streak {}",
            view.stats.completed, view.stats.missed, view.stats.streak);
    }
}

/// A debug utility that pretty-prints the contribution grid of a goal: a month header row,
/// then one row per weekday (Sunday first), one glyph per cell
pub fn print_grid(view: &GoalView) {
    // Each week column is two characters wide (glyph + space)
    let mut header = String::new();
    for span in &view.month_spans {
        let width = span.weeks * 2;
        let name = if span.name.len() > width { &span.name[..width] } else { span.name };
        header.push_str(&format!("{:<width$}", name, width = width));
    }
    println!("{}", header);

    for weekday in 0..7 {
        let mut row = String::new();
        for week in &view.weeks {
            row.push(cell_glyph(week[weekday].flags));
            row.push(' ');
        }
        println!("{}", row);
    }
}

fn cell_glyph(flags: CellFlags) -> char {
    if flags.contains(CellFlags::COMPLETED) {
        '✓'
    } else if flags.contains(CellFlags::MISSED) {
        'x'
    } else if flags.contains(CellFlags::FUTURE) {
        ' '
    } else if flags.contains(CellFlags::OTHER_YEAR) {
        '.'
    } else {
        '·'
    }
}

/// Waits for the user to press enter, so that a demo binary can be followed step by step
pub fn pause() {
    let mut s = String::new();
    println!("Press enter to continue...");
    std::io::stdin().read_line(&mut s).expect("Unable to read stdin");
}
