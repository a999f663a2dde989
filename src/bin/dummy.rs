use chrono::{Duration, Local};
use uuid::Uuid;

use habit_grid::app::{App, Command};
use habit_grid::memory_source::MemorySource;
use habit_grid::prefs::Prefs;
use habit_grid::store::GoalStore;
use habit_grid::utils;

/// An offline walkthrough against the in-memory source: creates a goal, toggles a few
/// days, and prints the rendered grid
#[tokio::main]
async fn main() {
    env_logger::init();

    let today = Local::now().date_naive();
    let store = GoalStore::new(MemorySource::new(), Uuid::new_v4());
    let prefs = Prefs::new(&std::env::temp_dir().join("habit-grid-prefs.json"));
    let mut app = App::new(store, prefs, today);

    app.handle(Command::CreateGoal { name: "Run".to_string() }, today).await.unwrap();
    let uid = app.store().goals()[0].uid().to_string();

    for days_back in &[0, 1, 2, 4] {
        let day = today - Duration::days(*days_back);
        app.handle(Command::ToggleDay { goal: uid.clone(), date: day }, today).await.unwrap();
    }
    // A second toggle turns the 4-days-ago one into a miss
    app.handle(Command::ToggleDay { goal: uid.clone(), date: today - Duration::days(4) }, today).await.unwrap();

    for view in app.views(today) {
        utils::print_grid(&view);
    }
    utils::print_goal_list(&app.views(today));
}
