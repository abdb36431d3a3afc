use anyhow::Result;

use faculty_directory_manager::db::SqliteStore;
use faculty_directory_manager::ui::{run_app, App};

fn main() -> Result<()> {
    let store = SqliteStore::open()?;
    let app = App::new(store)?;
    run_app(app)
}
