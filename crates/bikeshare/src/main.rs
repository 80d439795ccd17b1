mod bootstrap;

use std::io;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_data::reader::RecordStore;
use bikeshare_runtime::prompt::Prompter;
use bikeshare_runtime::session::Session;
use bikeshare_ui::screen::Screen;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    let catalog = bootstrap::resolve_catalog(&settings)?;
    tracing::info!("Cities available: {}", catalog.names().join(", "));

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut session = Session::new(
        prompter,
        RecordStore::new(catalog),
        Screen::new(!settings.no_clear),
    );

    match session.run() {
        Ok(()) => {
            tracing::info!("Session finished");
            Ok(())
        }
        // Leaving through the escape sentinel or a closed stdin is a normal exit.
        Err(e) if e.is_user_exit() => {
            tracing::info!("Session ended: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
