use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{JsonFileStore, RecordStore};
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - an empty record file, unless one already exists
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.data.clone(), cli.test)?;

    println!("⚙️  Initializing hwcontrol…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Records    : {}", &cfg.data_file);

    let store = JsonFileStore::open(&cfg.data_file)?;
    let count = store.list()?.len();
    tracing::info!(path = %cfg.data_file, records = count, "Record file ready");

    println!("✅ Record file ready ({count} records)");
    println!("🎉 hwcontrol initialization completed!");
    Ok(())
}
