use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::sync::Arc;

/// Start the web front-end on a multi-threaded tokio runtime.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { host, port } = cmd {
        let mut cfg = cfg.clone();
        cfg.apply_env_overrides()?;
        if let Some(h) = host {
            cfg.host = h.clone();
        }
        if let Some(p) = port {
            cfg.port = *p;
        }

        let store = Arc::new(open_store(&cfg)?);
        info(format!(
            "Serving {} on http://{}:{}",
            cfg.data_file, cfg.host, cfg.port
        ));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::Server(format!("cannot start runtime: {e}")))?;
        runtime.block_on(crate::web::serve(cfg, store))?;
    }
    Ok(())
}
