use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn platform_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        let path = Config::config_file();
        if !path.exists() {
            // Give the editor something to start from.
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&path, cfg.to_yaml()?)?;
        }

        let fallback = platform_editor();
        let mut candidates = vec![editor.clone().unwrap_or_else(|| fallback.clone())];
        if candidates[0] != fallback {
            candidates.push(fallback);
        }

        match candidates.iter().find(|e| run_editor(e, &path)) {
            Some(used) => success(format!("Configuration file edited using '{used}'")),
            None => warning(format!(
                "No usable editor among: {}. Edit {} manually.",
                candidates.join(", "),
                path.display()
            )),
        }
    }

    Ok(())
}
