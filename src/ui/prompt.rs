//! Interactive yes/no questions on stdin.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask before clobbering `path`. Anything but `y`/`yes` means no.
pub fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));
    ask_yes_no("Overwrite? [y/N]: ", io::stdin().lock())
}

fn ask_yes_no(question: &str, mut input: impl BufRead) -> AppResult<bool> {
    print!("{question}");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::ask_yes_no;

    #[test]
    fn only_yes_confirms() {
        assert!(ask_yes_no("", "Y\n".as_bytes()).unwrap());
        assert!(ask_yes_no("", " yes \n".as_bytes()).unwrap());
        assert!(!ask_yes_no("", "\n".as_bytes()).unwrap());
        assert!(!ask_yes_no("", "nope\n".as_bytes()).unwrap());
    }
}
