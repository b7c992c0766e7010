use std::io::{self, BufRead, Write};

use crate::i18n::{Locale, Msg};

/// Read one trimmed line after printing `label: `. `None` on end of input.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`prompt`], but an empty answer keeps `current`.
pub fn prompt_default(label: &str, current: &str) -> io::Result<Option<String>> {
    let answer = prompt(&format!("{label} [{current}]"))?;
    Ok(answer.map(|a| if a.is_empty() { current.to_string() } else { a }))
}

pub fn prompt_secret(label: &str) -> io::Result<String> {
    rpassword::prompt_password_stdout(&format!("{label}: "))
}

/// Ask for username and password; the password is read without echo.
pub fn read_credentials(locale: Locale) -> io::Result<Option<(String, String)>> {
    let Some(username) = prompt(Msg::FieldUsername.text(locale))? else {
        return Ok(None);
    };
    let password = prompt_secret(Msg::FieldPassword.text(locale))?;
    Ok(Some((username, password)))
}
