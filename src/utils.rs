pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Bare Telegram username: no whitespace, no leading `@`, no `t.me/` prefix.
pub fn telegram_handle(input: &str) -> String {
    let trimmed = input.trim();
    let bare = ["https://t.me/", "http://t.me/", "t.me/"]
        .iter()
        .find_map(|p| trimmed.strip_prefix(p))
        .unwrap_or(trimmed);
    bare.trim_start_matches('@').trim_end_matches('/').to_string()
}

/// Chat deep link for a Telegram username.
pub fn telegram_link(username: &str) -> String {
    format!("https://t.me/{}", telegram_handle(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme() {
        assert_eq!(normalize_url(" example.org/contacts "), "https://example.org/contacts");
        assert_eq!(normalize_url("http://127.0.0.1:8080/auth"), "http://127.0.0.1:8080/auth");
    }

    #[test]
    fn handle_strips_decorations() {
        assert_eq!(telegram_handle("@anna_k"), "anna_k");
        assert_eq!(telegram_handle(" https://t.me/anna_k/ "), "anna_k");
        assert_eq!(telegram_handle("t.me/@anna_k"), "anna_k");
        assert_eq!(telegram_handle("   "), "");
    }

    #[test]
    fn link_uses_bare_handle() {
        assert_eq!(telegram_link("@boris"), "https://t.me/boris");
    }
}
