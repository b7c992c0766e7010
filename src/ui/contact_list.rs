use std::io::{self, Write};

use crate::api::models::Contact;
use crate::i18n::{Locale, Msg};
use crate::utils::telegram_link;

/// Print the directory as cards, in the order the service returned them.
/// Ids are shown only in editing mode, where commands refer to them.
pub fn render_contacts<W: Write>(out: &mut W, locale: Locale, contacts: &[Contact], show_ids: bool) -> io::Result<()> {
    writeln!(out, "{}", Msg::DirectoryTitle.text(locale))?;
    writeln!(out, "{}", Msg::DirectorySubtitle.text(locale))?;
    writeln!(out)?;

    if contacts.is_empty() {
        writeln!(out, "  {}", Msg::NoContacts.text(locale))?;
        return Ok(());
    }

    for contact in contacts {
        let initial = contact.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
        if show_ids {
            writeln!(out, "[{initial}] {}  #{}", contact.name, contact.id)?;
        } else {
            writeln!(out, "[{initial}] {}", contact.name)?;
        }
        if let Some(position) = contact.position() {
            writeln!(out, "    {position}")?;
        }
        writeln!(
            out,
            "    {}: {}",
            Msg::WriteInTelegram.text(locale),
            telegram_link(&contact.telegram_username)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64, name: &str, position: Option<&str>) -> Contact {
        Contact {
            id,
            name: name.into(),
            telegram_username: format!("@{}", name.to_lowercase()),
            position: position.map(str::to_string),
            avatar_url: None,
            display_order: 0,
        }
    }

    fn render(contacts: &[Contact], show_ids: bool) -> String {
        let mut buf = Vec::new();
        render_contacts(&mut buf, Locale::En, contacts, show_ids).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cards_follow_given_order() {
        let text = render(&[contact(2, "Zoe", None), contact(1, "adam", Some("CEO"))], false);
        let zoe = text.find("[Z] Zoe").unwrap();
        let adam = text.find("[A] adam").unwrap();
        assert!(zoe < adam);
        assert!(text.contains("    CEO\n"));
        assert!(text.contains("https://t.me/zoe"));
        assert!(!text.contains("#2"));
    }

    #[test]
    fn ids_shown_in_editing_mode() {
        let text = render(&[contact(5, "Vera", None)], true);
        assert!(text.contains("[V] Vera  #5"));
    }

    #[test]
    fn empty_directory() {
        assert!(render(&[], false).contains("No contacts yet"));
    }
}
