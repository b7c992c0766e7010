//! Interactive page: the terminal counterpart of the directory web page.

use std::io::{self, Write};
use std::str::FromStr;

use crate::api::models::ContactDraft;
use crate::api::Directory;
use crate::controller::Page;
use crate::i18n::Msg;
use crate::ui::contact_list::render_contacts;
use crate::ui::editors::render_editors;
use crate::ui::login::{prompt, prompt_default, prompt_secret, read_credentials};
use crate::ui::toast::show_notices;
use crate::utils::telegram_link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Link(i64),
    Login,
    Logout,
    Add,
    Edit(i64),
    Delete(i64),
    Passwd,
    Editors,
    AddEditor,
    DeleteEditor(i64),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("").to_lowercase();
        let arg = words.next();
        let id = || -> Result<i64, String> {
            arg.ok_or_else(|| format!("{name}: missing id"))?
                .trim_start_matches('#')
                .parse::<i64>()
                .map_err(|_| format!("{name}: id must be a number"))
        };
        let cmd = match name.as_str() {
            "list" | "ls" => Command::List,
            "link" | "open" => Command::Link(id()?),
            "login" => Command::Login,
            "logout" => Command::Logout,
            "add" => Command::Add,
            "edit" => Command::Edit(id()?),
            "delete" | "rm" => Command::Delete(id()?),
            "passwd" => Command::Passwd,
            "editors" => Command::Editors,
            "add-editor" => Command::AddEditor,
            "delete-editor" => Command::DeleteEditor(id()?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}

/// Command summary for the current session; editor management is listed
/// only for super-admins.
pub fn help_lines(can_edit: bool, can_manage_editors: bool) -> Vec<&'static str> {
    let mut lines = vec!["list              show the directory", "link <id>         print a contact's chat link"];
    if can_edit {
        lines.extend([
            "add               add a contact",
            "edit <id>         edit a contact",
            "delete <id>       delete a contact",
            "passwd            change your password",
        ]);
    }
    if can_manage_editors {
        lines.extend([
            "editors           list editors",
            "add-editor        create an editor",
            "delete-editor <id> delete an editor",
        ]);
    }
    lines.push(if can_edit { "logout            leave editing mode" } else { "login             enter editing mode" });
    lines.extend(["help              this list", "quit              exit"]);
    lines
}

pub async fn run_shell<D: Directory>(page: &mut Page<D>) -> io::Result<()> {
    page.list_contacts().await;
    show_page(page)?;

    loop {
        let label = match page.current_editor() {
            Some(editor) => format!("{}>", editor.username),
            None => String::from(">"),
        };
        let Some(line) = prompt(&label)? else { break };
        if line.is_empty() {
            continue;
        }
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                log::debug!("{e}");
                refuse(page, Msg::UnknownCommand);
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        dispatch(page, cmd).await?;
    }
    Ok(())
}

async fn dispatch<D: Directory>(page: &mut Page<D>, cmd: Command) -> io::Result<()> {
    let locale = page.locale();
    match cmd {
        Command::List => {
            page.list_contacts().await;
            show_page(page)?;
        }
        Command::Link(id) => match page.contact(id) {
            Some(contact) => println!("{}", telegram_link(&contact.telegram_username)),
            None => refuse(page, Msg::ContactNotFound),
        },
        Command::Login => {
            if let Some((username, password)) = read_credentials(locale)? {
                if page.login(&username, &password).await {
                    show_notices(page.take_notices());
                    page.list_contacts().await;
                    show_page(page)?;
                }
            }
        }
        Command::Logout => {
            page.logout();
            show_page(page)?;
        }
        Command::Add => {
            if !page.can_edit() {
                refuse(page, Msg::LoginRequired);
            } else {
                let draft = page.new_contact_draft();
                if let Some(draft) = fill_draft(page, draft)? {
                    if page.save_contact(draft).await {
                        show_page(page)?;
                    }
                }
            }
        }
        Command::Edit(id) => match page.edit_contact_draft(id) {
            _ if !page.can_edit() => refuse(page, Msg::LoginRequired),
            None => refuse(page, Msg::ContactNotFound),
            Some(draft) => {
                if let Some(draft) = fill_draft(page, draft)? {
                    if page.save_contact(draft).await {
                        show_page(page)?;
                    }
                }
            }
        },
        Command::Delete(id) => {
            if page.delete_contact(id).await {
                show_page(page)?;
            }
        }
        Command::Passwd => {
            if !page.can_edit() {
                refuse(page, Msg::LoginRequired);
            } else {
                let old = prompt_secret(Msg::FieldOldPassword.text(locale))?;
                let new = prompt_secret(Msg::FieldNewPassword.text(locale))?;
                let repeat = prompt_secret(Msg::FieldRepeatPassword.text(locale))?;
                if new != repeat {
                    refuse(page, Msg::PasswordMismatch);
                } else {
                    page.change_password(&old, &new).await;
                }
            }
        }
        Command::Editors => {
            if page.list_editors().await {
                show_editors(page)?;
            }
        }
        Command::AddEditor => {
            if !page.can_manage_editors() {
                refuse(page, Msg::NotPermitted);
            } else if let Some(username) = prompt(Msg::FieldUsername.text(locale))? {
                let full_name = prompt(Msg::FieldFullName.text(locale))?.unwrap_or_default();
                let password = prompt_secret(Msg::FieldPassword.text(locale))?;
                if page.create_editor(&username, &full_name, &password).await {
                    show_editors(page)?;
                }
            }
        }
        Command::DeleteEditor(id) => {
            if page.delete_editor(id).await {
                show_editors(page)?;
            }
        }
        Command::Help => {
            for line in help_lines(page.can_edit(), page.can_manage_editors()) {
                println!("  {line}");
            }
        }
        Command::Quit => {}
    }
    show_notices(page.take_notices());
    Ok(())
}

/// Walk the edit dialog fields; `None` when input ends midway.
fn fill_draft<D: Directory>(page: &Page<D>, mut draft: ContactDraft) -> io::Result<Option<ContactDraft>> {
    let locale = page.locale();
    let Some(name) = prompt_default(Msg::FieldName.text(locale), &draft.name)? else {
        return Ok(None);
    };
    let Some(handle) = prompt_default(Msg::FieldTelegram.text(locale), &draft.telegram_username)? else {
        return Ok(None);
    };
    let current_position = draft.position.clone().unwrap_or_default();
    let Some(position) = prompt_default(Msg::FieldPosition.text(locale), &current_position)? else {
        return Ok(None);
    };
    let Some(order) = prompt_default(Msg::FieldOrder.text(locale), &draft.display_order.to_string())? else {
        return Ok(None);
    };
    draft.name = name;
    draft.telegram_username = handle;
    draft.position = Some(position).filter(|p| !p.is_empty());
    draft.display_order = order.parse().unwrap_or(draft.display_order);
    Ok(Some(draft))
}

fn show_page<D: Directory>(page: &mut Page<D>) -> io::Result<()> {
    show_notices(page.take_notices());
    let mut out = io::stdout().lock();
    writeln!(out)?;
    render_contacts(&mut out, page.locale(), page.contacts(), page.can_edit())?;
    writeln!(out)?;
    out.flush()
}

fn show_editors<D: Directory>(page: &mut Page<D>) -> io::Result<()> {
    show_notices(page.take_notices());
    let mut out = io::stdout().lock();
    render_editors(&mut out, page)?;
    out.flush()
}

fn refuse<D: Directory>(page: &Page<D>, msg: Msg) {
    eprintln!("✗ {}", msg.text(page.locale()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_ids() {
        assert_eq!("edit 4".parse::<Command>(), Ok(Command::Edit(4)));
        assert_eq!("rm #12".parse::<Command>(), Ok(Command::Delete(12)));
        assert_eq!("DELETE-EDITOR 3".parse::<Command>(), Ok(Command::DeleteEditor(3)));
        assert_eq!("  list ".parse::<Command>(), Ok(Command::List));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("edit".parse::<Command>().is_err());
        assert!("edit four".parse::<Command>().is_err());
        assert!("launch".parse::<Command>().is_err());
    }

    #[test]
    fn help_hides_editor_management_for_plain_editors() {
        let anonymous = help_lines(false, false).join("\n");
        assert!(anonymous.contains("login"));
        assert!(!anonymous.contains("add "));

        let editor = help_lines(true, false).join("\n");
        assert!(editor.contains("passwd"));
        assert!(!editor.contains("add-editor"));

        let admin = help_lines(true, true).join("\n");
        assert!(admin.contains("delete-editor"));
        assert!(admin.contains("logout"));
    }
}
