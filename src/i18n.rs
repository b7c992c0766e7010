use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Every user-facing string of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    SuccessTitle,
    ErrorTitle,
    InfoTitle,

    DirectoryTitle,
    DirectorySubtitle,
    WriteInTelegram,
    NoContacts,
    EditorsTitle,
    SuperAdminRole,
    EditorRole,
    Active,
    Inactive,
    Protected,

    LoadContactsFailed,
    CredentialsRequired,
    InvalidCredentials,
    LoggedIn,
    LoggedOut,
    SessionExpired,
    LoginRequired,
    NotPermitted,

    ContactFieldsRequired,
    ContactAdded,
    ContactUpdated,
    ContactDeleted,
    ContactNotFound,
    SaveContactFailed,
    DeleteContactFailed,

    PasswordsRequired,
    PasswordChanged,
    WrongOldPassword,
    PasswordChangeFailed,

    LoadEditorsFailed,
    EditorFieldsRequired,
    EditorCreated,
    CreateEditorFailed,
    EditorDeleted,
    EditorNotFound,
    CannotDeleteSuperAdmin,
    DeleteEditorFailed,

    FieldName,
    FieldTelegram,
    FieldPosition,
    FieldOrder,
    FieldUsername,
    FieldPassword,
    FieldFullName,
    FieldOldPassword,
    FieldNewPassword,
    FieldRepeatPassword,
    PasswordMismatch,
    UnknownCommand,
}

impl Msg {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ru => self.ru(),
            Locale::En => self.en(),
        }
    }

    fn ru(self) -> &'static str {
        match self {
            Msg::SuccessTitle => "Успешно",
            Msg::ErrorTitle => "Ошибка",
            Msg::InfoTitle => "Информация",
            Msg::DirectoryTitle => "Контакты",
            Msg::DirectorySubtitle => "Свяжитесь с нами через Telegram",
            Msg::WriteInTelegram => "Написать в Telegram",
            Msg::NoContacts => "Контактов пока нет",
            Msg::EditorsTitle => "Редакторы",
            Msg::SuperAdminRole => "супер-админ",
            Msg::EditorRole => "редактор",
            Msg::Active => "активен",
            Msg::Inactive => "отключён",
            Msg::Protected => "удаление недоступно",
            Msg::LoadContactsFailed => "Не удалось загрузить контакты",
            Msg::CredentialsRequired => "Введите логин и пароль",
            Msg::InvalidCredentials => "Неверный логин или пароль",
            Msg::LoggedIn => "Вы вошли в режим редактирования",
            Msg::LoggedOut => "Вы вышли из режима редактирования",
            Msg::SessionExpired => "Сессия недействительна, войдите снова",
            Msg::LoginRequired => "Сначала войдите в режим редактирования",
            Msg::NotPermitted => "Недостаточно прав",
            Msg::ContactFieldsRequired => "Укажите имя и Telegram",
            Msg::ContactAdded => "Контакт добавлен",
            Msg::ContactUpdated => "Контакт обновлён",
            Msg::ContactDeleted => "Контакт удалён",
            Msg::ContactNotFound => "Контакт не найден",
            Msg::SaveContactFailed => "Не удалось сохранить контакт",
            Msg::DeleteContactFailed => "Не удалось удалить контакт",
            Msg::PasswordsRequired => "Старый и новый пароль обязательны",
            Msg::PasswordChanged => "Пароль изменён",
            Msg::WrongOldPassword => "Неверный текущий пароль",
            Msg::PasswordChangeFailed => "Не удалось изменить пароль",
            Msg::LoadEditorsFailed => "Не удалось загрузить список редакторов",
            Msg::EditorFieldsRequired => "Логин и пароль обязательны",
            Msg::EditorCreated => "Редактор добавлен",
            Msg::CreateEditorFailed => "Не удалось добавить редактора",
            Msg::EditorDeleted => "Редактор удалён",
            Msg::EditorNotFound => "Редактор не найден",
            Msg::CannotDeleteSuperAdmin => "Супер-администратора удалить нельзя",
            Msg::DeleteEditorFailed => "Не удалось удалить редактора",
            Msg::FieldName => "Имя",
            Msg::FieldTelegram => "Telegram",
            Msg::FieldPosition => "Должность",
            Msg::FieldOrder => "Порядок",
            Msg::FieldUsername => "Логин",
            Msg::FieldPassword => "Пароль",
            Msg::FieldFullName => "Полное имя",
            Msg::FieldOldPassword => "Текущий пароль",
            Msg::FieldNewPassword => "Новый пароль",
            Msg::FieldRepeatPassword => "Повторите новый пароль",
            Msg::PasswordMismatch => "Пароли не совпадают",
            Msg::UnknownCommand => "Неизвестная команда, введите help",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Msg::SuccessTitle => "Success",
            Msg::ErrorTitle => "Error",
            Msg::InfoTitle => "Notice",
            Msg::DirectoryTitle => "Contacts",
            Msg::DirectorySubtitle => "Reach us on Telegram",
            Msg::WriteInTelegram => "Message on Telegram",
            Msg::NoContacts => "No contacts yet",
            Msg::EditorsTitle => "Editors",
            Msg::SuperAdminRole => "super-admin",
            Msg::EditorRole => "editor",
            Msg::Active => "active",
            Msg::Inactive => "disabled",
            Msg::Protected => "cannot be deleted",
            Msg::LoadContactsFailed => "Could not load contacts",
            Msg::CredentialsRequired => "Enter username and password",
            Msg::InvalidCredentials => "Invalid username or password",
            Msg::LoggedIn => "Editing mode enabled",
            Msg::LoggedOut => "Editing mode closed",
            Msg::SessionExpired => "Credentials rejected, please log in again",
            Msg::LoginRequired => "Log in to editing mode first",
            Msg::NotPermitted => "Insufficient permissions",
            Msg::ContactFieldsRequired => "Name and Telegram handle are required",
            Msg::ContactAdded => "Contact added",
            Msg::ContactUpdated => "Contact updated",
            Msg::ContactDeleted => "Contact deleted",
            Msg::ContactNotFound => "Contact not found",
            Msg::SaveContactFailed => "Could not save contact",
            Msg::DeleteContactFailed => "Could not delete contact",
            Msg::PasswordsRequired => "Old and new password are required",
            Msg::PasswordChanged => "Password changed",
            Msg::WrongOldPassword => "Current password is wrong",
            Msg::PasswordChangeFailed => "Could not change password",
            Msg::LoadEditorsFailed => "Could not load editors",
            Msg::EditorFieldsRequired => "Username and password are required",
            Msg::EditorCreated => "Editor added",
            Msg::CreateEditorFailed => "Could not add editor",
            Msg::EditorDeleted => "Editor deleted",
            Msg::EditorNotFound => "Editor not found",
            Msg::CannotDeleteSuperAdmin => "A super-admin cannot be deleted",
            Msg::DeleteEditorFailed => "Could not delete editor",
            Msg::FieldName => "Name",
            Msg::FieldTelegram => "Telegram",
            Msg::FieldPosition => "Position",
            Msg::FieldOrder => "Display order",
            Msg::FieldUsername => "Username",
            Msg::FieldPassword => "Password",
            Msg::FieldFullName => "Full name",
            Msg::FieldOldPassword => "Current password",
            Msg::FieldNewPassword => "New password",
            Msg::FieldRepeatPassword => "Repeat new password",
            Msg::PasswordMismatch => "Passwords do not match",
            Msg::UnknownCommand => "Unknown command, type help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_russian() {
        assert_eq!(Locale::default(), Locale::Ru);
        assert_eq!(Msg::ContactDeleted.text(Locale::default()), "Контакт удалён");
    }

    #[test]
    fn locale_reads_lowercase() {
        let l: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(l, Locale::En);
        assert_eq!(Msg::LoadContactsFailed.text(l), "Could not load contacts");
    }
}
