pub mod contact_list;
pub mod editors;
pub mod login;
pub mod shell;
pub mod toast;
