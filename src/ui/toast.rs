use std::io::{self, Write};

use crate::controller::{Notice, NoticeLevel};

pub fn write_notice<W: Write>(out: &mut W, notice: &Notice) -> io::Result<()> {
    let mark = match notice.level {
        NoticeLevel::Success => "✓",
        NoticeLevel::Error => "✗",
        NoticeLevel::Info => "•",
    };
    writeln!(out, "{mark} {}: {}", notice.title, notice.description)
}

/// Errors go to stderr, everything else to stdout.
pub fn show_notices(notices: Vec<Notice>) {
    for notice in &notices {
        let res = if notice.level == NoticeLevel::Error {
            write_notice(&mut io::stderr().lock(), notice)
        } else {
            write_notice(&mut io::stdout().lock(), notice)
        };
        if let Err(e) = res {
            log::warn!("cannot print notice: {e}");
        }
    }
}
