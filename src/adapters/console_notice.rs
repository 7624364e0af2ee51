//! Notices printed to stderr.

use crate::ports::notice_port::{Notice, NoticePort};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl NoticePort for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::info!(title = %notice.title, "notice shown");
        eprintln!("! {notice}");
    }
}
