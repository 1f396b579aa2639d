//! Results delivered back to the session from background tasks.

use crate::persistence::{FileRecord, ShareReceipt};

pub enum AppMessage {
    ShareCompleted(ShareReceipt),
    ShareFailed {
        error: String,
    },
    SharedLoaded {
        slug: String,
        files: Vec<FileRecord>,
    },
    SharedLoadFailed {
        slug: String,
        error: String,
    },
}
