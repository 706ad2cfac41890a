//! Callbacks through which a parse reports its progress.

use serde::Serialize;

use crate::error::FeedError;
use crate::feed::model::{FeedInfo, FeedItem};

/// How a run that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishStatus {
    /// The whole document was read.
    Completed,
    /// The scope was info-only and the first item boundary was reached.
    HaltedAfterInfo,
    /// The run was cancelled with `stop()`.
    Aborted,
}

impl FinishStatus {
    /// True for every status except [`FinishStatus::Completed`].
    pub fn is_aborted(self) -> bool {
        !matches!(self, FinishStatus::Completed)
    }
}

/// Receives the records and lifecycle events of a parse.
///
/// Every method has a no-op default, so implementors only override what
/// they need. Calls are made on the task that drives the parse, in this
/// order: `on_start` once the document is about to be read, at most one
/// `on_info`, any number of `on_item`, then exactly one of `on_finish` or
/// `on_failure`. A run that fails before the document is read (transport or
/// encoding errors) never sees `on_start`.
pub trait FeedObserver {
    fn on_start(&mut self) {}

    fn on_info(&mut self, _info: FeedInfo) {}

    fn on_item(&mut self, _item: FeedItem) {}

    fn on_finish(&mut self, _status: FinishStatus) {}

    fn on_failure(&mut self, _error: FeedError) {}
}

impl<T: FeedObserver + ?Sized> FeedObserver for Box<T> {
    fn on_start(&mut self) {
        (**self).on_start()
    }

    fn on_info(&mut self, info: FeedInfo) {
        (**self).on_info(info)
    }

    fn on_item(&mut self, item: FeedItem) {
        (**self).on_item(item)
    }

    fn on_finish(&mut self, status: FinishStatus) {
        (**self).on_finish(status)
    }

    fn on_failure(&mut self, error: FeedError) {
        (**self).on_failure(error)
    }
}

/// An observer that keeps everything it is given.
#[derive(Debug, Default)]
pub struct FeedCollector {
    pub started: bool,
    pub info: Option<FeedInfo>,
    pub items: Vec<FeedItem>,
    pub status: Option<FinishStatus>,
    pub error: Option<FeedError>,
}

impl FeedObserver for FeedCollector {
    fn on_start(&mut self) {
        self.started = true;
    }

    fn on_info(&mut self, info: FeedInfo) {
        self.info = Some(info);
    }

    fn on_item(&mut self, item: FeedItem) {
        self.items.push(item);
    }

    fn on_finish(&mut self, status: FinishStatus) {
        self.status = Some(status);
    }

    fn on_failure(&mut self, error: FeedError) {
        self.error = Some(error);
    }
}
