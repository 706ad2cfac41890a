//! The feed parsing engine.
//!
//! A [`FeedParser`] owns a URL, an observer and a transport. Each call to
//! [`FeedParser::parse`] is one run: the document is acquired, its encoding
//! reconciled, and its records streamed to the observer. Only one run may be
//! in progress at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use url::Url;

use crate::config::{Acquisition, Config};
use crate::error::{FeedError, TransportError};
use crate::feed::encoding;
use crate::feed::machine::Session;
use crate::feed::observer::{FeedObserver, FinishStatus};
use crate::feed::transport::{FeedRequest, FetchedDocument, HttpTransport, Transport};
use crate::util::normalize_feed_url;

type PendingFetch = JoinHandle<Result<FetchedDocument, TransportError>>;

/// Externally visible state of a [`FeedParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// No run has been started.
    #[default]
    Idle,
    /// The document is being fetched.
    Acquiring,
    /// The document is being read.
    Parsing,
    /// The last run ended without error.
    Finished(FinishStatus),
    /// The last run ended with an error.
    Failed,
}

impl Lifecycle {
    pub fn is_in_progress(self) -> bool {
        matches!(self, Lifecycle::Acquiring | Lifecycle::Parsing)
    }
}

/// Requests cooperative cancellation of a running parse.
///
/// Cloneable and usable from any thread, including from inside an observer
/// callback. The reader checks it at every event boundary and before every
/// record is handed out.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Streaming RSS 2.0 / RSS 1.0 / Atom parser.
///
/// # Example
///
/// ```no_run
/// use feedkit::{Config, FeedCollector, FeedParser};
///
/// let mut parser = FeedParser::new(Config::default());
/// parser.set_url("https://example.com/feed.xml").unwrap();
/// parser.set_observer(FeedCollector::default());
/// parser.parse();
///
/// let collector = parser.take_observer().unwrap();
/// for item in &collector.items {
///     println!("{item}");
/// }
/// ```
pub struct FeedParser<O: FeedObserver> {
    url: Option<Url>,
    request: Option<FeedRequest>,
    observer: Option<O>,
    transport: Arc<dyn Transport>,
    config: Config,
    lifecycle: Lifecycle,
    stop: StopHandle,
    pending: Option<PendingFetch>,
}

impl<O: FeedObserver> FeedParser<O> {
    /// Creates a parser that fetches over HTTP.
    pub fn new(config: Config) -> Self {
        let transport = Arc::new(HttpTransport::new(&config));
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: None,
            request: None,
            observer: None,
            transport,
            config,
            lifecycle: Lifecycle::Idle,
            stop: StopHandle::default(),
            pending: None,
        }
    }

    /// Sets the feed URL. `feed:` URLs are rewritten to http(s).
    ///
    /// Any request set with [`set_request`](Self::set_request) is discarded.
    pub fn set_url(&mut self, url: &str) -> Result<(), FeedError> {
        let url =
            normalize_feed_url(url).map_err(|e| FeedError::Configuration(e.to_string()))?;
        self.url = Some(url);
        self.request = None;
        Ok(())
    }

    /// Uses a caller-built request instead of the configured defaults.
    pub fn set_request(&mut self, mut request: FeedRequest) -> Result<(), FeedError> {
        let url = normalize_feed_url(&request.url)
            .map_err(|e| FeedError::Configuration(e.to_string()))?;
        request.url = url.to_string();
        self.url = Some(url);
        self.request = Some(request);
        Ok(())
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn set_observer(&mut self, observer: O) {
        self.observer = Some(observer);
    }

    pub fn observer(&self) -> Option<&O> {
        self.observer.as_ref()
    }

    pub fn observer_mut(&mut self) -> Option<&mut O> {
        self.observer.as_mut()
    }

    pub fn take_observer(&mut self) -> Option<O> {
        self.observer.take()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes take effect at the next [`parse`](Self::parse).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn state(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_parsing(&self) -> bool {
        self.lifecycle.is_in_progress()
    }

    /// A handle that can cancel the current run from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Starts a run.
    ///
    /// Returns whether the run was started, not whether it succeeded; the
    /// outcome is reported to the observer. A missing URL or observer, or a
    /// run already in progress, is reported as [`FeedError::Configuration`]
    /// and leaves any current run untouched.
    ///
    /// In synchronous mode the whole document is fetched and read before this
    /// returns. In asynchronous mode the fetch is spawned on the current Tokio
    /// runtime and [`resume`](Self::resume) reads the document once it arrives.
    pub fn parse(&mut self) -> bool {
        if let Err(err) = self.check_ready() {
            tracing::warn!(error = %err, "Feed parse not started");
            if let Some(observer) = self.observer.as_mut() {
                observer.on_failure(err);
            }
            return false;
        }
        let Some(request) = self.current_request() else {
            return false;
        };

        self.stop.reset();
        self.pending = None;
        self.lifecycle = Lifecycle::Acquiring;
        tracing::info!(
            url = %request.url,
            acquisition = ?self.config.acquisition,
            scope = ?self.config.scope,
            "Starting feed parse"
        );

        match self.config.acquisition {
            Acquisition::Synchronous => match self.transport.fetch_blocking(&request) {
                Ok(document) => {
                    self.process(document);
                    true
                }
                Err(err) => {
                    self.fail(err.into());
                    false
                }
            },
            Acquisition::Asynchronous => match tokio::runtime::Handle::try_current() {
                Ok(runtime) => {
                    self.pending = Some(runtime.spawn(self.transport.fetch(request)));
                    true
                }
                Err(_) => {
                    self.fail(
                        TransportError::Unavailable(
                            "asynchronous acquisition requires a Tokio runtime".into(),
                        )
                        .into(),
                    );
                    false
                }
            },
        }
    }

    /// Waits for an asynchronous fetch and reads the document.
    ///
    /// Returns immediately when no fetch is pending.
    pub async fn resume(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let fetched = match pending.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => return,
            Err(err) => Err(TransportError::Unavailable(format!("fetch task failed: {err}"))),
        };
        if self.lifecycle != Lifecycle::Acquiring {
            return;
        }

        match fetched {
            Ok(document) => self.process(document),
            Err(err) => self.fail(err.into()),
        }
    }

    /// Cancels the current run.
    ///
    /// Aborts a pending fetch and finishes the run as
    /// [`FinishStatus::Aborted`]. Records not yet handed out are dropped.
    /// Does nothing when no run is in progress.
    pub fn stop(&mut self) {
        if !self.is_parsing() {
            return;
        }
        tracing::info!(state = ?self.lifecycle, "Stopping feed parse");
        self.stop.stop();
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.finish(FinishStatus::Aborted);
    }

    fn check_ready(&self) -> Result<(), FeedError> {
        if self.is_parsing() {
            return Err(FeedError::Configuration("a parse is already in progress".into()));
        }
        if self.url.is_none() {
            return Err(FeedError::Configuration("no feed URL set".into()));
        }
        if self.observer.is_none() {
            return Err(FeedError::Configuration("no observer set".into()));
        }
        Ok(())
    }

    fn current_request(&self) -> Option<FeedRequest> {
        let url = self.url.as_ref()?;
        Some(
            self.request
                .clone()
                .unwrap_or_else(|| FeedRequest::new(url.as_str(), &self.config)),
        )
    }

    fn process(&mut self, document: FetchedDocument) {
        if self.stop.is_stopped() {
            self.finish(FinishStatus::Aborted);
            return;
        }

        let body = match encoding::reconcile(&document.body, document.text_encoding.as_deref()) {
            Ok(body) => body,
            Err(err) => {
                self.fail(err);
                return;
            }
        };

        self.lifecycle = Lifecycle::Parsing;
        let url = self.url.as_ref().map(Url::to_string);
        let outcome = match self.observer.as_mut() {
            Some(observer) => {
                observer.on_start();
                Session::new(observer, &self.stop, self.config.scope, url).run(&body)
            }
            None => Err(FeedError::Configuration(
                "observer removed before the document arrived".into(),
            )),
        };

        match outcome {
            Ok(status) => self.finish(status),
            Err(err) => self.fail(err),
        }
    }

    fn finish(&mut self, status: FinishStatus) {
        if !self.is_parsing() {
            return;
        }
        self.lifecycle = Lifecycle::Finished(status);
        tracing::info!(status = ?status, "Feed parse finished");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_finish(status);
        }
    }

    fn fail(&mut self, err: FeedError) {
        if !self.is_parsing() {
            return;
        }
        self.lifecycle = Lifecycle::Failed;
        self.pending = None;
        tracing::warn!(error = %err, "Feed parse failed");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_failure(err);
        }
    }
}

impl<O: FeedObserver> Drop for FeedParser<O> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
