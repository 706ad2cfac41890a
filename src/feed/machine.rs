//! The per-run dispatch session.
//!
//! A [`Session`] owns everything one parse accumulates: the element path,
//! the text buffer, the attributes of the most recent start tag, and the
//! in-progress info and item records. It is driven by quick-xml events and
//! reports records to the observer as soon as they are complete.

use std::borrow::Cow;
use std::ops::ControlFlow;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::config::ParseScope;
use crate::date::parse_internet_date;
use crate::entities::{escape_for_ascii_html, unescape};
use crate::error::FeedError;
use crate::feed::dialect::{path_is, Dialect, InfoField, ItemField};
use crate::feed::model::{Enclosure, FeedInfo, FeedItem};
use crate::feed::observer::{FeedObserver, FinishStatus};
use crate::feed::parser::StopHandle;

/// Elements serialized as `<tag />` in captured XHTML, never given an end tag.
const VOID_TAGS: &[&str] = &[
    "br", "img", "input", "hr", "link", "base", "basefont", "frame", "meta", "area", "col",
    "param",
];

type Flow = ControlFlow<FinishStatus>;

pub(crate) struct Session<'a, O: FeedObserver + ?Sized> {
    observer: &'a mut O,
    stop: &'a StopHandle,
    scope: ParseScope,
    url: Option<String>,

    dialect: Option<Dialect>,
    path: Vec<String>,
    text: String,
    attributes: Vec<(String, String)>,
    info: FeedInfo,
    info_emitted: bool,
    item: Option<FeedItem>,
    encountered_items: bool,
    /// Path length of the element whose XHTML body is being captured.
    capture_depth: Option<usize>,
    root_closed: bool,
}

impl<'a, O: FeedObserver + ?Sized> Session<'a, O> {
    pub(crate) fn new(
        observer: &'a mut O,
        stop: &'a StopHandle,
        scope: ParseScope,
        url: Option<String>,
    ) -> Self {
        Self {
            observer,
            stop,
            scope,
            url,
            dialect: None,
            path: Vec::new(),
            text: String::new(),
            attributes: Vec::new(),
            info: FeedInfo::default(),
            info_emitted: false,
            item: None,
            encountered_items: false,
            capture_depth: None,
            root_closed: false,
        }
    }

    /// Streams `xml` (UTF-8) to the end of the document or the first halt.
    pub(crate) fn run(mut self, xml: &[u8]) -> Result<FinishStatus, FeedError> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        loop {
            if self.stop.is_stopped() {
                return Ok(FinishStatus::Aborted);
            }

            let flow = match reader.read_event_into(&mut buf)? {
                Event::Start(e) => self.start_element(&e, &reader)?,
                Event::End(_) => self.end_element()?,
                Event::Text(e) => {
                    self.characters(&e);
                    Flow::Continue(())
                }
                Event::CData(e) => {
                    // CDATA is appended verbatim, even inside captured XHTML.
                    self.text.push_str(&decode_cdata(&e));
                    Flow::Continue(())
                }
                Event::Eof => return self.end_of_document(),
                _ => Flow::Continue(()),
            };

            if let ControlFlow::Break(status) = flow {
                return Ok(status);
            }
            buf.clear();
        }
    }

    fn start_element(
        &mut self,
        e: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) -> Result<Flow, FeedError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        if self.capture_depth.is_some() {
            self.serialize_start(e, reader);
            self.path.push(name);
            return Ok(Flow::Continue(()));
        }

        if self.root_closed {
            return Err(FeedError::Syntax(format!(
                "element <{name}> after the document root"
            )));
        }

        self.text.clear();
        self.attributes = read_attributes(e, reader);

        let dialect = match self.dialect {
            Some(dialect) => dialect,
            None => {
                let dialect = Dialect::classify(&name)
                    .ok_or_else(|| FeedError::Classification { root: name.clone() })?;
                tracing::debug!(dialect = ?dialect, "Classified feed document");
                self.dialect = Some(dialect);
                dialect
            }
        };
        self.path.push(name);

        if path_is(&self.path, dialect.item_path()) {
            if !self.encountered_items {
                self.encountered_items = true;
                if self.scope != ParseScope::ItemsOnly {
                    if let ControlFlow::Break(status) = self.emit_info() {
                        return Ok(ControlFlow::Break(status));
                    }
                    if self.scope == ParseScope::InfoOnly {
                        tracing::debug!("Info-only parse reached the first item, halting");
                        return Ok(ControlFlow::Break(FinishStatus::HaltedAfterInfo));
                    }
                }
            }
            self.item = Some(FeedItem::default());
        }

        if dialect == Dialect::Atom && self.attribute("type") == Some("xhtml") {
            self.capture_depth = Some(self.path.len());
        }

        Ok(Flow::Continue(()))
    }

    fn end_element(&mut self) -> Result<Flow, FeedError> {
        if let Some(depth) = self.capture_depth {
            if self.path.len() > depth {
                if let Some(name) = self.path.pop() {
                    let local = local_name(&name);
                    if !VOID_TAGS.contains(&local) {
                        self.text.push_str("</");
                        self.text.push_str(local);
                        self.text.push('>');
                    }
                }
                return Ok(Flow::Continue(()));
            }
            self.capture_depth = None;
        }

        let Some(dialect) = self.dialect else {
            return Err(FeedError::Syntax("end tag outside the document root".into()));
        };

        if self.item.is_some() {
            if let Some(field) = dialect.item_field(&self.path) {
                self.store_item_field(dialect, field);
            }
        }
        if self.scope != ParseScope::ItemsOnly && !self.info_emitted {
            if let Some(field) = dialect.info_field(&self.path) {
                self.store_info_field(field);
            }
        }

        if path_is(&self.path, dialect.item_path()) {
            if let ControlFlow::Break(status) = self.emit_item() {
                return Ok(ControlFlow::Break(status));
            }
        }

        if self.path.len() == 1 {
            self.root_closed = true;
            if !self.info_emitted && self.scope != ParseScope::ItemsOnly {
                if let ControlFlow::Break(status) = self.emit_info() {
                    return Ok(ControlFlow::Break(status));
                }
            }
        }

        self.path.pop();
        self.text.clear();
        Ok(Flow::Continue(()))
    }

    fn characters(&mut self, e: &BytesText<'_>) {
        let decoded = match e.unescape() {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(error = %err, "Falling back to lenient entity decoding");
                let raw = String::from_utf8_lossy(e);
                Cow::Owned(unescape(&raw).into_owned())
            }
        };
        self.append_text(&decoded);
    }

    fn append_text(&mut self, text: &str) {
        if self.capture_depth.is_some() {
            self.text.push_str(&escape_for_ascii_html(text));
        } else {
            self.text.push_str(text);
        }
    }

    fn end_of_document(&mut self) -> Result<FinishStatus, FeedError> {
        if self.dialect.is_none() {
            return Err(FeedError::Syntax("document has no root element".into()));
        }
        if !self.path.is_empty() {
            return Err(FeedError::Syntax(format!(
                "unexpected end of document inside <{}>",
                self.path.join("/")
            )));
        }
        Ok(FinishStatus::Completed)
    }

    fn store_item_field(&mut self, dialect: Dialect, field: ItemField) {
        let enclosure = match field {
            ItemField::Enclosure => self.enclosure(dialect),
            ItemField::AtomLink => match self.attribute("rel") {
                Some("enclosure") => self.enclosure(dialect),
                Some("alternate") => {
                    let href = self.attribute("href").map(str::to_owned);
                    if let (Some(item), Some(href)) = (self.item.as_mut(), href) {
                        item.link = Some(href);
                    }
                    None
                }
                _ => None,
            },
            _ => None,
        };

        let value = self.text.trim();
        let Some(item) = self.item.as_mut() else {
            return;
        };
        if let Some(enclosure) = enclosure {
            item.enclosures.push(enclosure);
            return;
        }
        if value.is_empty() {
            return;
        }

        match field {
            ItemField::Identifier => item.identifier = Some(value.to_owned()),
            ItemField::Title => item.title = Some(value.to_owned()),
            ItemField::Link => item.link = Some(value.to_owned()),
            ItemField::Author => item.author = Some(value.to_owned()),
            ItemField::Summary => item.summary = Some(value.to_owned()),
            ItemField::Content => item.content = Some(value.to_owned()),
            ItemField::Published(hint) => match parse_internet_date(value, hint) {
                Some(date) => item.published = Some(date),
                None => tracing::debug!(date = %value, "Ignoring unparsable published date"),
            },
            ItemField::Updated(hint) => match parse_internet_date(value, hint) {
                Some(date) => item.updated = Some(date),
                None => tracing::debug!(date = %value, "Ignoring unparsable updated date"),
            },
            ItemField::Enclosure | ItemField::AtomLink => {}
        }
    }

    fn store_info_field(&mut self, field: InfoField) {
        if field == InfoField::AtomLink {
            if self.attribute("rel") == Some("alternate") {
                self.info.link = self.attribute("href").map(str::to_owned);
            }
            return;
        }

        let value = self.text.trim();
        if value.is_empty() {
            return;
        }
        let value = Some(value.to_owned());
        match field {
            InfoField::Title => self.info.title = value,
            InfoField::Link => self.info.link = value,
            InfoField::Summary => self.info.summary = value,
            InfoField::AtomLink => {}
        }
    }

    /// Builds an enclosure from the current element's attributes.
    fn enclosure(&self, dialect: Dialect) -> Option<Enclosure> {
        let names = dialect.enclosure_attributes();
        let url = self.attribute(names.url)?;
        Some(Enclosure {
            url: url.to_owned(),
            mime_type: self.attribute(names.mime_type).map(str::to_owned),
            length: self
                .attribute(names.length)
                .and_then(|length| length.trim().parse().ok()),
        })
    }

    fn emit_info(&mut self) -> Flow {
        if self.stop.is_stopped() {
            return ControlFlow::Break(FinishStatus::Aborted);
        }
        self.info_emitted = true;
        let mut info = std::mem::take(&mut self.info);
        info.url = self.url.clone();
        self.observer.on_info(info);
        Flow::Continue(())
    }

    fn emit_item(&mut self) -> Flow {
        let Some(item) = self.item.take() else {
            return Flow::Continue(());
        };
        if self.stop.is_stopped() {
            return ControlFlow::Break(FinishStatus::Aborted);
        }
        self.observer.on_item(item.finalize());
        Flow::Continue(())
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Re-serializes a start tag inside a captured XHTML region.
    fn serialize_start(&mut self, e: &BytesStart<'_>, reader: &Reader<&[u8]>) {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        self.text.push('<');
        self.text.push_str(&name);
        for (key, value) in read_attributes(e, reader) {
            if is_namespace_declaration(&key) {
                continue;
            }
            self.text.push(' ');
            self.text.push_str(&key);
            self.text.push_str("=\"");
            self.text.push_str(&escape_for_ascii_html(&value));
            self.text.push('"');
        }
        if VOID_TAGS.contains(&name.as_str()) {
            self.text.push_str(" />");
        } else {
            self.text.push('>');
        }
    }
}

fn read_attributes(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Vec<(String, String)> {
    e.attributes()
        .filter_map(|attr_result| {
            let attr = match attr_result {
                Ok(attr) => attr,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed feed attribute");
                    return None;
                }
            };
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.decode_and_unescape_value(reader.decoder()) {
                Ok(value) => value.into_owned(),
                Err(_) => unescape(&String::from_utf8_lossy(&attr.value)).into_owned(),
            };
            Some((key, value))
        })
        .collect()
}

/// CDATA bytes are read as UTF-8, falling back to ISO-8859-1.
fn decode_cdata(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::mem::decode_latin1(bytes),
    }
}

fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map_or(qualified, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::observer::FeedCollector;
    use pretty_assertions::assert_eq;

    fn run(xml: &str, scope: ParseScope) -> (FeedCollector, Result<FinishStatus, FeedError>) {
        let mut collector = FeedCollector::default();
        let stop = StopHandle::default();
        let result = Session::new(&mut collector, &stop, scope, Some("http://x/feed".into()))
            .run(xml.as_bytes());
        (collector, result)
    }

    const RSS2: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Example</title>
    <link>http://example.com/</link>
    <description>An example &amp; more</description>
    <item>
      <title>First</title>
      <link>http://example.com/1</link>
      <guid>urn:1</guid>
      <dc:creator>Jane</dc:creator>
      <pubDate>Sun, 19 May 2002 15:21:36 GMT</pubDate>
      <content:encoded><![CDATA[<p>Body</p>]]></content:encoded>
      <enclosure url="http://example.com/a.mp3" type="audio/mpeg" length="1234"/>
      <enclosure url="http://example.com/b.mp3" length="big"/>
      <enclosure type="audio/mpeg"/>
    </item>
    <item>
      <title>Second</title>
      <description>Short</description>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_rss2_full() {
        let (collector, result) = run(RSS2, ParseScope::Full);
        assert_eq!(result.unwrap(), FinishStatus::Completed);

        let info = collector.info.unwrap();
        assert_eq!(info.title.as_deref(), Some("Example"));
        assert_eq!(info.link.as_deref(), Some("http://example.com/"));
        assert_eq!(info.summary.as_deref(), Some("An example & more"));
        assert_eq!(info.url.as_deref(), Some("http://x/feed"));

        assert_eq!(collector.items.len(), 2);
        let first = &collector.items[0];
        assert_eq!(first.title.as_deref(), Some("First"));
        assert_eq!(first.identifier.as_deref(), Some("urn:1"));
        assert_eq!(first.author.as_deref(), Some("Jane"));
        assert_eq!(
            first.published.map(|d| d.to_rfc3339()).as_deref(),
            Some("2002-05-19T15:21:36+00:00")
        );
        // No description, so the content moved into the summary.
        assert_eq!(first.summary.as_deref(), Some("<p>Body</p>"));
        assert_eq!(first.content, None);
        assert_eq!(
            first.enclosures,
            vec![
                Enclosure {
                    url: "http://example.com/a.mp3".into(),
                    mime_type: Some("audio/mpeg".into()),
                    length: Some(1234),
                },
                Enclosure {
                    url: "http://example.com/b.mp3".into(),
                    mime_type: None,
                    length: None,
                },
            ]
        );

        let second = &collector.items[1];
        assert_eq!(second.summary.as_deref(), Some("Short"));
        assert_eq!(second.published, None);
    }

    #[test]
    fn test_items_only_skips_info() {
        let (collector, result) = run(RSS2, ParseScope::ItemsOnly);
        assert_eq!(result.unwrap(), FinishStatus::Completed);
        assert!(collector.info.is_none());
        assert_eq!(collector.items.len(), 2);
    }

    #[test]
    fn test_info_only_halts_at_first_item() {
        let (collector, result) = run(RSS2, ParseScope::InfoOnly);
        assert_eq!(result.unwrap(), FinishStatus::HaltedAfterInfo);
        assert_eq!(collector.info.unwrap().title.as_deref(), Some("Example"));
        assert!(collector.items.is_empty());
    }

    #[test]
    fn test_info_emitted_at_root_end_without_items() {
        let xml = "<rss><channel><title>Empty</title></channel></rss>";
        let (collector, result) = run(xml, ParseScope::InfoOnly);
        assert_eq!(result.unwrap(), FinishStatus::Completed);
        assert_eq!(collector.info.unwrap().title.as_deref(), Some("Empty"));
    }

    #[test]
    fn test_rss1() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                 xmlns:dc="http://purl.org/dc/elements/1.1/"
                 xmlns:enc="http://purl.oclc.org/net/rss_2.0/enc#">
  <channel><title>RDF feed</title><link>http://example.org/</link></channel>
  <item>
    <title>Entry</title>
    <dc:identifier>id-1</dc:identifier>
    <dc:date>2003-12-13T18:30:02Z</dc:date>
    <enc:enclosure rdf:resource="http://example.org/v.mp4" enc:type="video/mp4" enc:length="99"/>
  </item>
</rdf:RDF>"#;
        let (collector, result) = run(xml, ParseScope::Full);
        assert_eq!(result.unwrap(), FinishStatus::Completed);
        assert_eq!(collector.info.unwrap().title.as_deref(), Some("RDF feed"));
        let item = &collector.items[0];
        assert_eq!(item.identifier.as_deref(), Some("id-1"));
        assert_eq!(
            item.published.map(|d| d.to_rfc3339()).as_deref(),
            Some("2003-12-13T18:30:02+00:00")
        );
        assert_eq!(item.enclosures[0].mime_type.as_deref(), Some("video/mp4"));
        assert_eq!(item.enclosures[0].length, Some(99));
    }

    #[test]
    fn test_atom_links_and_dates() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom</title>
  <subtitle>Sub</subtitle>
  <link rel="self" href="http://example.org/feed.atom"/>
  <link rel="alternate" href="http://example.org/"/>
  <entry>
    <title>One</title>
    <id>tag:example.org,2003:1</id>
    <link href="http://example.org/ignored"/>
    <link rel="alternate" href="http://example.org/1"/>
    <link rel="enclosure" href="http://example.org/1.mp3" type="audio/mpeg" length="10"/>
    <author><name>Ann</name></author>
    <updated>2003-12-13T18:30:02Z</updated>
    <summary>Sum</summary>
  </entry>
</feed>"#;
        let (collector, result) = run(xml, ParseScope::Full);
        assert_eq!(result.unwrap(), FinishStatus::Completed);

        let info = collector.info.unwrap();
        assert_eq!(info.link.as_deref(), Some("http://example.org/"));
        assert_eq!(info.summary.as_deref(), Some("Sub"));

        let item = &collector.items[0];
        assert_eq!(item.link.as_deref(), Some("http://example.org/1"));
        assert_eq!(item.author.as_deref(), Some("Ann"));
        assert_eq!(item.enclosures.len(), 1);
        assert_eq!(item.enclosures[0].url, "http://example.org/1.mp3");
        assert!(item.updated.is_some());
        assert_eq!(item.published, item.updated);
    }

    #[test]
    fn test_atom_xhtml_capture() {
        let xml = r#"<feed><entry><content type="xhtml"><div>Hi <b>there</b></div></content></entry></feed>"#;
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(
            collector.items[0].summary.as_deref(),
            Some("<div>Hi <b>there</b></div>")
        );
    }

    #[test]
    fn test_xhtml_capture_escapes_and_closes_void_tags() {
        let xml = r#"<feed><entry><summary>s</summary><content type="xhtml"><xhtml:div xmlns:xhtml="http://www.w3.org/1999/xhtml">a &lt; b<br/><img src="x.png" alt="&quot;q&quot;"/>é</xhtml:div></content></entry></feed>"#;
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(
            collector.items[0].content.as_deref(),
            Some(
                "<div>a &lt; b<br /><img src=\"x.png\" alt=\"&quot;q&quot;\" />&eacute;</div>"
            )
        );
    }

    #[test]
    fn test_xhtml_capture_drops_namespace_declarations() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml" class="c"><p>x</p></div></content></entry></feed>"#;
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(
            collector.items[0].content.as_deref(),
            Some("<div class=\"c\"><p>x</p></div>")
        );
    }

    #[test]
    fn test_cdata_inside_xhtml_capture_is_verbatim() {
        let xml = r#"<feed><entry><content type="xhtml"><div>a <![CDATA[<b>&]]> c</div></content></entry></feed>"#;
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(
            collector.items[0].content.as_deref(),
            Some("<div>a <b>& c</div>")
        );
    }

    #[test]
    fn test_xhtml_title_captured() {
        let xml = r#"<feed><entry><title type="xhtml"><i>Fancy</i></title></entry></feed>"#;
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(collector.items[0].title.as_deref(), Some("<i>Fancy</i>"));
    }

    #[test]
    fn test_unknown_root_is_classification_error() {
        let (collector, result) = run("<html><body/></html>", ParseScope::Full);
        match result {
            Err(FeedError::Classification { root }) => assert_eq!(root, "html"),
            other => panic!("expected classification error, got {other:?}"),
        }
        assert!(collector.info.is_none());
    }

    #[test]
    fn test_truncated_document_is_error() {
        let (_, result) = run("<rss><channel><item><title>x</title>", ParseScope::Full);
        assert!(matches!(
            result,
            Err(FeedError::Syntax(_) | FeedError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_document_is_error() {
        let (_, result) = run("", ParseScope::Full);
        assert!(matches!(result, Err(FeedError::Syntax(_))));
    }

    #[test]
    fn test_stop_before_run_emits_nothing() {
        let mut collector = FeedCollector::default();
        let stop = StopHandle::default();
        stop.stop();
        let result = Session::new(&mut collector, &stop, ParseScope::Full, None)
            .run(RSS2.as_bytes());
        assert_eq!(result.unwrap(), FinishStatus::Aborted);
        assert!(collector.info.is_none());
        assert!(collector.items.is_empty());
    }

    #[test]
    fn test_unknown_entity_left_verbatim() {
        let xml = "<rss><channel><item><title>a&nbsp;b &amp; c</title></item></channel></rss>";
        let (collector, _) = run(xml, ParseScope::Full);
        assert_eq!(collector.items[0].title.as_deref(), Some("a&nbsp;b & c"));
    }

    #[test]
    fn test_latin1_cdata() {
        assert_eq!(decode_cdata(b"caf\xE9"), "café");
        assert_eq!(decode_cdata("café".as_bytes()), "café");
    }
}
