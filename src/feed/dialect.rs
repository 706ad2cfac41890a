//! The three supported feed grammars and their path → field tables.
//!
//! Paths are the qualified element names from the document root down, e.g.
//! `["rss", "channel", "item", "title"]`. Each dialect has one table for
//! item fields and one for channel fields; a path that appears in neither
//! is ignored.

use crate::date::DateFormatHint;

type Path = &'static [&'static str];

/// Feed grammar, fixed by the document's root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// RSS 2.0 (`<rss>`).
    Rss2,
    /// RSS 1.0 (`<rdf:RDF>`).
    Rss1,
    /// Atom (`<feed>`).
    Atom,
}

/// Where closing an item-level element should store its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemField {
    Identifier,
    Title,
    Link,
    Author,
    Summary,
    Content,
    Published(DateFormatHint),
    Updated(DateFormatHint),
    /// Read from attributes, see [`EnclosureAttributes`].
    Enclosure,
    /// Atom `<link>`, routed by its `rel` attribute.
    AtomLink,
}

/// Where closing a channel-level element should store its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfoField {
    Title,
    Link,
    Summary,
    AtomLink,
}

/// Attribute names that carry an enclosure's URL, MIME type and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnclosureAttributes {
    pub url: &'static str,
    pub mime_type: &'static str,
    pub length: &'static str,
}

const RSS2_ITEM_FIELDS: &[(Path, ItemField)] = &[
    (&["rss", "channel", "item", "title"], ItemField::Title),
    (&["rss", "channel", "item", "link"], ItemField::Link),
    (&["rss", "channel", "item", "author"], ItemField::Author),
    (&["rss", "channel", "item", "dc:creator"], ItemField::Author),
    (&["rss", "channel", "item", "guid"], ItemField::Identifier),
    (&["rss", "channel", "item", "description"], ItemField::Summary),
    (&["rss", "channel", "item", "content:encoded"], ItemField::Content),
    (
        &["rss", "channel", "item", "pubDate"],
        ItemField::Published(DateFormatHint::Rfc822),
    ),
    (
        &["rss", "channel", "item", "dc:date"],
        ItemField::Published(DateFormatHint::Rfc3339),
    ),
    (&["rss", "channel", "item", "enclosure"], ItemField::Enclosure),
];

const RSS2_INFO_FIELDS: &[(Path, InfoField)] = &[
    (&["rss", "channel", "title"], InfoField::Title),
    (&["rss", "channel", "description"], InfoField::Summary),
    (&["rss", "channel", "link"], InfoField::Link),
];

const RSS1_ITEM_FIELDS: &[(Path, ItemField)] = &[
    (&["rdf:RDF", "item", "title"], ItemField::Title),
    (&["rdf:RDF", "item", "link"], ItemField::Link),
    (&["rdf:RDF", "item", "description"], ItemField::Summary),
    (&["rdf:RDF", "item", "content:encoded"], ItemField::Content),
    (&["rdf:RDF", "item", "dc:identifier"], ItemField::Identifier),
    (&["rdf:RDF", "item", "dc:creator"], ItemField::Author),
    (
        &["rdf:RDF", "item", "dc:date"],
        ItemField::Published(DateFormatHint::Rfc3339),
    ),
    (&["rdf:RDF", "item", "enc:enclosure"], ItemField::Enclosure),
];

const RSS1_INFO_FIELDS: &[(Path, InfoField)] = &[
    (&["rdf:RDF", "channel", "title"], InfoField::Title),
    (&["rdf:RDF", "channel", "description"], InfoField::Summary),
    (&["rdf:RDF", "channel", "link"], InfoField::Link),
];

const ATOM_ITEM_FIELDS: &[(Path, ItemField)] = &[
    (&["feed", "entry", "title"], ItemField::Title),
    (&["feed", "entry", "link"], ItemField::AtomLink),
    (&["feed", "entry", "id"], ItemField::Identifier),
    (&["feed", "entry", "summary"], ItemField::Summary),
    (&["feed", "entry", "content"], ItemField::Content),
    (&["feed", "entry", "author", "name"], ItemField::Author),
    (&["feed", "entry", "dc:creator"], ItemField::Author),
    (
        &["feed", "entry", "published"],
        ItemField::Published(DateFormatHint::Rfc3339),
    ),
    (
        &["feed", "entry", "updated"],
        ItemField::Updated(DateFormatHint::Rfc3339),
    ),
];

const ATOM_INFO_FIELDS: &[(Path, InfoField)] = &[
    (&["feed", "title"], InfoField::Title),
    (&["feed", "subtitle"], InfoField::Summary),
    (&["feed", "description"], InfoField::Summary),
    (&["feed", "link"], InfoField::AtomLink),
];

impl Dialect {
    /// Picks the dialect from the root element's qualified name.
    pub fn classify(root: &str) -> Option<Self> {
        match root {
            "rss" => Some(Dialect::Rss2),
            "rdf:RDF" => Some(Dialect::Rss1),
            "feed" => Some(Dialect::Atom),
            _ => None,
        }
    }

    /// Path of each item container.
    pub(crate) fn item_path(self) -> Path {
        match self {
            Dialect::Rss2 => &["rss", "channel", "item"],
            Dialect::Rss1 => &["rdf:RDF", "item"],
            Dialect::Atom => &["feed", "entry"],
        }
    }

    pub(crate) fn item_field(self, path: &[String]) -> Option<ItemField> {
        let table = match self {
            Dialect::Rss2 => RSS2_ITEM_FIELDS,
            Dialect::Rss1 => RSS1_ITEM_FIELDS,
            Dialect::Atom => ATOM_ITEM_FIELDS,
        };
        lookup(table, path)
    }

    pub(crate) fn info_field(self, path: &[String]) -> Option<InfoField> {
        let table = match self {
            Dialect::Rss2 => RSS2_INFO_FIELDS,
            Dialect::Rss1 => RSS1_INFO_FIELDS,
            Dialect::Atom => ATOM_INFO_FIELDS,
        };
        lookup(table, path)
    }

    pub(crate) fn enclosure_attributes(self) -> EnclosureAttributes {
        match self {
            Dialect::Rss2 => EnclosureAttributes {
                url: "url",
                mime_type: "type",
                length: "length",
            },
            Dialect::Rss1 => EnclosureAttributes {
                url: "rdf:resource",
                mime_type: "enc:type",
                length: "enc:length",
            },
            Dialect::Atom => EnclosureAttributes {
                url: "href",
                mime_type: "type",
                length: "length",
            },
        }
    }
}

/// True when `path` names exactly the element `expected`.
pub(crate) fn path_is(path: &[String], expected: Path) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn lookup<F: Copy>(table: &[(Path, F)], path: &[String]) -> Option<F> {
    table
        .iter()
        .find(|(candidate, _)| path_is(path, candidate))
        .map(|&(_, field)| field)
}
