//! Relative `href` rewriting for `link` elements
//!
//! The fragment is parsed as a full HTML document so bare head contents are
//! accepted, then the head's children are serialized back. Each `link` gets
//! one [`HrefRewrite`] decision, collected in document order before
//! serialization; a malformed href only ever produces `Keep`.

use crate::error::EmbedError;
use html5ever::serialize::{
    AttrRef, HtmlSerializer, Serialize, SerializeOpts, Serializer, TraversalScope,
};
use html5ever::QualName;
use scraper::{ElementRef, Html};
use std::io;
use tracing::debug;
use url::{ParseError, Url};

/// Outcome for a single `link` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrefRewrite {
    Replace(String),
    Keep,
}

/// Decide what a single href becomes when resolved against `base`.
pub fn rewrite_href(base: &Url, href: &str) -> HrefRewrite {
    match Url::parse(href) {
        // Already absolute
        Ok(_) => HrefRewrite::Keep,
        Err(ParseError::RelativeUrlWithoutBase) => match base.join(href) {
            Ok(resolved) => HrefRewrite::Replace(resolved.into()),
            Err(e) => {
                debug!(href, error = %e, "leaving unresolvable href untouched");
                HrefRewrite::Keep
            }
        },
        Err(e) => {
            debug!(href, error = %e, "leaving malformed href untouched");
            HrefRewrite::Keep
        }
    }
}

/// Rewrite every relative `link` href in `fragment` against `source`.
pub fn rewrite_links(source: &Url, fragment: &[u8]) -> Result<String, EmbedError> {
    let text = std::str::from_utf8(fragment).map_err(|e| EmbedError::FragmentParse {
        url: source.to_string(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(text);
    let head = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "head")
        .ok_or_else(|| EmbedError::FragmentParse {
            url: source.to_string(),
            reason: "parsed document has no <head> element".to_string(),
        })?;

    let rewrites: Vec<HrefRewrite> = head
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "link")
        .map(|link| match link.value().attr("href") {
            Some(href) => rewrite_href(source, href),
            None => HrefRewrite::Keep,
        })
        .collect();

    let replaced = rewrites
        .iter()
        .filter(|r| matches!(r, HrefRewrite::Replace(_)))
        .count();
    debug!(links = rewrites.len(), replaced, "resolved link hrefs");

    let serialization_failed = |reason: String| EmbedError::Serialization {
        url: source.to_string(),
        reason,
    };

    let mut out = Vec::with_capacity(fragment.len());
    {
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        let mut serializer = LinkHrefSerializer {
            inner: HtmlSerializer::new(&mut out, opts),
            rewrites: rewrites.into_iter(),
        };
        head.serialize(&mut serializer, TraversalScope::ChildrenOnly(None))
            .map_err(|e| serialization_failed(e.to_string()))?;
    }

    String::from_utf8(out).map_err(|e| serialization_failed(e.to_string()))
}

/// Serializer that swaps in the resolved href of each `link` as it is written.
struct LinkHrefSerializer<S> {
    inner: S,
    rewrites: std::vec::IntoIter<HrefRewrite>,
}

impl<S: Serializer> Serializer for LinkHrefSerializer<S> {
    fn start_elem<'a, AttrIter>(&mut self, name: QualName, attrs: AttrIter) -> io::Result<()>
    where
        AttrIter: Iterator<Item = AttrRef<'a>>,
    {
        if &*name.local != "link" {
            return self.inner.start_elem(name, attrs);
        }

        match self.rewrites.next() {
            Some(HrefRewrite::Replace(resolved)) => {
                let attrs = attrs.map(|(attr, value)| {
                    if &*attr.local == "href" {
                        (attr, resolved.as_str())
                    } else {
                        (attr, value)
                    }
                });
                self.inner.start_elem(name, attrs)
            }
            _ => self.inner.start_elem(name, attrs),
        }
    }

    fn end_elem(&mut self, name: QualName) -> io::Result<()> {
        self.inner.end_elem(name)
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_text(text)
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_comment(text)
    }

    fn write_doctype(&mut self, name: &str) -> io::Result<()> {
        self.inner.write_doctype(name)
    }

    fn write_processing_instruction(&mut self, target: &str, data: &str) -> io::Result<()> {
        self.inner.write_processing_instruction(target, data)
    }
}
