//! Types shared with the collaborators on either side of the pipeline: the
//! metadata extractor that supplies raw candidates, and the catalog that
//! resolves a clean identifier (or a title/author pair) to a record.

use crate::{
    checksum::{IsbnFormat, ValidatedIsbn},
    error::{Error, Result},
    pipeline::{NormalizationPipeline, Outcome},
};
use serde::{Deserialize, Serialize};

/// What a metadata extractor found for one document.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn_candidate: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Identifier,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMatch {
    pub found: bool,
    pub url: String,
    pub matched_title: String,
    pub match_kind: MatchKind,
}

/// A library catalog. Implementations own their transport, retries and rate
/// limits; any failure should come back as `Error::ExternalLookup`.
pub trait CatalogLookup {
    fn by_identifier(&self, isbn: &ValidatedIsbn) -> Result<CatalogMatch>;
    fn by_title_author(&self, title: &str, author: &str) -> Result<CatalogMatch>;
}

/// Looks a record up by its normalized identifier, falling back to title and
/// author when there is no identifier or the catalog does not know it.
///
/// `Ok(None)` is a genuine non-match; `Err` is always
/// `Error::ExternalLookup` so callers can retry it.
pub fn reconcile(
    pipeline: &NormalizationPipeline,
    catalog: &dyn CatalogLookup,
    record: &RecordMetadata,
) -> Result<Option<CatalogMatch>> {
    let isbn = record
        .isbn_candidate
        .as_deref()
        .and_then(|raw| pipeline.normalize(raw));

    if let Some(isbn) = &isbn {
        let found = catalog.by_identifier(isbn).map_err(external)?;
        if found.found {
            return Ok(Some(found));
        }
    }

    let title = record.title.as_deref().unwrap_or("").trim();
    let author = record.author.as_deref().unwrap_or("").trim();
    if title.is_empty() || author.is_empty() {
        return Ok(None);
    }

    let found = catalog.by_title_author(title, author).map_err(external)?;
    Ok(Some(found).filter(|found| found.found))
}

fn external(err: Error) -> Error {
    match err {
        Error::ExternalLookup(_) => err,
        other => Error::ExternalLookup(other.to_string()),
    }
}

/// One line of pipeline output, as printed by the CLI and served over HTTP.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub input: String,
    pub isbn: Option<String>,
    pub format: Option<IsbnFormat>,
    pub corrected: bool,
}

impl Report {
    pub fn new(input: impl Into<String>, outcome: Option<&Outcome>) -> Self {
        let isbn = outcome.and_then(Outcome::isbn);
        Report {
            input: input.into(),
            isbn: isbn.map(|isbn| isbn.as_str().into()),
            format: isbn.map(ValidatedIsbn::format),
            corrected: outcome.map_or(false, Outcome::is_corrected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeCatalog {
        known_isbn: Option<&'static str>,
        known_title: Option<&'static str>,
        offline: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeCatalog {
        fn hit(title: &str, match_kind: MatchKind) -> CatalogMatch {
            CatalogMatch {
                found: true,
                url: "https://catalog.example/record/1".into(),
                matched_title: title.into(),
                match_kind,
            }
        }

        fn miss(match_kind: MatchKind) -> CatalogMatch {
            CatalogMatch {
                found: false,
                url: String::new(),
                matched_title: String::new(),
                match_kind,
            }
        }
    }

    impl CatalogLookup for FakeCatalog {
        fn by_identifier(&self, isbn: &ValidatedIsbn) -> Result<CatalogMatch> {
            self.calls.borrow_mut().push(format!("isbn:{}", isbn));
            if self.offline {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "catalog timed out",
                )));
            }

            Ok(match self.known_isbn {
                Some(known) if known == isbn.as_str() => {
                    FakeCatalog::hit("Islamic Philosophy", MatchKind::Identifier)
                }
                _ => FakeCatalog::miss(MatchKind::Identifier),
            })
        }

        fn by_title_author(&self, title: &str, author: &str) -> Result<CatalogMatch> {
            self.calls
                .borrow_mut()
                .push(format!("title:{}/{}", title, author));

            Ok(match self.known_title {
                Some(known) if known == title => FakeCatalog::hit(known, MatchKind::Fallback),
                _ => FakeCatalog::miss(MatchKind::Fallback),
            })
        }
    }

    fn record(isbn: Option<&str>) -> RecordMetadata {
        RecordMetadata {
            title: Some("Islamic Philosophy".into()),
            author: Some("Ibn Sina".into()),
            isbn_candidate: isbn.map(Into::into),
        }
    }

    #[test]
    fn identifier_match() {
        let pipeline = NormalizationPipeline::new();
        let catalog = FakeCatalog {
            known_isbn: Some("9780195153071"),
            ..FakeCatalog::default()
        };

        let found = reconcile(&pipeline, &catalog, &record(Some("ISBN: 978-0-19-515307-1")))
            .unwrap()
            .unwrap();
        assert_eq!(found.match_kind, MatchKind::Identifier);
        assert_eq!(*catalog.calls.borrow(), vec!["isbn:9780195153071"]);
    }

    #[test]
    fn falls_back_to_title_and_author() {
        let pipeline = NormalizationPipeline::new();
        let catalog = FakeCatalog {
            known_title: Some("Islamic Philosophy"),
            ..FakeCatalog::default()
        };

        let found = reconcile(&pipeline, &catalog, &record(Some("ISBN: 12345")))
            .unwrap()
            .unwrap();
        assert_eq!(found.match_kind, MatchKind::Fallback);
        assert_eq!(
            *catalog.calls.borrow(),
            vec!["title:Islamic Philosophy/Ibn Sina"]
        );
    }

    #[test]
    fn unknown_identifier_also_falls_back() {
        let pipeline = NormalizationPipeline::new();
        let catalog = FakeCatalog::default();

        let found = reconcile(&pipeline, &catalog, &record(Some("9780195153071"))).unwrap();
        assert!(found.is_none());
        assert_eq!(catalog.calls.borrow().len(), 2);
    }

    #[test]
    fn no_identifier_and_no_author_is_a_plain_miss() {
        let pipeline = NormalizationPipeline::new();
        let catalog = FakeCatalog::default();
        let record = RecordMetadata {
            title: Some("Untitled".into()),
            ..RecordMetadata::default()
        };

        assert!(reconcile(&pipeline, &catalog, &record).unwrap().is_none());
        assert!(catalog.calls.borrow().is_empty());
    }

    #[test]
    fn catalog_failures_are_external() {
        let pipeline = NormalizationPipeline::new();
        let catalog = FakeCatalog {
            offline: true,
            ..FakeCatalog::default()
        };

        match reconcile(&pipeline, &catalog, &record(Some("9780195153071"))) {
            Err(Error::ExternalLookup(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected an external lookup error, got {:?}", other),
        }
    }

    #[test]
    fn match_kind_wire_names() {
        let json = serde_json::to_string(&FakeCatalog::miss(MatchKind::Fallback)).unwrap();
        assert!(json.contains(r#""matchKind":"fallback""#));
    }

    #[test]
    fn report_from_outcome() {
        let pipeline = NormalizationPipeline::new();
        let outcome = pipeline.evaluate("978600100254ه");
        let report = Report::new("978600100254ه", outcome.as_ref());
        assert_eq!(report.isbn.as_deref(), Some("9786001002540"));
        assert_eq!(report.format, Some(IsbnFormat::Isbn13));
        assert!(report.corrected);

        let report = Report::new("", None);
        assert_eq!(report.isbn, None);
        assert!(!report.corrected);
    }
}
