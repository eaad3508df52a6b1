use log::{info, trace};
use serde_json::{Map, Value};

use crate::{book::Book, Error, ErrorKind, Isbn, Lookup};

use super::Client;

const OPEN_LIBRARY_ISBN_URL: &str = "https://openlibrary.org/isbn/";

const REDIRECT_TYPE: &str = "/type/redirect";

pub(crate) fn get_by_isbn<C: Client>(isbn: &Isbn) -> Result<Lookup, Error> {
    info!("Searching for ISBN '{isbn}' using Open Library API");
    let url = format!("{OPEN_LIBRARY_ISBN_URL}{isbn}.json");

    let client = C::default();
    let reply = client.fetch(&url)?;

    if !reply.is_success() {
        return Err(if reply.status == 404 {
            Error::new(
                ErrorKind::NotFound,
                format!("ISBN {isbn} not found on Open Library."),
            )
        } else {
            Error::new(
                ErrorKind::Status(reply.status),
                format!("Open Library API error: {}", reply.reason),
            )
        });
    }

    if reply.text.is_empty() {
        return Err(Error::new(
            ErrorKind::Empty,
            "Empty response from Open Library API.",
        ));
    }

    let document: Value = serde_json::from_str(&reply.text).map_err(|e| {
        Error::new(
            ErrorKind::Deserialize,
            "Failed to parse JSON response from Open Library API.",
        )
        .with_source(e)
    })?;

    trace!("Request was successful");
    classify(isbn, document)
}

fn classify(isbn: &Isbn, document: Value) -> Result<Lookup, Error> {
    let document = match document {
        Value::Object(map) if is_not_found_error(&map) => {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("ISBN {isbn} not found on Open Library (API specific error)."),
            ))
        }
        Value::Object(map) if !map.is_empty() => map,
        _ => {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("ISBN {isbn} not found or no data available."),
            ))
        }
    };

    if let Some(location) = redirect_location(&document) {
        info!("ISBN '{isbn}' redirects to '{location}'");
        return Ok(Lookup::Redirected { location });
    }

    if let Some(location) = see_also_location(&document) {
        info!("ISBN '{isbn}' has been moved or merged into '{location}'");
        return Ok(Lookup::Moved { location });
    }

    Ok(Lookup::Book(Book::new(document)))
}

fn is_not_found_error(document: &Map<String, Value>) -> bool {
    document.get("error").and_then(Value::as_str) == Some("notfound")
}

/// The `type` field is normally `{"key": "/type/redirect"}` but a plain string has also been
/// seen on older records.
fn redirect_location(document: &Map<String, Value>) -> Option<String> {
    let kind = match document.get("type")? {
        Value::String(s) => s.as_str(),
        Value::Object(o) => o.get("key")?.as_str()?,
        _ => return None,
    };

    if kind != REDIRECT_TYPE {
        return None;
    }

    document
        .get("location")
        .and_then(Value::as_str)
        .filter(|l| !l.is_empty())
        .map(ToOwned::to_owned)
}

fn see_also_location(document: &Map<String, Value>) -> Option<String> {
    document
        .get("see_also")?
        .as_array()?
        .first()?
        .as_str()
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{
            assert_url, impl_reply_producer, MockClient, NetworkErrorProducer, Reply,
            TimeoutProducer,
        },
        ErrorKind, Isbn, Lookup,
    };

    const EDITION_JSON: &str = include_str!("../../tests/data/open_library_edition.json");

    fn isbn(s: &str) -> Isbn {
        Isbn::parse(s).expect("test ISBNs are valid")
    }

    fn lookup_err<C: super::Client>(s: &str) -> crate::Error {
        super::get_by_isbn::<C>(&isbn(s)).expect_err("lookup should fail")
    }

    impl_reply_producer! {
        EditionProducer => Ok(Reply::ok(EDITION_JSON)),
        NotFoundStatusProducer => Ok(Reply {
            status: 404,
            reason: "Not Found".to_owned(),
            text: r#"{"error": "notfound"}"#.to_owned(),
        }),
        ServerErrorProducer => Ok(Reply {
            status: 500,
            reason: "Internal Server Error".to_owned(),
            text: "Internal Server Error".to_owned(),
        }),
        NotJsonProducer => Ok(Reply::ok("This is not JSON")),
        NotFoundJsonProducer => Ok(Reply::ok(r#"{"error": "notfound"}"#)),
        EmptyObjectProducer => Ok(Reply::ok("{}")),
        EmptyArrayProducer => Ok(Reply::ok("[]")),
        NullProducer => Ok(Reply::ok("null")),
        StringProducer => Ok(Reply::ok(r#""x""#)),
        NumberProducer => Ok(Reply::ok("5")),
        RedirectProducer => Ok(Reply::ok(
            r#"{"type": {"key": "/type/redirect"}, "location": "/books/OL12345M"}"#
        )),
        StringRedirectProducer => Ok(Reply::ok(
            r#"{"type": "/type/redirect", "location": "/books/OL54321M"}"#
        )),
        RedirectWithoutLocationProducer => Ok(Reply::ok(
            r#"{"type": {"key": "/type/redirect"}, "title": "Still a book"}"#
        )),
        EmptyLocationRedirectProducer => Ok(Reply::ok(
            r#"{"type": {"key": "/type/redirect"}, "location": "", "title": "Still a book"}"#
        )),
        NonStringSeeAlsoProducer => Ok(Reply::ok(
            r#"{"title": "Book", "see_also": [{"key": "/books/OL1M"}]}"#
        )),
        SeeAlsoProducer => Ok(Reply::ok(r#"{"see_also": ["/books/OL999M", "/books/OL1000M"]}"#)),
        EmptySeeAlsoProducer => Ok(Reply::ok(r#"{"title": "Book", "see_also": []}"#)),
    }

    #[test]
    fn url_format_is_correct() {
        assert!(super::get_by_isbn::<MockClient>(&isbn("978-0-7356-1967-8")).is_err());
        assert_url!("https://openlibrary.org/isbn/9780735619678.json");
    }

    #[test]
    fn edition_produces_book() {
        let res = super::get_by_isbn::<MockClient<EditionProducer>>(&isbn("0735619670"))
            .expect("EditionProducer always produces a valid edition document");

        let book = match res {
            Lookup::Book(book) => book,
            other => panic!("Expected a book but got {other:?}"),
        };
        assert_eq!(Some("Code Complete"), book.title());
        assert_eq!(Some("914".to_owned()), book.number_of_pages());
        assert_eq!(vec!["Microsoft Press"], book.publishers());
    }

    #[test]
    fn not_found_status() {
        let err = lookup_err::<MockClient<NotFoundStatusProducer>>("0000000000");

        assert_eq!(ErrorKind::NotFound, err.kind());
        assert_eq!("ISBN 0000000000 not found on Open Library.", err.message());
    }

    #[test]
    fn server_error_status_keeps_status_code() {
        let err = lookup_err::<MockClient<ServerErrorProducer>>("9780321765723");

        assert_eq!(ErrorKind::Status(500), err.kind());
        assert_eq!(
            "Open Library API error: Internal Server Error",
            err.message()
        );
    }

    #[test]
    fn empty_body_returns_empty_error() {
        let err = lookup_err::<MockClient>("9780321765723");

        assert_eq!(ErrorKind::Empty, err.kind());
        assert_eq!("Empty response from Open Library API.", err.message());
    }

    #[test]
    fn invalid_json_returns_deserialize_error() {
        let err = lookup_err::<MockClient<NotJsonProducer>>("3333333333");

        assert_eq!(ErrorKind::Deserialize, err.kind());
        assert_eq!(
            "Failed to parse JSON response from Open Library API.",
            err.message()
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn not_found_error_field() {
        let err = lookup_err::<MockClient<NotFoundJsonProducer>>("1111111111");

        assert_eq!(ErrorKind::NotFound, err.kind());
        assert_eq!(
            "ISBN 1111111111 not found on Open Library (API specific error).",
            err.message()
        );
    }

    #[test]
    fn empty_documents_are_not_found() {
        let err = lookup_err::<MockClient<EmptyObjectProducer>>("1111111111");
        assert_eq!(ErrorKind::NotFound, err.kind());
        assert!(err.message().contains("not found or no data available"));

        let err = lookup_err::<MockClient<EmptyArrayProducer>>("1111111111");
        assert_eq!(ErrorKind::NotFound, err.kind());
    }

    #[test]
    fn non_object_documents_are_not_found() {
        for err in [
            lookup_err::<MockClient<NullProducer>>("1111111111"),
            lookup_err::<MockClient<StringProducer>>("1111111111"),
            lookup_err::<MockClient<NumberProducer>>("1111111111"),
        ] {
            assert_eq!(ErrorKind::NotFound, err.kind());
            assert_eq!(
                "ISBN 1111111111 not found or no data available.",
                err.message()
            );
        }
    }

    #[test]
    fn redirect_returns_location() {
        let res = super::get_by_isbn::<MockClient<RedirectProducer>>(&isbn("9780123456789"))
            .unwrap();
        assert_eq!(
            Lookup::Redirected {
                location: "/books/OL12345M".to_owned()
            },
            res
        );

        let res =
            super::get_by_isbn::<MockClient<StringRedirectProducer>>(&isbn("9780123456789"))
                .unwrap();
        assert_eq!(
            Lookup::Redirected {
                location: "/books/OL54321M".to_owned()
            },
            res
        );
    }

    #[test]
    fn redirect_without_location_is_a_book() {
        let res = super::get_by_isbn::<MockClient<RedirectWithoutLocationProducer>>(&isbn(
            "9780123456789",
        ))
        .unwrap();
        assert!(matches!(res, Lookup::Book(_)));

        let res = super::get_by_isbn::<MockClient<EmptyLocationRedirectProducer>>(&isbn(
            "9780123456789",
        ))
        .unwrap();
        assert!(matches!(res, Lookup::Book(_)));
    }

    #[test]
    fn see_also_uses_first_location() {
        let res = super::get_by_isbn::<MockClient<SeeAlsoProducer>>(&isbn("9780123456789"))
            .unwrap();
        assert_eq!(
            Lookup::Moved {
                location: "/books/OL999M".to_owned()
            },
            res
        );

        let res = super::get_by_isbn::<MockClient<EmptySeeAlsoProducer>>(&isbn("9780123456789"))
            .unwrap();
        assert!(matches!(res, Lookup::Book(_)));

        let res =
            super::get_by_isbn::<MockClient<NonStringSeeAlsoProducer>>(&isbn("9780123456789"))
                .unwrap();
        assert!(matches!(res, Lookup::Book(_)));
    }

    #[test]
    fn transport_errors_are_passed_through() {
        let err = lookup_err::<MockClient<NetworkErrorProducer>>("2222222222");
        assert_eq!(ErrorKind::IO, err.kind());

        let err = lookup_err::<MockClient<TimeoutProducer>>("2222222222");
        assert_eq!(ErrorKind::Timeout, err.kind());
    }
}
