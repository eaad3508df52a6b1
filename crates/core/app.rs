use eyre::eyre;
use isbn_lookup::{Book, Lookup};

const NOT_AVAILABLE: &str = "Not available";

/// Turns a successful [`Lookup`] into the text shown to the user.
///
/// `isbn` is the ISBN as typed by the user so messages match what they asked for.
pub fn describe_lookup(isbn: &str, lookup: Lookup) -> eyre::Result<String> {
    match lookup {
        Lookup::Redirected { location } => Ok(format!(
            "Information for ISBN {isbn} has been redirected. You may need to look up: {location}"
        )),
        Lookup::Moved { location } => Ok(format!(
            "The resource related to ISBN {isbn} has been moved or merged. You may need to look up: {location}"
        )),
        // an empty title counts as missing
        Lookup::Book(book) if book.title().is_some_and(|t| !t.is_empty()) => {
            Ok(describe_book(&book))
        }
        Lookup::Book(_) => Err(eyre!(
            "No displayable information found for ISBN {isbn}, or the response was not structured as expected book data."
        )),
    }
}

pub fn describe_book(book: &Book) -> String {
    let publishers = book.publishers();

    let lines = [
        format!("Title: {}", book.title().unwrap_or(NOT_AVAILABLE)),
        format!("Author(s): {}", describe_authors(book)),
        format!(
            "Publish Date: {}",
            book.publish_date().unwrap_or(NOT_AVAILABLE)
        ),
        format!(
            "Number of Pages: {}",
            book.number_of_pages()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
        ),
        format!(
            "Publishers: {}",
            if publishers.is_empty() {
                NOT_AVAILABLE.to_owned()
            } else {
                publishers.join(", ")
            }
        ),
    ];

    lines.join("\n")
}

// The edition document normally only has author keys, the names need another request.
fn describe_authors(book: &Book) -> String {
    let authors = book.authors();

    let names = authors.iter().filter_map(|a| a.name).collect::<Vec<_>>();
    if !names.is_empty() {
        return names.join(", ");
    }

    let keys = authors.iter().filter_map(|a| a.key).collect::<Vec<_>>();
    if keys.is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        format!(
            "Author keys: {} (Further lookup needed for names)",
            keys.join(", ")
        )
    }
}
