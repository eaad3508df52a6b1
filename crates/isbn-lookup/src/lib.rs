#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # isbn-lookup
//!
//! isbn-lookup is a library for looking up books by ISBN using the
//! [Open Library](https://openlibrary.org) API.
//!
//! The Open Library document is returned unchanged as a [`Book`], while the ways a lookup can
//! fail (not found, redirected, malformed reply, network failure) are separated out into
//! [`Lookup`] variants and [`ErrorKind`]s.

mod api;
mod book;
mod error;
pub mod isbn;

pub use api::{Client, Reply, TIMEOUT};
pub use book::{Author, Book};
pub use error::{Error, ErrorKind};
pub use isbn::Isbn;

use log::trace;

type DefaultClient = reqwest::blocking::Client;

/// The successful outcomes of looking up an ISBN.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    /// Open Library has a book for the ISBN.
    Book(Book),
    /// The ISBN has been redirected to another Open Library resource.
    Redirected {
        /// The Open Library path to look up instead, e.g. "/books/OL12345M".
        location: String,
    },
    /// The resource for the ISBN has been moved or merged.
    Moved {
        /// The first Open Library path listed in `see_also`.
        location: String,
    },
}

/// Look up a book by `isbn` using Open Library.
///
/// # Errors
///
/// An [`Err`] of [`ErrorKind::NotFound`] is returned when Open Library has no book for the
/// `isbn`.
/// An [`Err`] of [`ErrorKind::Status`] is returned when Open Library responds with any other
/// unsuccessful status code.
/// An [`Err`] of [`ErrorKind::Empty`] or [`ErrorKind::Deserialize`] is returned when the
/// response is empty or not JSON.
/// An [`Err`] of [`ErrorKind::Timeout`] or [`ErrorKind::IO`] is returned when Open Library
/// cannot be reached.
#[inline]
pub fn lookup(isbn: &Isbn) -> Result<Lookup, Error> {
    lookup_with::<DefaultClient>(isbn)
}

/// Look up a book by `isbn` using Open Library with the [`Client`] `C`.
///
/// # Errors
///
/// See [`lookup`].
#[inline]
pub fn lookup_with<C: Client>(isbn: &Isbn) -> Result<Lookup, Error> {
    trace!("Look up book by ISBN of '{isbn}'");
    api::open_library::get_by_isbn::<C>(isbn)
}
