//! Lazy iteration over result pages.

use std::iter::FusedIterator;

use tracing::debug;

use crate::client::Client;
use crate::error::Result;
use crate::request::QueryOptions;
use crate::response::Response;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    First,
    After(u64),
    Exhausted,
}

/// Pages of a purchase query, fetched one blocking request at a time as the
/// iterator is advanced.
///
/// Iteration ends after the last page (no cursor) or right after the first
/// error, which is yielded. A `Pages` cannot be restarted; call
/// [`Client::iterate_pages`] again for a fresh walk.
#[derive(Debug)]
pub struct Pages<'a, T: Transport> {
    client: &'a Client<T>,
    options: QueryOptions,
    cursor: Cursor,
    fetched: usize,
}

impl<'a, T: Transport> Pages<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, options: QueryOptions) -> Self {
        Self {
            client,
            options,
            cursor: Cursor::First,
            fetched: 0,
        }
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }
}

impl<T: Transport> Iterator for Pages<'_, T> {
    type Item = Result<Response>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.cursor {
            Cursor::First => self.client.purchase(&self.options),
            Cursor::After(cursor) => self.client.purchase_after(cursor, &self.options),
            Cursor::Exhausted => return None,
        };

        self.cursor = match &result {
            Ok(page) => {
                self.fetched += 1;
                match page.next_page_search_after {
                    Some(cursor) if page.has_next() => Cursor::After(cursor),
                    _ => {
                        debug!(pages = self.fetched, "Reached last page");
                        Cursor::Exhausted
                    }
                }
            }
            Err(_) => Cursor::Exhausted,
        };

        Some(result)
    }
}

impl<T: Transport> FusedIterator for Pages<'_, T> {}
