//! The page address: parsing, and the replace-only history the synchronizer
//! writes through.

use crate::error::LocationError;
use crate::query::QueryParams;

/// An absolute URL split into the parts the calculator cares about.
/// Fragments are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    origin: String,
    pathname: String,
    search: String,
}

impl Location {
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let href = href.trim();
        let invalid = || LocationError::Invalid(href.to_string());

        let (scheme, rest) = href.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(invalid());
        }

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);
        if authority.is_empty() {
            return Err(invalid());
        }

        let (pathname, search) = split_path(tail);
        Ok(Self {
            origin: format!("{scheme}://{authority}"),
            pathname,
            search,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// `""` or a string starting with `?`.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn href(&self) -> String {
        format!("{}{}{}", self.origin, self.pathname, self.search)
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::parse(&self.search)
    }
}

/// Splits `/path?query#fragment` into a pathname (at least `/`) and a search
/// string, discarding the fragment.
fn split_path(tail: &str) -> (String, String) {
    let tail = tail.split('#').next().unwrap_or_default();
    let (path, query) = match tail.split_once('?') {
        Some((path, query)) => (path, query),
        None => (tail, ""),
    };
    let pathname = if path.is_empty() { "/" } else { path };
    let search = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };
    (pathname.to_string(), search)
}

/// Read access to the current address plus in-place replacement that leaves
/// no navigation entry behind.
pub trait History {
    fn location(&self) -> Result<Location, LocationError>;

    /// Accepts a path-absolute reference (`/calc?x=1`) or an absolute URL on
    /// the same origin.
    fn replace_state(&mut self, url: &str) -> Result<(), LocationError>;
}

/// The in-memory address bar backing the terminal front end.
#[derive(Debug, Clone)]
pub struct AddressBar {
    current: Location,
}

impl AddressBar {
    pub fn new(location: Location) -> Self {
        Self { current: location }
    }

    pub fn open(href: &str) -> Result<Self, LocationError> {
        Location::parse(href).map(Self::new)
    }
}

impl History for AddressBar {
    fn location(&self) -> Result<Location, LocationError> {
        Ok(self.current.clone())
    }

    fn replace_state(&mut self, url: &str) -> Result<(), LocationError> {
        if url.starts_with('/') && !url.starts_with("//") {
            let (pathname, search) = split_path(url);
            self.current.pathname = pathname;
            self.current.search = search;
            return Ok(());
        }

        let next = Location::parse(url)?;
        if next.origin != self.current.origin {
            return Err(LocationError::CrossOrigin {
                current: self.current.origin.clone(),
                requested: url.to_string(),
            });
        }
        self.current = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_full_href() {
        let location =
            Location::parse("https://calc.example.com:8443/mortgage?mortgageAmount=1#top").unwrap();

        assert_eq!(location.origin(), "https://calc.example.com:8443");
        assert_eq!(location.pathname(), "/mortgage");
        assert_eq!(location.search(), "?mortgageAmount=1");
        assert_eq!(
            location.href(),
            "https://calc.example.com:8443/mortgage?mortgageAmount=1"
        );
        assert_eq!(location.query().get("mortgageAmount"), Some("1"));
    }

    #[test]
    fn bare_origin_gets_root_path() {
        let location = Location::parse("http://localhost").unwrap();

        assert_eq!(location.pathname(), "/");
        assert_eq!(location.search(), "");
        assert_eq!(location.href(), "http://localhost/");
    }

    #[test]
    fn query_without_path() {
        let location = Location::parse("http://localhost?a=1").unwrap();

        assert_eq!(location.pathname(), "/");
        assert_eq!(location.search(), "?a=1");
    }

    #[test]
    fn lone_question_mark_means_no_search() {
        let location = Location::parse("http://localhost/calc?").unwrap();

        assert_eq!(location.search(), "");
    }

    #[test]
    fn rejects_relative_or_malformed() {
        for href in ["/calc?a=1", "localhost", "://host/", "http:///path", "ht tp://x/"] {
            assert!(Location::parse(href).is_err(), "{href:?} should be rejected");
        }
    }

    #[test]
    fn replace_state_with_path_keeps_origin() {
        let mut bar = AddressBar::open("https://calc.example.com/mortgage?old=1").unwrap();
        bar.replace_state("/mortgage?mortgageAmount=250000").unwrap();

        assert_eq!(
            bar.location().unwrap().href(),
            "https://calc.example.com/mortgage?mortgageAmount=250000"
        );
    }

    #[test]
    fn replace_state_can_clear_query() {
        let mut bar = AddressBar::open("https://calc.example.com/mortgage?old=1").unwrap();
        bar.replace_state("/mortgage").unwrap();

        assert_eq!(bar.location().unwrap().search(), "");
    }

    #[test]
    fn replace_state_accepts_same_origin_absolute() {
        let mut bar = AddressBar::open("http://localhost/").unwrap();
        bar.replace_state("http://localhost/other?x=1").unwrap();

        assert_eq!(bar.location().unwrap().pathname(), "/other");
    }

    #[test]
    fn replace_state_rejects_other_origin() {
        let mut bar = AddressBar::open("http://localhost/").unwrap();
        let err = bar.replace_state("https://elsewhere.example/").unwrap_err();

        assert_eq!(
            err,
            LocationError::CrossOrigin {
                current: "http://localhost".to_string(),
                requested: "https://elsewhere.example/".to_string(),
            }
        );
        assert_eq!(bar.location().unwrap().href(), "http://localhost/");
    }
}
