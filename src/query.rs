//! `application/x-www-form-urlencoded` query strings, with the same
//! get/has/set semantics browsers give `URLSearchParams`.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a search string. A leading `?` is optional.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let pairs = search
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((name, value)) => (decode(name), decode(value)),
                None => (decode(segment), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Replaces the first `name` entry and drops any later duplicates, or
    /// appends when absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(key, _)| key == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(key, _)| {
                    let keep = index <= first || key != name;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode(name), encode(value))?;
        }
        Ok(())
    }
}

fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: Option<&u8>) -> Option<u8> {
    match *byte? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_with_or_without_question_mark() {
        let a = QueryParams::parse("?mortgageAmount=250000&closingCostPercentage=2");
        let b = QueryParams::parse("mortgageAmount=250000&closingCostPercentage=2");

        assert_eq!(a, b);
        assert_eq!(a.get("mortgageAmount"), Some("250000"));
        assert_eq!(a.get("closingCostPercentage"), Some("2"));
        assert_eq!(a.get("downPaymentPercentage"), None);
    }

    #[test]
    fn empty_value_is_still_present() {
        let params = QueryParams::parse("mortgageAmount=&flag");

        assert!(params.has("mortgageAmount"));
        assert_eq!(params.get("mortgageAmount"), Some(""));
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn first_duplicate_wins() {
        let params = QueryParams::parse("a=1&a=2");

        assert_eq!(params.get("a"), Some("1"));
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let params = QueryParams::parse("note=hello+world%21&bad=%zz&utf=%C3%A9");

        assert_eq!(params.get("note"), Some("hello world!"));
        assert_eq!(params.get("bad"), Some("%zz"));
        assert_eq!(params.get("utf"), Some("é"));
    }

    #[test]
    fn set_replaces_then_appends() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        params.set("c", "4");

        assert_eq!(params.to_string(), "a=9&b=2&c=4");
    }

    #[test]
    fn serializes_with_form_encoding() {
        let mut params = QueryParams::new();
        params.set("mortgageAmount", "250 000");
        params.set("x", "a&b=c*-._~");

        assert_eq!(
            params.to_string(),
            "mortgageAmount=250+000&x=a%26b%3Dc*-._%7E"
        );
    }

    #[test]
    fn empty_params_render_empty() {
        assert!(QueryParams::parse("?").is_empty());
        assert_eq!(QueryParams::new().to_string(), "");
    }
}
