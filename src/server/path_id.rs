use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::convert::Infallible;

/// The `{id}` path segment, parsed leniently.
///
/// Leading whitespace and an optional sign are skipped, then the longest run
/// of ASCII digits is taken (`"12abc"` is 12). Anything without digits, or
/// out of `i64` range, is "not a number": it matches no row, so handlers
/// answer 404 instead of 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(Option<i64>);

impl PathId {
    pub fn parse(raw: &str) -> Self {
        PathId(parse_int_prefix(raw))
    }

    /// `None` when the segment was not a number.
    pub fn get(self) -> Option<i64> {
        self.0
    }
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(raw)| raw)
            .unwrap_or_default();
        Ok(PathId::parse(&raw))
    }
}
