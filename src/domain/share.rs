//! Encodes the current input into a shareable link and reads it back.
//!
//! Query keys: `l`, `b`, `h` for the sides in cm, `g` for the weight in grams and
//! `u` (`kg` or `g`) for the unit the weight was entered in.

use thiserror::Error;
use url::{form_urlencoded, Url};

use super::measurement::{parse_number, UserInput, WeightUnit};

#[derive(Debug, Error)]
pub enum ShareLinkError {
    #[error("invalid share link: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Query string for `input`, without the leading `?`. Zero values are left out.
pub fn encode_query(input: &UserInput) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in [("l", input.side1), ("b", input.side2), ("h", input.side3)] {
        if value > 0.0 {
            query.append_pair(key, &value.to_string());
        }
    }
    if input.weight > 0.0 {
        query.append_pair("g", &input.weight.to_string());
        query.append_pair("u", input.weight_unit.label());
    }
    query.finish()
}

/// Full link on `base`. An empty input gives the bare base URL.
pub fn share_link(base: &str, input: &UserInput) -> Result<String, ShareLinkError> {
    let mut url = Url::parse(base)?;
    let query = encode_query(input);
    url.set_query(if query.is_empty() { None } else { Some(&query) });
    Ok(url.into())
}

/// Reads a share link, either a full URL or a bare query string.
///
/// Returns `Ok(None)` when the link carries no measurement at all.
pub fn decode_share_link(link: &str) -> Result<Option<UserInput>, ShareLinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(None);
    }

    let pairs: Vec<(String, String)> = if link.contains("://") {
        Url::parse(link)?.query_pairs().into_owned().collect()
    } else {
        let query = link.split_once('?').map_or(link, |(_, query)| query);
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    };

    let mut input = UserInput::default();
    for (key, value) in &pairs {
        match key.as_str() {
            "l" => input.side1 = parse_number(value),
            "b" => input.side2 = parse_number(value),
            "h" => input.side3 = parse_number(value),
            "g" => input.weight = parse_number(value),
            "u" => input.weight_unit = WeightUnit::from_label(value),
            _ => {}
        }
    }

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input))
    }
}
