//! Files compiled into the binary from `assets/`: stylesheet, favicon and the default catalog.

use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::error;

use crate::config::DATA_FILE;

const STYLESHEET: &str = "main.css";
const FAVICON: &str = "favicon.svg";

#[derive(RustEmbed)]
#[folder = "assets"]
struct Bundled;

pub fn main_css() -> &'static str {
    static CSS: OnceLock<String> = OnceLock::new();
    CSS.get_or_init(|| {
        bundled(STYLESHEET)
            .and_then(|bytes| match String::from_utf8(bytes.into_owned()) {
                Ok(text) => Some(text),
                Err(_) => {
                    error!("{STYLESHEET} is not valid UTF-8");
                    None
                }
            })
            .unwrap_or_default()
    })
}

/// `data:` URI of the SVG favicon, so the webview needs no asset server.
pub fn favicon_data_uri() -> &'static str {
    static URI: OnceLock<String> = OnceLock::new();
    URI.get_or_init(|| {
        bundled(FAVICON)
            .map(|bytes| format!("data:image/svg+xml;base64,{}", base64(&bytes)))
            .unwrap_or_default()
    })
}

/// Raw JSON of the catalog shipped with the app.
pub fn embedded_catalog() -> Option<Cow<'static, [u8]>> {
    bundled(DATA_FILE)
}

fn bundled(name: &str) -> Option<Cow<'static, [u8]>> {
    let file = Bundled::get(name);
    if file.is_none() {
        error!("bundled asset {name} is missing");
    }
    file.map(|file| file.data)
}

fn base64(input: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut encoded = String::with_capacity(input.len().div_ceil(3) * 4);

    for group in input.chunks(3) {
        let bits = group
            .iter()
            .enumerate()
            .fold(0u32, |acc, (index, byte)| acc | u32::from(*byte) << (16 - 8 * index));
        for slot in 0..4 {
            if slot <= group.len() {
                let sextet = (bits >> (18 - 6 * slot)) & 0b11_1111;
                encoded.push(char::from(ALPHABET[sextet as usize]));
            } else {
                encoded.push('=');
            }
        }
    }

    encoded
}
