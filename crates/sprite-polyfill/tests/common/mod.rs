//! Shared fixtures for the sprite-polyfill integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smol::channel::Receiver;
use sprite_polyfill::net::{Fetch, NetError, Url};
use sprite_polyfill::{Config, SpriteEngine, SpriteStore};

pub const BASE: &str = "https://example.com/app/";

pub const SPRITE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
    <symbol id="close" viewBox="0 0 24 24"><path d="M1 1L23 23"/><path d="M23 1L1 23"/></symbol>
    <symbol id="menu" viewBox="0 0 32 32"><g fill="red"><rect width="32" height="4"/></g></symbol>
</svg>"#;

pub const IE11: &str = "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko";
pub const CHROME: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Fetch double answering from a table of absolute URLs
///
/// Unknown URLs fail with a 404. With a gate installed, every fetch waits
/// for one message on it before answering.
#[derive(Default)]
pub struct ScriptedFetch {
    responses: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<String>>,
    gate: Option<Receiver<()>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(mut self, gate: Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_response(self, url: &str, body: &str) -> Self {
        self.respond(url, body);
        self
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses.borrow_mut().insert(url.to_string(), body.to_string());
    }

    /// Absolute URLs fetched so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Fetch for ScriptedFetch {
    async fn fetch_text(&self, url: &Url) -> Result<String, NetError> {
        self.calls.borrow_mut().push(url.to_string());

        if let Some(gate) = &self.gate {
            let _ = gate.recv().await;
        }

        self.responses
            .borrow()
            .get(url.as_str())
            .cloned()
            .ok_or(NetError::HttpError { status: 404 })
    }
}

pub fn config(user_agent: &str) -> Config {
    Config {
        base_url: BASE.to_string(),
        user_agent: user_agent.to_string(),
        diagnostics: Some(true),
        ..Config::default()
    }
}

/// Engine on `user_agent` backed by `fetch`
pub fn engine(user_agent: &str, fetch: &Rc<ScriptedFetch>) -> SpriteEngine<Rc<ScriptedFetch>> {
    SpriteEngine::with_fetcher(config(user_agent), fetch.clone()).unwrap()
}

/// Engine sharing `store` with other engines
pub fn engine_with_store(
    user_agent: &str,
    fetch: &Rc<ScriptedFetch>,
    store: Rc<SpriteStore>,
) -> SpriteEngine<Rc<ScriptedFetch>> {
    let config = config(user_agent);
    let base = config.base().unwrap();
    SpriteEngine::with_parts(config, fetch.clone(), base, store)
}
