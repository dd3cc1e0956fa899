//! Settings page parsing

use regex::Regex;
use std::cell::OnceCell;

/// Parser for AOC responses with a lazily compiled user id pattern
#[derive(Clone, Debug, Default)]
pub(crate) struct ResponseParser {
    user_id_regex: OnceCell<Regex>,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_id_regex(&self) -> &Regex {
        self.user_id_regex.get_or_init(|| {
            Regex::new(r"\(anonymous user #(\d+)\)").expect("user id pattern compiles")
        })
    }

    /// Extract user ID from settings page HTML
    ///
    /// The settings page shows `(anonymous user #NNN)` for every logged-in
    /// account; anything else (login page, error page) yields `None`.
    pub fn extract_user_id(&self, html: &str) -> Option<u64> {
        let captures = self.user_id_regex().captures(html)?;
        captures.get(1)?.as_str().parse::<u64>().ok()
    }
}
