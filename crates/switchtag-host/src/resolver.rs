// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::collections::HashMap;

/// Resolves the `variable` attribute of an invocation to an input value.
///
/// Returning `None` means the key is unknown; the processor treats that
/// as an empty-string input so an empty-string case alternative can
/// still match it.
pub trait VariableResolver {
    fn resolve(&self, key: &str) -> Option<String>;
}

const GET_PREFIX: &str = "get:";
const POST_PREFIX: &str = "post:";
const STASH_PREFIX: &str = "stash:";
const GLOBAL_PREFIX: &str = "global:";

/// Prefix-routing resolver over in-memory sources.
///
/// `get:` and `post:` keys read request parameters (sanitized of markup),
/// `stash:` keys read the stash store, `global:` keys read the global
/// table. Unprefixed keys fall back to the global table, standing in for
/// the host's own variable substitution.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    get: HashMap<String, String>,
    post: HashMap<String, String>,
    stash: HashMap<String, String>,
    globals: HashMap<String, String>,
}

impl SourceResolver {
    /// Creates a resolver with no sources populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a GET request parameter.
    pub fn with_get_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.get.insert(name.into(), value.into());
        self
    }

    /// Adds a POST request parameter.
    pub fn with_post_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.insert(name.into(), value.into());
        self
    }

    /// Adds a stash entry.
    pub fn with_stash(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.stash.insert(name.into(), value.into());
        self
    }

    /// Adds a global variable.
    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }
}

impl VariableResolver for SourceResolver {
    fn resolve(&self, key: &str) -> Option<String> {
        if let Some(name) = key.strip_prefix(GET_PREFIX) {
            return self.get.get(name).map(|value| sanitize(value));
        }
        if let Some(name) = key.strip_prefix(POST_PREFIX) {
            return self.post.get(name).map(|value| sanitize(value));
        }
        if let Some(name) = key.strip_prefix(STASH_PREFIX) {
            return self.stash.get(name).cloned();
        }
        if let Some(name) = key.strip_prefix(GLOBAL_PREFIX) {
            return self.globals.get(name).cloned();
        }
        self.globals.get(key).cloned()
    }
}

/// Strips `<...>` markup from request-supplied values.
fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;

    for ch in value.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
