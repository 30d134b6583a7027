//! Environment-variable placeholder expansion for the address bar
//!
//! `%TEMP%`-style placeholders are expanded first, then shell forms
//! (`~`, `$HOME`, `${HOME}`). Unknown variables are left exactly as typed so
//! the "can't find" message can show what the user entered.

use std::collections::HashMap;
use std::path::PathBuf;

/// Source of environment variables
pub trait Environment: Send + Sync {
    /// Value of a variable, if set
    fn var(&self, name: &str) -> Option<String>;

    /// The user's home directory
    fn home_dir(&self) -> Option<PathBuf>;

    /// Expand every placeholder in `input`
    fn expand(&self, input: &str) -> String {
        let percent = expand_percent(input, |name| self.var(name));
        shellexpand::full_with_context_no_errors(
            &percent,
            || self.home_dir().map(|home| home.to_string_lossy().into_owned()),
            |name: &str| self.var(name),
        )
        .into_owned()
    }
}

/// Expand `%NAME%` placeholders the way Windows does.
///
/// A defined name is replaced. Otherwise the first `%` is kept and scanning
/// resumes at the closing one, so `%%`, unclosed `%` and undefined names all
/// stay exactly as typed.
pub fn expand_percent(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('%') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('%') else {
            result.push('%');
            rest = after;
            break;
        };

        let name = &after[..end];
        match Some(name).filter(|n| !n.is_empty()).and_then(|n| lookup(n)) {
            Some(value) => {
                result.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                result.push('%');
                result.push_str(name);
                rest = &after[end..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().or_else(|| {
            // Windows variable names are case-insensitive
            #[cfg(windows)]
            {
                std::env::vars()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            }
            #[cfg(not(windows))]
            {
                None
            }
        })
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Fixed set of variables
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
