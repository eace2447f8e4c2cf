//! Splits text into alphabetic runs and the separator runs between them.
//!
//! `"_This is_a!test"` decomposes into prefix `"_"`, parts
//! `["This", "is", "a", "test"]` and separators `[" ", "_", "!"]`.
//! Concatenating the prefix and the interleaved parts/separators gives back
//! the input minus any trailing separator run, which is kept apart in
//! [`TextDecomposition::suffix`].

use std::mem;

pub fn is_alpha(c: char) -> bool {
    c.is_alphabetic()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDecomposition {
    parts: Vec<String>,
    separators: Vec<String>,
    prefix: String,
    suffix: String,
}

impl TextDecomposition {
    pub fn new(text: &str) -> Self {
        Self::with_classifier(text, is_alpha)
    }

    /// Single left-to-right scan; `classify` returns true for characters that
    /// belong to a part.
    pub fn with_classifier<F>(text: &str, classify: F) -> Self
    where
        F: Fn(char) -> bool,
    {
        let mut out = TextDecomposition::default();
        let mut part = String::new();
        let mut separator = String::new();
        for ch in text.chars() {
            if classify(ch) {
                if part.is_empty() {
                    if out.parts.is_empty() {
                        out.prefix = mem::take(&mut separator);
                    } else {
                        out.separators.push(mem::take(&mut separator));
                    }
                }
                part.push(ch);
            } else {
                if !part.is_empty() {
                    out.parts.push(mem::take(&mut part));
                }
                separator.push(ch);
            }
        }
        if !part.is_empty() {
            out.parts.push(part);
        } else if out.parts.is_empty() {
            out.prefix = separator;
        } else {
            out.suffix = separator;
        }
        out
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Trailing separator run, empty when the text ends inside a part.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True when every separator run is textually identical.
    pub fn has_uniform_separators(&self) -> bool {
        separators_uniform(&self.separators)
    }

    /// Prefix followed by the interleaved parts and separators.
    pub fn reconstruct(&self) -> String {
        let mut text = self.prefix.clone();
        for (i, part) in self.parts.iter().enumerate() {
            text.push_str(part);
            if let Some(sep) = self.separators.get(i) {
                text.push_str(sep);
            }
        }
        text
    }
}

pub(crate) fn separators_uniform(separators: &[String]) -> bool {
    match separators.split_first() {
        Some((first, rest)) => rest.iter().all(|s| s == first),
        None => true,
    }
}
