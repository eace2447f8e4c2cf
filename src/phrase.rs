//! Locates a dictated phrase inside compound identifier-like text and recovers
//! the letter case and separator it was written with.
//!
//! Matching is case-insensitive. A phrase either sits inside one alphabetic
//! run (`"ChickenEATSgrains"` contains `"chicken eats"`) or spans several runs
//! (`"once_again_this_is"` contains `"again this"`), in which case the first
//! word must end its run, every interior word must fill its run exactly and
//! the last word must begin its run.

use crate::separation::{separators_uniform, TextDecomposition};
use std::fmt;
use thiserror::Error;

/// Span of a located phrase. Offsets are byte offsets into the original-case
/// parts: `start_offset` into `parts[start_part]`, `end_offset` (exclusive)
/// into `parts[end_part]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub start_part: usize,
    pub start_offset: usize,
    pub end_part: usize,
    pub end_offset: usize,
}

impl PhraseMatch {
    pub fn is_single_run(&self) -> bool {
        self.start_part == self.end_part
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProseRejection {
    #[error("phrase not found in text")]
    NotFound,
    #[error("separators inside the matched span differ")]
    InconsistentSeparator,
    #[error("word {0:?} has no uniform letter case")]
    InvalidCase(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Lower,
    Upper,
    Capitalized,
}

impl LetterCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterCase::Lower => "lower",
            LetterCase::Upper => "upper",
            LetterCase::Capitalized => "capitalized",
        }
    }
}

impl fmt::Display for LetterCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn has_cased_only(s: &str, cased: fn(char) -> bool, other: fn(char) -> bool) -> bool {
    s.chars().any(cased) && !s.chars().any(other)
}

fn is_lower(s: &str) -> bool {
    has_cased_only(s, char::is_lowercase, char::is_uppercase)
}

fn is_upper(s: &str) -> bool {
    has_cased_only(s, char::is_uppercase, char::is_lowercase)
}

pub fn classify_case(word: &str) -> Result<LetterCase, ProseRejection> {
    if is_lower(word) {
        return Ok(LetterCase::Lower);
    }
    if is_upper(word) {
        return Ok(LetterCase::Upper);
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() && is_lower(chars.as_str()) => Ok(LetterCase::Capitalized),
        _ => Err(ProseRejection::InvalidCase(word.to_string())),
    }
}

/// Drops the trailing run of words that share the final word's case. The
/// final case then applies to every word past the end of the template.
pub fn simplify_cases(cases: &[LetterCase]) -> Vec<LetterCase> {
    let Some(&last) = cases.last() else {
        return Vec::new();
    };
    let keep = cases.iter().rposition(|&c| c != last).map_or(0, |p| p + 1);
    let mut simplified = cases[..keep].to_vec();
    simplified.push(last);
    simplified
}

pub fn case_template(cases: &[LetterCase]) -> String {
    simplify_cases(cases).iter().map(LetterCase::as_str).collect::<Vec<_>>().join(" ")
}

// One char in, one char out, so char positions agree between folded and original text.
fn fold(s: &str) -> String {
    s.chars().map(|c| c.to_lowercase().next().unwrap_or(c)).collect()
}

fn byte_at_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(b, _)| b).unwrap_or(s.len())
}

fn folded_to_original(original: &str, folded: &str, folded_byte: usize) -> usize {
    byte_at_char(original, folded[..folded_byte].chars().count())
}

/// Finds the leftmost span of `decomposition` holding `phrase` (space separated words).
/// Containment inside a single run takes priority over spanning several runs.
pub fn locate(decomposition: &TextDecomposition, phrase: &str) -> Option<PhraseMatch> {
    let words: Vec<String> = phrase.split(' ').map(fold).collect();
    let compact = words.concat();
    if compact.is_empty() {
        return None;
    }
    let parts = decomposition.parts();
    let folded: Vec<String> = parts.iter().map(|p| fold(p)).collect();

    for (i, part) in folded.iter().enumerate() {
        if let Some(b) = part.find(&compact) {
            return Some(PhraseMatch {
                start_part: i,
                start_offset: folded_to_original(&parts[i], part, b),
                end_part: i,
                end_offset: folded_to_original(&parts[i], part, b + compact.len()),
            });
        }
    }

    if words.len() < 2 || words.len() > parts.len() {
        return None;
    }
    let last = words.len() - 1;
    (0..=parts.len() - words.len()).find_map(|i| {
        if !folded[i].ends_with(&words[0]) {
            return None;
        }
        if (1..last).any(|k| folded[i + k] != words[k]) {
            return None;
        }
        if !folded[i + last].starts_with(&words[last]) {
            return None;
        }
        let begin = folded[i].len() - words[0].len();
        Some(PhraseMatch {
            start_part: i,
            start_offset: folded_to_original(&parts[i], &folded[i], begin),
            end_part: i + last,
            end_offset: byte_at_char(&parts[i + last], words[last].chars().count()),
        })
    })
}

/// A phrase located inside a decomposition, with the queries that rebuild
/// the text around it.
#[derive(Debug, Clone)]
pub struct LocatedPhrase<'a> {
    decomposition: &'a TextDecomposition,
    words: Vec<String>,
    span: PhraseMatch,
}

impl<'a> LocatedPhrase<'a> {
    pub fn find(decomposition: &'a TextDecomposition, phrase: &str) -> Option<Self> {
        let span = locate(decomposition, phrase)?;
        let words = phrase.split(' ').map(fold).collect();
        Some(Self { decomposition, words, span })
    }

    pub fn span(&self) -> PhraseMatch {
        self.span
    }

    /// Separators strictly inside the span must all be identical.
    pub fn separators_consistent(&self) -> bool {
        let separators = self.decomposition.separators();
        separators_uniform(&separators[self.span.start_part..self.span.end_part])
    }

    /// Separator between the first and second matched runs, empty for a single-run match.
    pub fn first_interior_separator(&self) -> &'a str {
        if self.span.is_single_run() {
            return "";
        }
        self.decomposition
            .separators()
            .get(self.span.start_part)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn text_before(&self) -> String {
        let d = self.decomposition;
        let mut text = d.prefix().to_string();
        for i in 0..self.span.start_part {
            text.push_str(&d.parts()[i]);
            text.push_str(&d.separators()[i]);
        }
        text.push_str(&d.parts()[self.span.start_part][..self.span.start_offset]);
        text
    }

    pub fn text_after(&self) -> String {
        let d = self.decomposition;
        let end = self.span.end_part;
        let mut text = d.parts()[end][self.span.end_offset..].to_string();
        if let Some(sep) = d.separators().get(end) {
            text.push_str(sep);
        }
        for i in end + 1..d.parts().len() {
            text.push_str(&d.parts()[i]);
            if let Some(sep) = d.separators().get(i) {
                text.push_str(sep);
            }
        }
        text.push_str(d.suffix());
        text
    }

    /// The matched words sliced from the original-case text.
    pub fn matched_words(&self) -> Vec<&'a str> {
        let parts = self.decomposition.parts();
        let span = self.span;
        if span.is_single_run() {
            let matched = &parts[span.start_part][span.start_offset..span.end_offset];
            let mut out = Vec::with_capacity(self.words.len());
            let mut rest = matched;
            for word in &self.words {
                let cut = byte_at_char(rest, word.chars().count());
                out.push(&rest[..cut]);
                rest = &rest[cut..];
            }
            return out;
        }
        let mut out = Vec::with_capacity(span.end_part - span.start_part + 1);
        out.push(&parts[span.start_part][span.start_offset..]);
        for part in &parts[span.start_part + 1..span.end_part] {
            out.push(part.as_str());
        }
        out.push(&parts[span.end_part][..span.end_offset]);
        out
    }

    pub fn cases(&self) -> Result<Vec<LetterCase>, ProseRejection> {
        self.matched_words().into_iter().map(classify_case).collect()
    }

    pub fn case_template(&self) -> Result<String, ProseRejection> {
        Ok(case_template(&self.cases()?))
    }
}

/// Everything needed to replay a phrase found inside inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseMatch {
    pub span: PhraseMatch,
    pub text_before: String,
    pub text_after: String,
    pub case_template: String,
    pub first_separator: String,
}

/// Locates `phrase` and validates it is usable as a template slot.
pub fn match_prose(decomposition: &TextDecomposition, phrase: &str) -> Result<ProseMatch, ProseRejection> {
    let located = LocatedPhrase::find(decomposition, phrase).ok_or(ProseRejection::NotFound)?;
    if !located.separators_consistent() {
        return Err(ProseRejection::InconsistentSeparator);
    }
    let case_template = located.case_template()?;
    Ok(ProseMatch {
        span: located.span(),
        text_before: located.text_before(),
        text_after: located.text_after(),
        case_template,
        first_separator: located.first_interior_separator().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_keeps_char_count() {
        let s = "ÀBÇdé";
        assert_eq!(fold(s).chars().count(), s.chars().count());
        assert_eq!(fold(s), "àbçdé");
    }

    #[test]
    fn offsets_map_through_multibyte_text() {
        let d = TextDecomposition::new("ÉtéChaud");
        let m = locate(&d, "chaud").expect("match");
        assert_eq!(&d.parts()[0][m.start_offset..m.end_offset], "Chaud");
    }

    #[test]
    fn empty_phrase_never_matches() {
        assert!(locate(&TextDecomposition::new("abc"), "").is_none());
    }
}
