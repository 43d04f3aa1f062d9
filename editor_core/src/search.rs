//! Search and replace functionality.
//!
//! Matching is line oriented: the text is split on `\n` and every line is
//! scanned independently, so a match never crosses a line boundary.

use crate::position::{Match, Position};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Options controlling how a pattern is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regular_expression: bool,
    pub wrap_around: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            regular_expression: false,
            wrap_around: true,
        }
    }
}

/// Search options plus the replace scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOptions {
    #[serde(flatten)]
    pub search: SearchOptions,
    pub replace_all: bool,
}

impl ReplaceOptions {
    /// Replace every occurrence.
    pub fn all(search: SearchOptions) -> Self {
        Self {
            search,
            replace_all: true,
        }
    }

    /// Replace only the current occurrence.
    pub fn current(search: SearchOptions) -> Self {
        Self {
            search,
            replace_all: false,
        }
    }
}

/// Errors surfaced by [`SearchManager::try_find`].
///
/// The UI-facing methods never return these; they degrade to an empty
/// match set instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Key for the compiled regex cache.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegexKey {
    pattern: String,
    case_sensitive: bool,
    whole_word: bool,
}

/// Search state for one editing session.
#[derive(Debug, Clone)]
pub struct SearchManager {
    /// The active pattern; empty when no search is active.
    pattern: String,
    /// All matches, line-major then left to right.
    matches: Vec<Match>,
    /// Index of the current (highlighted) match.
    current: Option<usize>,
    options: SearchOptions,
    /// Text the current match set was computed from.
    last_search_text: String,
    cached_regex: Option<(RegexKey, Regex)>,
}

impl Default for SearchManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchManager {
    /// Creates a new empty search state.
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            matches: Vec::new(),
            current: None,
            options: SearchOptions::default(),
            last_search_text: String::new(),
            cached_regex: None,
        }
    }

    /// Returns the current search options.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Replaces the search options.
    ///
    /// If a pattern is active and the options differ, the match set is
    /// discarded; the caller has to run [`find`](Self::find) again.
    /// Re-applying identical options is a no-op and keeps the current match.
    pub fn set_options(&mut self, options: SearchOptions) {
        if !self.pattern.is_empty() && options != self.options {
            self.matches.clear();
            self.current = None;
        }
        self.options = options;
    }

    /// Returns the active pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the text the current matches were computed from.
    pub fn last_search_text(&self) -> &str {
        &self.last_search_text
    }

    /// Finds all matches of `pattern` in `text`.
    ///
    /// An invalid regular expression yields an empty match set.
    pub fn find(&mut self, text: &str, pattern: &str) -> &[Match] {
        if let Err(e) = self.try_find(text, pattern) {
            log::debug!("{}", e);
        }
        &self.matches
    }

    /// Like [`find`](Self::find), but reports a pattern that fails to compile.
    pub fn try_find(&mut self, text: &str, pattern: &str) -> Result<&[Match], SearchError> {
        self.matches.clear();
        self.current = None;

        if pattern.is_empty() {
            self.pattern.clear();
            return Ok(&self.matches);
        }

        self.pattern = pattern.to_string();
        self.last_search_text = text.to_string();

        self.matches = if self.options.regular_expression {
            let regex = self.compiled(pattern)?;
            find_regex(&regex, text)
        } else {
            find_literal(text, pattern, &self.options)
        };

        Ok(&self.matches)
    }

    /// Re-runs the active search against `text`, keeping the current match
    /// on the first occurrence at or after the previous one.
    pub fn refresh(&mut self, text: &str) {
        if self.pattern.is_empty() {
            return;
        }
        let old_current = self.current_match().map(|m| m.start);
        let pattern = self.pattern.clone();
        self.find(text, &pattern);

        if let Some(start) = old_current {
            self.nearest_match(start);
        }
    }

    /// Returns all matches.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Returns the number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if there are any matches.
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Returns true if the search is active (has a non-empty pattern).
    pub fn is_active(&self) -> bool {
        !self.pattern.is_empty()
    }

    /// Returns the current match index (0-based).
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the current match, if any.
    pub fn current_match(&self) -> Option<&Match> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// Makes the match at `index` current. Out-of-range indices are rejected.
    pub fn set_current_match(&mut self, index: usize) -> Option<&Match> {
        if index >= self.matches.len() {
            return None;
        }
        self.current = Some(index);
        self.matches.get(index)
    }

    /// Moves to the next match.
    ///
    /// Past the last match this either wraps to the first one or, without
    /// wrap-around, stays on the last match and returns `None`.
    pub fn next_match(&mut self) -> Option<&Match> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        match self.current.map_or(0, |i| i + 1) {
            next if next < len => self.current = Some(next),
            _ if self.options.wrap_around => self.current = Some(0),
            _ => {
                self.current = Some(len - 1);
                return None;
            }
        }
        self.current_match()
    }

    /// Moves to the previous match, mirroring [`next_match`](Self::next_match).
    pub fn previous_match(&mut self) -> Option<&Match> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        match self.current {
            Some(i) if i > 0 => self.current = Some(i - 1),
            _ if self.options.wrap_around => self.current = Some(len - 1),
            _ => {
                self.current = Some(0);
                return None;
            }
        }
        self.current_match()
    }

    /// Makes the first match starting at or after `from` current,
    /// wrapping to the first match if none follows.
    pub fn nearest_match(&mut self, from: Position) -> Option<&Match> {
        if self.matches.is_empty() {
            return None;
        }

        let idx = self
            .matches
            .iter()
            .position(|m| m.start >= from)
            .unwrap_or(0);

        self.current = Some(idx);
        self.matches.get(idx)
    }

    /// Replaces occurrences of `pattern` in `text`.
    ///
    /// Returns the new text and the number of replacements made. The
    /// options are applied first, which may invalidate the current match.
    pub fn replace(
        &mut self,
        text: &str,
        pattern: &str,
        replacement: &str,
        options: &ReplaceOptions,
    ) -> (String, usize) {
        self.set_options(options.search);

        if options.replace_all {
            self.replace_all(text, pattern, replacement)
        } else {
            self.replace_current(text, pattern, replacement)
        }
    }

    /// Recomputes the matches, then substitutes them from last to first so
    /// earlier offsets stay valid while later text changes.
    fn replace_all(&mut self, text: &str, pattern: &str, replacement: &str) -> (String, usize) {
        let matches = self.find(text, pattern).to_vec();
        if matches.is_empty() {
            return (text.to_string(), 0);
        }

        let regex = self.replacement_regex(pattern);
        let mut result = text.to_string();
        let mut replaced = 0;

        for found in matches.iter().rev() {
            let Some(range) = byte_range(&result, found) else {
                log::debug!("Skipping stale match at {}", found.start);
                continue;
            };
            result.replace_range(range, &substitute(regex.as_ref(), found, replacement));
            replaced += 1;
        }

        (result, replaced)
    }

    /// Replaces the current match (or the first one if none is current),
    /// then searches the result again. Matches computed from a different
    /// text are recomputed against `text` first.
    fn replace_current(&mut self, text: &str, pattern: &str, replacement: &str) -> (String, usize) {
        if self.pattern == pattern && text != self.last_search_text {
            self.refresh(text);
        }

        let current = self
            .current_match()
            .filter(|_| self.pattern == pattern)
            .cloned();

        let found = match current {
            Some(found) => found,
            None => match self.find(text, pattern).first().cloned() {
                Some(first) => {
                    self.current = Some(0);
                    first
                }
                None => return (text.to_string(), 0),
            },
        };

        let Some(range) = byte_range(text, &found).filter(|r| text[r.clone()] == found.text) else {
            log::debug!("Current match at {} no longer fits the text", found.start);
            return (text.to_string(), 0);
        };

        let regex = self.replacement_regex(pattern);
        let mut result = text.to_string();
        result.replace_range(range, &substitute(regex.as_ref(), &found, replacement));

        self.find(&result, pattern);
        (result, 1)
    }

    /// Clears the search state.
    pub fn clear(&mut self) {
        self.pattern.clear();
        self.matches.clear();
        self.current = None;
        self.last_search_text.clear();
    }

    /// Status line text for the find dialog.
    pub fn status_message(&self) -> String {
        if self.pattern.is_empty() {
            return String::new();
        }
        match (self.matches.len(), self.current) {
            (0, _) => "No matches found".to_string(),
            (count, Some(i)) => format!("Match {} of {}", i + 1, count),
            (count, None) => format!("{} matches found", count),
        }
    }

    /// Returns the compiled regex for `pattern` under the current options.
    fn compiled(&mut self, pattern: &str) -> Result<Regex, SearchError> {
        let key = RegexKey {
            pattern: pattern.to_string(),
            case_sensitive: self.options.case_sensitive,
            whole_word: self.options.whole_word,
        };

        if let Some((cached_key, regex)) = &self.cached_regex {
            if *cached_key == key {
                return Ok(regex.clone());
            }
        }

        let regex = build_regex(pattern, &self.options).map_err(|source| {
            SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        self.cached_regex = Some((key, regex.clone()));
        Ok(regex)
    }

    /// The regex used to expand capture references, in regex mode only.
    fn replacement_regex(&mut self, pattern: &str) -> Option<Regex> {
        if !self.options.regular_expression {
            return None;
        }
        self.compiled(pattern).ok()
    }
}

fn build_regex(pattern: &str, options: &SearchOptions) -> Result<Regex, regex::Error> {
    let source = if options.whole_word {
        format!(r"\b(?:{})\b", pattern)
    } else {
        pattern.to_string()
    };
    RegexBuilder::new(&source)
        .case_insensitive(!options.case_sensitive)
        .build()
}

fn find_literal(text: &str, pattern: &str, options: &SearchOptions) -> Vec<Match> {
    let needle = fold(pattern, options.case_sensitive);
    let mut matches = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        let original: Vec<char> = line.chars().collect();
        let haystack = fold(line, options.case_sensitive);

        let mut col = 0;
        while col + needle.len() <= haystack.len() {
            let end = col + needle.len();
            if haystack[col..end] != needle[..]
                || (options.whole_word && !is_whole_word(&original, col, end))
            {
                col += 1;
                continue;
            }

            let found: String = original[col..end].iter().collect();
            matches.push(Match::on_line(idx + 1, col, end, &found));
            col = end;
        }
    }

    matches
}

fn find_regex(regex: &Regex, text: &str) -> Vec<Match> {
    let mut matches = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        for found in regex.find_iter(line) {
            let start = line[..found.start()].chars().count();
            let end = start + found.as_str().chars().count();
            matches.push(Match::on_line(idx + 1, start, end, found.as_str()));
        }
    }

    matches
}

/// Folds every character to one lowercase char so positions in the folded
/// text line up with the original.
fn fold(s: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        s.chars().collect()
    } else {
        s.chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(line: &[char], start: usize, end: usize) -> bool {
    let before = start.checked_sub(1).map(|i| line[i]);
    let after = line.get(end).copied();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn substitute(regex: Option<&Regex>, found: &Match, replacement: &str) -> String {
    match regex {
        Some(regex) => regex.replace_all(&found.text, replacement).into_owned(),
        None => replacement.to_string(),
    }
}

/// Resolves a match against `text` to a byte range, or `None` if the match
/// no longer fits the text.
fn byte_range(text: &str, found: &Match) -> Option<Range<usize>> {
    let line_idx = found.start.line.checked_sub(1)?;
    let mut offset = 0;

    for (idx, line) in text.split('\n').enumerate() {
        if idx == line_idx {
            let start = byte_offset(line, found.start.column.checked_sub(1)?)?;
            let end = byte_offset(line, found.end.column.checked_sub(1)?)?;
            return (start <= end).then(|| offset + start..offset + end);
        }
        offset += line.len() + 1;
    }

    None
}

/// Byte offset of char column `column` in `line`; the line length is a valid end.
fn byte_offset(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_options(f: impl FnOnce(&mut SearchOptions)) -> SearchManager {
        let mut search = SearchManager::new();
        let mut options = search.options();
        f(&mut options);
        search.set_options(options);
        search
    }

    #[test]
    fn test_find_basic() {
        let mut search = SearchManager::new();
        let matches = search.find("Hello World\nThis is a test\nHello again", "Hello");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].start, Position::new(1, 1));
        assert_eq!(matches[0].end, Position::new(1, 6));
        assert_eq!(matches[1].start, Position::new(3, 1));
        assert_eq!(search.current_index(), None);
    }

    #[test]
    fn test_find_case_insensitive_keeps_original_text() {
        let mut search = SearchManager::new();
        let matches = search.find("Hello HELLO hello", "hello");

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].text, "Hello");
        assert_eq!(matches[1].text, "HELLO");
        assert_eq!(matches[2].start.column, 13);
    }

    #[test]
    fn test_find_case_sensitive() {
        let mut search = with_options(|o| o.case_sensitive = true);
        assert_eq!(search.find("Hello HELLO hello", "hello").len(), 1);
    }

    #[test]
    fn test_find_whole_word() {
        let mut search = SearchManager::new();
        assert_eq!(search.find("test testing tested", "test").len(), 3);

        let mut search = with_options(|o| o.whole_word = true);
        let matches = search.find("test testing tested", "test");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start.column, 1);
    }

    #[test]
    fn test_whole_word_underscore_and_digits() {
        let mut search = with_options(|o| o.whole_word = true);
        assert_eq!(search.find("_id id1 id (id)", "id").len(), 2);
    }

    #[test]
    fn test_literal_matches_do_not_overlap() {
        let mut search = SearchManager::new();
        let matches = search.find("aaaa", "aa");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].start.column, 3);
    }

    #[test]
    fn test_columns_count_chars() {
        let mut search = SearchManager::new();
        let matches = search.find("héllo wörld", "wörld");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start.column, 7);
        assert_eq!(matches[0].end.column, 12);
    }

    #[test]
    fn test_find_regex() {
        let mut search = with_options(|o| o.regular_expression = true);
        let matches = search.find("test123 test456 testABC", r"test\d+");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].text, "test456");
    }

    #[test]
    fn test_regex_case_and_whole_word() {
        let mut search = with_options(|o| {
            o.regular_expression = true;
            o.whole_word = true;
        });
        let matches = search.find("Cat catalog CAT dog", "cat|dog");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[2].text, "dog");
    }

    #[test]
    fn test_invalid_regex_is_silent() {
        let mut search = with_options(|o| o.regular_expression = true);
        assert!(search.find("some text", "(unclosed").is_empty());
        assert!(matches!(
            search.try_find("some text", "(unclosed"),
            Err(SearchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_find_empty_pattern() {
        let mut search = SearchManager::new();
        search.find("hello", "hello");
        assert!(search.find("hello", "").is_empty());
        assert!(!search.is_active());
        assert_eq!(search.status_message(), "");
    }

    #[test]
    fn test_find_is_deterministic() {
        let mut search = SearchManager::new();
        let text = "one two one\ntwo one";
        let first = search.find(text, "one").to_vec();
        let second = search.find(text, "one").to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_navigation() {
        let mut search = SearchManager::new();
        search.find("test test test", "test");

        assert!(search.next_match().is_some());
        assert_eq!(search.current_index(), Some(0));
        search.next_match();
        assert_eq!(search.current_index(), Some(1));
        search.previous_match();
        assert_eq!(search.current_index(), Some(0));
    }

    #[test]
    fn test_wrap_around() {
        let mut search = SearchManager::new();
        search.find("test test test", "test");

        search.set_current_match(2);
        assert_eq!(search.next_match().map(|m| m.start.column), Some(1));
        assert_eq!(search.current_index(), Some(0));

        assert!(search.previous_match().is_some());
        assert_eq!(search.current_index(), Some(2));
    }

    #[test]
    fn test_no_wrap_clamps() {
        let mut search = with_options(|o| o.wrap_around = false);
        search.find("a a a", "a");

        search.set_current_match(2);
        assert!(search.next_match().is_none());
        assert_eq!(search.current_index(), Some(2));

        search.set_current_match(0);
        assert!(search.previous_match().is_none());
        assert_eq!(search.current_index(), Some(0));
    }

    #[test]
    fn test_navigation_without_matches() {
        let mut search = SearchManager::new();
        search.find("hello", "xyz");
        assert!(search.next_match().is_none());
        assert!(search.previous_match().is_none());
        assert_eq!(search.status_message(), "No matches found");
    }

    #[test]
    fn test_set_current_match_out_of_range() {
        let mut search = SearchManager::new();
        search.find("a b a", "a");
        search.set_current_match(1);
        assert!(search.set_current_match(5).is_none());
        assert_eq!(search.current_index(), Some(1));
        assert_eq!(search.status_message(), "Match 2 of 2");
    }

    #[test]
    fn test_set_options_invalidates_matches() {
        let mut search = SearchManager::new();
        search.find("Hello hello", "hello");
        assert_eq!(search.match_count(), 2);

        let mut options = search.options();
        options.case_sensitive = true;
        search.set_options(options);
        assert!(!search.has_matches());
        assert_eq!(search.current_index(), None);
    }

    #[test]
    fn test_nearest_match() {
        let mut search = SearchManager::new();
        search.find("a  a  a  a", "a");

        let nearest = search.nearest_match(Position::new(1, 6)).unwrap();
        assert_eq!(nearest.start.column, 7);

        let wrapped = search.nearest_match(Position::new(2, 1)).unwrap();
        assert_eq!(wrapped.start.column, 1);
    }

    #[test]
    fn test_refresh_keeps_position() {
        let mut search = SearchManager::new();
        search.find("x x x", "x");
        search.set_current_match(1);

        search.refresh("y x x x");
        assert_eq!(search.match_count(), 3);
        assert_eq!(search.current_index(), Some(0));
        assert_eq!(search.current_match().map(|m| m.start.column), Some(3));
    }

    #[test]
    fn test_replace_all() {
        let mut search = SearchManager::new();
        let options = ReplaceOptions::all(SearchOptions::default());
        let (result, count) =
            search.replace("Hello World\nHello Universe", "Hello", "Hi", &options);

        assert_eq!(result, "Hi World\nHi Universe");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_all_same_line_descending() {
        let mut search = SearchManager::new();
        let options = ReplaceOptions::all(SearchOptions::default());
        let (result, count) = search.replace("ab ab ab", "ab", "xyz", &options);

        assert_eq!(result, "xyz xyz xyz");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_current() {
        let mut search = SearchManager::new();
        let text = "Hello World\nHello Universe";
        search.find(text, "Hello");
        search.set_current_match(0);

        let options = ReplaceOptions::current(SearchOptions::default());
        let (result, count) = search.replace(text, "Hello", "Hi", &options);

        assert_eq!(result, "Hi World\nHello Universe");
        assert_eq!(count, 1);
        assert_eq!(search.match_count(), 1);
        assert_eq!(search.matches()[0].start, Position::new(2, 1));
    }

    #[test]
    fn test_replace_current_after_navigation() {
        let mut search = SearchManager::new();
        let text = "one one one";
        search.find(text, "one");
        search.set_current_match(1);

        let options = ReplaceOptions::current(SearchOptions::default());
        let (result, count) = search.replace(text, "one", "two", &options);

        assert_eq!(result, "one two one");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replace_current_after_text_changed() {
        let mut search = SearchManager::new();
        search.find("foo bar", "bar");
        search.next_match();

        let options = ReplaceOptions::current(SearchOptions::default());
        let (result, count) = search.replace("xxfoo bar", "bar", "Hi", &options);

        assert_eq!(result, "xxfoo Hi");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replace_current_match_gone_from_text() {
        let mut search = SearchManager::new();
        search.find("foo bar", "bar");
        search.next_match();

        let options = ReplaceOptions::current(SearchOptions::default());
        let (result, count) = search.replace("foo baz", "bar", "Hi", &options);

        assert_eq!(result, "foo baz");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_set_same_options_keeps_current() {
        let mut search = SearchManager::new();
        search.find("a a a", "a");
        search.set_current_match(1);

        search.set_options(search.options());
        assert_eq!(search.match_count(), 3);
        assert_eq!(search.current_index(), Some(1));
    }

    #[test]
    fn test_replace_without_matches() {
        let mut search = SearchManager::new();
        let options = ReplaceOptions::current(SearchOptions::default());
        assert_eq!(
            search.replace("abc", "xyz", "q", &options),
            ("abc".to_string(), 0)
        );
    }

    #[test]
    fn test_regex_replace_capture_groups() {
        let mut search = SearchManager::new();
        let options = ReplaceOptions::all(SearchOptions {
            regular_expression: true,
            ..SearchOptions::default()
        });
        let (result, count) =
            search.replace("test123 test456", r"test(\d+)", "number$1", &options);

        assert_eq!(result, "number123 number456");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_multibyte() {
        let mut search = SearchManager::new();
        let options = ReplaceOptions::all(SearchOptions::default());
        let (result, count) = search.replace("żółw żółw", "ŻÓŁW", "turtle", &options);

        assert_eq!(result, "turtle turtle");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_stale_match_is_skipped() {
        let stale = Match::on_line(3, 0, 4, "gone");
        assert!(byte_range("only one line", &stale).is_none());

        let past_end = Match::on_line(1, 2, 40, "x");
        assert!(byte_range("short", &past_end).is_none());
    }

    #[test]
    fn test_clear() {
        let mut search = SearchManager::new();
        search.find("Hello World", "Hello");
        search.next_match();

        search.clear();
        assert!(search.matches().is_empty());
        assert_eq!(search.current_index(), None);
        assert_eq!(search.last_search_text(), "");
    }
}
