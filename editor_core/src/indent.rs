//! Indentation handling.
//!
//! All operations are pure functions of their arguments and the manager's
//! settings. Cursor positions are character offsets into the content and
//! line ranges are 0-based and inclusive.

/// Default number of columns per indent unit.
pub const DEFAULT_TAB_SIZE: usize = 4;

const MAX_TAB_SIZE: usize = 16;

/// Per-session indentation settings and line transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationManager {
    tab_size: usize,
    use_spaces: bool,
    auto_indent: bool,
}

impl Default for IndentationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentationManager {
    pub fn new() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            use_spaces: true,
            auto_indent: true,
        }
    }

    /// Sets the tab size. Values outside `1..=16` are ignored.
    pub fn set_tab_size(&mut self, size: usize) {
        if (1..=MAX_TAB_SIZE).contains(&size) {
            self.tab_size = size;
        }
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn set_use_spaces(&mut self, use_spaces: bool) {
        self.use_spaces = use_spaces;
    }

    pub fn use_spaces(&self) -> bool {
        self.use_spaces
    }

    pub fn set_auto_indent(&mut self, auto_indent: bool) {
        self.auto_indent = auto_indent;
    }

    pub fn auto_indent(&self) -> bool {
        self.auto_indent
    }

    /// Returns one indent unit: `tab_size` spaces, or a tab.
    pub fn indent_string(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }

    /// Returns the leading run of spaces and tabs of `line`.
    pub fn line_indentation<'a>(&self, line: &'a str) -> &'a str {
        let rest = line.trim_start_matches(|c: char| c == ' ' || c == '\t');
        &line[..line.len() - rest.len()]
    }

    /// Returns how many whole indent units prefix `line`.
    pub fn indentation_level(&self, line: &str) -> usize {
        let unit = self.indent_string();
        let mut level = 0;
        let mut rest = line;
        while let Some(stripped) = rest.strip_prefix(unit.as_str()) {
            level += 1;
            rest = stripped;
        }
        level
    }

    pub fn is_whitespace_only(&self, line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Removes one level of indentation from `line`.
    ///
    /// Strips a whole indent unit if the line starts with one; otherwise a
    /// single leading tab, or up to `tab_size` leading spaces. Returns the
    /// new line and the number of characters removed.
    pub fn remove_indentation(&self, line: &str) -> (String, usize) {
        let unit = self.indent_string();
        if let Some(rest) = line.strip_prefix(unit.as_str()) {
            return (rest.to_string(), unit.len());
        }
        if let Some(rest) = line.strip_prefix('\t') {
            return (rest.to_string(), 1);
        }

        let spaces = line
            .chars()
            .take(self.tab_size)
            .take_while(|c| *c == ' ')
            .count();
        (line[spaces..].to_string(), spaces)
    }

    /// Indentation for the line that follows `previous` when Enter is pressed:
    /// the same leading whitespace, plus one unit after `{` or `:`.
    pub fn newline_indent(&self, previous: &str) -> String {
        let mut indent = self.line_indentation(previous).to_string();
        let trimmed = previous.trim();
        if trimmed.ends_with('{') || trimmed.ends_with(':') {
            indent.push_str(&self.indent_string());
        }
        indent
    }

    /// Inserts one indent unit at the cursor.
    pub fn handle_tab_key(&self, content: &str, cursor: usize) -> (String, usize) {
        let unit = self.indent_string();
        let cursor = cursor.min(content.chars().count());
        (insert_at(content, cursor, &unit), cursor + unit.chars().count())
    }

    /// Removes one indent level from the line holding the cursor. The
    /// cursor stays on its line.
    pub fn handle_shift_tab_key(&self, content: &str, cursor: usize) -> (String, usize) {
        let cursor = cursor.min(content.chars().count());
        if content.is_empty() {
            return (String::new(), cursor);
        }

        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let (line_idx, column) = locate(content, cursor);

        let (new_line, removed) = self.remove_indentation(&lines[line_idx]);
        if removed == 0 {
            return (content.to_string(), cursor);
        }

        lines[line_idx] = new_line;
        (lines.join("\n"), cursor - removed.min(column))
    }

    /// Inserts a newline at the cursor, carrying indentation forward when
    /// auto-indent is on.
    pub fn handle_enter_key(&self, content: &str, cursor: usize) -> (String, usize) {
        let cursor = cursor.min(content.chars().count());
        if !self.auto_indent {
            return (insert_at(content, cursor, "\n"), cursor + 1);
        }

        let (line_idx, column) = locate(content, cursor);
        let line = content.split('\n').nth(line_idx).unwrap_or_default();
        let head: String = line.chars().take(column).collect();

        let inserted = format!("\n{}", self.newline_indent(&head));
        let new_cursor = cursor + inserted.chars().count();
        (insert_at(content, cursor, &inserted), new_cursor)
    }

    /// Indents every non-blank line in `[start_line, end_line]`.
    pub fn indent_lines(&self, content: &str, start_line: usize, end_line: usize) -> String {
        let unit = self.indent_string();
        self.map_lines(content, start_line, end_line, |line| {
            if self.is_whitespace_only(line) {
                line.to_string()
            } else {
                format!("{}{}", unit, line)
            }
        })
    }

    /// Removes one indent level from every line in `[start_line, end_line]`.
    pub fn unindent_lines(&self, content: &str, start_line: usize, end_line: usize) -> String {
        self.map_lines(content, start_line, end_line, |line| {
            self.remove_indentation(line).0
        })
    }

    /// Replaces every tab with `tab_size` spaces.
    pub fn convert_tabs_to_spaces(&self, content: &str) -> String {
        content.replace('\t', &" ".repeat(self.tab_size))
    }

    /// Converts groups of `tab_size` spaces in each line's leading
    /// indentation to tabs. Interior spaces are left alone.
    pub fn convert_spaces_to_tabs(&self, content: &str) -> String {
        let spaces = " ".repeat(self.tab_size);
        content
            .split('\n')
            .map(|line| {
                let indentation = self.line_indentation(line);
                if indentation.contains(' ') {
                    format!(
                        "{}{}",
                        indentation.replace(&spaces, "\t"),
                        &line[indentation.len()..]
                    )
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn trim_trailing_whitespace(&self, content: &str) -> String {
        content
            .split('\n')
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn map_lines<F>(&self, content: &str, start_line: usize, end_line: usize, f: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let lines: Vec<&str> = content.split('\n').collect();
        let end_line = end_line.min(lines.len() - 1);
        if start_line > end_line {
            return content.to_string();
        }

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if (start_line..=end_line).contains(&i) {
                    f(line)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Returns the 0-based (line, column) holding the char offset `cursor`.
fn locate(content: &str, cursor: usize) -> (usize, usize) {
    let mut line_start = 0;
    let mut last = 0;
    for (idx, line) in content.split('\n').enumerate() {
        let len = line.chars().count();
        if line_start + len >= cursor {
            return (idx, cursor - line_start);
        }
        line_start += len + 1;
        last = idx;
    }
    (last, 0)
}

fn insert_at(content: &str, cursor: usize, text: &str) -> String {
    let at = content
        .char_indices()
        .nth(cursor)
        .map_or(content.len(), |(i, _)| i);
    let mut result = String::with_capacity(content.len() + text.len());
    result.push_str(&content[..at]);
    result.push_str(text);
    result.push_str(&content[at..]);
    result
}
