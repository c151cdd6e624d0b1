//! Line-oriented PGN batch splitting.
//!
//! A batch is cut into game blocks without touching any byte: every line keeps
//! its own terminator, so joining the blocks back gives the input verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// Host whose game pages carry the annotated move list.
pub const REVIEW_HOST: &str = "lichess.org";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\[(\w+)\s+"([^"]*)"\]"#).unwrap());

static REVIEW_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(https://lichess\.org/\w+)""#).unwrap());

/// One game record: header lines, movetext, and the blank lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBlock {
    lines: Vec<String>,
}

impl GameBlock {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Parse a single game; the whole text is treated as one block.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.split_inclusive('\n').map(str::to_string).collect())
    }

    /// Raw lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Header lines in file order, terminators stripped.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|l| content(l))
            .skip_while(|l| !l.starts_with('['))
            .take_while(|l| l.starts_with('['))
    }

    /// Index of the move-list line: the first line after the headers that starts with `1.`.
    pub fn move_list_index(&self) -> Option<usize> {
        let first_header = self.lines.iter().position(|l| l.starts_with('['));
        let start = first_header.map_or(0, |i| {
            i + self.lines[i..]
                .iter()
                .take_while(|l| l.starts_with('['))
                .count()
        });
        self.lines[start..]
            .iter()
            .position(|l| l.starts_with("1."))
            .map(|i| start + i)
    }

    /// The move-list line without its terminator.
    pub fn move_list_line(&self) -> Option<&str> {
        self.move_list_index().map(|i| content(&self.lines[i]))
    }

    /// Review page URL from the `Site` header, if the game came from the review host.
    pub fn reference_url(&self) -> Option<&str> {
        self.headers().find_map(|line| {
            let cap = HEADER_RE.captures(line)?;
            if cap.get(1)?.as_str() != "Site" {
                return None;
            }
            Some(REVIEW_URL_RE.captures(line)?.get(1)?.as_str())
        })
    }

    /// Value of a header by name, e.g. `extract_header("White")`.
    pub fn extract_header(&self, name: &str) -> Option<&str> {
        self.headers().find_map(|line| {
            let cap = HEADER_RE.captures(line)?;
            if cap.get(1)?.as_str() == name {
                cap.get(2).map(|m| m.as_str())
            } else {
                None
            }
        })
    }

    /// Copy of this block with the move-list line replaced, terminator kept.
    /// Returns an unchanged copy when there is no move-list line.
    pub fn with_move_list_line(&self, new_line: &str) -> Self {
        let mut lines = self.lines.clone();
        if let Some(i) = self.move_list_index() {
            let terminator = &lines[i][content(&lines[i]).len()..];
            let replaced = format!("{new_line}{terminator}");
            lines[i] = replaced;
        }
        Self { lines }
    }

    pub fn to_pgn(&self) -> String {
        self.lines.concat()
    }
}

/// A whole input file, split into games in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PgnBatch {
    pub games: Vec<GameBlock>,
}

impl PgnBatch {
    pub fn to_pgn(&self) -> String {
        self.games.iter().map(GameBlock::to_pgn).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Preamble,
    Headers,
    /// Blank line seen after the headers, no movetext yet.
    AfterHeaders,
    Movetext,
}

/// Split a multi-game file into blocks.
///
/// A header line seen after movetext, or after the blank line closing a header
/// block, starts the next game, unless it sits inside a brace comment left open
/// on an earlier line. Games with headers and no moves stay separate.
pub fn split_games(text: &str) -> PgnBatch {
    let mut games = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut state = SplitState::Preamble;
    let mut comment_open = false;

    for line in text.split_inclusive('\n') {
        let body = content(line);

        if comment_open {
            comment_open = update_comment_state(body, true);
            current.push(line.to_string());
            continue;
        }

        let is_header = body.starts_with('[');
        let is_blank = body.trim().is_empty();
        match state {
            SplitState::Preamble | SplitState::Headers if is_header => {
                state = SplitState::Headers;
            }
            SplitState::AfterHeaders | SplitState::Movetext if is_header => {
                games.push(GameBlock::from_lines(std::mem::take(&mut current)));
                state = SplitState::Headers;
            }
            SplitState::Headers if is_blank => {
                state = SplitState::AfterHeaders;
            }
            SplitState::Preamble | SplitState::Headers | SplitState::AfterHeaders if !is_blank => {
                state = SplitState::Movetext;
                comment_open = update_comment_state(body, false);
            }
            SplitState::Movetext => {
                comment_open = update_comment_state(body, false);
            }
            _ => {}
        }
        current.push(line.to_string());
    }

    if !current.is_empty() {
        games.push(GameBlock::from_lines(current));
    }

    PgnBatch { games }
}

/// Whether a brace comment is still open at the end of `line`.
fn update_comment_state(line: &str, mut open: bool) -> bool {
    for c in line.chars() {
        match c {
            '{' if !open => open = true,
            '}' if open => open = false,
            ';' if !open => break,
            _ => {}
        }
    }
    open
}

/// Line text without `\n` / `\r\n`.
fn content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
