// view.rs — WidgetView: the text display surface for one entry.
//
// Layout, top to bottom:
//   header    "Today's Goals" on the left, the display date on the right
//   rows      up to `max_goals` goals, each a toggle glyph plus its title
//             wrapped onto at most `title_lines` lines
//   or        a centered placeholder message when the month has no goals
//
// Widths are counted in chars. Each row keeps the goal id so a host can
// route a tap on the toggle back to `GoalStore::toggle_goal`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use mf_goal::config::DisplayConfig;

use crate::timeline::GoalEntry;

pub const WIDGET_KIND: &str = "MonthlyFocusWidget";
pub const DISPLAY_NAME: &str = "Monthly Focus";
pub const DESCRIPTION: &str = "Check this month's goals and tick them off.";

const HEADER: &str = "Today's Goals";
const EMPTY_MESSAGE: &str = "No goals set for this month";
const DONE_GLYPH: &str = "[x] ";
const OPEN_GLYPH: &str = "[ ] ";
const ELLIPSIS: char = '…';

/// Widget sizes the view can be rendered at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetFamily {
    Small,
    #[default]
    Medium,
}

impl WidgetFamily {
    pub const SUPPORTED: [WidgetFamily; 2] = [WidgetFamily::Small, WidgetFamily::Medium];

    /// Usable width in chars.
    pub fn columns(self) -> usize {
        match self {
            WidgetFamily::Small => 24,
            WidgetFamily::Medium => 44,
        }
    }
}

impl fmt::Display for WidgetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetFamily::Small => write!(f, "small"),
            WidgetFamily::Medium => write!(f, "medium"),
        }
    }
}

impl FromStr for WidgetFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(WidgetFamily::Small),
            "medium" => Ok(WidgetFamily::Medium),
            other => Err(format!(
                "unknown widget family '{}' (expected small or medium)",
                other
            )),
        }
    }
}

/// One goal as the view lays it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRow {
    /// Target of this row's toggle control.
    pub goal_id: String,
    pub completed: bool,
    /// Wrapped, possibly truncated title.
    pub lines: Vec<String>,
}

/// Renders [`GoalEntry`]s as text.
#[derive(Debug, Clone)]
pub struct WidgetView {
    family: WidgetFamily,
    max_goals: usize,
    title_lines: usize,
}

impl WidgetView {
    pub fn new(family: WidgetFamily) -> Self {
        Self::from_config(family, &DisplayConfig::default())
    }

    pub fn from_config(family: WidgetFamily, display: &DisplayConfig) -> Self {
        Self {
            family,
            max_goals: display.max_goals.max(1),
            title_lines: display.title_lines.max(1),
        }
    }

    pub fn family(&self) -> WidgetFamily {
        self.family
    }

    /// Rows for the first `max_goals` goals of `entry`.
    pub fn rows(&self, entry: &GoalEntry) -> Vec<GoalRow> {
        let width = self.family.columns().saturating_sub(OPEN_GLYPH.len()).max(1);
        entry
            .goals
            .iter()
            .take(self.max_goals)
            .map(|goal| GoalRow {
                goal_id: goal.id.clone(),
                completed: goal.is_completed,
                lines: wrap_title(&goal.title, width, self.title_lines),
            })
            .collect()
    }

    /// The full text of the widget, dated with the entry's own date.
    ///
    /// A host that shows each entry at its scheduled time sees the same date
    /// either way. Use [`render_at`](Self::render_at) when the entry is shown
    /// later than it was built.
    pub fn render(&self, entry: &GoalEntry) -> String {
        self.render_at(entry, entry.date)
    }

    /// The full text of the widget, with `shown` as the header date.
    pub fn render_at(&self, entry: &GoalEntry, shown: NaiveDateTime) -> String {
        let columns = self.family.columns();
        let mut out = String::new();

        let date = shown.format("%b %-d, %Y").to_string();
        let gap = columns
            .saturating_sub(HEADER.chars().count() + date.chars().count())
            .max(1);
        out.push_str(HEADER);
        out.push_str(&" ".repeat(gap));
        out.push_str(&date);
        out.push('\n');

        let rows = self.rows(entry);
        if rows.is_empty() {
            let pad = columns.saturating_sub(EMPTY_MESSAGE.chars().count()) / 2;
            out.push_str(&" ".repeat(pad));
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
            return out;
        }

        for row in &rows {
            let glyph = if row.completed { DONE_GLYPH } else { OPEN_GLYPH };
            for (i, line) in row.lines.iter().enumerate() {
                if i == 0 {
                    out.push_str(glyph);
                } else {
                    out.push_str(&" ".repeat(glyph.len()));
                }
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Word-wrap `title` to `width` chars on at most `max_lines` lines.
///
/// Words longer than a line are split. If the title doesn't fit, the last
/// line ends with an ellipsis.
fn wrap_title(title: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= width {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // A word wider than the whole line.
            let rest = word.split_off(width);
            lines.push(word.iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let kept: String = last.chars().take(width.saturating_sub(1)).collect();
            *last = format!("{}{}", kept.trim_end(), ELLIPSIS);
        }
    }
    lines
}
