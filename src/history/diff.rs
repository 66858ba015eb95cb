//! Diffing Engine: Compare two content snapshots.
//!
//! This module produces two complementary views of a change:
//! 1. A line-level diff of the raw text (longest common subsequence)
//! 2. A field-level diff of the quiz structure, when both sides parse
//!
//! Both are pure functions of their inputs; neither snapshot is modified.

use crate::document::{parse, Question, QuizDocument};
use std::fmt::Write;

/// Kind of change for a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineChange {
    /// Present in both snapshots.
    Equal,
    /// Only in the newer snapshot.
    Insert,
    /// Only in the older snapshot.
    Delete,
}

/// One line of a line-level diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Kind of change.
    pub change: LineChange,
    /// Line text without the newline.
    pub text: String,
    /// 0-based line in the older snapshot.
    pub old_line: Option<usize>,
    /// 0-based line in the newer snapshot.
    pub new_line: Option<usize>,
}

/// A quiz question field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    /// The question text.
    Prompt,
    /// The option list.
    Options,
    /// The correct option.
    Correct,
    /// The explanation.
    Explanation,
}

/// A structural change between two quiz documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// The title changed.
    TitleChanged {
        /// Old title.
        from: String,
        /// New title.
        to: String,
    },
    /// A question exists only in the newer document.
    QuestionAdded {
        /// Question index.
        index: usize,
    },
    /// A question exists only in the older document.
    QuestionRemoved {
        /// Question index.
        index: usize,
    },
    /// A question at the same position differs.
    QuestionChanged {
        /// Question index.
        index: usize,
        /// Fields that differ.
        fields: Vec<QuestionField>,
    },
}

/// Statistics about a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Lines only in the newer snapshot.
    pub inserted: usize,
    /// Lines only in the older snapshot.
    pub deleted: usize,
    /// Lines present in both.
    pub unchanged: usize,
}

/// Result of comparing two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDiff {
    /// Line-level diff in display order.
    pub lines: Vec<DiffLine>,
    /// Field-level diff, when both snapshots are valid quizzes.
    pub fields: Option<Vec<FieldChange>>,
    /// Line statistics.
    pub stats: DiffStats,
}

impl ContentDiff {
    /// Check if the snapshots are identical.
    pub fn is_identical(&self) -> bool {
        self.stats.inserted == 0 && self.stats.deleted == 0
    }

    /// Render the line diff with `+`, `-` and space prefixes.
    pub fn to_unified(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let marker = match line.change {
                LineChange::Equal => ' ',
                LineChange::Insert => '+',
                LineChange::Delete => '-',
            };
            let _ = writeln!(out, "{marker} {}", line.text);
        }
        out
    }
}

/// Compare two raw snapshots.
pub fn compare(old: &str, new: &str) -> ContentDiff {
    let lines = diff_lines(old, new);
    let mut stats = DiffStats::default();
    for line in &lines {
        match line.change {
            LineChange::Equal => stats.unchanged += 1,
            LineChange::Insert => stats.inserted += 1,
            LineChange::Delete => stats.deleted += 1,
        }
    }

    let fields = match (parse(old), parse(new)) {
        (Ok(old), Ok(new)) => Some(diff_documents(&old, &new)),
        _ => None,
    };

    ContentDiff { lines, fields, stats }
}

/// Line-level diff using a longest-common-subsequence table.
///
/// Common leading and trailing lines are matched first so the table only
/// covers the changed middle.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];
    let (n, m) = (a_mid.len(), b_mid.len());

    // table[i * w + j] = LCS length of a_mid[i..] and b_mid[j..]
    let w = m + 1;
    let mut table = vec![0usize; (n + 1) * w];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * w + j] = if a_mid[i] == b_mid[j] {
                table[(i + 1) * w + j + 1] + 1
            } else {
                table[(i + 1) * w + j].max(table[i * w + j + 1])
            };
        }
    }

    let mut out = Vec::with_capacity(a.len().max(b.len()));
    for (k, text) in a[..prefix].iter().enumerate() {
        out.push(equal(text, k, k));
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a_mid[i] == b_mid[j] {
            out.push(equal(a_mid[i], prefix + i, prefix + j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * w + j] >= table[i * w + j + 1] {
            out.push(delete(a_mid[i], prefix + i));
            i += 1;
        } else {
            out.push(insert(b_mid[j], prefix + j));
            j += 1;
        }
    }
    for (k, text) in a_mid[i..].iter().enumerate() {
        out.push(delete(text, prefix + i + k));
    }
    for (k, text) in b_mid[j..].iter().enumerate() {
        out.push(insert(text, prefix + j + k));
    }

    let (a_tail, b_tail) = (a.len() - suffix, b.len() - suffix);
    for (k, text) in a[a_tail..].iter().enumerate() {
        out.push(equal(text, a_tail + k, b_tail + k));
    }

    out
}

fn equal(text: &str, old_line: usize, new_line: usize) -> DiffLine {
    DiffLine {
        change: LineChange::Equal,
        text: text.to_string(),
        old_line: Some(old_line),
        new_line: Some(new_line),
    }
}

fn delete(text: &str, old_line: usize) -> DiffLine {
    DiffLine {
        change: LineChange::Delete,
        text: text.to_string(),
        old_line: Some(old_line),
        new_line: None,
    }
}

fn insert(text: &str, new_line: usize) -> DiffLine {
    DiffLine {
        change: LineChange::Insert,
        text: text.to_string(),
        old_line: None,
        new_line: Some(new_line),
    }
}

/// Field-level diff of two quiz documents, question by position.
pub fn diff_documents(old: &QuizDocument, new: &QuizDocument) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.title != new.title {
        changes.push(FieldChange::TitleChanged {
            from: old.title.clone(),
            to: new.title.clone(),
        });
    }

    for (index, (a, b)) in old.questions.iter().zip(&new.questions).enumerate() {
        let fields = changed_fields(a, b);
        if !fields.is_empty() {
            changes.push(FieldChange::QuestionChanged { index, fields });
        }
    }

    changes.extend((new.len()..old.len()).map(|index| FieldChange::QuestionRemoved { index }));
    changes.extend((old.len()..new.len()).map(|index| FieldChange::QuestionAdded { index }));
    changes
}

fn changed_fields(a: &Question, b: &Question) -> Vec<QuestionField> {
    let mut fields = Vec::new();
    if a.prompt != b.prompt {
        fields.push(QuestionField::Prompt);
    }
    if a.options != b.options {
        fields.push(QuestionField::Options);
    }
    if a.correct_option != b.correct_option {
        fields.push(QuestionField::Correct);
    }
    if a.explanation != b.explanation {
        fields.push(QuestionField::Explanation);
    }
    fields
}
