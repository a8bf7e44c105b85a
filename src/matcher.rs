//! Set-equality lookup of comma-separated codes against converted rows.

use crate::convert::Record;
use log::debug;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Upper-case codes and row values before comparing them.
    pub ignore_case: bool,
}

impl MatchOptions {
    fn normalize<'a>(&self, code: &'a str) -> Cow<'a, str> {
        if self.ignore_case {
            Cow::Owned(code.to_uppercase())
        } else {
            Cow::Borrowed(code)
        }
    }
}

/// Distinct codes parsed from user input. Each code is trimmed, nothing
/// else is validated, so `""` and `"3C,"` yield a set containing `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSet(HashSet<String>);

impl CodeSet {
    pub fn parse(input: &str) -> Self {
        Self::parse_with(input, MatchOptions::default())
    }

    pub fn parse_with(input: &str, options: MatchOptions) -> Self {
        CodeSet(
            input
                .split(',')
                .map(|code| options.normalize(code.trim()).into_owned())
                .collect(),
        )
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the distinct non-Option values of `record` are exactly
    /// this set. Row values are compared untrimmed.
    fn matches(&self, record: &Record, options: MatchOptions) -> bool {
        let values: HashSet<Cow<'_, str>> =
            record.codes().map(|value| options.normalize(value)).collect();
        values.len() == self.0.len() && values.iter().all(|value| self.contains(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Matchup,
    NoMatch,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matchup => "matchup",
            MatchStatus::NoMatch => "no match",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Qualification<'a> {
    Matchup(&'a Record),
    NoMatch,
}

impl<'a> Qualification<'a> {
    pub fn option(&self) -> Option<&'a str> {
        match self {
            Qualification::Matchup(record) => record.option(),
            Qualification::NoMatch => None,
        }
    }

    pub fn status(&self) -> MatchStatus {
        match self {
            Qualification::Matchup(_) => MatchStatus::Matchup,
            Qualification::NoMatch => MatchStatus::NoMatch,
        }
    }

    pub fn record(&self) -> Option<&'a Record> {
        match self {
            Qualification::Matchup(record) => Some(record),
            Qualification::NoMatch => None,
        }
    }
}

impl fmt::Display for Qualification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.option() {
            Some(option) if !option.is_empty() => {
                write!(f, "Option: {}, {}", option, self.status())
            }
            _ => write!(f, "{}", self.status()),
        }
    }
}

pub fn check_qualify<'a>(input: &str, records: &'a [Record]) -> Qualification<'a> {
    check_qualify_with(input, records, MatchOptions::default())
}

/// Returns the first record whose distinct non-Option values equal the
/// codes in `input`. Records without an Option column, or padded with
/// `null` for missing cells, are skipped.
pub fn check_qualify_with<'a>(
    input: &str,
    records: &'a [Record],
    options: MatchOptions,
) -> Qualification<'a> {
    let codes = CodeSet::parse_with(input, options);
    debug!("Looking up {} distinct codes: {:?}", codes.len(), codes);

    for (i, record) in records.iter().enumerate() {
        if record.option().is_none() {
            debug!("Row {} has no Option column, skipping", i);
            continue;
        }
        if record.is_padded() {
            debug!("Row {} is missing cells, skipping", i);
            continue;
        }
        if codes.matches(record, options) {
            debug!("Row {} matches", i);
            return Qualification::Matchup(record);
        }
    }

    Qualification::NoMatch
}
