//! SQL placeholder dialects.
//!
//! A [`Dialect`] decides two things: how the n-th bound argument is written in
//! statement text, and how booleans are spelled when a statement is rendered
//! as literal SQL for logging.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Placeholder style used when generating and rendering SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `$1, $2, ...` (PostgreSQL).
    #[default]
    Dollar,
    /// `?` for every argument (Access, ODBC, MySQL, SQLite).
    ///
    /// Booleans render as `-1` / `0`.
    QuestionMark,
    /// `@p1, @p2, ...` (SQL Server).
    AtP,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Dialect; 3] = [Dialect::Dollar, Dialect::QuestionMark, Dialect::AtP];

    /// Resolve a placeholder style marker (`"$"`, `"?"`, `"@p"`).
    ///
    /// Unknown markers, including the empty string, resolve to [`Dialect::Dollar`].
    pub fn from_style(style: &str) -> Self {
        match style {
            "?" => Self::QuestionMark,
            "@p" => Self::AtP,
            _ => Self::Dollar,
        }
    }

    /// The style marker this dialect is written with.
    pub fn style(self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::QuestionMark => "?",
            Self::AtP => "@p",
        }
    }

    /// Whether placeholders carry an ordinal (`$n`, `@pn`).
    pub fn is_ordinal(self) -> bool {
        !matches!(self, Self::QuestionMark)
    }

    /// Placeholder text for the 1-based `ordinal`.
    pub fn placeholder(self, ordinal: usize) -> String {
        let mut out = String::with_capacity(4);
        self.write_placeholder(ordinal, &mut out);
        out
    }

    /// Append the placeholder for the 1-based `ordinal` to `out`.
    pub fn write_placeholder(self, ordinal: usize, out: &mut String) {
        match self {
            Self::Dollar => {
                out.push('$');
                out.push_str(&ordinal.to_string());
            }
            Self::QuestionMark => out.push('?'),
            Self::AtP => {
                out.push_str("@p");
                out.push_str(&ordinal.to_string());
            }
        }
    }

    /// Literal spelling of a boolean.
    pub fn bool_literal(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::QuestionMark, true) => "-1",
            (Self::QuestionMark, false) => "0",
            (_, true) => "true",
            (_, false) => "false",
        }
    }

    /// Pattern matching one placeholder occurrence in statement text.
    pub(crate) fn placeholder_regex(self) -> &'static Regex {
        static DOLLAR: OnceLock<Regex> = OnceLock::new();
        static QUESTION: OnceLock<Regex> = OnceLock::new();
        static AT_P: OnceLock<Regex> = OnceLock::new();

        let (cell, pattern) = match self {
            Self::Dollar => (&DOLLAR, r"\$(\d+)"),
            Self::QuestionMark => (&QUESTION, r"\?"),
            Self::AtP => (&AT_P, r"@p(\d+)"),
        };
        cell.get_or_init(|| Regex::new(pattern).expect("invalid built-in placeholder regex"))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Dollar => "dollar",
            Self::QuestionMark => "question_mark",
            Self::AtP => "at_p",
        })
    }
}

impl FromStr for Dialect {
    type Err = std::convert::Infallible;

    /// Accepts style markers and a few common names; anything else is `Dollar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dialect = match s.trim().to_ascii_lowercase().as_str() {
            "?" | "question" | "question_mark" | "access" | "odbc" | "mysql" | "sqlite" => {
                Self::QuestionMark
            }
            "@p" | "at" | "at_p" | "mssql" | "sqlserver" => Self::AtP,
            _ => Self::Dollar,
        };
        Ok(dialect)
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let Ok(dialect) = raw.parse::<Dialect>();
        Ok(dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::Dialect;

    #[test]
    fn placeholders_per_dialect() {
        assert_eq!(Dialect::Dollar.placeholder(1), "$1");
        assert_eq!(Dialect::Dollar.placeholder(12), "$12");
        assert_eq!(Dialect::QuestionMark.placeholder(7), "?");
        assert_eq!(Dialect::AtP.placeholder(3), "@p3");
    }

    #[test]
    fn write_placeholder_appends() {
        let mut s = String::from("a=");
        Dialect::AtP.write_placeholder(10, &mut s);
        assert_eq!(s, "a=@p10");
    }

    #[test]
    fn unknown_style_defaults_to_dollar() {
        assert_eq!(Dialect::from_style(""), Dialect::Dollar);
        assert_eq!(Dialect::from_style("$"), Dialect::Dollar);
        assert_eq!(Dialect::from_style(":name"), Dialect::Dollar);
        assert_eq!(Dialect::from_style("?"), Dialect::QuestionMark);
        assert_eq!(Dialect::from_style("@p"), Dialect::AtP);
        assert_eq!(Dialect::default(), Dialect::Dollar);
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!("mssql".parse::<Dialect>(), Ok(Dialect::AtP));
        assert_eq!(" Access ".parse::<Dialect>(), Ok(Dialect::QuestionMark));
        assert_eq!("oracle".parse::<Dialect>(), Ok(Dialect::Dollar));
    }

    #[test]
    fn deserialize_falls_back_to_dollar() {
        let d: Dialect = serde_json::from_str("\"question_mark\"").unwrap();
        assert_eq!(d, Dialect::QuestionMark);
        let d: Dialect = serde_json::from_str("\"nope\"").unwrap();
        assert_eq!(d, Dialect::Dollar);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for d in Dialect::ALL {
            assert_eq!(d.to_string().parse::<Dialect>(), Ok(d));
        }
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(Dialect::QuestionMark.bool_literal(true), "-1");
        assert_eq!(Dialect::QuestionMark.bool_literal(false), "0");
        assert_eq!(Dialect::Dollar.bool_literal(true), "true");
        assert_eq!(Dialect::AtP.bool_literal(false), "false");
    }

    #[test]
    fn only_question_mark_lacks_ordinals() {
        assert!(Dialect::Dollar.is_ordinal());
        assert!(Dialect::AtP.is_ordinal());
        assert!(!Dialect::QuestionMark.is_ordinal());
    }
}
