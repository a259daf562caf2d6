//! Filename templates such as `app-{seq:d}.log`.
//!
//! A template is literal text with `{name}` / `{name:spec}` placeholders.
//! It compiles to one anchored regular expression; matching a file name
//! either fails or yields the typed value of every named field.
//!
//! Supported field types:
//! - `{name}` or `{name:s}`: string, shortest possible (lazy)
//! - `{name:w}`: word characters (letters, digits, underscore)
//! - `{name:d}`: digit run parsed as an unsigned integer, `{name:04d}` zero-pads when rendering
//! - `{name:f}`: fixed-point number such as `1.25`
//! - `{name:ti}`: ISO 8601 date, optionally with `THH:MM[:SS[.fff]]` and a
//!   `Z` / `+HH:MM` offset; offsets are normalized to UTC
//!
//! Matching ignores case, so `app-{seq:d}.log` also takes `APP-7.LOG`.
//!
//! `{{` and `}}` are literal braces, `{}` is an anonymous field that must
//! match but is not captured.
//!
//! When literal boundaries leave the split between fields ambiguous, the
//! regex engine's leftmost-first preference decides: lazy string fields take
//! as little as possible, greedy fields as much as possible, and only the
//! single preferred match is returned.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const DATETIME_RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// Same class the `w` placeholder matches with
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\w+$").expect("word regex"));

/// Extracted field values keyed by field name
pub type Fields = BTreeMap<String, FieldValue>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed '{{' at byte {0}")]
    UnclosedBrace(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),

    #[error("invalid field name '{0}'")]
    InvalidFieldName(String),

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("unknown type '{spec}' for field '{field}'")]
    UnknownType { field: String, spec: String },

    #[error("anonymous fields cannot be rendered")]
    AnonymousField,

    #[error("missing value for field '{0}'")]
    MissingValue(String),

    #[error("value for field '{field}' is not a valid {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("failed to compile matcher: {0}")]
    Regex(String),
}

/// Type of a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Word,
    Int,
    Float,
    DateTime,
}

impl FieldKind {
    fn from_spec(spec: &str) -> Option<Self> {
        match spec {
            "" | "s" => Some(FieldKind::Str),
            "w" => Some(FieldKind::Word),
            "d" => Some(FieldKind::Int),
            "f" => Some(FieldKind::Float),
            "ti" => Some(FieldKind::DateTime),
            _ => None,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            FieldKind::Str => ".+?",
            FieldKind::Word => r"\w+",
            FieldKind::Int => "[0-9]+",
            FieldKind::Float => r"[0-9]+\.[0-9]+",
            FieldKind::DateTime => {
                r"[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[T ][0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]+)?)?(?:Z|[+-][0-9]{2}:?[0-9]{2})?)?"
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Word => "word",
            FieldKind::Int => "integer",
            FieldKind::Float => "float",
            FieldKind::DateTime => "datetime",
        }
    }

    /// Convert matched text into a value. `None` when the text fits the
    /// pattern but not the type (integer overflow, February 30th, ...).
    fn convert(self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldKind::Str | FieldKind::Word => Some(FieldValue::Str(raw.to_string())),
            FieldKind::Int => raw.parse().ok().map(FieldValue::Int),
            FieldKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float),
            FieldKind::DateTime => parse_datetime(raw).map(FieldValue::DateTime),
        }
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if raw.len() == 10 {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    let normalized = raw.to_ascii_uppercase().replacen(' ', "T", 1);
    let (local, offset_seconds) = split_offset(&normalized)?;
    let naive = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())?;

    FixedOffset::east_opt(offset_seconds)?
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.naive_utc())
}

/// Split a trailing `Z` or `+HH[:]MM` offset off the time part. Returns the
/// remaining text and the offset in seconds east of UTC.
fn split_offset(text: &str) -> Option<(&str, i32)> {
    if let Some(local) = text.strip_suffix('Z') {
        return Some((local, 0));
    }

    // The date part has dashes too, so only look after the `T`
    let time_start = text.find('T')?;
    let Some(sign_pos) = text[time_start..]
        .rfind(|c: char| c == '+' || c == '-')
        .map(|pos| time_start + pos)
    else {
        return Some((text, 0));
    };

    let digits: String = text[sign_pos + 1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    let seconds = hours * 3600 + minutes * 60;
    let sign = if text[sign_pos..].starts_with('-') { -1 } else { 1 };

    Some((&text[..sign_pos], sign * seconds))
}

/// A typed value extracted from a file name.
///
/// Values of the same kind are totally ordered; floats use IEEE total order.
/// Values of different kinds never meet in practice (one field has one
/// kind) but still order by kind so sorting stays total.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Str(String),
    Int(u64),
    Float(f64),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Str(_) => 0,
            FieldValue::Int(_) => 1,
            FieldValue::Float(_) => 2,
            FieldValue::DateTime(_) => 3,
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(v) => {
                // Always keep a decimal point so the text matches `{:f}` again
                let text = v.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_RENDER_FORMAT)),
        }
    }
}

/// A single `{...}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: Option<String>,
    pub kind: FieldKind,
    /// Zero-padded width used when rendering integers (`{seq:04d}`)
    pub width: Option<usize>,
}

impl FieldSpec {
    fn parse(body: &str) -> Result<Self, TemplateError> {
        let (name, spec) = body.split_once(':').unwrap_or((body, ""));

        let name = if name.is_empty() {
            None
        } else if is_valid_field_name(name) {
            Some(name.to_string())
        } else {
            return Err(TemplateError::InvalidFieldName(name.to_string()));
        };

        let unknown = || TemplateError::UnknownType {
            field: name.clone().unwrap_or_else(|| "{}".to_string()),
            spec: spec.to_string(),
        };

        // Optional `0<width>` prefix, only meaningful for integers
        let (width, kind_spec) = match spec.strip_prefix('0') {
            Some(rest) => {
                let digits = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                let width = rest[..digits].parse::<usize>().map_err(|_| unknown())?;
                (Some(width), &rest[digits..])
            }
            None => (None, spec),
        };

        let kind = FieldKind::from_spec(kind_spec).ok_or_else(unknown)?;
        if width.is_some() && kind != FieldKind::Int {
            return Err(unknown());
        }

        Ok(FieldSpec { name, kind, width })
    }

    fn render_into(&self, value: &FieldValue, out: &mut String) -> Result<(), TemplateError> {
        let field = self.name.as_deref().unwrap_or("{}");
        let mismatch = || TemplateError::TypeMismatch {
            field: field.to_string(),
            expected: self.kind.name(),
        };

        match (self.kind, value) {
            (FieldKind::Int, FieldValue::Int(n)) => match self.width {
                Some(width) => out.push_str(&format!("{:0width$}", n, width = width)),
                None => out.push_str(&n.to_string()),
            },
            (FieldKind::Str, FieldValue::Str(s)) if !s.is_empty() => out.push_str(s),
            (FieldKind::Word, FieldValue::Str(s)) if WORD_RE.is_match(s) => out.push_str(s),
            (FieldKind::Float, FieldValue::Float(v)) if v.is_finite() && *v >= 0.0 => {
                out.push_str(&value.to_string())
            }
            (FieldKind::DateTime, FieldValue::DateTime(_)) => out.push_str(&value.to_string()),
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(FieldSpec),
}

/// A compiled filename template
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl Template {
    /// Parse and compile a template string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let segments = parse_segments(source)?;

        let mut seen = HashSet::new();
        for segment in &segments {
            if let Segment::Field(FieldSpec {
                name: Some(name), ..
            }) = segment
            {
                if !seen.insert(name.as_str()) {
                    return Err(TemplateError::DuplicateField(name.clone()));
                }
            }
        }

        let mut pattern = String::from("(?si)^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Field(spec) => {
                    pattern.push('(');
                    pattern.push_str(spec.kind.pattern());
                    pattern.push(')');
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| TemplateError::Regex(e.to_string()))?;

        Ok(Template {
            source: source.to_string(),
            segments,
            regex,
        })
    }

    fn field_specs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(spec) => Some(spec),
            Segment::Literal(_) => None,
        })
    }

    /// Names of the captured fields, in template order
    pub fn field_names(&self) -> Vec<&str> {
        self.field_specs()
            .filter_map(|spec| spec.name.as_deref())
            .collect()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_specs()
            .any(|spec| spec.name.as_deref() == Some(name))
    }

    /// Match a whole file name. Returns `None` if the name does not fit.
    pub fn matches(&self, name: &str) -> Option<Fields> {
        let captures = self.regex.captures(name)?;
        let mut fields = Fields::new();

        for (index, spec) in self.field_specs().enumerate() {
            let raw = captures.get(index + 1)?.as_str();
            let value = spec.kind.convert(raw)?;
            if let Some(name) = &spec.name {
                fields.insert(name.clone(), value);
            }
        }

        Some(fields)
    }

    /// Substitute field values back into the template
    pub fn render(&self, fields: &Fields) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(spec) => {
                    let name = spec.name.as_deref().ok_or(TemplateError::AnonymousField)?;
                    let value = fields
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingValue(name.to_string()))?;
                    spec.render_into(value, &mut out)?;
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segments(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    literal.push('{');
                    continue;
                }

                let body_start = index + 1;
                let close = source[body_start..]
                    .find('}')
                    .map(|offset| body_start + offset)
                    .ok_or(TemplateError::UnclosedBrace(index))?;
                let body = &source[body_start..close];
                if body.contains('{') {
                    return Err(TemplateError::UnclosedBrace(index));
                }

                while chars.next_if(|&(i, _)| i <= close).is_some() {}

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(FieldSpec::parse(body)?));
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_some() {
                    literal.push('}');
                    continue;
                }
                return Err(TemplateError::UnmatchedBrace(index));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// Decides whether a file name is a candidate and what fields it carries
pub trait NameMatcher {
    fn match_name(&self, name: &str) -> Option<Fields>;
}

impl NameMatcher for Template {
    fn match_name(&self, name: &str) -> Option<Fields> {
        self.matches(name)
    }
}

/// Accepts every name with no fields; used when no template is given
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl NameMatcher for MatchAll {
    fn match_name(&self, _name: &str) -> Option<Fields> {
        Some(Fields::new())
    }
}

/// One-shot helper: compile `template` and match `name` against it
pub fn extract_fields(template: &str, name: &str) -> Result<Option<Fields>, TemplateError> {
    Ok(Template::parse(template)?.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn int(n: u64) -> FieldValue {
        FieldValue::Int(n)
    }

    fn string(s: &str) -> FieldValue {
        FieldValue::Str(s.to_string())
    }

    #[test]
    fn test_integer_field_extracts_numeric_value() {
        let template = Template::parse("app-{seq:d}.log").unwrap();
        let fields = template.matches("app-0007.log").unwrap();
        assert_eq!(fields.get("seq"), Some(&int(7)));
    }

    #[test]
    fn test_match_is_anchored_to_whole_name() {
        let template = Template::parse("app-{seq:d}.log").unwrap();
        assert!(template.matches("app-1.log").is_some());
        assert!(template.matches("xapp-1.log").is_none());
        assert!(template.matches("app-1.log.gz").is_none());
        assert!(template.matches("app-.log").is_none());
        assert!(template.matches("app-1a.log").is_none());
    }

    #[test]
    fn test_literal_dot_is_not_a_wildcard() {
        let template = Template::parse("app-{seq:d}.log").unwrap();
        assert!(template.matches("app-1xlog").is_none());
    }

    #[test]
    fn test_string_fields_are_lazy() {
        let template = Template::parse("{a}-{b}").unwrap();
        let fields = template.matches("x-y-z").unwrap();
        assert_eq!(fields.get("a"), Some(&string("x")));
        assert_eq!(fields.get("b"), Some(&string("y-z")));
    }

    #[test]
    fn test_adjacent_integer_fields_prefer_the_left_one() {
        let template = Template::parse("{a:d}{b:d}").unwrap();
        let fields = template.matches("1234").unwrap();
        assert_eq!(fields.get("a"), Some(&int(123)));
        assert_eq!(fields.get("b"), Some(&int(4)));
    }

    #[test]
    fn test_string_field_stops_before_digits() {
        let template = Template::parse("{name}{seq:d}.log").unwrap();
        let fields = template.matches("app12.log").unwrap();
        assert_eq!(fields.get("name"), Some(&string("app")));
        assert_eq!(fields.get("seq"), Some(&int(12)));
    }

    #[test]
    fn test_word_field() {
        let template = Template::parse("{host:w}.{seq:d}").unwrap();
        let fields = template.matches("web_01.3").unwrap();
        assert_eq!(fields.get("host"), Some(&string("web_01")));
        assert!(template.matches("web-01.3").is_none());
    }

    #[test]
    fn test_float_field() {
        let template = Template::parse("v{version:f}.bin").unwrap();
        let fields = template.matches("v1.25.bin").unwrap();
        assert_eq!(fields.get("version"), Some(&FieldValue::Float(1.25)));
        assert!(template.matches("v1.bin").is_none());
    }

    #[test]
    fn test_datetime_field() {
        let template = Template::parse("backup-{date:ti}.tar").unwrap();

        let fields = template.matches("backup-2024-03-01.tar").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(fields.get("date"), Some(&FieldValue::DateTime(expected)));

        let fields = template.matches("backup-2024-03-01T10:30:05.tar").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 5)
            .unwrap();
        assert_eq!(fields.get("date"), Some(&FieldValue::DateTime(expected)));
    }

    #[test]
    fn test_datetime_fraction_and_offset() {
        let template = Template::parse("db-{at:ti}.sql").unwrap();
        let at = |name: &str| template.matches(name).unwrap().remove("at").unwrap();

        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(10, 30, 5, 250)
            .unwrap();
        assert_eq!(
            at("db-2024-03-01T10:30:05.25.sql"),
            FieldValue::DateTime(expected)
        );

        // Offsets are folded into UTC
        let utc = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(at("db-2024-03-01T08:00:00Z.sql"), FieldValue::DateTime(utc));
        assert_eq!(
            at("db-2024-03-01T10:00:00+02:00.sql"),
            FieldValue::DateTime(utc)
        );
        assert_eq!(at("db-2024-03-01T03:00-0500.sql"), FieldValue::DateTime(utc));
    }

    #[test]
    fn test_datetime_with_fraction_renders_back() {
        let template = Template::parse("db-{at:ti}.sql").unwrap();
        let fields = template.matches("db-2024-03-01T10:30:05.5+01:00.sql").unwrap();
        let rendered = template.render(&fields).unwrap();

        assert_eq!(rendered, "db-2024-03-01T09:30:05.500.sql");
        assert_eq!(template.matches(&rendered), Some(fields));
    }

    #[test]
    fn test_matching_ignores_case() {
        let template = Template::parse("app-{seq:d}.log").unwrap();
        let fields = template.matches("APP-0007.LOG").unwrap();
        assert_eq!(fields.get("seq"), Some(&int(7)));

        let template = Template::parse("backup-{date:ti}.tar").unwrap();
        assert!(template.matches("Backup-2024-03-01t10:30.TAR").is_some());
    }

    #[test]
    fn test_unicode_word_renders_back() {
        let template = Template::parse("{host:w}.log").unwrap();
        let fields = template.matches("e\u{301}.log").unwrap();
        assert_eq!(fields.get("host"), Some(&string("e\u{301}")));
        assert_eq!(template.render(&fields).unwrap(), "e\u{301}.log");

        let mut fields = Fields::new();
        fields.insert("host".to_string(), string("web-01"));
        assert!(matches!(
            template.render(&fields).unwrap_err(),
            TemplateError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_invalid_calendar_date_does_not_match() {
        let template = Template::parse("backup-{date:ti}.tar").unwrap();
        assert!(template.matches("backup-2025-02-30.tar").is_none());
    }

    #[test]
    fn test_integer_overflow_does_not_match() {
        let template = Template::parse("{seq:d}").unwrap();
        assert!(template.matches("99999999999999999999999").is_none());
    }

    #[test]
    fn test_anonymous_field_matches_without_capture() {
        let template = Template::parse("{}-{seq:d}.log").unwrap();
        let fields = template.matches("anything-3.log").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(template.field_names(), vec!["seq"]);
    }

    #[test]
    fn test_escaped_braces() {
        let template = Template::parse("{{{seq:d}}}.txt").unwrap();
        let fields = template.matches("{5}.txt").unwrap();
        assert_eq!(fields.get("seq"), Some(&int(5)));
    }

    #[test]
    fn test_malformed_templates() {
        assert_eq!(
            Template::parse("app-{seq").unwrap_err(),
            TemplateError::UnclosedBrace(4)
        );
        assert_eq!(
            Template::parse("app}").unwrap_err(),
            TemplateError::UnmatchedBrace(3)
        );
        assert!(matches!(
            Template::parse("{1seq}").unwrap_err(),
            TemplateError::InvalidFieldName(_)
        ));
        assert!(matches!(
            Template::parse("{seq:x}").unwrap_err(),
            TemplateError::UnknownType { .. }
        ));
        assert!(matches!(
            Template::parse("{name:04s}").unwrap_err(),
            TemplateError::UnknownType { .. }
        ));
        assert_eq!(
            Template::parse("{a}-{a}").unwrap_err(),
            TemplateError::DuplicateField("a".to_string())
        );
    }

    #[test]
    fn test_field_lookup() {
        let template = Template::parse("{name}-{seq:d}.log").unwrap();
        assert!(template.has_field("seq"));
        assert!(!template.has_field("date"));
        assert_eq!(template.to_string(), "{name}-{seq:d}.log");
    }

    #[test]
    fn test_render_zero_pads_integers() {
        let template = Template::parse("app-{seq:04d}.log").unwrap();
        let fields = template.matches("app-7.log").unwrap();
        assert_eq!(template.render(&fields).unwrap(), "app-0007.log");
    }

    #[test]
    fn test_render_reports_missing_and_mismatched_values() {
        let template = Template::parse("app-{seq:d}.log").unwrap();
        assert_eq!(
            template.render(&Fields::new()).unwrap_err(),
            TemplateError::MissingValue("seq".to_string())
        );

        let mut fields = Fields::new();
        fields.insert("seq".to_string(), string("x"));
        assert!(matches!(
            template.render(&fields).unwrap_err(),
            TemplateError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_field_value_ordering() {
        assert!(int(10) > int(9));
        assert!(FieldValue::Float(2.5) > FieldValue::Float(-1.0));
        assert!(string("b") > string("a"));
    }

    #[test]
    fn test_match_all_accepts_everything() {
        assert_eq!(MatchAll.match_name("whatever"), Some(Fields::new()));
    }

    #[test]
    fn test_extract_fields() {
        let fields = extract_fields("db-{date:ti}.sql", "db-2024-01-02.sql")
            .unwrap()
            .unwrap();
        assert!(fields.contains_key("date"));
        assert_eq!(extract_fields("db-{date:ti}.sql", "readme.txt").unwrap(), None);
        assert!(extract_fields("db-{date", "x").is_err());
    }

    proptest! {
        #[test]
        fn prop_render_round_trips(
            seq in "[0-9]{1,8}",
            tag in "[a-z.-]{1,8}",
        ) {
            let template = Template::parse("app-{seq:d}-{tag}.log").unwrap();
            let name = format!("app-{}-{}.log", seq, tag);
            let fields = template.matches(&name).unwrap();
            let rendered = template.render(&fields).unwrap();
            prop_assert_eq!(template.matches(&rendered), Some(fields));
        }

        #[test]
        fn prop_padded_render_round_trips(seq in 0u64..1_000_000, host in "[a-z_]{1,6}") {
            let template = Template::parse("{host:w}.{seq:06d}.gz").unwrap();
            let mut fields = Fields::new();
            fields.insert("host".to_string(), FieldValue::Str(host));
            fields.insert("seq".to_string(), FieldValue::Int(seq));
            let rendered = template.render(&fields).unwrap();
            prop_assert_eq!(template.matches(&rendered), Some(fields));
        }
    }
}
