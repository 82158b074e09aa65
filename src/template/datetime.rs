// ABOUTME: Date-time display formats and time-zone resolution for the datetime helper
// ABOUTME: Maps single-letter standard specifiers to layouts and resolves IANA or Windows zone ids

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;

use super::error::{Result, TemplateError};

/// Windows time-zone ids that notification templates commonly carry, mapped to IANA names.
const WINDOWS_ZONES: &[(&str, &str)] = &[
    ("UTC", "Etc/UTC"),
    ("Coordinated Universal Time", "Etc/UTC"),
    ("GMT Standard Time", "Europe/London"),
    ("Greenwich Standard Time", "Atlantic/Reykjavik"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("Romance Standard Time", "Europe/Paris"),
    ("Central Europe Standard Time", "Europe/Budapest"),
    ("E. Europe Standard Time", "Europe/Chisinau"),
    ("FLE Standard Time", "Europe/Kiev"),
    ("Russian Standard Time", "Europe/Moscow"),
    ("India Standard Time", "Asia/Kolkata"),
    ("China Standard Time", "Asia/Shanghai"),
    ("Singapore Standard Time", "Asia/Singapore"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("Korea Standard Time", "Asia/Seoul"),
    ("Vladivostok Standard Time", "Asia/Vladivostok"),
    ("AUS Eastern Standard Time", "Australia/Sydney"),
    ("New Zealand Standard Time", "Pacific/Auckland"),
    ("Eastern Standard Time", "America/New_York"),
    ("Central Standard Time", "America/Chicago"),
    ("Mountain Standard Time", "America/Denver"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("E. South America Standard Time", "America/Sao_Paulo"),
];

/// How a timestamp is displayed.
///
/// Single characters select a standard layout (invariant culture). Strings
/// containing `%` are `chrono` strftime patterns; any other string is a custom
/// pattern such as `yyyy-MM-dd HH:mm`, translated to strftime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayFormat {
    /// RFC 3339 with `Z` for UTC
    Default,
    /// `o`: seven fractional digits and an explicit offset
    RoundTrip,
    /// `r`: always rendered in GMT
    Rfc1123,
    /// `s`
    Sortable,
    /// `u`: always rendered in UTC
    UniversalSortable,
    ShortDate,
    LongDate,
    ShortTime,
    LongTime,
    FullShortTime,
    FullLongTime,
    GeneralShortTime,
    GeneralLongTime,
    Pattern(String),
}

impl DisplayFormat {
    pub fn parse(format: &str) -> Result<Self> {
        let parsed = match format {
            "" => Self::Default,
            "o" | "O" => Self::RoundTrip,
            "r" | "R" => Self::Rfc1123,
            "s" => Self::Sortable,
            "u" => Self::UniversalSortable,
            "d" => Self::ShortDate,
            "D" => Self::LongDate,
            "t" => Self::ShortTime,
            "T" => Self::LongTime,
            "f" => Self::FullShortTime,
            "F" => Self::FullLongTime,
            "g" => Self::GeneralShortTime,
            "G" => Self::GeneralLongTime,
            single if single.chars().count() == 1 => {
                return Err(TemplateError::InvalidFormat(format!(
                    "unknown standard format specifier '{}'",
                    single
                )))
            }
            pattern if pattern.contains('%') => {
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                    return Err(TemplateError::InvalidFormat(format!(
                        "invalid strftime pattern '{}'",
                        pattern
                    )));
                }
                Self::Pattern(pattern.to_string())
            }
            pattern => Self::Pattern(translate_custom(pattern)?),
        };

        Ok(parsed)
    }

    fn layout(&self) -> Option<&str> {
        match self {
            Self::Sortable => Some("%Y-%m-%dT%H:%M:%S"),
            Self::ShortDate => Some("%m/%d/%Y"),
            Self::LongDate => Some("%A, %d %B %Y"),
            Self::ShortTime => Some("%H:%M"),
            Self::LongTime => Some("%H:%M:%S"),
            Self::FullShortTime => Some("%A, %d %B %Y %H:%M"),
            Self::FullLongTime => Some("%A, %d %B %Y %H:%M:%S"),
            Self::GeneralShortTime => Some("%m/%d/%Y %H:%M"),
            Self::GeneralLongTime => Some("%m/%d/%Y %H:%M:%S"),
            Self::Pattern(pattern) => Some(pattern.as_str()),
            _ => None,
        }
    }
}

/// strftime field for a run of `count` identical custom-pattern letters
fn custom_field(letter: char, count: usize) -> Option<&'static str> {
    let field = match (letter, count) {
        ('y', 1) => "%-y",
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('d', 3) => "%a",
        ('d', _) => "%A",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('f', 3) => "%3f",
        ('f', 6) => "%6f",
        ('f', 9) => "%9f",
        ('t', _) => "%p",
        ('z', 3) | ('K', 1) => "%:z",
        _ => return None,
    };
    Some(field)
}

/// Translate a custom pattern (`dd MMM yyyy 'at' HH:mm`) into strftime.
///
/// Quoted text and `\`-escaped characters are literal. Unsupported letter
/// runs and patterns without any date or time field are rejected.
fn translate_custom(pattern: &str) -> Result<String> {
    let invalid = |reason: &str| {
        TemplateError::InvalidFormat(format!("{} in date-time pattern '{}'", reason, pattern))
    };

    let mut layout = String::with_capacity(pattern.len() * 2);
    let mut fields = 0;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let mut closed = false;
                for literal in chars.by_ref() {
                    if literal == c {
                        closed = true;
                        break;
                    }
                    layout.push(literal);
                }
                if !closed {
                    return Err(invalid("unterminated quote"));
                }
            }
            '\\' => match chars.next() {
                Some(literal) => layout.push(literal),
                None => return Err(invalid("trailing escape")),
            },
            letter if "yMdHhmsftzKFg".contains(letter) => {
                let mut count = 1;
                while chars.next_if_eq(&letter).is_some() {
                    count += 1;
                }
                let run = letter.to_string().repeat(count);
                let field = custom_field(letter, count)
                    .ok_or_else(|| invalid(&format!("unsupported field '{}'", run)))?;
                layout.push_str(field);
                fields += 1;
            }
            literal => layout.push(literal),
        }
    }

    if fields == 0 {
        return Err(invalid("no date or time fields"));
    }
    Ok(layout)
}

/// Render `at` in `format`.
///
/// A zero offset is rendered as UTC (`Z` marker, `UTC` zone name); any other
/// offset is rendered explicitly.
pub fn format_timestamp(at: &DateTime<FixedOffset>, format: &DisplayFormat) -> String {
    let utc = at.offset().local_minus_utc() == 0;

    match format {
        DisplayFormat::Default => at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        DisplayFormat::RoundTrip => {
            let zone = if utc {
                "Z".to_string()
            } else {
                at.format("%:z").to_string()
            };
            let ticks = (at.nanosecond() % 1_000_000_000) / 100;
            format!("{}.{:07}{}", at.format("%Y-%m-%dT%H:%M:%S"), ticks, zone)
        }
        DisplayFormat::Rfc1123 => at
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
        DisplayFormat::UniversalSortable => at
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%SZ")
            .to_string(),
        other => {
            // Every remaining variant carries a layout.
            let layout = other.layout().unwrap_or("%+");
            if utc {
                at.with_timezone(&Utc).format(layout).to_string()
            } else {
                at.format(layout).to_string()
            }
        }
    }
}

/// Resolve an IANA or Windows time-zone id
pub fn resolve_time_zone(id: &str) -> Result<Tz> {
    let id = id.trim();

    if let Ok(zone) = id.parse::<Tz>() {
        return Ok(zone);
    }

    if let Some((_, iana)) = WINDOWS_ZONES
        .iter()
        .find(|(windows, _)| windows.eq_ignore_ascii_case(id))
    {
        return iana
            .parse::<Tz>()
            .map_err(|_| TemplateError::UnknownTimeZone(id.to_string()));
    }

    Tz::from_str_insensitive(id).map_err(|_| TemplateError::UnknownTimeZone(id.to_string()))
}

/// Move `at` into `zone`, keeping the instant
pub fn convert(at: &DateTime<FixedOffset>, zone: Tz) -> DateTime<FixedOffset> {
    at.with_timezone(&zone).fixed_offset()
}
