// ABOUTME: Handlebars helper functions for notification templates
// ABOUTME: Implements pretty, if_eq, substring and datetime over loosely-typed event data

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, Renderable,
};
use tracing::warn;

use super::datetime::{self, DisplayFormat};
use super::value::{normalize, HelperValue};

pub const PRETTY: &str = "pretty";
pub const IF_EQ: &str = "if_eq";
pub const SUBSTRING: &str = "substring";
pub const DATETIME: &str = "datetime";

/// Registered helper names with their call signatures
pub const HELPER_SIGNATURES: &[(&str, &str)] = &[
    (PRETTY, "{{pretty value}}"),
    (IF_EQ, "{{#if_eq a b}}primary{{else}}alternate{{/if_eq}}"),
    (SUBSTRING, "{{substring value start? length?}}"),
    (DATETIME, "{{datetime value format? timeZoneId?}}"),
];

/// Placeholder written for blank values so HTML table cells keep their height
const BLANK_PLACEHOLDER: &str = "&nbsp;";

/// Write text through the registry's escape function, unless the helper was
/// called from a triple-stash `{{{ }}}` expression
fn write_escaped(
    r: &Handlebars,
    rc: &RenderContext,
    out: &mut dyn Output,
    text: &str,
) -> HelperResult {
    if rc.is_disable_escape() {
        out.write(text)?;
    } else {
        out.write(&r.get_escape_fn()(text))?;
    }
    Ok(())
}

/// Pretty helper - renders a value, using compact JSON for structured data
pub fn pretty_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = HelperValue::param(h, 0);

    if value.is_missing() {
        out.write("null")?;
    } else if value.is_structured() {
        write_escaped(r, rc, out, &normalize(&value).to_string())?;
    } else {
        let text = value.to_string();
        if text.trim().is_empty() {
            out.write(BLANK_PLACEHOLDER)?;
        } else {
            write_escaped(r, rc, out, &text)?;
        }
    }

    Ok(())
}

/// If-equal block helper - renders the primary branch when both arguments
/// have the same trimmed string form, the alternate branch otherwise
#[derive(Clone, Copy)]
pub struct IfEqHelper;

impl HelperDef for IfEqHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let equal = h.params().len() == 2
            && texts_equal(&HelperValue::param(h, 0), &HelperValue::param(h, 1));

        let branch = if equal { h.template() } else { h.inverse() };
        match branch {
            Some(template) => template.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// Ordinal comparison of trimmed string forms
pub fn texts_equal(lhs: &HelperValue<'_>, rhs: &HelperValue<'_>) -> bool {
    lhs.to_string().trim() == rhs.to_string().trim()
}

/// Substring helper - bounds-safe extraction by character position
pub fn substring_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = HelperValue::param(h, 0);
    if value.is_missing() {
        return Ok(());
    }

    let text = value.to_string();
    let start = h.param(1).map(|_| parse_index(&HelperValue::param(h, 1)));
    let length = h.param(2).map(|_| parse_index(&HelperValue::param(h, 2)));

    if let Some(fragment) = substring(&text, start, length) {
        write_escaped(r, rc, out, fragment)?;
    }

    Ok(())
}

/// Extract `length` characters starting at character `start`.
///
/// Returns `None` when `start` lies beyond the end of `text`; `length` is
/// clamped to what remains.
pub fn substring(text: &str, start: Option<usize>, length: Option<usize>) -> Option<&str> {
    let Some(start) = start else {
        return Some(text);
    };

    let char_count = text.chars().count();
    if start > char_count {
        return None;
    }

    let remaining = char_count - start;
    let take = length.map_or(remaining, |length| length.min(remaining));

    let begin = byte_offset(text, start);
    let end = byte_offset(text, start + take);
    Some(&text[begin..end])
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Integer form of a position argument; unparsable text counts as zero and
/// negative values are raised to zero
pub fn parse_index(value: &HelperValue<'_>) -> usize {
    value
        .to_string()
        .trim()
        .parse::<i64>()
        .map_or(0, |n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
}

/// DateTime helper - formats a timestamp, optionally converting it to another time zone
pub fn datetime_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    rc: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let Some(mut at) = HelperValue::param(h, 0).timestamp() else {
        return Ok(());
    };

    let format = match HelperValue::param(h, 1).as_str() {
        Some(format) => DisplayFormat::parse(format).unwrap_or_else(|e| {
            warn!("{}; using the default date-time format", e);
            DisplayFormat::Default
        }),
        None => DisplayFormat::Default,
    };

    if let Some(zone_id) = HelperValue::param(h, 2).as_str() {
        match datetime::resolve_time_zone(zone_id) {
            Ok(zone) => at = datetime::convert(&at, zone),
            Err(e) => warn!("{}; formatting the unconverted timestamp", e),
        }
    }

    write_escaped(r, rc, out, &datetime::format_timestamp(&at, &format))
}

/// Register all notification helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper(PRETTY, Box::new(pretty_helper));
    handlebars.register_helper(IF_EQ, Box::new(IfEqHelper));
    handlebars.register_helper(SUBSTRING, Box::new(substring_helper));
    handlebars.register_helper(DATETIME, Box::new(datetime_helper));
}
