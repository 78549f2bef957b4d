//! Simple TOML parser for display configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the display configuration. It does NOT support the full TOML spec and
//! never allocates.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - Integers with `_` digit separators
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Keys that are absent keep their default value. Unknown sections and keys
//! are rejected so typos do not silently fall back to defaults.

use super::types::{ConfigError, DisplayConfig};
use crate::face::Face;

/// Parse error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

/// Parse error with the 1-based line it occurred on (0 for validation)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    const fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Faces,
    Dwell,
    Notification,
    Weather,
    Scroll,
    Redraw,
}

/// Parse TOML configuration into a validated DisplayConfig
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .map_err(|kind| ParseError::at(line_no, kind))?;
            continue;
        }

        let (key, value) = parse_key_value(line)
            .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidLine))?;

        apply_value(section, key, value, &mut config)
            .map_err(|kind| ParseError::at(line_no, kind))?;
    }

    config
        .validate()
        .map_err(|e| ParseError::at(0, ParseErrorKind::Invalid(e)))?;

    Ok(config)
}

/// Parse section header like "faces" or "notification"
fn parse_section_header(header: &str) -> Result<Section, ParseErrorKind> {
    match header.trim() {
        "faces" => Ok(Section::Faces),
        "dwell" => Ok(Section::Dwell),
        "notification" => Ok(Section::Notification),
        "weather" => Ok(Section::Weather),
        "scroll" => Ok(Section::Scroll),
        "redraw" => Ok(Section::Redraw),
        _ => Err(ParseErrorKind::InvalidSection),
    }
}

/// Drop a trailing comment, if any
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, accepting `_` separators
fn parse_int(value: &str) -> Result<u32, ParseErrorKind> {
    let mut result: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        match c {
            '_' => continue,
            '0'..='9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(c as u32 - '0' as u32))
                    .ok_or(ParseErrorKind::InvalidValue)?;
                digits += 1;
            }
            _ => return Err(ParseErrorKind::InvalidValue),
        }
    }

    if digits == 0 {
        return Err(ParseErrorKind::InvalidValue);
    }
    Ok(result)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

/// Apply a key/value pair to the section being parsed
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseErrorKind> {
    match section {
        Section::Root => return Err(ParseErrorKind::UnknownKey),
        Section::Faces => {
            let face = Face::from_name(key).ok_or(ParseErrorKind::UnknownKey)?;
            config.faces.enabled.set(face, parse_bool(value)?);
        }
        Section::Dwell => {
            let dwell = &mut config.faces.dwell;
            match key {
                "time_ms" => dwell.time_ms = parse_int(value)?,
                "weather_ms" => dwell.weather_ms = parse_int(value)?,
                "forecast_ms" => dwell.forecast_ms = parse_int(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Notification => {
            let timing = &mut config.notifications;
            match key {
                "display_ms" => timing.display_ms = parse_int(value)?,
                "navigation_display_ms" => timing.navigation_display_ms = parse_int(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Weather => match key {
            "max_age_ms" => config.weather.max_age_ms = parse_int(value)?,
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Scroll => {
            let scroll = &mut config.scroll;
            match key {
                "step_ms" => scroll.step_ms = parse_int(value)?,
                "pause_ms" => scroll.pause_ms = parse_int(value)?,
                "visible_chars" => {
                    scroll.visible_chars =
                        u8::try_from(parse_int(value)?).map_err(|_| ParseErrorKind::InvalidValue)?
                }
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Redraw => {
            let redraw = &mut config.redraw;
            match key {
                "time_ms" => redraw.time_ms = parse_int(value)?,
                "navigation_ms" => redraw.navigation_ms = parse_int(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceSet;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("time = true"), Some(("time", "true")));
        assert_eq!(parse_key_value("time ="), None);
        assert_eq!(parse_key_value("no equals sign"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("20000"), Ok(20_000));
        assert_eq!(parse_int("3_600_000"), Ok(3_600_000));
        assert_eq!(parse_int("_"), Err(ParseErrorKind::InvalidValue));
        assert_eq!(parse_int("-5"), Err(ParseErrorKind::InvalidValue));
        assert_eq!(parse_int("99999999999"), Err(ParseErrorKind::InvalidValue));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(DisplayConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Face selection
[faces]
time = true
weather = true
forecast = false    # no forecast on this unit
notification = true
navigation = false

[dwell]
time_ms = 15_000
weather_ms = 8000

[notification]
display_ms = 5000
navigation_display_ms = 2500

[weather]
max_age_ms = 1_800_000

[scroll]
step_ms = 250
pause_ms = 1500
visible_chars = 12

[redraw]
time_ms = 1000
navigation_ms = 400
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(
            config.faces.enabled,
            FaceSet::from_faces(&[Face::Time, Face::Weather, Face::Notification])
        );
        assert_eq!(config.faces.dwell.time_ms, 15_000);
        assert_eq!(config.faces.dwell.weather_ms, 8_000);
        // Untouched key keeps its default
        assert_eq!(config.faces.dwell.forecast_ms, 10_000);
        assert_eq!(config.notifications.display_ms, 5_000);
        assert_eq!(config.notifications.navigation_display_ms, 2_500);
        assert_eq!(config.weather.max_age_ms, 1_800_000);
        assert_eq!(config.scroll.step_ms, 250);
        assert_eq!(config.scroll.pause_ms, 1_500);
        assert_eq!(config.scroll.visible_chars, 12);
        assert_eq!(config.redraw.navigation_ms, 400);
    }

    #[test]
    fn test_unknown_section_reports_line() {
        let err = parse_config("\n[stepper]\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidSection);
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[faces]\nclock = true\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::UnknownKey));

        let err = parse_config("time = true\n").unwrap_err();
        assert_eq!(err, ParseError::at(1, ParseErrorKind::UnknownKey));
    }

    #[test]
    fn test_invalid_value() {
        let err = parse_config("[dwell]\ntime_ms = soon\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidValue));

        let err = parse_config("[scroll]\nvisible_chars = 300\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("[scroll]\nvisible_chars = 0\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Invalid(ConfigError::ZeroVisibleChars)
        );
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let config_str = r#"
[faces]
time = false
weather = false
forecast = false
notification = false
navigation = false
"#;
        let err = parse_config(config_str).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Invalid(ConfigError::NoFacesEnabled)
        );
    }
}
