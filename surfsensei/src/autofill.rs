//! Autofill prompt and the JSON extraction for its free-form response.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::SurfError;
use crate::models::{ConditionsSuggestion, TideDirection};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").expect("fence pattern is valid"));

/// Prompt asking the search-enabled model for current conditions as strict JSON.
pub fn conditions_prompt(location_query: &str) -> String {
    format!(
        r#"
    You are an expert surf forecaster.
    The user wants current surf conditions for: "{location_query}".

    Use Google Search to find the latest LIVE surf report or marine forecast for this location.

    PRIORITY ORDER FOR DATA:
    1. **Surf Report (Face Height)**: Look for a local surf report (e.g. Surfline, MagicSeaweed, Local Blogs) that estimates the actual breaking wave height (e.g. "3-4ft waist to chest").
    2. **NOAA Marine Data**: If no direct surf report is found, find the nearest NOAA Marine Buoy.

    Interpret the data to fill the JSON.
    IMPORTANT: For "swellHeight", if you found a Surf Report, use the "Face Height" (e.g. "3-4"). If you only found Buoy data, use the Swell Height (e.g. "2.5") but try to find the 'Significant Wave Height'.

    Extract or estimate the following CURRENT conditions:
    - Swell Height (e.g., "3-4")
    - Swell Period (e.g., "14")
    - Swell Direction (e.g., "W" or "270 deg")
    - Wind Speed (e.g., "5" or "5-10")
    - Wind Direction (e.g., "NW")
    - Tide Height (e.g., "2.5")
    - Tide Direction ("rising" or "falling")

    Return the result as a valid JSON object with keys matching exactly:
    {{
      "swellHeight": "string",
      "swellPeriod": "string",
      "swellDirection": "string",
      "windSpeed": "string (number or range only, NO units like 'mph')",
      "windDirection": "string",
      "tideHeight": "string (number only, NO units like 'ft')",
      "tideDirection": "string (must be 'rising' or 'falling')"
    }}
    IMPORTANT: Do NOT include units (ft, s, mph) in the values for windSpeed or tideHeight, or the form will fail to populate.
    Do not include any markdown formatting or backticks in your response, just the raw JSON string.
  "#
    )
}

/// Remove markdown code fences and surrounding whitespace.
pub fn strip_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Find the first balanced `{...}` in `text`, ignoring braces inside JSON strings.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Pull a JSON object out of model text.
///
/// Tries the fence-stripped text as-is first, then the first balanced
/// object inside it.
pub fn extract_json(text: &str) -> Result<Value, SurfError> {
    let cleaned = strip_fences(text);
    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    let candidate = first_balanced_object(&cleaned)
        .ok_or_else(|| SurfError::InvalidAutofillFormat("no JSON object found".to_string()))?;
    serde_json::from_str(candidate).map_err(|e| SurfError::InvalidAutofillFormat(e.to_string()))
}

fn field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turn an autofill response into a suggestion with a normalized tide direction.
pub fn parse_conditions(text: &str) -> Result<ConditionsSuggestion, SurfError> {
    let value = extract_json(text)?;
    if !value.is_object() {
        return Err(SurfError::InvalidAutofillFormat(
            "expected a JSON object".to_string(),
        ));
    }

    let tide = field(&value, "tideDirection");
    Ok(ConditionsSuggestion {
        swell_height: field(&value, "swellHeight"),
        swell_period: field(&value, "swellPeriod"),
        swell_direction: field(&value, "swellDirection"),
        wind_speed: field(&value, "windSpeed"),
        wind_direction: field(&value, "windDirection"),
        tide_height: field(&value, "tideHeight"),
        tide_direction: TideDirection::normalize(tide.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"swellHeight":"3-4","swellPeriod":"14","swellDirection":"W","windSpeed":"5-10","windDirection":"NW","tideHeight":"2.5","tideDirection":"Rising"}"#;

    #[test]
    fn fenced_and_unfenced_parse_identically() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        assert_eq!(extract_json(&fenced).unwrap(), extract_json(PAYLOAD).unwrap());
    }

    #[test]
    fn extracts_object_from_chatter() {
        let text = format!("Here you go: {PAYLOAD} Thanks!");
        let suggestion = parse_conditions(&text).unwrap();
        assert_eq!(suggestion.swell_height.as_deref(), Some("3-4"));
        assert_eq!(suggestion.wind_direction.as_deref(), Some("NW"));
        assert_eq!(suggestion.tide_direction, TideDirection::Rising);
    }

    #[test]
    fn picks_first_balanced_object() {
        let text = r#"First {"swellHeight":"2"} then {"swellHeight":"9"}"#;
        let suggestion = parse_conditions(text).unwrap();
        assert_eq!(suggestion.swell_height.as_deref(), Some("2"));
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_scanner() {
        let text = r#"note: {"swellDirection":"W {270}","windDirection":"say \"}\""} ok"#;
        let obj = first_balanced_object(text).unwrap();
        assert!(obj.ends_with(r#"\"}\""}"#));
        let suggestion = parse_conditions(text).unwrap();
        assert_eq!(suggestion.swell_direction.as_deref(), Some("W {270}"));
    }

    #[test]
    fn no_json_is_invalid_format() {
        assert!(matches!(
            parse_conditions("Sorry, I couldn't find a report."),
            Err(SurfError::InvalidAutofillFormat(_))
        ));
        assert!(matches!(
            parse_conditions("broken {\"swellHeight\": }"),
            Err(SurfError::InvalidAutofillFormat(_))
        ));
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(parse_conditions("[1, 2]").is_err());
    }

    #[test]
    fn tide_direction_collapses_to_two_values() {
        let falling = parse_conditions(r#"{"tideDirection":"FALLING"}"#).unwrap();
        assert_eq!(falling.tide_direction, TideDirection::Falling);
        let unknown = parse_conditions(r#"{"tideDirection":"unknown"}"#).unwrap();
        assert_eq!(unknown.tide_direction, TideDirection::Falling);
        let absent = parse_conditions(r#"{"swellHeight":"1"}"#).unwrap();
        assert_eq!(absent.tide_direction, TideDirection::Falling);
        let rising = parse_conditions(r#"{"tideDirection":"RISING (high at 3pm)"}"#).unwrap();
        assert_eq!(rising.tide_direction, TideDirection::Rising);
    }

    #[test]
    fn numeric_values_are_stringified() {
        let suggestion = parse_conditions(r#"{"swellPeriod":14,"tideHeight":2.5,"windSpeed":null}"#)
            .unwrap();
        assert_eq!(suggestion.swell_period.as_deref(), Some("14"));
        assert_eq!(suggestion.tide_height.as_deref(), Some("2.5"));
        assert_eq!(suggestion.wind_speed, None);
    }

    #[test]
    fn prompt_names_location_and_keys() {
        let prompt = conditions_prompt("Trestles");
        assert!(prompt.contains("current surf conditions for: \"Trestles\""));
        assert!(prompt.contains("\"tideDirection\": \"string (must be 'rising' or 'falling')\""));
    }
}
