//! User query templated from the session form.

use chrono::NaiveDateTime;

use crate::models::SessionInput;

/// Render the session time for the prompt.
///
/// Form values (`2024-06-01T06:30`, optionally with seconds) become
/// "Jun 1, 2024, 6:30 AM". Anything else is passed through verbatim.
pub fn format_session_time(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .map_or_else(
            || raw.to_string(),
            |dt| dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        )
}

/// Build the user query. Every field is interpolated as typed.
pub fn user_query(input: &SessionInput) -> String {
    format!(
        "
Compare the following surf spots: {spots}.
I plan to surf at {time}.
Conditions are: {swell_height} ft, {swell_period} sec, {swell_direction}, wind {wind_speed} mph from {wind_direction}, tide is {tide_height} ft and {tide_direction}.
I weigh {body_weight} lbs and I’m a {skill} surfer.
My boards: {boards}.

Give me:
- The best spot for these conditions
- Which board to bring
- Why the other spot is worse
- A short session strategy
",
        spots = input.spots,
        time = format_session_time(&input.session_date_time),
        swell_height = input.swell_height,
        swell_period = input.swell_period,
        swell_direction = input.swell_direction,
        wind_speed = input.wind_speed,
        wind_direction = input.wind_direction,
        tide_height = input.tide_height,
        tide_direction = input.tide_direction,
        body_weight = input.body_weight,
        skill = input.skill_level,
        boards = input.user_boards,
    )
}
