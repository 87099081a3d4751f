//! Boundary with the text-completion service that drafts workouts.
//!
//! The service itself is an external collaborator. This module builds the
//! prompt and request body it is sent, and turns the text it returns into a
//! `WorkoutSpec`. Unparsable text fails with `InvalidJson`; parsable JSON of
//! the wrong shape fails with `MalformedInput`.

use crate::config::GenerationSettings;
use crate::payload::compile_with;
use crate::tables;
use crate::{CompileOptions, Error, Result, WorkoutPayload, WorkoutSpec};
use serde_json::{json, Value};

/// Instruction text asking the service for a workout in our input format
pub fn build_prompt(description: &str) -> String {
    let quoted = |keys: Vec<&str>| {
        keys.iter()
            .map(|k| format!("\"{}\"", k))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    format!(
        r#"
You are a fitness coach.
Given the following workout description, create a structured JSON object that represents the workout.

Workout Description:
{description}

Requirements:
- The output must be valid JSON.
- Use the following structure for the workout object:
{{
  "name": "Workout Name",
  "type": {sports},
  "steps": [
    {{
      "stepName": "Step Name",
      "stepDescription": "Description",
      "endConditionType": "time" | "distance",
      "stepDuration": duration_in_seconds,
      "stepDistance": distance_value,
      "distanceUnit": "m" | "km" | "mile",
      "stepType": {steps},
      "target": {{
        "type": {targets},
        "value": [minValue, maxValue] or single_value,
        "unit": "min_per_km" | "bpm" | "watts" | etc.
      }},
      "numberOfIterations": number, // Only for repeat steps
      "steps": [ ... ] // Nested steps for repeats
    }}
  ]
}}

Constraints:
- The "type" should be one of the supported sports.
- "stepDuration" should be in seconds; use "stepDistance" with "distanceUnit" for distance steps.
- For pace targets, convert times like "4:30 per km" to minutes per km as a decimal (e.g., 4.5).
- Use "no target" if no specific target is given.
- For repeats, include "numberOfIterations" and "steps".
- The JSON must be parsable and not include additional explanations.
"#,
        description = description.trim(),
        sports = quoted(tables::sport_keys()),
        steps = quoted(tables::step_keys()),
        targets = quoted(tables::target_keys()),
    )
}

/// Chat-completion request body for the generation service
pub fn generation_request(description: &str, settings: &GenerationSettings) -> Value {
    json!({
        "model": settings.model,
        "messages": [{ "role": "user", "content": build_prompt(description) }],
        "max_tokens": settings.max_tokens,
        "temperature": settings.temperature,
    })
}

/// Parse the service's reply into a workout description
///
/// The reply is parsed as is first; a fenced block is only looked for when
/// that fails, so backticks inside string values are left alone.
pub fn parse_generated_workout(text: &str) -> Result<WorkoutSpec> {
    let text = text.trim();
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => match unwrap_code_fence(text) {
            Some(body) => {
                serde_json::from_str(body).map_err(|e| Error::InvalidJson(e.to_string()))?
            }
            None => return Err(Error::InvalidJson(e.to_string())),
        },
    };
    serde_json::from_value(value).map_err(|e| Error::MalformedInput(e.to_string()))
}

/// Parse and compile the service's reply in one go
pub fn compile_generated(text: &str, options: &CompileOptions) -> Result<WorkoutPayload> {
    let spec = parse_generated_workout(text)?;
    compile_with(&spec, options)
}

/// Body of the first ```json (or bare ```) fenced block, if the reply has one
fn unwrap_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip the language tag, if any, up to the end of the opening line
    let content = &after_fence[after_fence.find('\n')? + 1..];
    let end = content.find("```")?;
    Some(content[..end].trim())
}
