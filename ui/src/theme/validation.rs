use crate::theme::errors::{ThemeError, ThemeResult};
use crate::theme::types::{BackgroundPattern, BorderRadius, FontSize, ThemePatch};
use crate::validation::Validator;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Validator for a parsed theme object before it is converted into a patch.
///
/// Enum fields must hold one of their closed set of tokens. Unknown keys are
/// tolerated here and dropped by the conversion.
pub struct ThemeSnapshotValidator;

impl ThemeSnapshotValidator {
    fn check_token<T>(map: &Map<String, Value>, key: &str) -> ThemeResult<()>
    where
        T: FromStr<Err = ThemeError>,
    {
        match map.get(key) {
            Some(Value::String(token)) => T::from_str(token).map(|_| ()),
            // Wrong JSON types are reported by the deserializer
            _ => Ok(()),
        }
    }
}

impl Validator<Map<String, Value>> for ThemeSnapshotValidator {
    type Error = ThemeError;

    fn validate(&self, input: &Map<String, Value>) -> Result<(), Self::Error> {
        Self::check_token::<FontSize>(input, "fontSize")?;
        Self::check_token::<BorderRadius>(input, "borderRadius")?;
        Self::check_token::<BackgroundPattern>(input, "backgroundPattern")?;
        Ok(())
    }
}

/// Parses serialized theme text into a patch.
///
/// Accepts full records and partial objects alike; callers decide what the
/// patch is merged over.
pub fn parse_snapshot(text: &str) -> ThemeResult<ThemePatch> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ThemeError::Parse(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ThemeError::Parse("expected a JSON object".to_string()));
    };

    ThemeSnapshotValidator.validate(&map)?;

    serde_json::from_value(Value::Object(map)).map_err(|e| ThemeError::Parse(e.to_string()))
}
