//! JSON codec for [`CharacterSheet`] and the API response envelope.
//!
//! Decoding runs in two phases: the text is first parsed into a JSON tree,
//! so malformed input always fails as [`GeneratorError::Syntax`] and never
//! yields a partial sheet. The tree is then checked against the wire-name
//! table and converted. Type mismatches carry the wire path of the first
//! offending field.
//!
//! A [`Codec`] is immutable once built. The free functions [`decode`] and
//! [`encode`] use a process-wide default instance.

use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character_sheet::CharacterSheet;
use crate::error::GeneratorError;
use crate::responses::ApiResponse;
use crate::wire;

static DEFAULT_CODEC: LazyLock<Codec> = LazyLock::new(Codec::default);

/// Output settings for a [`Codec`].
///
/// Deserializable so host applications can embed it in their own settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecConfig {
    /// Indent encoded output
    pub pretty: bool,
}

/// Reader/writer pair for the character sheet wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The process-wide default codec (compact output)
    pub fn shared() -> &'static Codec {
        &DEFAULT_CODEC
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Decode a bare character sheet object.
    pub fn decode(&self, json: &str) -> Result<CharacterSheet, GeneratorError> {
        let value = read_tree(json)?;
        let sheet = sheet_from_tree(value)?;
        tracing::trace!(name = %sheet.name, "decoded character sheet");
        Ok(sheet)
    }

    /// Encode a character sheet using its fixed wire names.
    pub fn encode(&self, sheet: &CharacterSheet) -> Result<String, GeneratorError> {
        self.write(sheet)
    }

    /// Decode the full API envelope (`status`, `error`, `data`, `code`).
    ///
    /// Mismatch paths inside the payload are prefixed with `data`.
    pub fn decode_response(
        &self,
        json: &str,
    ) -> Result<ApiResponse<CharacterSheet>, GeneratorError> {
        let value = read_tree(json)?;
        from_tree(value, wire::RESPONSE_ENVELOPE)
    }

    /// Encode a full API envelope.
    pub fn encode_response(
        &self,
        response: &ApiResponse<CharacterSheet>,
    ) -> Result<String, GeneratorError> {
        self.write(response)
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<String, GeneratorError> {
        let result = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(|e| GeneratorError::encode(e.to_string()))
    }
}

/// Decode with the shared default codec.
pub fn decode(json: &str) -> Result<CharacterSheet, GeneratorError> {
    Codec::shared().decode(json)
}

/// Encode with the shared default codec.
pub fn encode(sheet: &CharacterSheet) -> Result<String, GeneratorError> {
    Codec::shared().encode(sheet)
}

/// Decode a full API envelope with the shared default codec.
pub fn decode_response(json: &str) -> Result<ApiResponse<CharacterSheet>, GeneratorError> {
    Codec::shared().decode_response(json)
}

fn read_tree(json: &str) -> Result<Value, GeneratorError> {
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(line = e.line(), column = e.column(), error = %e, "malformed JSON");
        GeneratorError::syntax(e.line(), e.column(), e.to_string())
    })
}

fn sheet_from_tree(value: Value) -> Result<CharacterSheet, GeneratorError> {
    from_tree(value, wire::CHARACTER_SHEET)
}

fn from_tree<T: DeserializeOwned>(
    value: Value,
    record: &'static [wire::WireField],
) -> Result<T, GeneratorError> {
    if let Some(found) = wire::find_mismatch(&value, record) {
        tracing::debug!(path = %found.path, reason = %found.message, "wire shape mismatch");
        return Err(GeneratorError::schema_mismatch(found.path, found.message));
    }
    serde_json::from_value(value).map_err(|e| GeneratorError::schema_mismatch("$", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character_sheet::{AbilityScore, AbilityScores, ClassInfo, RaceInfo};
    use serde_json::json;

    fn sample_sheet() -> CharacterSheet {
        CharacterSheet {
            name: "Thalia Duskwhisper".into(),
            race: RaceInfo {
                name: "Elf".into(),
                traits: vec!["Darkvision".into(), "Fey Ancestry".into(), "Trance".into()],
            },
            character_class: ClassInfo {
                name: "Mage".into(),
                description: "A scholarly magic-user".into(),
                primary_stat: "intelligence".into(),
                hit_die: "d6".into(),
            },
            background: "Sage".into(),
            personality: "Curious and soft-spoken".into(),
            motivation: "Recover a lost spellbook".into(),
            stats: AbilityScores {
                strength: AbilityScore::new(8, -1),
                dexterity: AbilityScore::new(14, 2),
                constitution: AbilityScore::new(12, 1),
                intelligence: AbilityScore::new(17, 3),
                wisdom: AbilityScore::new(13, 1),
                charisma: AbilityScore::new(10, 0),
            },
            hit_points: 7,
        }
    }

    fn sample_json() -> Value {
        serde_json::to_value(sample_sheet()).unwrap()
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let sheet = sample_sheet();
        let encoded = encode(&sheet).unwrap();
        assert_eq!(decode(&encoded).unwrap(), sheet);
    }

    #[test]
    fn encode_uses_class_and_hp_keys() {
        let encoded = encode(&sample_sheet()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["class"]["name"], "Mage");
        assert_eq!(value["hp"], 7);
        assert!(value.get("characterClass").is_none());
        assert!(!encoded.contains("character_class"));
    }

    #[test]
    fn encode_does_not_elide_default_fields() {
        let value: Value = serde_json::from_str(&encode(&CharacterSheet::default()).unwrap()).unwrap();
        assert_eq!(value["name"], "");
        assert_eq!(value["race"]["traits"], json!([]));
        assert_eq!(value["stats"]["charisma"], json!({ "value": 0, "modifier": 0 }));
        assert_eq!(value["hp"], 0);
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let mut value = sample_json();
        value["alignment"] = json!("Chaotic Good");
        value["stats"]["luck"] = json!({ "value": 3 });
        value["class"]["spellcasting"] = json!(true);
        let sheet = decode(&value.to_string()).unwrap();
        assert_eq!(sheet, sample_sheet());
    }

    #[test]
    fn decode_defaults_missing_fields() {
        let sheet = decode(r#"{"name":"Brom","hp":11}"#).unwrap();
        assert_eq!(sheet.name, "Brom");
        assert_eq!(sheet.hit_points, 11);
        assert_eq!(sheet.race, RaceInfo::default());
        assert_eq!(sheet.stats, AbilityScores::default());
    }

    #[test]
    fn truncated_object_is_syntax_error() {
        let encoded = encode(&sample_sheet()).unwrap();
        let truncated = &encoded[..encoded.len() / 2];
        let err = decode(truncated).unwrap_err();
        assert!(err.is_syntax(), "unexpected error: {err:?}");
    }

    #[test]
    fn syntax_error_wins_over_later_type_errors() {
        let err = decode(r#"{"hp":"many", "name": }"#).unwrap_err();
        assert!(matches!(err, GeneratorError::Syntax { line: 1, .. }));
    }

    #[test]
    fn type_mismatch_reports_field_path() {
        let mut value = sample_json();
        value["stats"]["dexterity"]["modifier"] = json!("+2");
        let err = decode(&value.to_string()).unwrap_err();
        assert_eq!(err.path(), Some("stats.dexterity.modifier"));

        let err = decode(r#"{"class":"Mage"}"#).unwrap_err();
        assert_eq!(err.path(), Some("class"));
    }

    #[test]
    fn non_object_root_is_mismatch() {
        let err = decode("42").unwrap_err();
        assert_eq!(err.path(), Some("$"));
    }

    #[test]
    fn pretty_codec_output_decodes_to_same_sheet() {
        let codec = Codec::new(CodecConfig { pretty: true });
        let encoded = codec.encode(&sample_sheet()).unwrap();
        assert!(encoded.contains('\n'));
        assert_eq!(Codec::shared().decode(&encoded).unwrap(), sample_sheet());
    }

    #[test]
    fn codec_config_deserializes_with_defaults() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.pretty);
        let config: CodecConfig = serde_json::from_str(r#"{"pretty":true}"#).unwrap();
        assert_eq!(Codec::new(config).config(), CodecConfig { pretty: true });
    }

    #[test]
    fn decode_response_unwraps_envelope() {
        let json = json!({
            "status": "ok",
            "error": null,
            "data": sample_json(),
        })
        .to_string();
        let response = decode_response(&json).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.into_result().unwrap(), sample_sheet());
    }

    #[test]
    fn decode_response_prefixes_payload_paths() {
        let json = json!({
            "status": "ok",
            "data": { "race": { "traits": "Darkvision" } },
        })
        .to_string();
        let err = decode_response(&json).unwrap_err();
        assert_eq!(err.path(), Some("data.race.traits"));

        let err = decode_response(r#"{"status":"ok","data":[]}"#).unwrap_err();
        assert_eq!(err.path(), Some("data"));
    }

    #[test]
    fn decode_response_reports_envelope_field_paths() {
        let err = decode_response(r#"{"status":5}"#).unwrap_err();
        assert_eq!(err.path(), Some("status"));

        let err = decode_response(r#"{"status":"error","code":"x"}"#).unwrap_err();
        assert_eq!(err.path(), Some("code"));

        let err = decode_response(r#"{"status":"error","error":["bad"]}"#).unwrap_err();
        assert_eq!(err.path(), Some("error"));

        let err = decode_response("[]").unwrap_err();
        assert_eq!(err.path(), Some("$"));
    }

    #[test]
    fn shared_codec_is_initialized_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| Codec::shared() as *const Codec as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
