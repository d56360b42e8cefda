//! Audio query model passed between query construction and synthesis.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EngineError;

/// One mora (the unit of Japanese rhythm) inside an accent phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mora {
    pub text: String,
    pub consonant: Option<String>,
    pub consonant_length: Option<f64>,
    pub vowel: String,
    pub vowel_length: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccentPhrase {
    pub moras: Vec<Mora>,
    /// 1-based position of the accent nucleus
    pub accent: usize,
    pub pause_mora: Option<Mora>,
    #[serde(default)]
    pub is_interrogative: bool,
}

/// How a piece of text should be spoken: phonemes, pitch and durations.
///
/// Produced by [`crate::SpeechEngine::audio_query`] and consumed by
/// [`crate::SpeechEngine::synthesis`]. Fields this model does not know about
/// are kept in `extra` so a query survives the trip back to the engine intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioQuery {
    pub accent_phrases: Vec<AccentPhrase>,
    #[serde(alias = "speedScale")]
    pub speed_scale: f64,
    #[serde(alias = "pitchScale")]
    pub pitch_scale: f64,
    #[serde(alias = "intonationScale")]
    pub intonation_scale: f64,
    #[serde(alias = "volumeScale")]
    pub volume_scale: f64,
    #[serde(alias = "prePhonemeLength")]
    pub pre_phoneme_length: f64,
    #[serde(alias = "postPhonemeLength")]
    pub post_phoneme_length: f64,
    #[serde(alias = "outputSamplingRate")]
    pub output_sampling_rate: u32,
    #[serde(alias = "outputStereo")]
    pub output_stereo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AudioQuery {
    /// Parse the JSON form an engine hands back.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to compact JSON. Non-ASCII text is written as-is.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Total number of moras across all accent phrases, pauses excluded.
    pub fn mora_count(&self) -> usize {
        self.accent_phrases.iter().map(|p| p.moras.len()).sum()
    }
}

impl Default for AudioQuery {
    fn default() -> Self {
        Self {
            accent_phrases: Vec::new(),
            speed_scale: 1.0,
            pitch_scale: 0.0,
            intonation_scale: 1.0,
            volume_scale: 1.0,
            pre_phoneme_length: 0.1,
            post_phoneme_length: 0.1,
            output_sampling_rate: 24000,
            output_stereo: false,
            kana: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AudioQuery;

    const QUERY_JSON: &str = r#"{
        "accent_phrases": [
            {
                "moras": [
                    {"text": "コ", "consonant": "k", "consonant_length": 0.05, "vowel": "o", "vowel_length": 0.1, "pitch": 5.5},
                    {"text": "ン", "consonant": null, "consonant_length": null, "vowel": "N", "vowel_length": 0.08, "pitch": 5.6}
                ],
                "accent": 1,
                "pause_mora": null,
                "is_interrogative": false
            },
            {
                "moras": [
                    {"text": "ワ", "consonant": "w", "consonant_length": 0.06, "vowel": "a", "vowel_length": 0.12, "pitch": 5.2}
                ],
                "accent": 1,
                "pause_mora": {"text": "、", "consonant": null, "consonant_length": null, "vowel": "pau", "vowel_length": 0.3, "pitch": 0.0}
            }
        ],
        "speed_scale": 1.0,
        "pitch_scale": 0.0,
        "intonation_scale": 1.0,
        "volume_scale": 1.0,
        "pre_phoneme_length": 0.1,
        "post_phoneme_length": 0.1,
        "output_sampling_rate": 24000,
        "output_stereo": false,
        "kana": "コ'ン/ワ'",
        "engine_hint": {"v": 2}
    }"#;

    #[test]
    fn parses_engine_json() {
        let query = AudioQuery::from_json(QUERY_JSON).unwrap();
        assert_eq!(query.accent_phrases.len(), 2);
        assert_eq!(query.mora_count(), 3);
        assert_eq!(query.accent_phrases[0].moras[1].consonant, None);
        assert!(query.accent_phrases[1].pause_mora.is_some());
        assert!(!query.accent_phrases[1].is_interrogative);
        assert_eq!(query.kana.as_deref(), Some("コ'ン/ワ'"));
    }

    #[test]
    fn keeps_unknown_fields_and_japanese_text() {
        let query = AudioQuery::from_json(QUERY_JSON).unwrap();
        let json = query.to_json().unwrap();
        assert!(json.contains("\"engine_hint\":{\"v\":2}"));
        assert!(json.contains("コ"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn accepts_camel_case_scales() {
        let json = r#"{"accent_phrases": [], "speedScale": 1.2, "pitchScale": 0.0,
            "intonationScale": 1.0, "volumeScale": 1.0, "prePhonemeLength": 0.1,
            "postPhonemeLength": 0.1, "outputSamplingRate": 48000, "outputStereo": true}"#;
        let query = AudioQuery::from_json(json).unwrap();
        assert_eq!(query.output_sampling_rate, 48000);
        assert!(query.output_stereo);
        assert!((query.speed_scale - 1.2).abs() < f64::EPSILON);
        assert!(query.extra.is_empty());
    }

    #[test]
    fn rejects_json_without_accent_phrases() {
        assert!(AudioQuery::from_json(r#"{"speed_scale": 1.0}"#).is_err());
    }

    #[test]
    fn full_precision_numbers_survive_the_trip_back_to_the_engine() {
        let json = r#"{"accent_phrases": [{"moras": [{"text": "ヨ", "consonant": "y",
            "consonant_length": 0.0634543225169182, "vowel": "o",
            "vowel_length": 0.10375528037548065, "pitch": 5.612345678901234}],
            "accent": 1, "pause_mora": null}],
            "speed_scale": 1.0, "pitch_scale": 0.0, "intonation_scale": 1.0,
            "volume_scale": 1.0, "pre_phoneme_length": 0.1, "post_phoneme_length": 0.1,
            "output_sampling_rate": 24000, "output_stereo": false}"#;

        let query = AudioQuery::from_json(json).unwrap();
        let mora = &query.accent_phrases[0].moras[0];
        assert_eq!(mora.pitch, 5.612345678901234);
        assert_eq!(mora.consonant_length, Some(0.0634543225169182));
        assert_eq!(mora.vowel_length, 0.10375528037548065);

        let resent = AudioQuery::from_json(&query.to_json().unwrap()).unwrap();
        assert_eq!(resent, query);
    }
}
