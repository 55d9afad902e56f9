use serde::{Deserialize, Deserializer};

/// One entry returned by the dictionary for a word. Homographs come back as
/// several entries for the same word.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub source_urls: Vec<String>,
}

impl LookupResult {
    /// First pronunciation clip in phonetics order, skipping entries whose
    /// audio url is empty.
    pub fn audio_url(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|phonetic| phonetic.audio.as_deref())
            .find(|audio| !audio.is_empty())
    }

    /// The phonetic spelling shown next to the word, falling back to the
    /// first phonetics entry that carries text.
    pub fn phonetic_text(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| {
                self.phonetics
                    .iter()
                    .filter_map(|phonetic| phonetic.text.as_deref())
                    .find(|text| !text.is_empty())
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

// The api documents `sourceUrls` as an array but older entries carry a bare string.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_full_entry() {
        let value = json!({
            "word": "hello",
            "phonetic": "həˈləʊ",
            "phonetics": [
                { "text": "həˈləʊ", "audio": "" },
                { "text": "hɛˈləʊ", "audio": "https://example.org/hello-uk.mp3" }
            ],
            "origin": "early 19th century",
            "meanings": [
                {
                    "partOfSpeech": "exclamation",
                    "definitions": [
                        {
                            "definition": "used as a greeting",
                            "example": "hello there, Katie!",
                            "synonyms": [],
                            "antonyms": []
                        }
                    ],
                    "synonyms": ["hi"],
                    "antonyms": ["bye"]
                }
            ],
            "license": { "name": "CC BY-SA 3.0", "url": "https://creativecommons.org/licenses/by-sa/3.0" },
            "sourceUrls": ["https://en.wiktionary.org/wiki/hello"]
        });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert_eq!(entry.word, "hello");
        assert_eq!(entry.phonetics.len(), 2);
        assert_eq!(entry.meanings[0].part_of_speech, "exclamation");
        assert_eq!(
            entry.meanings[0].definitions[0].example.as_deref(),
            Some("hello there, Katie!")
        );
        assert_eq!(entry.source_urls, vec!["https://en.wiktionary.org/wiki/hello"]);
        assert_eq!(entry.license.unwrap().name, "CC BY-SA 3.0");
    }

    #[test]
    fn missing_fields_fall_back_to_empty() {
        let value = json!({
            "word": "bare",
            "meanings": [{ "partOfSpeech": "adjective", "definitions": [{ "definition": "naked" }] }]
        });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert!(entry.phonetic.is_none());
        assert!(entry.phonetics.is_empty());
        assert!(entry.source_urls.is_empty());
        assert!(entry.meanings[0].synonyms.is_empty());
        assert!(entry.meanings[0].definitions[0].antonyms.is_empty());
    }

    #[test]
    fn source_urls_accepts_a_single_string() {
        let value = json!({ "word": "x", "sourceUrls": "https://en.wiktionary.org/wiki/x" });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert_eq!(entry.source_urls, vec!["https://en.wiktionary.org/wiki/x"]);
    }

    #[test]
    fn audio_url_skips_empty_entries() {
        let value = json!({
            "word": "y",
            "phonetics": [{ "audio": "" }, { "text": "/waɪ/" }, { "audio": "https://x/y.mp3" }]
        });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert_eq!(entry.audio_url(), Some("https://x/y.mp3"));
    }

    #[test]
    fn audio_url_is_none_without_clips() {
        let value = json!({ "word": "z", "phonetics": [{ "audio": "" }] });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert_eq!(entry.audio_url(), None);
    }

    #[test]
    fn phonetic_text_falls_back_to_phonetics() {
        let value = json!({ "word": "w", "phonetics": [{ "audio": "" }, { "text": "/ˈdʌb.əl.juː/" }] });
        let entry: LookupResult = serde_json::from_value(value).unwrap();
        assert_eq!(entry.phonetic_text(), Some("/ˈdʌb.əl.juː/"));
    }
}
