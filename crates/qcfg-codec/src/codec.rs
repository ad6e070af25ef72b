use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{CodecError, CodecResult};
use crate::format::Format;
use crate::merge::merge_values;

/// Encode a record in the given format.
///
/// Output is deterministic for records whose fields serialize in a fixed
/// order (derived structs, `BTreeMap`s).
pub fn encode<T: Serialize + ?Sized>(format: Format, record: &T) -> CodecResult<Vec<u8>> {
    let encode_err = |reason: String| CodecError::Encode { format, reason };
    match format {
        Format::Json => {
            let mut buf = Vec::new();
            let mut ser =
                serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
            record
                .serialize(&mut ser)
                .map_err(|e| encode_err(e.to_string()))?;
            Ok(buf)
        }
        Format::Yaml => serde_yaml::to_string(record)
            .map(String::into_bytes)
            .map_err(|e| encode_err(e.to_string())),
        Format::Toml => toml::to_string_pretty(record)
            .map(String::into_bytes)
            .map_err(|e| encode_err(e.to_string())),
    }
}

/// Parse bytes into a generic document.
fn parse(format: Format, data: &[u8]) -> CodecResult<Value> {
    let decode_err = |reason: String| CodecError::Decode { format, reason };
    match format {
        Format::Json => serde_json::from_slice(data).map_err(|e| decode_err(e.to_string())),
        Format::Yaml => serde_yaml::from_slice(data).map_err(|e| decode_err(e.to_string())),
        Format::Toml => {
            let text = std::str::from_utf8(data).map_err(|e| decode_err(e.to_string()))?;
            toml::from_str(text).map_err(|e| decode_err(e.to_string()))
        }
    }
}

/// Merge encoded bytes over `record` and return the result.
///
/// Returns `None` for a null document (JSON `null`, an empty YAML stream),
/// which leaves nothing to merge. The top-level document must otherwise be a
/// map; a bare sequence or scalar is a decode error. `record` is not touched.
pub fn decode_merged<T>(format: Format, data: &[u8], record: &T) -> CodecResult<Option<T>>
where
    T: Serialize + DeserializeOwned,
{
    let decode_err = |reason: String| CodecError::Decode { format, reason };

    let overlay = parse(format, data)?;
    match &overlay {
        Value::Null => return Ok(None),
        Value::Object(_) => {}
        other => {
            return Err(decode_err(format!(
                "expected a map at the top level, found {}",
                kind_name(other)
            )))
        }
    }

    let mut current = serde_json::to_value(record).map_err(|e| CodecError::Encode {
        format,
        reason: e.to_string(),
    })?;
    merge_values(&mut current, overlay);

    serde_json::from_value(current)
        .map(Some)
        .map_err(|e| decode_err(e.to_string()))
}

/// Merge encoded bytes into an existing record.
///
/// Fields absent from `data` keep their current value. A null document
/// leaves the record as it is. On any error the record is left unchanged.
pub fn decode_into<T>(format: Format, data: &[u8], record: &mut T) -> CodecResult<()>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(merged) = decode_merged(format, data, &*record)? {
        *record = merged;
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Settings {
        version: String,
        name: String,
        port: u32,
        debug: bool,
        peers: Vec<String>,
    }

    fn sample() -> Settings {
        Settings {
            version: "2".into(),
            name: "gateway".into(),
            port: 9000,
            debug: false,
            peers: vec!["a:1".into(), "b:2".into()],
        }
    }

    #[test]
    fn json_is_tab_indented_in_declaration_order() {
        let bytes = encode(Format::Json, &sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n\t\"Version\": \"2\",\n\t\"Name\": \"gateway\""));
    }

    #[test]
    fn encoding_is_deterministic() {
        for format in [Format::Json, Format::Yaml, Format::Toml] {
            assert_eq!(
                encode(format, &sample()).unwrap(),
                encode(format, &sample()).unwrap()
            );
        }
    }

    #[test]
    fn decode_merges_and_keeps_absent_fields() {
        let mut record = sample();
        decode_into(Format::Json, br#"{"Name": "edge", "Port": 8443}"#, &mut record).unwrap();
        assert_eq!(record.name, "edge");
        assert_eq!(record.port, 8443);
        assert_eq!(record.version, "2");
        assert_eq!(record.peers, sample().peers);
    }

    #[test]
    fn yaml_and_toml_partial_documents_merge() {
        let mut record = sample();
        decode_into(Format::Yaml, b"Debug: true\n", &mut record).unwrap();
        assert!(record.debug);

        decode_into(Format::Toml, b"Version = \"3\"\n", &mut record).unwrap();
        assert_eq!(record.version, "3");
        assert!(record.debug);
    }

    #[test]
    fn malformed_input_leaves_record_unchanged() {
        let mut record = sample();
        let err = decode_into(Format::Json, b"{\"Name\": ", &mut record).unwrap_err();
        assert!(matches!(err, CodecError::Decode { format: Format::Json, .. }));
        assert_eq!(record, sample());
    }

    #[test]
    fn type_mismatch_leaves_record_unchanged() {
        let mut record = sample();
        let err =
            decode_into(Format::Json, br#"{"Name": "x", "Port": "not-a-number"}"#, &mut record)
                .unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert_eq!(record, sample());
    }

    #[test]
    fn null_document_is_a_no_op() {
        let mut record = sample();
        decode_into(Format::Json, b"null", &mut record).unwrap();
        decode_into(Format::Yaml, b"", &mut record).unwrap();
        assert_eq!(record, sample());
    }

    #[test]
    fn top_level_sequence_is_rejected() {
        let mut record = sample();
        let err = decode_into(Format::Json, br#"["9", "n", 1, false, []]"#, &mut record)
            .unwrap_err();
        assert!(matches!(err, CodecError::Decode { format: Format::Json, .. }));
        assert_eq!(record, sample());

        let mut dynamic = serde_json::json!({"Version": "1", "Keep": true});
        let err = decode_into(Format::Yaml, b"- 9\n- n\n", &mut dynamic).unwrap_err();
        assert!(matches!(err, CodecError::Decode { format: Format::Yaml, .. }));
        assert_eq!(dynamic, serde_json::json!({"Version": "1", "Keep": true}));
    }

    #[test]
    fn top_level_scalar_is_rejected() {
        let mut dynamic = serde_json::json!({"Version": "1"});
        assert!(decode_into(Format::Json, b"\"2\"", &mut dynamic).is_err());
        assert!(decode_into(Format::Json, b"42", &mut dynamic).is_err());
        assert_eq!(dynamic, serde_json::json!({"Version": "1"}));
    }

    #[test]
    fn decode_merged_leaves_input_alone() {
        let record = sample();
        let merged = decode_merged(Format::Json, br#"{"Port": 1}"#, &record)
            .unwrap()
            .unwrap();
        assert_eq!(merged.port, 1);
        assert_eq!(record, sample());
        assert!(decode_merged(Format::Json, b"null", &record).unwrap().is_none());
    }

    #[test]
    fn toml_rejects_invalid_utf8() {
        let mut record = sample();
        let err = decode_into(Format::Toml, &[0xff, 0xfe], &mut record).unwrap_err();
        assert!(matches!(err, CodecError::Decode { format: Format::Toml, .. }));
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            "[a-zA-Z0-9.]{1,8}",
            "\\PC{0,24}",
            any::<u32>(),
            any::<bool>(),
            prop::collection::vec("\\PC{0,12}", 0..4),
        )
            .prop_map(|(version, name, port, debug, peers)| Settings {
                version,
                name,
                port,
                debug,
                peers,
            })
    }

    proptest! {
        #[test]
        fn decode_of_encode_reproduces_record(original in arb_settings()) {
            for format in [Format::Json, Format::Yaml, Format::Toml] {
                let bytes = encode(format, &original).unwrap();
                let mut target = sample();
                decode_into(format, &bytes, &mut target).unwrap();
                prop_assert_eq!(&target, &original);
            }
        }
    }
}
