// Differential checks: Optional fields decode the same through serde_json and simd-json.
use optional_types::Optional;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Patch {
    name: Optional<String>,
    description: Optional<String>,
    age: Optional<i64>,
}

fn parse_simd_json(input: &[u8]) -> Result<Patch, String> {
    let mut bytes = input.to_vec();
    simd_json::serde::from_slice::<Patch>(&mut bytes).map_err(|err| err.to_string())
}

fn parse_serde_json(input: &[u8]) -> Result<Patch, String> {
    serde_json::from_slice::<Patch>(input).map_err(|err| err.to_string())
}

fn assert_differential_parity(input: &[u8]) {
    let simd = parse_simd_json(input);
    let serde = parse_serde_json(input);
    match (simd, serde) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "decoder value mismatch"),
        (Err(_), Err(_)) => {}
        (left, right) => panic!("decoder outcome mismatch: simd={left:?}, serde={right:?}"),
    }
}

#[test]
fn corpus_valid_documents_match_serde() {
    let corpus = [
        br#"{"Name":"Bob","Age":1}"#.as_slice(),
        br#"{"Name":null,"Description":"x","Age":30}"#.as_slice(),
        br#"{}"#.as_slice(),
        br#"{"Name":"\u2603","Age":-5}"#.as_slice(),
    ];

    for case in corpus {
        assert_differential_parity(case);
    }
}

#[test]
fn corpus_invalid_documents_fail_in_both() {
    let corpus = [
        br#"{"Name":1}"#.as_slice(),
        br#"{"Age":"old"}"#.as_slice(),
        br#"{"Name":"#.as_slice(),
    ];

    for case in corpus {
        assert!(parse_simd_json(case).is_err(), "simd-json accepted {case:?}");
        assert!(parse_serde_json(case).is_err(), "serde_json accepted {case:?}");
    }
}

#[test]
fn null_and_missing_collapse_in_both_decoders() {
    let null = parse_simd_json(br#"{"Name":null}"#).expect("simd null");
    let missing = parse_simd_json(br#"{}"#).expect("simd missing");
    assert_eq!(null, missing);
    assert!(null.name.is_absent());
}
