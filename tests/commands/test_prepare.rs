//! Tests for the data preparation command

use std::fs;

use medical_kgqa::commands::prepare;
use medical_kgqa::schema::{ATTRIBUTES, MANIFEST_FILE};
use medical_kgqa::Lexicon;

const RAW: &str = "\
name,alias,part,age,infection,insurance,department,checklist,symptom,complication,treatment,drug,period,rate,money
diabetes,,pancreas,adult,no,yes,endocrinology,blood_glucose,thirst polyuria,retinopathy,diet,insulin metformin,long,60%,3000
hypertension,,heart,adult,no,yes,cardiology,blood_pressure,headache,stroke,diet,amlodipine,long,70%,1000
";

#[test]
fn test_prepare_output_feeds_lexicon() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    fs::write(&input, RAW).unwrap();

    let summary = prepare::run(&input, dir.path()).unwrap();
    assert_eq!(summary.diseases, 2);
    assert_eq!(summary.vertices.len(), ATTRIBUTES.len());
    assert_eq!(summary.vertex_count("Drug"), Some(3));
    assert_eq!(summary.edge_count("HAS_SYMPTOM"), Some(3));

    let lexicon = Lexicon::try_load(dir.path().join("Disease.csv")).unwrap();
    assert_eq!(lexicon.names(), ["hypertension", "diabetes"]);
    assert!(dir.path().join(MANIFEST_FILE).is_file());
}

#[test]
fn test_prepare_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    fs::write(&input, RAW).unwrap();
    let out = dir.path().join("out");

    let first = prepare::run(&input, &out).unwrap();
    let drugs = fs::read_to_string(out.join("Drug.csv")).unwrap();
    let second = prepare::run(&input, &out).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(out.join("Drug.csv")).unwrap(), drugs);
}
