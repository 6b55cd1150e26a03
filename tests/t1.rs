use anyhow::Result;
use anyedn::read::{loads, read_file};
use anyedn::write::dumps;
use anyedn::Settings;
use std::path::Path;

const INPUT: &[u8] = include_bytes!("t-input.edn");
const EXPECTED: &[u8] = include_bytes!("t-expected.edn");

#[test]
fn t1() -> Result<()> {
    let v = loads(std::str::from_utf8(INPUT)?)?;
    let out = format!("{}\n", dumps(&v)?);
    assert_eq!(out.as_bytes(), EXPECTED);
    Ok(())
}

#[test]
fn t1_canonical_form_is_stable() -> Result<()> {
    let expected = std::str::from_utf8(EXPECTED)?;
    let v = loads(expected)?;
    assert_eq!(format!("{}\n", dumps(&v)?), expected);
    Ok(())
}

#[test]
fn t1_read_file() -> Result<()> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/t-input.edn");
    let v = read_file(&path, &Settings::default())?;
    assert_eq!(v, loads(std::str::from_utf8(INPUT)?)?);
    Ok(())
}

#[test]
fn t1_read_file_reports_path() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/no-such-file.edn");
    let e = read_file(&path, &Settings::default()).unwrap_err();
    assert!(e.to_string().contains("no-such-file.edn"));
}
