use anyhow::Context as _;

use super::*;

#[test]
fn each_pipeline_stage_has_its_own_prefix() {
    let cases = [
        (BakeError::config("folder escapes root"), "configuration error: folder escapes root"),
        (BakeError::capture("no surface"), "capture error: no surface"),
        (BakeError::geometry("bad crop"), "geometry error: bad crop"),
        (BakeError::packing("atlas too small"), "packing error: atlas too small"),
        (BakeError::persistence("disk full"), "persistence error: disk full"),
        (BakeError::serde("bad json"), "serialization error: bad json"),
    ];
    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

fn read_frame(path: &str) -> BakeResult<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("read frame '{path}'"))?;
    Ok(bytes)
}

#[test]
fn io_context_converts_into_other_with_question_mark() {
    let err = read_frame("definitely/missing/0000.png").unwrap_err();
    assert!(matches!(err, BakeError::Other(_)));
    assert!(err.to_string().contains("read frame 'definitely/missing/0000.png'"));
}

#[test]
fn packing_failures_stay_distinct_from_config() {
    let pack = |cells: usize| -> BakeResult<()> {
        if cells == 0 {
            return Err(BakeError::packing("nothing to pack"));
        }
        Ok(())
    };
    let err = pack(0).unwrap_err();
    assert!(matches!(err, BakeError::Packing(ref msg) if msg == "nothing to pack"));
    assert!(!matches!(err, BakeError::Config(_)));
    assert!(pack(3).is_ok());
}
