//! End-to-end tests for the CLI commands using temporary files.

use std::fs;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use vinylcards_cli::commands;

const SONGS_CSV: &str = "\
Artist,Title,Year,Link
ABBA,Waterloo,1974,https://example.com/abba
Nena,99 Luftballons,1983,https://example.com/nena
\"Earth, Wind & Fire\",September,1978,https://example.com/ewf
";

fn path_str(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_render_writes_mirrored_pages() {
    let tmp = tempfile::tempdir().unwrap();
    let entries = tmp.path().join("songs.csv");
    fs::write(&entries, SONGS_CSV).unwrap();
    let out = tmp.path().join("out").join("cards.html");

    let code = commands::render::run(
        Some(&path_str(&entries)),
        None,
        &path_str(&out),
        Some(7),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("<div class=\"page-container").count(), 2);
    assert!(html.contains("Waterloo"));
    assert!(html.contains("&amp;"));
    assert_eq!(html.matches("qr-container").count(), 3);
}

#[test]
fn test_render_is_reproducible_with_seed() {
    let tmp = tempfile::tempdir().unwrap();
    let entries = tmp.path().join("songs.csv");
    fs::write(&entries, SONGS_CSV).unwrap();
    let a = tmp.path().join("a.html");
    let b = tmp.path().join("b.html");

    for out in [&a, &b] {
        commands::render::run(Some(&path_str(&entries)), None, &path_str(out), Some(99), false)
            .unwrap();
    }
    assert_eq!(fs::read_to_string(&a).unwrap(), fs::read_to_string(&b).unwrap());
}

#[test]
fn test_render_token_mode_without_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("token.yaml");
    fs::write(&config, "mode: token\ntoken:\n  main_text: BONUS\n").unwrap();
    let out = tmp.path().join("tokens.html");

    let code =
        commands::render::run(None, Some(&path_str(&config)), &path_str(&out), Some(1), false)
            .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let html = fs::read_to_string(&out).unwrap();
    // Both sides of every token card carry the text.
    assert_eq!(html.matches("BONUS").count(), 48);
}

#[test]
fn test_render_requires_entries_in_music_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("cards.html");
    let err = commands::render::run(None, None, &path_str(&out), Some(1), false).unwrap_err();
    assert!(err.to_string().contains("--entries"));
}

#[test]
fn test_render_oversized_card_fails_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    let entries = tmp.path().join("songs.csv");
    fs::write(&entries, SONGS_CSV).unwrap();
    let config = tmp.path().join("big.json");
    fs::write(&config, r#"{"card_size_mm": 250}"#).unwrap();
    let out = tmp.path().join("cards.html");

    let code = commands::render::run(
        Some(&path_str(&entries)),
        Some(&path_str(&config)),
        &path_str(&out),
        Some(1),
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!out.exists());
}

#[test]
fn test_preview_out_of_range_index() {
    let tmp = tempfile::tempdir().unwrap();
    let entries = tmp.path().join("songs.csv");
    fs::write(&entries, SONGS_CSV).unwrap();
    let out = tmp.path().join("preview.html");

    let err = commands::preview::run(Some(&path_str(&entries)), 3, None, &path_str(&out), Some(1))
        .unwrap_err();
    assert!(err.to_string().contains("no entry at index 3"));

    let code = commands::preview::run(Some(&path_str(&entries)), 1, None, &path_str(&out), Some(1))
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(fs::read_to_string(&out).unwrap().contains("99 Luftballons"));
}

#[test]
fn test_groove_batch_uses_derived_seeds() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("groove.svg");

    commands::groove::run(None, &path_str(&out), Some(5), 2).unwrap();
    let first = fs::read_to_string(tmp.path().join("groove-0.svg")).unwrap();
    let second = fs::read_to_string(tmp.path().join("groove-1.svg")).unwrap();
    assert!(first.starts_with("<svg"));
    assert_eq!(first.matches("<circle").count(), 12);
    assert_ne!(first, second);
}

#[test]
fn test_defaults_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("defaults.json");
    commands::defaults::run(Some(&path_str(&out))).unwrap();

    let json = fs::read_to_string(&out).unwrap();
    let config = vinylcards_spec::LayoutConfig::from_json_str(&json).unwrap();
    assert_eq!(config, vinylcards_spec::LayoutConfig::default());
}
