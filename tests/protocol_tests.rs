//! Scripted sessions against the text protocol loop.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use othello_rust::board::Player;
use othello_rust::protocol::ProtocolEngine;

fn run_script(engine: &mut ProtocolEngine, script: &str) -> String {
    let mut output = Vec::new();
    engine
        .run(Cursor::new(script.as_bytes()), &mut output)
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_responses_carry_ids() {
    let mut engine = ProtocolEngine::new();
    let output = run_script(&mut engine, "1 name\n2 protocol_version\nbogus\n");
    assert_eq!(
        output,
        "=1 othello-rust\n\n=2 2\n\n? unknown command: bogus\n\n"
    );
}

#[test]
fn test_comments_and_blank_lines_are_skipped() {
    let mut engine = ProtocolEngine::new();
    let output = run_script(&mut engine, "# setup\n\n   \nclear_board\n");
    assert_eq!(output, "= \n\n");
}

#[test]
fn test_quit_stops_reading() {
    let mut engine = ProtocolEngine::new();
    let output = run_script(&mut engine, "quit\nplay white e3\n");
    assert_eq!(output, "= \n\n");
    assert_eq!(engine.board().count(Player::White), 2);
}

#[test]
fn test_game_session() {
    let mut engine = ProtocolEngine::with_depth(1);
    let script = "\
play white e3
genmove black
score
valid_moves white
";
    let output = run_script(&mut engine, script);
    let responses: Vec<&str> = output.split("\n\n").filter(|r| !r.is_empty()).collect();
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0], "= ");
    assert!(responses[1].starts_with("= "));
    assert_eq!(responses[2], "= White 3 Black 3");
    assert!(responses[3].starts_with("= "));
    assert!(!responses[3].trim_start_matches("= ").is_empty());
}

#[test]
fn test_showboard() {
    let mut engine = ProtocolEngine::new();
    let output = run_script(&mut engine, "showboard\n");
    assert!(output.starts_with("= \n  a b c d e f g h\n"));
    assert!(output.contains("4 . . . O X . . .\n"));
}

#[test]
fn test_zero_depth_is_refused() {
    let mut engine = ProtocolEngine::with_depth(0);
    let output = run_script(&mut engine, "depth 0\ngenmove black\nvalid_moves black\n");
    assert_eq!(
        output,
        "? depth must be between 1 and 64\n\n= d3\n\n= f5 e6 f6\n\n"
    );
}
