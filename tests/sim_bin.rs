use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1", "2"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let winner = v["winner"].as_str().expect("game ended without a winner");
    assert!(winner == "player1" || winner == "player2");
    for player in ["player1", "player2"] {
        assert!(v[player]["shots"].as_u64().is_some());
    }
    let loser = if winner == "player1" { "player2" } else { "player1" };
    assert_eq!(v[winner]["outcome"], "Won");
    assert_eq!(v[loser]["outcome"], "Lost");
}
