use std::process::{Command, Output};

fn run_headless(extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathfinder_sim"))
        .arg("--headless")
        .args(extra)
        .env("RUST_LOG", "warn,pathfinder_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&[]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that every built-in problem is played and solved
#[test]
fn test_all_problems_solved() {
    let output = run_headless(&["--print-every", "0"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    for header in ["Problem 1/3: diagonal", "Problem 2/3: barrier", "Problem 3/3: center"] {
        assert!(stdout.contains(header), "Missing '{}' in stdout", header);
    }
    assert!(stderr.contains("Problems solved: 3/3"), "stderr: {}", stderr);

    // 8 + 10 + 6 moves
    let moves_line = stderr
        .lines()
        .find(|line| line.contains("Total moves:"))
        .expect("Could not find 'Total moves' line");
    let moves: usize = moves_line
        .split("Total moves:")
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse move count");
    assert_eq!(moves, 24);
}

/// Test that frames are printed as text maps
#[test]
fn test_final_frames_printed() {
    let output = run_headless(&["--print-every", "0"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("| completed |").count(), 3);
    assert!(!stdout.contains("GAME OVER"));
}

/// Test that a custom catalog with an unreachable problem is reported, not fatal
#[test]
fn test_custom_catalog_with_unreachable_problem() {
    let path = std::env::temp_dir().join(format!("pathfinder_sim_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[[problems]]
name = "walled"
size = 3
start = [0, 0]
exit = [2, 2]
obstacles = [[0, 1], [1, 0], [1, 1]]

[[problems]]
name = "open"
size = 2
start = [0, 0]
exit = [1, 1]
"#,
    )
    .expect("write catalog");

    let catalog = path.to_string_lossy().to_string();
    let output = run_headless(&["--catalog", &catalog, "--print-every", "0"]);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success(), "Simulation failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("GAME OVER: exit is unreachable"));
    assert!(stderr.contains("Problems solved: 1/2"), "stderr: {}", stderr);
}

/// Test that a broken catalog is rejected before anything runs
#[test]
fn test_invalid_catalog_rejected() {
    let path = std::env::temp_dir().join(format!("pathfinder_sim_bad_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[[problems]]\nsize = 2\nstart = [0, 0]\nexit = [5, 5]\n",
    )
    .expect("write catalog");

    let catalog = path.to_string_lossy().to_string();
    let output = run_headless(&["--catalog", &catalog]);
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load catalog"), "stderr: {}", stderr);
}
