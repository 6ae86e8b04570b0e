use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_inputs(dir: &Path) -> (String, String) {
    let frames = dir.join("frames.json");
    let sequence = dir.join("sequence.json");
    std::fs::write(
        &frames,
        r##"[
  [{"Color": "#ff3366", "Geometry": "M0,0 H40 V40 H0 Z"}, {"Color": "", "Geometry": "M0,0"}],
  [{"Color": "#3366ff", "Geometry": "F1 M10,10 H30 V30 H10 Z"}]
]"##,
    )
    .unwrap();
    std::fs::write(&sequence, "[[0, 1, 0], [1, 1]]").unwrap();
    (
        frames.to_string_lossy().to_string(),
        sequence.to_string_lossy().to_string(),
    )
}

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_spriteclock"))
}

#[test]
fn cli_frame_writes_png() {
    let dir = fixture_dir("cli_frame");
    let (frames, sequence) = write_inputs(&dir);
    let out = dir.join("out.png");
    let _ = std::fs::remove_file(&out);

    let status = bin()
        .args(["frame", "--frames", &frames, "--sequence", &sequence])
        .args(["--at-ms", "300", "--width", "64", "--height", "48", "--time", "0930"])
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn cli_strip_writes_numbered_frames() {
    let dir = fixture_dir("cli_strip");
    let (frames, sequence) = write_inputs(&dir);
    let out_dir = dir.join("strip");
    let _ = std::fs::remove_dir_all(&out_dir);

    let status = bin()
        .args(["strip", "--frames", &frames, "--sequence", &sequence])
        .args(["--fps", "10", "--duration-ms", "500", "--width", "32", "--height", "32"])
        .args(["--time", "2359"])
        .arg("--out-dir")
        .arg(&out_dir)
        .status()
        .unwrap();
    assert!(status.success());

    for i in 0..5 {
        assert!(out_dir.join(format!("frame_{i:05}.png")).is_file());
    }
    assert!(!out_dir.join("frame_00005.png").exists());
}

#[test]
fn cli_strip_rejects_overflowing_length() {
    let dir = fixture_dir("cli_strip_overflow");
    let (frames, sequence) = write_inputs(&dir);
    let out_dir = dir.join("strip");

    let output = bin()
        .args(["strip", "--frames", &frames, "--sequence", &sequence])
        .args(["--fps", "1000", "--duration-ms", &u64::MAX.to_string()])
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("overflows"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}

#[test]
fn cli_inspect_summarizes_tracks() {
    let dir = fixture_dir("cli_inspect");
    let (frames, sequence) = write_inputs(&dir);

    let output = bin()
        .args(["inspect", "--frames", &frames, "--sequence", &sequence])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("frames: 2 (2 layers)"), "{stdout}");
    assert!(stdout.contains("base: 3 entries, every 150 ms"), "{stdout}");
    assert!(stdout.contains("then holds frame 0"), "{stdout}");
    assert!(stdout.contains("overlay: 2 entries, every 110 ms, stops after 2 ticks (220 ms)"), "{stdout}");
}

#[test]
fn cli_rejects_bad_sequence_data() {
    let dir = fixture_dir("cli_bad");
    let (frames, _) = write_inputs(&dir);
    let bad = dir.join("bad_sequence.json");
    std::fs::write(&bad, "[[0, 7]]").unwrap();

    let output = bin()
        .args(["inspect", "--frames", &frames, "--sequence"])
        .arg(&bad)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("references frame 7"), "{stderr}");
}
