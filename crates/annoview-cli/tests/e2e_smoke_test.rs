use std::{fs, path::PathBuf};

use tempfile::tempdir;

use annoview::view::ViewKind;
use annoview_cli::{Args, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: PathBuf, output_dir: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        dump_document: false,
    }
}

#[test]
fn e2e_smoke_test_complete_models() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for (file, model) in [
        ("tube_flow.mo", "DefaultModel"),
        ("forked_tube.mo", "ForkedTubeFlow"),
    ] {
        let report = run(&args(demos_dir().join(file), temp_dir.path().to_path_buf()))
            .unwrap_or_else(|err| panic!("{file} failed: {err}"));

        assert!(report.is_success(), "{file}: {:?}", report.failures);
        for view in ViewKind::ALL {
            let path = temp_dir
                .path()
                .join(format!("{model}_{}.svg", view.slug()));
            let svg = fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Missing output {}", path.display()));
            assert!(svg.starts_with("<svg"));
            assert!(svg.trim_end().ends_with("</svg>"));
        }
    }
}

#[test]
fn e2e_missing_diagram_writes_icon_only() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let report = run(&args(
        demos_dir().join("icon_only.mo"),
        temp_dir.path().join("out"),
    ))
    .expect("Run should complete");

    assert!(!report.is_success());
    assert_eq!(report.written.len(), 1);
    assert!(report.written[0].ends_with("Valve_icon.svg"));
    assert!(report.written[0].exists());

    let [(ViewKind::Diagram, err)] = report.failures.as_slice() else {
        panic!("Expected a Diagram failure, got {:?}", report.failures);
    };
    assert_eq!(err.to_string(), "no `annotation(Diagram(...));` block found");
    assert!(!temp_dir.path().join("out/Valve_diagram.svg").exists());
}

#[test]
fn e2e_missing_input_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let result = run(&args(
        temp_dir.path().join("absent.mo"),
        temp_dir.path().to_path_buf(),
    ));

    assert!(result.is_err());
}
