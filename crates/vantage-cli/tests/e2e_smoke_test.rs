use std::fs;

use tempfile::tempdir;

use vantage::{VantageError, View};
use vantage_cli::{Args, run};

fn args(view: &str, output: String, format: &str) -> Args {
    Args {
        view: Some(view.to_string()),
        output: Some(output),
        format: format.to_string(),
        config: None,
        seed: None,
        iterations: None,
        list: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_every_view() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut failed_views = Vec::new();

    for view in View::ALL {
        for format in ["svg", "json"] {
            let output_path = temp_dir.path().join(format!("{}.{format}", view.slug()));
            let args = args(view.slug(), output_path.to_string_lossy().to_string(), format);

            match run(&args) {
                Ok(()) => {
                    let content = fs::read_to_string(&output_path).unwrap();
                    assert!(!content.is_empty(), "{} produced an empty file", view.slug());
                }
                Err(e) => failed_views.push((view, format, e)),
            }
        }
    }

    if !failed_views.is_empty() {
        for (view, format, err) in &failed_views {
            eprintln!("  - {} ({format}): {err}", view.slug());
        }
        panic!("{} view(s) failed unexpectedly", failed_views.len());
    }
}

#[test]
fn e2e_unknown_view_fails() {
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("out.svg");
    let result = run(&args(
        "org-chart",
        output_path.to_string_lossy().to_string(),
        "svg",
    ));

    assert!(matches!(result, Err(VantageError::UnknownView(_))));
    assert!(!output_path.exists(), "no file is written on failure");
}

#[test]
fn e2e_unsupported_format_fails() {
    let temp_dir = tempdir().unwrap();
    let output_path = temp_dir.path().join("out.png");
    let result = run(&args(
        "funding-mix",
        output_path.to_string_lossy().to_string(),
        "png",
    ));
    assert!(matches!(result, Err(VantageError::Export(_))));
}

#[test]
fn e2e_seed_override_changes_network_output() {
    let temp_dir = tempdir().unwrap();
    let render = |seed: u64| {
        let output_path = temp_dir.path().join(format!("ecosystem-{seed}.json"));
        let mut args = args(
            "partnership-ecosystem",
            output_path.to_string_lossy().to_string(),
            "json",
        );
        args.seed = Some(seed);
        run(&args).unwrap();
        fs::read_to_string(output_path).unwrap()
    };

    assert_eq!(render(42), render(42));
    assert_ne!(render(42), render(43));
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[style]\nwidth = 1024\nheight = 768\nbackground_color = \"white\"\n",
    )
    .unwrap();
    let output_path = temp_dir.path().join("timeline.svg");

    let mut args = args(
        "implementation-timeline",
        output_path.to_string_lossy().to_string(),
        "svg",
    );
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).unwrap();

    let svg = fs::read_to_string(output_path).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 1024 768""#));
}
