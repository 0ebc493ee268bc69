fn run(args: &[&str]) -> std::process::Output {
    let bin = assert_cmd::cargo::cargo_bin!("coursedocs");
    std::process::Command::new(bin)
        .args(args)
        // Hermetic: never pick up a real endpoint from the environment.
        .env_remove("COURSEDOCS_ENDPOINT")
        .output()
        .expect("run coursedocs")
}

#[test]
fn resolve_hit_returns_mapping_and_preview_url() {
    let out = run(&["resolve", "--topic", "Mechanics", "--category", "theory"]);
    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse resolve json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["source"].as_str(), Some("static"));
    assert_eq!(v["found"].as_bool(), Some(true));
    assert_eq!(v["request"]["topic"].as_str(), Some("Mechanics"));
    assert_eq!(v["mapping"]["topic"].as_str(), Some("Mechanics"));
    assert_eq!(v["mapping"]["category"].as_str(), Some("theory"));
    // The share link normalizes into the embeddable preview form.
    assert_eq!(
        v["preview_url"].as_str(),
        Some("https://drive.google.com/file/d/12atHLqxiyCqhhr_QTyOmSDVUpo1nTBaj/preview"),
    );
}

#[test]
fn resolve_miss_is_ok_with_found_false() {
    let out = run(&["resolve", "--topic", "Unknown Topic", "--category", "theory"]);
    assert!(out.status.success(), "absence is not an error");
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse resolve json");

    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["found"].as_bool(), Some(false));
    assert!(v.get("mapping").is_none());
    assert!(v.get("preview_url").is_none());
}

#[test]
fn resolve_is_category_sensitive() {
    // "Mechanics" exists only under theory in the seed set.
    let out = run(&["resolve", "--topic", "Mechanics", "--category", "practical"]);
    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse resolve json");
    assert_eq!(v["found"].as_bool(), Some(false));
}

#[test]
fn unknown_source_is_invalid_params() {
    let out = run(&[
        "resolve",
        "--source",
        "nope",
        "--topic",
        "Mechanics",
        "--category",
        "theory",
    ]);
    assert!(!out.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse error json");
    assert_eq!(v["ok"].as_bool(), Some(false));
    assert_eq!(v["error"]["code"].as_str(), Some("invalid_params"));
}

#[test]
fn remote_source_without_endpoint_is_not_configured() {
    let out = run(&[
        "resolve",
        "--source",
        "remote",
        "--topic",
        "Mechanics",
        "--category",
        "theory",
    ]);
    assert!(!out.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse error json");
    assert_eq!(v["ok"].as_bool(), Some(false));
    assert_eq!(v["error"]["code"].as_str(), Some("not_configured"));
}
