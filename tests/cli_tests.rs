use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn anniversary_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("anniversary"))
}

/// Initialized config dir inside a fresh temp dir
fn init(temp_dir: &TempDir) -> String {
    let config_path = temp_dir.path().join("anniversary-config");
    let config = config_path.to_str().unwrap().to_string();

    anniversary_cmd()
        .args(["-C", &config, "init"])
        .assert()
        .success();

    config
}

fn add_wedding(config: &str) {
    anniversary_cmd()
        .args([
            "-C",
            config,
            "add",
            "--names",
            "A & B",
            "--date",
            "2024-06-02",
            "--type",
            "Wedding",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added \"Wedding\" anniversary for \"A & B\""));
}

fn write_data(config: &str, data: &str) {
    fs::write(Path::new(config).join("anniversary.json"), data).unwrap();
}

fn read_data(config: &str) -> String {
    fs::read_to_string(Path::new(config).join("anniversary.json")).unwrap()
}

#[test]
fn test_help() {
    anniversary_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Minimal terminal anniversary minder"));
}

#[test]
fn test_version() {
    anniversary_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("anniversary"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("anniversary-config");

    anniversary_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized anniversary config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("anniversary_schema.json").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    anniversary_cmd()
        .args(["-C", &config, "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_list_without_schema_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    anniversary_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unable to read the schema file"));
}

#[test]
fn test_list_creates_empty_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    anniversary_cmd()
        .args(["-C", &config, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no saved anniversaries"));

    assert_eq!(read_data(&config), "[]");
}

#[test]
fn test_add_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    add_wedding(&config);

    assert_eq!(
        read_data(&config),
        r#"[{"names":"A & B","anniversaryDate":"2024-06-02","anniversaryType":"Wedding"}]"#
    );

    anniversary_cmd()
        .args(["-C", &config, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAMES"))
        .stdout(predicate::str::contains("A & B"))
        .stdout(predicate::str::contains("2024-06-02"))
        .stdout(predicate::str::contains("Total: 1 anniversaries"));
}

#[test]
fn test_add_empty_names_reports_violations() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);
    let before = read_data(&config);

    anniversary_cmd()
        .args([
            "-C",
            &config,
            "add",
            "--names",
            "",
            "--date",
            "2024-01-01",
            "--type",
            "Birthday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation errors"))
        .stderr(predicate::str::contains("record #2 at '/names'"));

    assert_eq!(read_data(&config), before);
}

#[test]
fn test_add_invalid_date() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    anniversary_cmd()
        .args([
            "-C", &config, "add", "--names", "X", "--date", "2024-13-01", "--type", "Birthday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '2024-13-01'"));
}

#[test]
fn test_add_unknown_province_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    anniversary_cmd()
        .args([
            "-C",
            &config,
            "add",
            "--names",
            "X",
            "--date",
            "2001-09-09",
            "--type",
            "Birthday",
            "--province",
            "ZZ",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/address/province"));

    assert_eq!(read_data(&config), "[]");
}

#[test]
fn test_show_and_edit_keep_blank_fields() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    anniversary_cmd()
        .args([
            "-C",
            &config,
            "edit",
            "1",
            "--names",
            "",
            "--municipality",
            "Ottawa",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated #1"));

    anniversary_cmd()
        .args(["-C", &config, "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A & B"))
        .stdout(predicate::str::contains("Ottawa"));

    assert!(read_data(&config).contains(r#""address":{"municipality":"Ottawa"}"#));
}

#[test]
fn test_show_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    anniversary_cmd()
        .args(["-C", &config, "show", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    anniversary_cmd()
        .args(["-C", &config, "show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid anniversary number '0'"));
}

#[test]
fn test_delete_with_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    anniversary_cmd()
        .args(["-C", &config, "delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted"));

    anniversary_cmd()
        .args(["-C", &config, "delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted \"Wedding\" anniversary"));

    assert_eq!(read_data(&config), "[]");
}

#[test]
fn test_invalid_data_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    write_data(
        &config,
        r#"[{"names":"A","anniversaryDate":"2024-06-02"},{"names":"B","anniversaryDate":"someday","anniversaryType":"Birthday"}]"#,
    );

    anniversary_cmd()
        .args(["-C", &config, "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record #1"))
        .stderr(predicate::str::contains("record #2"));
}

#[test]
fn test_data_override_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    let other = temp_dir.path().join("other.json");

    anniversary_cmd()
        .args([
            "-C",
            &config,
            "--data",
            other.to_str().unwrap(),
            "add",
            "--names",
            "Solo",
            "--date",
            "1999-12-31",
            "--type",
            "Birthday",
        ])
        .assert()
        .success();

    assert!(fs::read_to_string(&other).unwrap().contains("Solo"));
    assert!(!Path::new(&config).join("anniversary.json").exists());
}

#[test]
fn test_upcoming_wide_window() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    anniversary_cmd()
        .args(["-C", &config, "upcoming", "--days", "366"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A & B"))
        .stdout(predicate::str::contains("YEARS"));
}

#[test]
fn test_menu_add_retries_until_valid() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);

    // First attempt has an empty name, second succeeds, then quit
    let blank_address = "\n\n\n\n";
    let input = format!(
        "n\n\nWedding\n\n2024-06-02\n\n\n{blank_address}\nA & B\nWedding\n\n2024-06-02\n\n\n{blank_address}x\n"
    );

    anniversary_cmd()
        .args(["-C", &config, "menu"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("validation errors"))
        .stdout(predicate::str::contains("A & B"));

    assert_eq!(
        read_data(&config),
        r#"[{"names":"A & B","anniversaryDate":"2024-06-02","anniversaryType":"Wedding"}]"#
    );
}

#[test]
fn test_menu_out_of_range_returns_to_listing() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    anniversary_cmd()
        .args(["-C", &config, "menu"])
        .write_stdin("7\n1\nd\ny\nx\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected Anniversary"));

    assert_eq!(read_data(&config), "[]");
}

/// Menu input that opens record #1 for editing, then quits after `fields`
fn menu_edit(fields: &[&str]) -> String {
    let mut input = String::from("1\ne\n");
    for field in fields {
        input.push_str(field);
        input.push('\n');
    }
    input.push_str("x\n");
    input
}

#[test]
fn test_menu_edit_blank_fields_keep_values() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);

    // names, type, description, date, email, phone, street, municipality, province, postal code
    let input = menu_edit(&["", "", "", "", "", "", "", "Ottawa", "", ""]);

    anniversary_cmd()
        .args(["-C", &config, "menu"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name(s) \"A & B\":"))
        .stdout(predicate::str::contains("Anniversary Date (yyyy-mm-dd) \"2024-06-02\":"));

    assert_eq!(
        read_data(&config),
        r#"[{"names":"A & B","anniversaryDate":"2024-06-02","anniversaryType":"Wedding","address":{"municipality":"Ottawa"}}]"#
    );
}

#[test]
fn test_menu_rejected_edit_asks_again() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);
    let before = read_data(&config);

    // Unknown province, Enter to acknowledge, then a second pass of blanks
    let mut fields = vec!["", "", "", "", "", "", "", "", "ZZ", "", ""];
    fields.extend([""; 10]);

    let output = anniversary_cmd()
        .args(["-C", &config, "menu"])
        .write_stdin(menu_edit(&fields))
        .assert()
        .success()
        .stdout(predicate::str::contains("validation errors"))
        .stdout(predicate::str::contains("/address/province"))
        .stdout(predicate::str::contains("Press Enter to make corrections"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("Edit Selected Anniversary").count(), 2);
    // The second pass still offers the stored values
    assert_eq!(stdout.matches("Province \"\"").count(), 2);
    assert_eq!(read_data(&config), before);
}

#[test]
fn test_menu_delete_declined_returns_to_record() {
    let temp_dir = TempDir::new().unwrap();
    let config = init(&temp_dir);
    add_wedding(&config);
    let before = read_data(&config);

    let output = anniversary_cmd()
        .args(["-C", &config, "menu"])
        .write_stdin("1\nd\nn\nm\nx\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Delete \"Wedding\" anniversary for \"A & B\"? (Y/N): ",
        ))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("ANNIVERSARY MINDER ~ Selected Anniversary").count(), 2);
    assert_eq!(read_data(&config), before);
}
