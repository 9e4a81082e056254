use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn db(&self) -> String {
        self.dir.path().join("basket.db").to_str().unwrap().to_string()
    }

    fn basket(&self) -> Command {
        let mut cmd = Command::cargo_bin("basket").unwrap();
        // Keep the user's own config out of the tests.
        let home: &Path = self.dir.path();
        cmd.env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env_remove("BASKET_DB")
            .env_remove("RUST_LOG")
            .args(["--db", &self.db()]);
        cmd
    }

    fn run(&self, args: &[&str]) -> Value {
        let output = self
            .basket()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_json_output(&String::from_utf8_lossy(&output))
    }

    fn run_failure(&self, args: &[&str]) -> Value {
        let output = self
            .basket()
            .args(args)
            .assert()
            .failure()
            .code(1)
            .get_output()
            .stderr
            .clone();
        parse_json_output(&String::from_utf8_lossy(&output))
    }

    fn create(&self, name: &str, items: &str) -> String {
        let json = self.run(&["list", "create", "--name", name, "--items", items]);
        extract_id(&json)
    }
}

fn parse_json_output(output: &str) -> Value {
    let line = output
        .lines()
        .find(|line| line.starts_with('{'))
        .expect("No JSON line in output");
    serde_json::from_str(line).expect("Failed to parse JSON output")
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_i64().unwrap().to_string()
}

mod list_tests {
    use super::*;

    #[test]
    fn test_fresh_database_has_default_list() {
        let ws = Workspace::new();
        let json = ws.run(&["list", "all"]);

        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["name"], "Liste par défaut");
        assert_eq!(json["data"]["items"][0]["item_count"], 0);
    }

    #[test]
    fn test_create_normalizes_items() {
        let ws = Workspace::new();
        let json = ws.run(&[
            "list",
            "create",
            "--name",
            "Courses",
            "--items",
            "pain,  lait ,, œufs",
        ]);

        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["name"], "Courses");
        assert_eq!(json["data"]["items"], "Pain, Lait, Œufs");
        assert_eq!(json["data"]["item_count"], 3);
        assert_eq!(json["data"]["is_temporary"], false);
        assert!(json["data"]["last_performed_at"].is_null());
    }

    #[test]
    fn test_create_temporary() {
        let ws = Workspace::new();
        let json = ws.run(&["list", "create", "--name", "Apero", "--temporary"]);
        assert_eq!(json["data"]["is_temporary"], true);
        assert_eq!(json["data"]["items"], "");
    }

    #[test]
    fn test_create_duplicate_name_any_case() {
        let ws = Workspace::new();
        ws.create("Courses", "Pain");

        let json = ws.run_failure(&["list", "create", "--name", "COURSES"]);
        assert!(!json["success"].as_bool().unwrap());
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("already taken"));
    }

    #[test]
    fn test_create_rejects_short_name() {
        let ws = Workspace::new();
        let json = ws.run_failure(&["list", "create", "--name", "ab"]);
        assert!(json["error"].as_str().unwrap().contains("Validation"));
    }

    #[test]
    fn test_create_rejects_invalid_items() {
        let ws = Workspace::new();
        ws.run_failure(&["list", "create", "--name", "Courses", "--items", "Pain; Lait"]);

        let json = ws.run(&["list", "all"]);
        assert_eq!(json["data"]["count"], 1);
    }

    #[test]
    fn test_get() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait");

        let json = ws.run(&["list", "get", "--id", &id]);
        assert_eq!(json["data"]["name"], "Courses");
        assert_eq!(json["data"]["item_names"][1], "Lait");
    }

    #[test]
    fn test_get_missing() {
        let ws = Workspace::new();
        let json = ws.run_failure(&["list", "get", "--id", "404"]);
        assert!(json["error"].as_str().unwrap().contains("List not found"));
    }

    #[test]
    fn test_rename() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain");
        ws.create("Marche", "Pommes");

        let json = ws.run(&["list", "rename", "--id", &id, "--name", "Courses du samedi"]);
        assert_eq!(json["data"]["name"], "Courses du samedi");

        ws.run_failure(&["list", "rename", "--id", &id, "--name", "marche"]);
    }

    #[test]
    fn test_set_items() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain");

        let json = ws.run(&["list", "set-items", "--id", &id, "--items", "beurre, confiture"]);
        assert_eq!(json["data"]["items"], "Beurre, Confiture");

        let json = ws.run(&["list", "set-items", "--id", &id, "--items", ""]);
        assert_eq!(json["data"]["item_count"], 0);
    }

    #[test]
    fn test_perform() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain");

        let json = ws.run(&["list", "perform", "--id", &id]);
        assert!(json["data"]["last_performed_at"].is_string());
        assert_eq!(json["data"]["items"], "Pain");
    }

    #[test]
    fn test_delete() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain");

        let json = ws.run(&["list", "delete", "--id", &id]);
        assert_eq!(json["data"]["deleted"].as_i64().unwrap().to_string(), id);

        ws.run_failure(&["list", "get", "--id", &id]);
        ws.run_failure(&["list", "delete", "--id", &id]);
    }

    #[test]
    fn test_recent_lists_most_recent_first() {
        let ws = Workspace::new();
        let courses = ws.create("Courses", "Pain");
        let marche = ws.create("Marche", "Pommes");
        ws.create("Pharmacie", "Savon");

        ws.run(&["list", "perform", "--id", &courses]);
        ws.run(&["list", "perform", "--id", &marche]);

        let json = ws.run(&["list", "recent"]);
        assert_eq!(json["data"]["count"], 2);
        assert_eq!(json["data"]["items"][0]["name"], "Marche");
        assert_eq!(json["data"]["items"][1]["name"], "Courses");

        let json = ws.run(&["list", "recent", "--limit", "10"]);
        assert_eq!(json["data"]["count"], 4);
    }

    #[test]
    fn test_invalid_id_is_usage_error() {
        let ws = Workspace::new();
        ws.basket()
            .args(["list", "get", "--id", "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }
}

mod shop_tests {
    use super::*;

    #[test]
    fn test_show() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait, Œufs");

        let json = ws.run(&["shop", "show", "--id", &id]);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["id"], 2);
        assert_eq!(items[2]["name"], "Œufs");
        assert_eq!(items[0]["completed"], false);
        assert_eq!(json["data"]["progress"]["total"], 3);
        assert_eq!(json["data"]["progress"]["completed"], 0);
    }

    #[test]
    fn test_save_drops_checked_items() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait, Œufs");

        let json = ws.run(&["shop", "save", "--id", &id, "--check", "lait"]);
        assert_eq!(json["data"]["items_raw"], "Pain, Œufs");
        assert_eq!(json["data"]["purchased"][0], "Lait");
        assert_eq!(json["data"]["saved"], true);

        let json = ws.run(&["list", "get", "--id", &id]);
        assert_eq!(json["data"]["items"], "Pain, Œufs");
        assert!(json["data"]["last_performed_at"].is_string());
    }

    #[test]
    fn test_save_by_index() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait, Œufs");

        let json = ws.run(&["shop", "save", "--id", &id, "--check-index", "0", "--check-index", "2"]);
        assert_eq!(json["data"]["items_raw"], "Lait");
    }

    #[test]
    fn test_save_all_empties_list() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait");

        let json = ws.run(&["shop", "save", "--id", &id, "--all"]);
        assert_eq!(json["data"]["items_raw"], "");

        let json = ws.run(&["list", "get", "--id", &id]);
        assert_eq!(json["data"]["item_count"], 0);
    }

    #[test]
    fn test_save_all_with_named_check() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait");

        let json = ws.run(&["shop", "save", "--id", &id, "--all", "--check", "Pain"]);
        assert_eq!(json["data"]["items_raw"], "");
        assert_eq!(json["data"]["purchased"][0], "Pain");
    }

    #[test]
    fn test_dry_run_does_not_save() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain, Lait");

        let json = ws.run(&["shop", "save", "--id", &id, "--check", "Pain", "--dry-run"]);
        assert_eq!(json["data"]["items_raw"], "Lait");
        assert_eq!(json["data"]["saved"], false);

        let json = ws.run(&["list", "get", "--id", &id]);
        assert_eq!(json["data"]["items"], "Pain, Lait");
        assert!(json["data"]["last_performed_at"].is_null());
    }

    #[test]
    fn test_temporary_list_requires_every_item() {
        let ws = Workspace::new();
        let json = ws.run(&[
            "list",
            "create",
            "--name",
            "Apero",
            "--items",
            "chips, olives",
            "--temporary",
        ]);
        let id = extract_id(&json);

        let json = ws.run_failure(&["shop", "save", "--id", &id, "--check", "chips"]);
        assert!(json["error"].as_str().unwrap().contains("temporary"));

        let json = ws.run(&["list", "get", "--id", &id]);
        assert_eq!(json["data"]["items"], "Chips, Olives");

        let json = ws.run(&["shop", "save", "--id", &id, "--all"]);
        assert_eq!(json["data"]["items_raw"], "");
    }

    #[test]
    fn test_check_unknown_item() {
        let ws = Workspace::new();
        let id = ws.create("Courses", "Pain");

        let json = ws.run_failure(&["shop", "save", "--id", &id, "--check", "Beurre"]);
        assert!(json["error"].as_str().unwrap().contains("Not found"));
    }
}

mod misc_tests {
    use super::*;

    #[test]
    fn test_completions() {
        Command::cargo_bin("basket")
            .unwrap()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("basket"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_seeding_disabled_by_config() {
        let ws = Workspace::new();
        let config_dir = ws.dir.path().join("config").join("basket");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "seed_default_list = false\n").unwrap();

        let json = ws.run(&["list", "all"]);
        assert_eq!(json["data"]["count"], 0);
    }
}
