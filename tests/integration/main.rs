//! Integration tests for propnet-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    const DESCRIPTION: &str = "\
; two cells
(role white)
(init (cell 1 b))
(<= (legal white noop) (true (cell 1 b)))
";

    // a, b -> and -> c
    const NETWORK: &str = r#"{
        "roles": ["white"],
        "graph": {
            "nodes": [{"proposition": "a"}, {"proposition": "b"}, "and", {"proposition": "c"}],
            "node_holes": [],
            "edge_property": "directed",
            "edges": [[0, 2, null], [1, 2, null], [2, 3, null]]
        }
    }"#;

    // a -> or -> (and, and)
    const FAN_OUT_NETWORK: &str = r#"{
        "roles": ["white"],
        "graph": {
            "nodes": [{"proposition": "a"}, "or", "and", "and"],
            "node_holes": [],
            "edge_property": "directed",
            "edges": [[0, 1, null], [1, 2, null], [1, 3, null]]
        }
    }"#;

    /// Command isolated from the user's config and cache
    fn propnet(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("propnet-cache");
        cmd.env("PROPNET_CACHE_CONFIG", temp.path().join("config.toml"))
            .env("PROPNET_CACHE_DIR", temp.path().join("cache"))
            .env("CI", "true");
        cmd
    }

    fn write(temp: &TempDir, name: &str, content: &str) -> String {
        let path = temp.path().join(name);
        std::fs::write(&path, content).unwrap();
        path_str(&path)
    }

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("propositional networks"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("propnet-cache"));
    }

    #[test]
    fn key_plain_is_entry_file_name() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);

        propnet(&temp)
            .args(["key", &description, "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("propnet_"))
            .stdout(predicate::str::contains(".net"));
    }

    #[test]
    fn key_ignores_comments_and_layout() {
        let temp = TempDir::new().unwrap();
        let first = write(&temp, "a.kif", DESCRIPTION);
        let second = write(
            &temp,
            "b.kif",
            "(role   white)\n\n(init (cell 1 b))\n(<= (legal white noop)\n    (true (cell 1 b)))",
        );

        let out_a = propnet(&temp)
            .args(["key", &first, "--format", "plain"])
            .output()
            .unwrap();
        let out_b = propnet(&temp)
            .args(["key", &second, "--format", "plain"])
            .output()
            .unwrap();

        assert!(out_a.status.success());
        assert_eq!(out_a.stdout, out_b.stdout);
    }

    #[test]
    fn key_separates_statements() {
        let temp = TempDir::new().unwrap();
        let split = write(&temp, "split.kif", "a b");
        let joined = write(&temp, "joined.kif", "ab");

        let out_split = propnet(&temp)
            .args(["key", &split, "--format", "plain"])
            .output()
            .unwrap();
        let out_joined = propnet(&temp)
            .args(["key", &joined, "--format", "plain"])
            .output()
            .unwrap();

        assert!(out_split.status.success());
        assert_ne!(out_split.stdout, out_joined.stdout);
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);
        let network = write(&temp, "net.json", NETWORK);
        let output = temp.path().join("loaded.json");

        propnet(&temp)
            .args(["save", &description, &network])
            .assert()
            .success();

        propnet(&temp)
            .args(["load", &description, "--format", "plain"])
            .args(["--output", &path_str(&output)])
            .assert()
            .success()
            .stdout(predicate::str::contains("4 3"));

        let loaded = std::fs::read_to_string(&output).unwrap();
        assert!(loaded.contains("\"white\""));
    }

    #[test]
    fn load_without_entry_is_miss() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);

        propnet(&temp)
            .args(["load", &description])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cache miss"));
    }

    #[test]
    fn load_with_other_description_is_miss() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);
        let other = write(&temp, "other.kif", "(role black)");
        let network = write(&temp, "net.json", NETWORK);

        propnet(&temp)
            .args(["save", &description, &network])
            .assert()
            .success();

        propnet(&temp)
            .args(["load", &other])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cache miss"));
    }

    #[test]
    fn verify_reports_fan_out() {
        let temp = TempDir::new().unwrap();
        let network = write(&temp, "net.json", FAN_OUT_NETWORK);

        propnet(&temp)
            .args(["verify", &network])
            .assert()
            .failure()
            .stderr(predicate::str::contains("2 edges violate"));
    }

    #[test]
    fn verify_accepts_single_consumer() {
        let temp = TempDir::new().unwrap();
        let network = write(&temp, "net.json", NETWORK);

        propnet(&temp)
            .args(["verify", &network])
            .assert()
            .success()
            .stdout(predicate::str::contains("No unbuffered gate edges"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries"));
    }

    #[test]
    fn list_and_clear_entries() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);
        let network = write(&temp, "net.json", NETWORK);

        propnet(&temp)
            .args(["save", &description, &network])
            .assert()
            .success();

        propnet(&temp)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("propnet_"));

        propnet(&temp)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared 1"));

        propnet(&temp)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries"));
    }

    #[test]
    fn clear_without_yes_keeps_entries() {
        let temp = TempDir::new().unwrap();
        let description = write(&temp, "game.kif", DESCRIPTION);
        let network = write(&temp, "net.json", NETWORK);

        propnet(&temp)
            .args(["save", &description, &network])
            .assert()
            .success();

        propnet(&temp)
            .arg("clear")
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing removed"));

        propnet(&temp)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("propnet_"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .args(["config", "set", "normalize.buffer_policy", "every-edge"])
            .assert()
            .success();

        propnet(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("every-edge"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure();
    }

    #[test]
    fn completions_bash() {
        let temp = TempDir::new().unwrap();
        propnet(&temp)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("propnet-cache"));
    }
}
