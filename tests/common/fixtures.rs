//! Configuration and project-tree fixtures.

use std::fs;
use std::path::Path;

use batchship::config::{parse_with_warnings, validate, DeployConfig};

/// Documentation-range hosts so nothing is ever reachable by accident
pub const PRIMARY_HOST: &str = "203.0.113.10";
pub const BACKUP_HOST: &str = "203.0.113.20";

/// Two targets, three batches, one health check
pub const SAMPLE_CONFIG: &str = r#"
[project]
remote_base = "/opt/test_project"
default_target = "primary"

[connection]
connect_timeout_secs = 2
handshake_timeout_secs = 3

[targets.primary]
hostname = "203.0.113.10"
username = "deploy"
key_path = "keys/id_ed25519"
description = "Primary test host"

[targets.backup]
hostname = "203.0.113.20"
port = 2222
username = "deploy"
password_env = "BATCHSHIP_TEST_BACKUP_PASSWORD"

[[batches]]
name = "test_code"
display_name = "Test code"
artifacts = ["tests", "run_tests.py", "pytest.ini"]

[[batches]]
name = "env_package"
display_name = "Environment package"
artifacts = ["test_env.tar.gz"]

[[batches]]
name = "scripts"
display_name = "Scripts"
artifacts = ["scripts/deploy_and_test.sh"]

[[health.checks]]
name = "Python runtime"
command = "python3 --version"

[[health.checks]]
name = "Project directory"
command = "ls -la {remote_base}"
"#;

/// Project tree with every artifact except `test_env.tar.gz`
pub fn write_project(root: &Path) {
    write(root, "tests/test_login.py", "def test_login():\n    assert True\n");
    write(root, "tests/test_logout.py", "def test_logout():\n    assert True\n");
    write(root, "tests/conftest.py", "import pytest\n");
    write(root, "run_tests.py", "import pytest\npytest.main()\n");
    write(root, "pytest.ini", "[pytest]\naddopts = -q\n");
    write(root, "scripts/deploy_and_test.sh", "#!/bin/sh\npython3 run_tests.py\n");
    write(root, "keys/id_ed25519", "not a real key\n");
}

/// Add the environment archive so every batch is complete
pub fn write_env_package(root: &Path) {
    write(root, "test_env.tar.gz", "fake archive contents\n");
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directories");
    }
    fs::write(&path, content).expect("write fixture file");
}

/// Parse and validate `text` as if it lived in `root`
pub fn config_in(root: &Path, text: &str) -> DeployConfig {
    let (file, warnings) =
        parse_with_warnings(text, &root.join("batchship.toml")).expect("fixture config parses");
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    validate(file, root).expect("fixture config validates")
}
