#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn pathfix_cmd(home: &Path) -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("pathfix").unwrap();
	cmd.env("HOME", home);
	cmd
}

fn public_dir(root: &Path) -> std::path::PathBuf {
	let dir = root.join("frontend").join("public");
	fs::create_dir_all(&dir).unwrap();
	dir
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	pathfix_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("normalizing CSS/JS asset paths"));
}

#[test]
fn test_help_documents_config_loading_with_root() {
	let temp_dir = tempfile::tempdir().unwrap();
	pathfix_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"an invalid config aborts the scan even with --root",
		));
}

#[test]
fn test_version_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	pathfix_cmd(temp_dir.path())
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("pathfix"));
}

// ============================================================================
// Scan tests
// ============================================================================

#[test]
fn test_missing_root_fails_without_scanning() {
	let temp_dir = tempfile::tempdir().unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Error: Directory not found"))
		.stdout(predicate::str::contains("Scanning").not());
}

#[test]
fn test_default_root_scenario() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	fs::write(
		public.join("index.html"),
		"<link href=\"css/app.css\">\n<script src=\"js/main.js\"></script>\n",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Scanning for HTML files in:"))
		.stdout(predicate::str::contains("Fixed: index.html"))
		.stdout(predicate::str::contains("Path correction complete."));

	assert_eq!(
		fs::read_to_string(public.join("index.html")).unwrap(),
		"<link href=\"/css/app.css\">\n<script src=\"/js/main.js\"></script>\n"
	);
}

#[test]
fn test_already_fixed_file_not_reported() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	fs::write(public.join("index.html"), "<link href=\"/css/style.css\">").unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed").not());
}

#[test]
fn test_second_run_is_noop() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	fs::write(
		public.join("page.html"),
		"<script>window.FRONTEND_ROOT = '../'; window.COMPONENT_ROOT = '../components/';</script>",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: page.html"));

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed").not());

	assert_eq!(
		fs::read_to_string(public.join("page.html")).unwrap(),
		"<script>window.FRONTEND_ROOT = \"/\"; window.COMPONENT_ROOT = \"/components/\";</script>"
	);
}

#[test]
fn test_explicit_root_argument() {
	let temp_dir = tempfile::tempdir().unwrap();
	let site = temp_dir.path().join("site");
	fs::create_dir_all(site.join("blog")).unwrap();
	fs::write(site.join("blog").join("post.HTML"), "<link href='../x/y.css'>").unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.args(["--root", "site"])
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: blog"));

	assert_eq!(
		fs::read_to_string(site.join("blog").join("post.HTML")).unwrap(),
		"<link href='/css/y.css'>"
	);
}

#[test]
fn test_dry_run_does_not_write() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	let original = "<script src=\"lib/app.js\"></script>";
	fs::write(public.join("index.html"), original).unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicate::str::contains("Would fix: index.html"));

	assert_eq!(
		fs::read_to_string(public.join("index.html")).unwrap(),
		original
	);
}

#[test]
fn test_unreadable_file_reported_and_scan_continues() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	fs::write(public.join("a.html"), "<link href=\"one.css\">").unwrap();
	fs::write(public.join("b.html"), [0xff, 0xfe, 0xfd]).unwrap();
	fs::write(public.join("c.html"), "<script src=\"three.js\"></script>").unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: a.html"))
		.stdout(predicate::str::contains("Fixed: c.html"))
		.stderr(predicate::str::contains("Error processing"))
		.stderr(predicate::str::contains("b.html"));

	assert_eq!(
		fs::read_to_string(public.join("c.html")).unwrap(),
		"<script src=\"/js/three.js\"></script>"
	);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_logged_as_warning() {
	use std::os::unix::fs::PermissionsExt;

	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	let locked = public.join("private");
	fs::create_dir_all(&locked).unwrap();
	fs::write(public.join("index.html"), "<link href=\"a.css\">").unwrap();
	fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

	// Permission bits do not stop root.
	if fs::read_dir(&locked).is_ok() {
		fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
		return;
	}

	let assert = pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert();
	fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

	assert
		.success()
		.stdout(predicate::str::contains("Fixed: index.html"))
		.stderr(predicate::str::contains("WARN"))
		.stderr(predicate::str::contains("skipping unreadable entry"))
		.stderr(predicate::str::contains("Error processing"));
}

#[test]
fn test_config_public_dir_and_prefixes() {
	let temp_dir = tempfile::tempdir().unwrap();
	let www = temp_dir.path().join("www");
	fs::create_dir_all(&www).unwrap();
	fs::write(www.join("index.html"), "<link href=\"a/b.css\">").unwrap();
	fs::write(
		temp_dir.path().join(".pathfix.toml"),
		r#"
root = true
public-dir = "www"
css-prefix = "/static/css/"
"#,
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Fixed: index.html"));

	assert_eq!(
		fs::read_to_string(www.join("index.html")).unwrap(),
		"<link href=\"/static/css/b.css\">"
	);
}

#[test]
fn test_invalid_config_aborts_scan() {
	let temp_dir = tempfile::tempdir().unwrap();
	let public = public_dir(temp_dir.path());
	let original = "<link href=\"a.css\">";
	fs::write(public.join("index.html"), original).unwrap();
	fs::write(
		temp_dir.path().join(".pathfix.toml"),
		"root = true\ncss-prefix = \"css\"\n",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("css-prefix"));

	assert_eq!(
		fs::read_to_string(public.join("index.html")).unwrap(),
		original
	);
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".pathfix.toml");

	pathfix_cmd(temp_dir.path())
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .pathfix.toml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("css-prefix = \"/css/\""));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".pathfix.toml"), "# existing").unwrap();

	pathfix_cmd(temp_dir.path())
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".pathfix.toml");
	fs::write(&config_path, "# existing").unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["--init", "--force"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".pathfix.toml"),
		"root = true\njs-prefix = \"/assets/js/\"\n",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_invalid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".pathfix.toml"), "invalid toml [[[").unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_show_displays_effective_settings() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".pathfix.toml"),
		"root = true\ncomponent-root = \"/ui/\"\n",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["config", "show"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("component-root: /ui/"))
		.stdout(predicate::str::contains("css-prefix: /css/"));
}

#[test]
fn test_explicit_config_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join("custom.toml"),
		"frontend-root = \"/spa/\"\n",
	)
	.unwrap();

	pathfix_cmd(temp_dir.path())
		.args(["config", "show", "--config", "custom.toml"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("custom.toml"))
		.stdout(predicate::str::contains("frontend-root: /spa/"));
}
