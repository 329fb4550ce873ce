#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::WorkspaceRoots;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;

fn settings() -> Settings {
    Settings {
        mypy_command: "python3 -m mypy --strict".to_string(),
        env_mypy_path: "/global/stubs".to_string(),
        incremental_mode: true,
        incremental_cache_directory: "/var/cache/mypy-lint".to_string(),
        ..Settings::default()
    }
}

fn config_with(config_file: Option<&str>, template: &str) -> EffectiveConfig {
    let mut config = EffectiveConfig::from_settings(&Settings {
        incremental_cache_directory: template.to_string(),
        ..Settings::default()
    })
    .unwrap();
    config.config_file = config_file.map(PathBuf::from);
    config
}

#[test]
fn test_from_settings_splits_command() {
    let config = EffectiveConfig::from_settings(&settings()).unwrap();
    assert_eq!(config.executable(), "python3");
    assert_eq!(config.base_args(), ["-m", "mypy", "--strict"]);
    assert_eq!(config.extra_env_path, "/global/stubs");
    assert!(config.incremental);
    assert_eq!(config.config_file, None);
}

#[test]
fn test_from_settings_rejects_bad_command() {
    let bad = Settings {
        mypy_command: "\"unterminated".to_string(),
        ..Settings::default()
    };
    assert!(matches!(
        EffectiveConfig::from_settings(&bad),
        Err(ConfigError::InvalidCommand { .. })
    ));

    let empty = Settings {
        mypy_command: String::new(),
        ..Settings::default()
    };
    assert!(matches!(
        EffectiveConfig::from_settings(&empty),
        Err(ConfigError::EmptyCommand)
    ));
}

#[test]
fn test_project_mypypath_is_prepended() {
    let mut config = EffectiveConfig::from_settings(&settings()).unwrap();
    let doc = IniDocument::parse("[mypy_lint]\nmypypath = stubs\n");

    config.apply_project_config(PathBuf::from("/p/mypy.ini"), &doc);

    assert_eq!(
        config.extra_env_path,
        format!("stubs{SEARCH_PATH_SEPARATOR}/global/stubs")
    );
    assert_eq!(config.config_file, Some(PathBuf::from("/p/mypy.ini")));
    assert!(config.incremental);
}

#[test]
fn test_project_mypypath_with_empty_global() {
    let mut config = EffectiveConfig::from_settings(&Settings::default()).unwrap();
    let doc = IniDocument::parse("[mypy_lint]\nmypypath = stubs\n");

    config.apply_project_config(PathBuf::from("/p/mypy.ini"), &doc);

    assert_eq!(config.extra_env_path, "stubs");
}

#[test]
fn test_checker_incremental_key_disables_incremental() {
    for value in ["True", "False", ""] {
        let mut config = EffectiveConfig::from_settings(&settings()).unwrap();
        let doc = IniDocument::parse(&format!("[mypy]\nincremental = {value}\n"));
        config.apply_project_config(PathBuf::from("/p/setup.cfg"), &doc);
        assert!(!config.incremental, "incremental = {value}");
    }
}

#[test]
fn test_plugin_incremental_key_is_not_an_override() {
    let mut config = EffectiveConfig::from_settings(&settings()).unwrap();
    let doc = IniDocument::parse("[mypy_lint]\nincremental = False\n");
    config.apply_project_config(PathBuf::from("/p/setup.cfg"), &doc);
    assert!(config.incremental);
}

#[tokio::test]
async fn test_resolve_reads_nearest_config() {
    let root = tempfile::tempdir().unwrap();
    let pkg = root.path().join("pkg");
    fs::create_dir(&pkg).unwrap();
    fs::write(
        root.path().join("mypy.ini"),
        "[mypy]\nincremental = True\n[mypy_lint]\nmypypath = typings\n",
    )
    .unwrap();

    let resolver = ConfigResolver::default();
    let config = resolver
        .resolve(&settings(), &pkg.join("mod.py"))
        .await
        .unwrap();

    assert_eq!(config.config_file, Some(root.path().join("mypy.ini")));
    assert!(!config.incremental);
    assert!(config.extra_env_path.starts_with("typings"));
}

#[tokio::test]
async fn test_resolve_without_config_file() {
    let root = tempfile::tempdir().unwrap();
    let resolver = ConfigResolver::new(ConfigFinder::new(&["mypy_lint_absent.ini"]));

    let config = resolver
        .resolve(&settings(), &root.path().join("mod.py"))
        .await
        .unwrap();

    assert_eq!(config, EffectiveConfig::from_settings(&settings()).unwrap());
}

#[test]
fn test_working_directory_prefers_config_file() {
    let roots = WorkspaceRoots::new([PathBuf::from("/work")]);
    let config = config_with(Some("/work/pkg/mypy.ini"), "cache");
    assert_eq!(
        choose_working_directory(&config, Path::new("/work/pkg/sub/a.py"), &roots),
        PathBuf::from("/work/pkg")
    );
}

#[test]
fn test_working_directory_falls_back_to_project_root() {
    let roots = WorkspaceRoots::new([PathBuf::from("/work")]);
    let config = config_with(None, "cache");
    assert_eq!(
        choose_working_directory(&config, Path::new("/work/pkg/a.py"), &roots),
        PathBuf::from("/work")
    );
}

#[test]
fn test_working_directory_falls_back_to_file_directory() {
    let config = config_with(None, "cache");
    assert_eq!(
        choose_working_directory(&config, Path::new("/loose/a.py"), &WorkspaceRoots::default()),
        PathBuf::from("/loose")
    );
}

#[test]
fn test_cache_directory_relative_unchanged() {
    let config = config_with(None, ".mypy_cache");
    assert_eq!(
        choose_cache_directory(&config, Path::new("/work")).unwrap(),
        PathBuf::from(".mypy_cache")
    );
}

#[test]
fn test_cache_directory_absolute_gets_project_subdirectory() {
    let config = config_with(None, "/var/cache/mypy-lint");
    let dir = choose_cache_directory(&config, Path::new("/home/me/proj")).unwrap();

    assert_eq!(dir.parent(), Some(Path::new("/var/cache/mypy-lint")));
    let name = dir.file_name().unwrap().to_str().unwrap();
    let hash = name.strip_prefix("proj-").unwrap();
    assert_eq!(hash.len(), 32);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_cache_directory_empty_template() {
    let config = config_with(None, "");
    assert!(matches!(
        choose_cache_directory(&config, Path::new("/work")),
        Err(ConfigError::EmptyCacheDirectory)
    ));
}

#[test]
fn test_project_cache_subdirectory_known_digest() {
    assert_eq!(
        project_cache_subdirectory(Path::new("a")),
        "a-0cc175b9c0f1b6a831c399e269772661"
    );
}

proptest! {
    #[test]
    fn prop_cache_subdirectory_deterministic_and_distinct(
        a in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        b in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
    ) {
        let first = project_cache_subdirectory(Path::new(&a));
        prop_assert_eq!(&first, &project_cache_subdirectory(Path::new(&a)));
        if a != b {
            prop_assert_ne!(first, project_cache_subdirectory(Path::new(&b)));
        }
    }
}
