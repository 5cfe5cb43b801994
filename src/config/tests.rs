use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadence_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", "/tmp/cadence-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/cadence-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadence")
            .join("config.toml")
    );
}

#[test]
fn default_state_dir_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_state_dir().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/cadence")
    );
}

#[test]
fn defaults_match_the_player_defaults() {
    let s = Settings::default();
    assert_eq!(s.audio.volume, 100);
    assert_eq!(s.audio.speed, None);
    assert_eq!(s.library.dir, PathBuf::from("music"));
    assert!(!s.library.include_hidden);
    assert_eq!(s.ui.progress_refresh_ms, 1000);
    assert_eq!(s.controls.volume_step, 5);
    assert!(!s.playback.auto_advance);
    assert_eq!(s.log.level, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults_for_missing_keys() {
    let s: Settings = toml::from_str(
        r#"
[audio]
speed = "150%"

[library]
extensions = ["mp3"]
"#,
    )
    .unwrap();

    assert_eq!(s.audio.speed.as_deref(), Some("150%"));
    assert_eq!(s.audio.volume, 100);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.library.dir, PathBuf::from("music"));
    assert_eq!(s.ui.progress_refresh_ms, 1000);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.ui.progress_refresh_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 40
speed = "75%"

[library]
dir = "/srv/music"
extensions = ["flac"]
include_hidden = true

[ui]
header_text = "hello"
progress_refresh_ms = 250

[controls]
volume_step = 10

[playback]
auto_advance = true

[log]
level = "debug"
dir = "/tmp/cadence-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENCE__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 40);
    assert_eq!(s.audio.speed.as_deref(), Some("75%"));
    assert_eq!(s.library.dir, PathBuf::from("/srv/music"));
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(s.library.include_hidden);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.progress_refresh_ms, 250);
    assert_eq!(s.controls.volume_step, 10);
    assert!(s.playback.auto_advance);
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.dir, Some(PathBuf::from("/tmp/cadence-logs")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENCE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENCE__AUDIO__VOLUME", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 30);
}
