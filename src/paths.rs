//! XDG-compliant data paths.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "mrello";

/// Data directory: `$XDG_DATA_HOME/mrello`, or `~/.local/share/mrello`.
///
/// Falls back to the working directory when neither `XDG_DATA_HOME` nor
/// `HOME` is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share"))
        })
        .unwrap_or_else(|| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Default database file: `<data_dir>/mrello.db`.
pub fn get_db_path() -> PathBuf {
    get_data_dir().join("mrello.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn data_dir_ends_with_app_name() {
        assert!(get_data_dir().ends_with("mrello"));
    }

    #[test]
    #[serial]
    fn db_path_lives_in_data_dir() {
        assert!(get_db_path().ends_with("mrello/mrello.db"));
    }

    #[test]
    #[serial]
    fn xdg_data_home_is_respected() {
        let previous = env::var("XDG_DATA_HOME").ok();
        unsafe {
            env::set_var("XDG_DATA_HOME", "/tmp/xdg-mrello-test");
        }

        assert_eq!(get_data_dir(), PathBuf::from("/tmp/xdg-mrello-test/mrello"));

        // Cleanup
        unsafe {
            match previous {
                Some(v) => env::set_var("XDG_DATA_HOME", v),
                None => env::remove_var("XDG_DATA_HOME"),
            }
        }
    }
}
