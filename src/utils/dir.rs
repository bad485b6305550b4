use std::{env, io, path::PathBuf};

use anyhow::Result;

/// Resolves the directory session records and logs live in. An explicit
/// override comes from the `--dir` flag.
pub fn application_data_path(dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match dir {
        Some(dir) => dir,
        None => default_path(),
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

fn default_path() -> PathBuf {
    #[cfg(windows)]
    {
        let mut path =
            PathBuf::from(env::var("APPDATA").expect("APPDATA should be present on Windows"));
        path.push("tomatick");
        path
    }
    #[cfg(not(windows))]
    {
        let mut path = env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                env::var("HOME").map(|home| {
                    let mut path = PathBuf::from(home);
                    path.push(".local/state");
                    path
                })
            })
            .expect("Couldn't find neither XDG_STATE_HOME nor HOME");
        path.push("tomatick");
        path
    }
}
