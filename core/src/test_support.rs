use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "Geolife trajectory\nWGS 84\nAltitude is in Feet\nReserved 3\n0,2,255,My Track,0,0,2,8421376\n0\n";

/// Creates `<root>/<user>/Trajectory` and returns its path.
pub fn trajectory_dir(root: &Path, user: &str) -> PathBuf {
    let dir = root.join(user).join("Trajectory");
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Builds a data line for the given fix; `at` is `"YYYY-MM-DD hh:mm:ss"`.
pub fn data_line(latitude: f64, longitude: f64, at: &str) -> String {
    let (date, time) = at.split_once(' ').unwrap();
    format!("{},{},0,100,39744.0,{},{}", latitude, longitude, date, time)
}

/// Writes a PLT file with the canonical header followed by `lines`.
pub fn write_plt(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let mut contents = HEADER.to_string();
    for line in lines {
        contents.push_str(line);
        contents.push_str("\r\n");
    }
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
