use std::path::Path;

/// Render a path for display, abbreviating the home directory to `~`
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use botanix::utils::format_path_with_tilde;
///
/// // "~/.local/share/botanix" when the home directory is /home/alice
/// let shown = format_path_with_tilde(Path::new("/home/alice/.local/share/botanix"));
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    abbreviate_home(path, dirs::home_dir().as_deref())
}

fn abbreviate_home(path: &Path, home: Option<&Path>) -> String {
    // strip_prefix matches whole components, so /home/al never abbreviates /home/alice
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
