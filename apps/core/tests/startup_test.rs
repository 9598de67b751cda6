use glint_core::startup;

#[test]
fn startup_command_quotes_the_executable_path() {
    let path = std::env::temp_dir().join(format!(
        "glint-startuptest-{}.exe",
        std::process::id()
    ));
    std::fs::write(&path, b"stub").unwrap();

    let command = startup::startup_command(&path).unwrap();
    assert!(command.starts_with('"'));
    assert!(command.ends_with(startup::STARTUP_ARG));
    assert!(command.contains(&*path.to_string_lossy()));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn startup_command_rejects_missing_executable() {
    let missing = std::path::Path::new("/definitely/not/here/glint.exe");
    assert!(matches!(
        startup::startup_command(missing),
        Err(startup::StartupError::InvalidExecutable(_))
    ));
    assert!(matches!(
        startup::startup_command(std::path::Path::new("")),
        Err(startup::StartupError::InvalidExecutable(_))
    ));
}

#[cfg(not(target_os = "windows"))]
#[test]
fn registry_operations_report_unsupported_platform_off_windows() {
    assert!(matches!(
        startup::is_enabled(),
        Err(startup::StartupError::UnsupportedPlatform)
    ));
    assert!(matches!(
        startup::set_enabled(false, std::path::Path::new("/tmp/glint")),
        Err(startup::StartupError::UnsupportedPlatform)
    ));
    assert!(matches!(
        startup::sync_with_config(true, std::path::Path::new("/tmp/glint")),
        Err(startup::StartupError::UnsupportedPlatform)
    ));
}
